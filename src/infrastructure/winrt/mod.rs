//! Windows Runtime notification adapter
//!
//! Talks to `Windows.UI.Notifications` through the `windows` crate.

mod document;
mod platform;

pub use document::WinRtDocument;
pub use platform::{WinRtNotifier, WinRtPlatform};

use crate::application::ports::PlatformError;

impl From<windows::core::Error> for PlatformError {
    fn from(error: windows::core::Error) -> Self {
        PlatformError::new(error.code().0, error.message().to_string())
    }
}
