//! In-process notification platform
//!
//! Backs the test suite and the `preview` command, which renders the
//! materialized document without a notification service.

mod document;
mod platform;

pub use document::MemoryDocument;
pub use platform::{FailurePoint, MemoryNotification, MemoryNotifier, MemoryPlatform};
