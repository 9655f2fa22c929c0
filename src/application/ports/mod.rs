//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod clock;
pub mod config;
pub mod document;
pub mod platform;

// Re-export common types
pub use clock::Clock;
pub use config::ConfigStore;
pub use document::ToastDocument;
pub use platform::{
    ActivatedCallback, DismissedCallback, FailedCallback, PlatformError, ToastNotifier,
    ToastPlatform, E_FAIL,
};
