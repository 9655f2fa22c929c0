//! Domain layer - Core toast model
//!
//! Contains value objects, identifiers, events and domain errors.
//! This layer has no dependencies on the notification platform.

pub mod config;
pub mod error;
pub mod toast;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use toast::{
    AudioOption, AudioSystemFile, DismissalReason, FileTime, TemplateKind, ToastDuration,
    ToastEvent, ToastId, ToastTemplate,
};
