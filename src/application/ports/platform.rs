//! Notification platform port interface

use thiserror::Error;

use crate::domain::toast::{DismissalReason, FileTime, TemplateKind};

use super::document::ToastDocument;

/// Generic failure status used by adapters that have no native code
pub const E_FAIL: i32 = 0x8000_4005_u32 as i32;

/// A failed platform call.
///
/// `code` carries the native status (an HRESULT on Windows).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (0x{code:08X})")]
pub struct PlatformError {
    pub code: i32,
    pub message: String,
}

impl PlatformError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// A generic failure with no native status
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(E_FAIL, message)
    }
}

/// Activation callback. Receives the raw argument payload, if any.
pub type ActivatedCallback = Box<dyn Fn(Option<String>) + Send + Sync + 'static>;

/// Dismissal callback. Receives the reason exactly as the platform reports it.
pub type DismissedCallback = Box<dyn Fn(DismissalReason) + Send + Sync + 'static>;

/// Failure callback
pub type FailedCallback = Box<dyn Fn() + Send + Sync + 'static>;

/// Port for the host notification service.
///
/// Every method maps onto one platform call. Callers decide how a failure
/// is reported; adapters never retry.
pub trait ToastPlatform {
    /// Blank template document, mutated before a notification is built
    type Document: ToastDocument;

    /// Live notification handle, shared with the platform display
    type Notification: Clone;

    /// Notifier scoped to one application identity
    type Notifier: ToastNotifier<Notification = Self::Notification>;

    /// Whether the host can display toasts at all
    fn is_compatible(&self) -> bool;

    /// Whether actions, audio, attribution and duration are honored
    fn supports_modern_features(&self) -> bool;

    /// Initialize the process-wide runtime.
    ///
    /// # Returns
    /// `Ok(true)` when this call took a reference that must be released
    /// with [`ToastPlatform::uninitialize_runtime`], `Ok(false)` when the
    /// runtime was already usable.
    fn initialize_runtime(&self) -> Result<bool, PlatformError>;

    /// Release the reference taken by a successful `initialize_runtime`
    fn uninitialize_runtime(&self);

    /// Register the application user model id with the shell
    fn register_app_user_model_id(&self, aumi: &str) -> Result<(), PlatformError>;

    /// Resolve the notification manager and a notifier for `aumi`
    fn notifier(&self, aumi: &str) -> Result<Self::Notifier, PlatformError>;

    /// Fetch the blank document for a layout
    fn template_content(&self, kind: TemplateKind) -> Result<Self::Document, PlatformError>;

    /// Build a live notification from a finished document
    fn create_notification(
        &self,
        document: &Self::Document,
    ) -> Result<Self::Notification, PlatformError>;

    /// Attach an absolute expiration time
    fn set_expiration(
        &self,
        notification: &Self::Notification,
        expires_at: FileTime,
    ) -> Result<(), PlatformError>;

    fn on_activated(
        &self,
        notification: &Self::Notification,
        callback: ActivatedCallback,
    ) -> Result<(), PlatformError>;

    fn on_dismissed(
        &self,
        notification: &Self::Notification,
        callback: DismissedCallback,
    ) -> Result<(), PlatformError>;

    fn on_failed(
        &self,
        notification: &Self::Notification,
        callback: FailedCallback,
    ) -> Result<(), PlatformError>;
}

/// Port for showing and retracting notifications of one application
pub trait ToastNotifier {
    type Notification;

    /// Request display
    fn show(&self, notification: &Self::Notification) -> Result<(), PlatformError>;

    /// Retract a displayed notification
    fn hide(&self, notification: &Self::Notification) -> Result<(), PlatformError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_includes_hex_code() {
        let err = PlatformError::failed("Show failed");
        assert_eq!(err.to_string(), "Show failed (0x80004005)");
        assert_eq!(err.code, E_FAIL);
    }
}
