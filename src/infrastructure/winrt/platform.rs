//! WinRT toast notification platform

use windows::core::{IInspectable, Interface, HSTRING};
use windows::Foundation::{DateTime, IReference, PropertyValue, TypedEventHandler};
use windows::UI::Notifications::{
    ToastActivatedEventArgs, ToastDismissedEventArgs, ToastFailedEventArgs, ToastNotification,
    ToastNotificationManager, ToastNotifier as WinToastNotifier, ToastTemplateType,
};
use windows::Wdk::System::SystemServices::RtlGetVersion;
use windows::Win32::Foundation::{E_POINTER, RPC_E_CHANGED_MODE};
use windows::Win32::System::Com::{
    CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED, COINIT_DISABLE_OLE1DDE,
};
use windows::Win32::System::SystemInformation::OSVERSIONINFOW;
use windows::Win32::UI::Shell::SetCurrentProcessExplicitAppUserModelID;

use crate::application::ports::{
    ActivatedCallback, DismissedCallback, FailedCallback, PlatformError, ToastNotifier,
    ToastPlatform,
};
use crate::domain::toast::{DismissalReason, FileTime, TemplateKind};

use super::document::WinRtDocument;

/// Windows 8 is the first release with toast notifications
const MIN_TOAST_VERSION: (u32, u32) = (6, 2);

/// Windows 10 adds actions, audio, attribution and duration
const MIN_MODERN_VERSION: (u32, u32) = (10, 0);

/// Real OS version, unaffected by compatibility manifests
fn os_version() -> Option<(u32, u32)> {
    let mut info = OSVERSIONINFOW {
        dwOSVersionInfoSize: std::mem::size_of::<OSVERSIONINFOW>() as u32,
        ..Default::default()
    };
    let status = unsafe { RtlGetVersion(&mut info) };
    status
        .is_ok()
        .then_some((info.dwMajorVersion, info.dwMinorVersion))
}

/// Map a raw `ToastDismissalReason`; values outside the known set are logged and dropped
fn dismissal_reason(raw: i32) -> Option<DismissalReason> {
    let reason = DismissalReason::from_platform(raw);
    if reason.is_none() {
        tracing::debug!(raw, "Unknown toast dismissal reason");
    }
    reason
}

/// Notification platform backed by `Windows.UI.Notifications`
#[derive(Debug, Clone, Copy, Default)]
pub struct WinRtPlatform;

impl WinRtPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl ToastPlatform for WinRtPlatform {
    type Document = WinRtDocument;
    type Notification = ToastNotification;
    type Notifier = WinRtNotifier;

    fn is_compatible(&self) -> bool {
        os_version().is_some_and(|version| version >= MIN_TOAST_VERSION)
    }

    fn supports_modern_features(&self) -> bool {
        os_version().is_some_and(|version| version >= MIN_MODERN_VERSION)
    }

    fn initialize_runtime(&self) -> Result<bool, PlatformError> {
        let result =
            unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED | COINIT_DISABLE_OLE1DDE) };
        // Already initialized with another apartment model: usable, but not ours to release
        if result == RPC_E_CHANGED_MODE {
            return Ok(false);
        }
        result.ok()?;
        Ok(true)
    }

    fn uninitialize_runtime(&self) {
        unsafe { CoUninitialize() };
    }

    fn register_app_user_model_id(&self, aumi: &str) -> Result<(), PlatformError> {
        unsafe { SetCurrentProcessExplicitAppUserModelID(&HSTRING::from(aumi))? };
        Ok(())
    }

    fn notifier(&self, aumi: &str) -> Result<WinRtNotifier, PlatformError> {
        let notifier = ToastNotificationManager::CreateToastNotifierWithId(&HSTRING::from(aumi))?;
        Ok(WinRtNotifier { notifier })
    }

    fn template_content(&self, kind: TemplateKind) -> Result<WinRtDocument, PlatformError> {
        let document =
            ToastNotificationManager::GetTemplateContent(ToastTemplateType(kind.platform_id()))?;
        Ok(WinRtDocument::new(document))
    }

    fn create_notification(
        &self,
        document: &WinRtDocument,
    ) -> Result<ToastNotification, PlatformError> {
        Ok(ToastNotification::CreateToastNotification(document.inner())?)
    }

    fn set_expiration(
        &self,
        notification: &ToastNotification,
        expires_at: FileTime,
    ) -> Result<(), PlatformError> {
        let value = PropertyValue::CreateDateTime(DateTime {
            UniversalTime: expires_at.ticks(),
        })?;
        let reference: IReference<DateTime> = value.cast()?;
        notification.SetExpirationTime(&reference)?;
        Ok(())
    }

    fn on_activated(
        &self,
        notification: &ToastNotification,
        callback: ActivatedCallback,
    ) -> Result<(), PlatformError> {
        let handler = TypedEventHandler::<ToastNotification, IInspectable>::new(
            move |_, args: &Option<IInspectable>| {
                let arguments = match args {
                    Some(args) => Some(
                        args.cast::<ToastActivatedEventArgs>()?
                            .Arguments()?
                            .to_string(),
                    ),
                    None => None,
                };
                callback(arguments);
                Ok(())
            },
        );
        notification.Activated(&handler)?;
        Ok(())
    }

    fn on_dismissed(
        &self,
        notification: &ToastNotification,
        callback: DismissedCallback,
    ) -> Result<(), PlatformError> {
        let handler = TypedEventHandler::<ToastNotification, ToastDismissedEventArgs>::new(
            move |_, args: &Option<ToastDismissedEventArgs>| {
                let args = args
                    .as_ref()
                    .ok_or_else(|| windows::core::Error::from(E_POINTER))?;
                if let Some(reason) = dismissal_reason(args.Reason()?.0) {
                    callback(reason);
                }
                Ok(())
            },
        );
        notification.Dismissed(&handler)?;
        Ok(())
    }

    fn on_failed(
        &self,
        notification: &ToastNotification,
        callback: FailedCallback,
    ) -> Result<(), PlatformError> {
        let handler = TypedEventHandler::<ToastNotification, ToastFailedEventArgs>::new(
            move |_, _| {
                callback();
                Ok(())
            },
        );
        notification.Failed(&handler)?;
        Ok(())
    }
}

/// Notifier for one application user model id
pub struct WinRtNotifier {
    notifier: WinToastNotifier,
}

impl ToastNotifier for WinRtNotifier {
    type Notification = ToastNotification;

    fn show(&self, notification: &ToastNotification) -> Result<(), PlatformError> {
        self.notifier.Show(notification)?;
        Ok(())
    }

    fn hide(&self, notification: &ToastNotification) -> Result<(), PlatformError> {
        self.notifier.Hide(notification)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use windows::UI::Notifications::ToastDismissalReason;

    use super::*;

    #[test]
    fn dismissal_reason_maps_known_values() {
        assert_eq!(
            dismissal_reason(ToastDismissalReason::UserCanceled.0),
            Some(DismissalReason::UserCanceled)
        );
        assert_eq!(
            dismissal_reason(ToastDismissalReason::ApplicationHidden.0),
            Some(DismissalReason::ApplicationHidden)
        );
        assert_eq!(
            dismissal_reason(ToastDismissalReason::TimedOut.0),
            Some(DismissalReason::TimedOut)
        );
    }

    #[test]
    fn dismissal_reason_drops_unknown_values() {
        assert_eq!(dismissal_reason(3), None);
        assert_eq!(dismissal_reason(-1), None);
    }
}
