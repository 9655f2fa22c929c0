//! In-memory notification platform
//!
//! Records every call, lets tests inject failures at any step, and lets
//! them fire the registered callbacks directly instead of waiting on a
//! real display.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::application::ports::{
    ActivatedCallback, DismissedCallback, FailedCallback, PlatformError, ToastDocument,
    ToastNotifier, ToastPlatform,
};
use crate::domain::toast::{DismissalReason, FileTime, TemplateKind};

use super::document::MemoryDocument;

/// Platform step that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailurePoint {
    RuntimeInit,
    AppUserModelId,
    Notifier,
    TemplateContent,
    DocumentEdit,
    CreateNotification,
    Expiration,
    ActivatedHandler,
    DismissedHandler,
    FailedHandler,
    Show,
    Hide,
}

type ShowHook = Arc<dyn Fn(&MemoryNotification) + Send + Sync>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct Callbacks {
    activated: Option<ActivatedCallback>,
    dismissed: Option<DismissedCallback>,
    failed: Option<FailedCallback>,
}

struct NotificationInner {
    serial: u64,
    xml: String,
    expiration: Mutex<Option<FileTime>>,
    callbacks: Mutex<Callbacks>,
}

/// Live notification built by [`MemoryPlatform`]
#[derive(Clone)]
pub struct MemoryNotification {
    inner: Arc<NotificationInner>,
}

impl MemoryNotification {
    /// Creation order, starting at 1
    pub fn serial(&self) -> u64 {
        self.inner.serial
    }

    /// The document the notification was built from
    pub fn xml(&self) -> &str {
        &self.inner.xml
    }

    pub fn expiration(&self) -> Option<FileTime> {
        *lock(&self.inner.expiration)
    }

    /// Deliver an activation with the given argument payload.
    ///
    /// Returns false when no activation callback is registered.
    pub fn activate(&self, arguments: Option<&str>) -> bool {
        let callbacks = lock(&self.inner.callbacks);
        match callbacks.activated.as_ref() {
            Some(callback) => {
                callback(arguments.map(str::to_string));
                true
            }
            None => false,
        }
    }

    /// Deliver a dismissal as the platform would report it
    pub fn dismiss(&self, reason: DismissalReason) -> bool {
        let callbacks = lock(&self.inner.callbacks);
        match callbacks.dismissed.as_ref() {
            Some(callback) => {
                callback(reason);
                true
            }
            None => false,
        }
    }

    /// Deliver a display failure
    pub fn fail(&self) -> bool {
        let callbacks = lock(&self.inner.callbacks);
        match callbacks.failed.as_ref() {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for MemoryNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryNotification")
            .field("serial", &self.inner.serial)
            .field("xml", &self.inner.xml)
            .finish_non_exhaustive()
    }
}

struct MemoryState {
    compatible: bool,
    modern: bool,
    failures: HashSet<FailurePoint>,
    failing_hides: HashSet<u64>,
    runtime_refs: i32,
    app_id: Option<String>,
    next_serial: u64,
    displayed: Vec<MemoryNotification>,
    hidden: Vec<u64>,
    show_hook: Option<ShowHook>,
}

impl MemoryState {
    fn check(&self, point: FailurePoint) -> Result<(), PlatformError> {
        if self.failures.contains(&point) {
            return Err(PlatformError::failed(format!("Injected failure at {:?}", point)));
        }
        Ok(())
    }
}

/// Notification platform that lives entirely in process.
///
/// Clones share state, so a test can keep one handle while the service
/// owns another.
#[derive(Clone)]
pub struct MemoryPlatform {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryPlatform {
    /// A host with full toast support
    pub fn new() -> Self {
        Self::with_capabilities(true, true)
    }

    /// A host that shows toasts but ignores actions, audio, attribution and duration
    pub fn legacy() -> Self {
        Self::with_capabilities(true, false)
    }

    /// A host without toast support
    pub fn unsupported() -> Self {
        Self::with_capabilities(false, false)
    }

    fn with_capabilities(compatible: bool, modern: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                compatible,
                modern,
                failures: HashSet::new(),
                failing_hides: HashSet::new(),
                runtime_refs: 0,
                app_id: None,
                next_serial: 1,
                displayed: Vec::new(),
                hidden: Vec::new(),
                show_hook: None,
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        lock(&self.state)
    }

    /// Make every future call at `point` fail
    pub fn fail_at(&self, point: FailurePoint) {
        self.state().failures.insert(point);
    }

    pub fn clear_failure(&self, point: FailurePoint) {
        self.state().failures.remove(&point);
    }

    /// Make retracting this one notification fail
    pub fn fail_hide_of(&self, notification: &MemoryNotification) {
        self.state().failing_hides.insert(notification.serial());
    }

    /// Run `hook` inside every successful display request
    pub fn set_show_hook(&self, hook: impl Fn(&MemoryNotification) + Send + Sync + 'static) {
        self.state().show_hook = Some(Arc::new(hook));
    }

    /// Notifications currently on screen, in display order
    pub fn displayed(&self) -> Vec<MemoryNotification> {
        self.state().displayed.clone()
    }

    /// Serials of notifications retracted so far
    pub fn hidden(&self) -> Vec<u64> {
        self.state().hidden.clone()
    }

    /// Outstanding runtime references taken through this platform
    pub fn runtime_refs(&self) -> i32 {
        self.state().runtime_refs
    }

    /// The last registered application user model id
    pub fn registered_app_id(&self) -> Option<String> {
        self.state().app_id.clone()
    }
}

impl Default for MemoryPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("MemoryPlatform")
            .field("compatible", &state.compatible)
            .field("modern", &state.modern)
            .field("displayed", &state.displayed.len())
            .finish_non_exhaustive()
    }
}

impl ToastPlatform for MemoryPlatform {
    type Document = MemoryDocument;
    type Notification = MemoryNotification;
    type Notifier = MemoryNotifier;

    fn is_compatible(&self) -> bool {
        self.state().compatible
    }

    fn supports_modern_features(&self) -> bool {
        self.state().modern
    }

    fn initialize_runtime(&self) -> Result<bool, PlatformError> {
        let mut state = self.state();
        state.check(FailurePoint::RuntimeInit)?;
        state.runtime_refs += 1;
        Ok(true)
    }

    fn uninitialize_runtime(&self) {
        self.state().runtime_refs -= 1;
    }

    fn register_app_user_model_id(&self, aumi: &str) -> Result<(), PlatformError> {
        let mut state = self.state();
        state.check(FailurePoint::AppUserModelId)?;
        if aumi.is_empty() {
            return Err(PlatformError::failed("Empty application user model id"));
        }
        state.app_id = Some(aumi.to_string());
        Ok(())
    }

    fn notifier(&self, _aumi: &str) -> Result<MemoryNotifier, PlatformError> {
        self.state().check(FailurePoint::Notifier)?;
        Ok(MemoryNotifier {
            state: Arc::clone(&self.state),
        })
    }

    fn template_content(&self, kind: TemplateKind) -> Result<MemoryDocument, PlatformError> {
        let state = self.state();
        state.check(FailurePoint::TemplateContent)?;
        let document = MemoryDocument::for_template(kind);
        if state.failures.contains(&FailurePoint::DocumentEdit) {
            return Ok(document.read_only());
        }
        Ok(document)
    }

    fn create_notification(
        &self,
        document: &MemoryDocument,
    ) -> Result<MemoryNotification, PlatformError> {
        let mut state = self.state();
        state.check(FailurePoint::CreateNotification)?;
        let serial = state.next_serial;
        state.next_serial += 1;

        Ok(MemoryNotification {
            inner: Arc::new(NotificationInner {
                serial,
                xml: document.to_xml()?,
                expiration: Mutex::new(None),
                callbacks: Mutex::new(Callbacks::default()),
            }),
        })
    }

    fn set_expiration(
        &self,
        notification: &MemoryNotification,
        expires_at: FileTime,
    ) -> Result<(), PlatformError> {
        self.state().check(FailurePoint::Expiration)?;
        *lock(&notification.inner.expiration) = Some(expires_at);
        Ok(())
    }

    fn on_activated(
        &self,
        notification: &MemoryNotification,
        callback: ActivatedCallback,
    ) -> Result<(), PlatformError> {
        self.state().check(FailurePoint::ActivatedHandler)?;
        lock(&notification.inner.callbacks).activated = Some(callback);
        Ok(())
    }

    fn on_dismissed(
        &self,
        notification: &MemoryNotification,
        callback: DismissedCallback,
    ) -> Result<(), PlatformError> {
        self.state().check(FailurePoint::DismissedHandler)?;
        lock(&notification.inner.callbacks).dismissed = Some(callback);
        Ok(())
    }

    fn on_failed(
        &self,
        notification: &MemoryNotification,
        callback: FailedCallback,
    ) -> Result<(), PlatformError> {
        self.state().check(FailurePoint::FailedHandler)?;
        lock(&notification.inner.callbacks).failed = Some(callback);
        Ok(())
    }
}

/// Notifier handed out by [`MemoryPlatform`]
pub struct MemoryNotifier {
    state: Arc<Mutex<MemoryState>>,
}

impl ToastNotifier for MemoryNotifier {
    type Notification = MemoryNotification;

    fn show(&self, notification: &MemoryNotification) -> Result<(), PlatformError> {
        let hook = {
            let mut state = lock(&self.state);
            state.check(FailurePoint::Show)?;
            state.displayed.push(notification.clone());
            state.show_hook.clone()
        };

        // Hooks may call back into the service, so the state lock is released first.
        if let Some(hook) = hook {
            hook(notification);
        }
        Ok(())
    }

    fn hide(&self, notification: &MemoryNotification) -> Result<(), PlatformError> {
        let mut state = lock(&self.state);
        state.check(FailurePoint::Hide)?;
        let serial = notification.serial();
        if state.failing_hides.contains(&serial) {
            return Err(PlatformError::failed(format!(
                "Injected hide failure for notification {}",
                serial
            )));
        }
        state.displayed.retain(|shown| shown.serial() != serial);
        state.hidden.push(serial);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[test]
    fn capabilities() {
        assert!(MemoryPlatform::new().supports_modern_features());
        assert!(MemoryPlatform::legacy().is_compatible());
        assert!(!MemoryPlatform::legacy().supports_modern_features());
        assert!(!MemoryPlatform::unsupported().is_compatible());
    }

    #[test]
    fn injected_failures_are_reported_once_set() {
        let platform = MemoryPlatform::new();
        assert!(platform.notifier("App").is_ok());
        platform.fail_at(FailurePoint::Notifier);
        assert!(platform.notifier("App").is_err());
        platform.clear_failure(FailurePoint::Notifier);
        assert!(platform.notifier("App").is_ok());
    }

    #[test]
    fn show_and_hide_track_display() {
        let platform = MemoryPlatform::new();
        let doc = platform.template_content(TemplateKind::Text01).unwrap();
        let notification = platform.create_notification(&doc).unwrap();
        let notifier = platform.notifier("App").unwrap();

        notifier.show(&notification).unwrap();
        assert_eq!(platform.displayed().len(), 1);

        notifier.hide(&notification).unwrap();
        assert!(platform.displayed().is_empty());
        assert_eq!(platform.hidden(), vec![notification.serial()]);
    }

    #[test]
    fn callbacks_fire_only_when_registered() {
        let platform = MemoryPlatform::new();
        let doc = platform.template_content(TemplateKind::Text01).unwrap();
        let notification = platform.create_notification(&doc).unwrap();
        assert!(!notification.activate(Some("1")));

        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        platform
            .on_activated(
                &notification,
                Box::new(move |args| {
                    assert_eq!(args.as_deref(), Some("1"));
                    flag.store(true, Ordering::SeqCst);
                }),
            )
            .unwrap();

        assert!(notification.activate(Some("1")));
        assert!(fired.load(Ordering::SeqCst));
    }

    #[test]
    fn runtime_refs_balance() {
        let platform = MemoryPlatform::new();
        assert!(platform.initialize_runtime().unwrap());
        assert_eq!(platform.runtime_refs(), 1);
        platform.uninitialize_runtime();
        assert_eq!(platform.runtime_refs(), 0);
    }
}
