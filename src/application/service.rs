//! Toast service facade
//!
//! Gates every operation behind the compatibility and initialization
//! checks, drives the materializer, and keeps the registry of shown
//! notifications so they can be hidden or cleared later.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use crate::domain::error::ToastError;
use crate::domain::toast::{ToastId, ToastTemplate};

use super::dispatch::{Thunks, ToastHandler};
use super::materializer;
use super::ports::{Clock, PlatformError, ToastNotifier, ToastPlatform};

/// Log a failed platform step and fold it into `mapped`
fn platform_failure(step: &'static str, error: PlatformError, mapped: ToastError) -> ToastError {
    tracing::warn!(step, error = %error, code = mapped.as_str(), "Platform call failed");
    mapped
}

/// Facade over the notification platform for one application identity.
///
/// All operations are synchronous. Callbacks registered by
/// [`ToastService::show_toast`] fire later on platform threads; the
/// registry lock is never held across a platform call, so they may call
/// back into the service.
///
/// A runtime reference taken by [`ToastService::initialize`] belongs to the
/// calling thread's apartment. Drop the service on that same thread; a drop
/// anywhere else leaves the reference in place and logs a warning.
pub struct ToastService<P: ToastPlatform> {
    platform: P,
    clock: Arc<dyn Clock>,
    app_id: String,
    initialized: AtomicBool,
    /// Thread that owns the runtime reference, if one was taken
    runtime_owner: Mutex<Option<ThreadId>>,
    registry: Mutex<HashMap<ToastId, P::Notification>>,
}

impl<P: ToastPlatform> ToastService<P> {
    /// Create an uninitialized service
    ///
    /// # Arguments
    /// * `platform` - The notification platform adapter
    /// * `app_id` - Application user model id that scopes every toast
    /// * `clock` - Source of platform time for expiration handling
    pub fn new(platform: P, app_id: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            platform,
            clock,
            app_id: app_id.into(),
            initialized: AtomicBool::new(false),
            runtime_owner: Mutex::new(None),
            registry: Mutex::new(HashMap::new()),
        }
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<ToastId, P::Notification>> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn runtime_owner(&self) -> MutexGuard<'_, Option<ThreadId>> {
        self.runtime_owner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether the host can display toasts. Usable before `initialize`.
    pub fn is_compatible(&self) -> bool {
        self.platform.is_compatible()
    }

    /// Whether actions, audio, attribution and duration are supported
    pub fn supports_modern_features(&self) -> bool {
        self.platform.supports_modern_features()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn app_user_model_id(&self) -> &str {
        &self.app_id
    }

    /// The underlying platform adapter
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Whether `id` refers to a toast that is shown and not yet hidden
    pub fn is_registered(&self, id: ToastId) -> bool {
        self.registry().contains_key(&id)
    }

    /// Number of tracked toasts
    pub fn active_count(&self) -> usize {
        self.registry().len()
    }

    /// Prepare the platform for showing toasts.
    ///
    /// Idempotent. The runtime reference taken here is released when the
    /// service is dropped.
    pub fn initialize(&self) -> Result<(), ToastError> {
        if self.is_initialized() {
            return Ok(());
        }

        if !self.is_compatible() {
            tracing::warn!("Toast notifications are not supported on this system");
            return Err(ToastError::SystemNotSupported);
        }

        if self.runtime_owner().is_none() {
            let owned = self
                .platform
                .initialize_runtime()
                .map_err(|e| platform_failure("initialize_runtime", e, ToastError::ComInitFailed))?;
            if owned {
                *self.runtime_owner() = Some(thread::current().id());
            }
        }

        self.platform
            .register_app_user_model_id(&self.app_id)
            .map_err(|e| {
                platform_failure(
                    "register_app_user_model_id",
                    e,
                    ToastError::InvalidAppUserModelId,
                )
            })?;

        self.initialized.store(true, Ordering::SeqCst);
        tracing::debug!(app_id = %self.app_id, "Toast service initialized");
        Ok(())
    }

    fn notifier(&self) -> Result<P::Notifier, ToastError> {
        self.platform
            .notifier(&self.app_id)
            .map_err(|e| platform_failure("notifier", e, ToastError::ComError))
    }

    /// Build, register and display a toast.
    ///
    /// # Arguments
    /// * `template` - What to show
    /// * `handler` - Callbacks for clicks, dismissals and failures
    ///
    /// # Returns
    /// The id to pass to [`ToastService::hide_toast`]
    pub fn show_toast(
        &self,
        template: &ToastTemplate,
        handler: &ToastHandler,
    ) -> Result<ToastId, ToastError> {
        if !self.is_initialized() {
            return Err(ToastError::NotInitialized);
        }

        let notifier = self.notifier()?;

        let mut document = self
            .platform
            .template_content(template.kind())
            .map_err(|e| platform_failure("template_content", e, ToastError::ComError))?;

        materializer::materialize(&mut document, template, self.supports_modern_features())
            .map_err(|e| platform_failure("materialize", e, ToastError::ComError))?;

        let notification = self
            .platform
            .create_notification(&document)
            .map_err(|e| platform_failure("create_notification", e, ToastError::ComError))?;

        let expires_at = if template.expiration_ms() != 0 {
            let at = self.clock.now().add_millis(template.expiration_ms());
            self.platform
                .set_expiration(&notification, at)
                .map_err(|e| platform_failure("set_expiration", e, ToastError::ComError))?;
            Some(at)
        } else {
            None
        };

        let thunks = Thunks::new(handler, expires_at, Arc::clone(&self.clock));
        self.platform
            .on_activated(&notification, thunks.activated)
            .map_err(|e| platform_failure("on_activated", e, ToastError::InvalidHandler))?;
        self.platform
            .on_dismissed(&notification, thunks.dismissed)
            .map_err(|e| platform_failure("on_dismissed", e, ToastError::InvalidHandler))?;
        self.platform
            .on_failed(&notification, thunks.failed)
            .map_err(|e| platform_failure("on_failed", e, ToastError::InvalidHandler))?;

        // Registered before display: callbacks may fire during `show`.
        let id = {
            let mut registry = self.registry();
            let id = loop {
                let candidate = ToastId::generate();
                if !registry.contains_key(&candidate) {
                    break candidate;
                }
            };
            registry.insert(id, notification.clone());
            id
        };

        if let Err(e) = notifier.show(&notification) {
            self.registry().remove(&id);
            return Err(platform_failure("show", e, ToastError::NotDisplayed));
        }

        tracing::debug!(%id, kind = %template.kind(), "Toast shown");
        Ok(id)
    }

    /// Retract one toast.
    ///
    /// The id is forgotten even when the platform fails to retract it.
    pub fn hide_toast(&self, id: ToastId) -> Result<(), ToastError> {
        if !self.is_initialized() {
            return Err(ToastError::NotInitialized);
        }

        let notification = self
            .registry()
            .get(&id)
            .cloned()
            .ok_or(ToastError::IdNotFound)?;

        let notifier = self.notifier()?;
        let result = notifier.hide(&notification);
        self.registry().remove(&id);

        result.map_err(|e| platform_failure("hide", e, ToastError::CouldNotHide))?;
        tracing::debug!(%id, "Toast hidden");
        Ok(())
    }

    /// Retract every tracked toast and empty the registry.
    ///
    /// Fails with `CouldNotHide` if any single retraction failed; the
    /// registry is emptied either way.
    pub fn clear_toasts(&self) -> Result<(), ToastError> {
        if !self.is_initialized() {
            return Err(ToastError::NotInitialized);
        }

        let notifier = self.notifier()?;
        let entries = std::mem::take(&mut *self.registry());

        let mut failed = 0usize;
        for (id, notification) in &entries {
            if let Err(e) = notifier.hide(notification) {
                tracing::warn!(%id, error = %e, "Failed to hide toast");
                failed += 1;
            }
        }

        tracing::debug!(cleared = entries.len(), failed, "Toasts cleared");
        if failed > 0 {
            return Err(ToastError::CouldNotHide);
        }
        Ok(())
    }
}

impl<P: ToastPlatform> Drop for ToastService<P> {
    fn drop(&mut self) {
        let Some(owner) = *self.runtime_owner() else {
            return;
        };
        if owner == thread::current().id() {
            self.platform.uninitialize_runtime();
        } else {
            tracing::warn!(
                app_id = %self.app_id,
                "Toast service dropped off its initializing thread; runtime left initialized"
            );
        }
    }
}
