//! Toast event handlers and the callback thunks registered with the platform

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::toast::{
    parse_action_index, reclassify_dismissal, DismissalReason, FileTime, ToastEvent,
};

use super::ports::{ActivatedCallback, Clock, DismissedCallback, FailedCallback};

type ClickFn = Arc<dyn Fn(i32) + Send + Sync>;
type DismissFn = Arc<dyn Fn(DismissalReason) + Send + Sync>;
type FailFn = Arc<dyn Fn() + Send + Sync>;

/// Callbacks for one shown toast.
///
/// Every slot defaults to a no-op. The platform invokes them on its own
/// threads at an unspecified later time, possibly never.
#[derive(Clone)]
pub struct ToastHandler {
    on_clicked: ClickFn,
    on_dismissed: DismissFn,
    on_failed: FailFn,
}

impl ToastHandler {
    /// Handler that ignores every event
    pub fn new() -> Self {
        Self {
            on_clicked: Arc::new(|_| {}),
            on_dismissed: Arc::new(|_| {}),
            on_failed: Arc::new(|| {}),
        }
    }

    /// Called with the clicked action index, or -1 for the toast body
    pub fn on_clicked(mut self, f: impl Fn(i32) + Send + Sync + 'static) -> Self {
        self.on_clicked = Arc::new(f);
        self
    }

    pub fn on_dismissed(mut self, f: impl Fn(DismissalReason) + Send + Sync + 'static) -> Self {
        self.on_dismissed = Arc::new(f);
        self
    }

    pub fn on_failed(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_failed = Arc::new(f);
        self
    }

    /// Handler that forwards every event into `sender`.
    ///
    /// Events are dropped once the receiving side is gone.
    pub fn from_sender(sender: mpsc::UnboundedSender<ToastEvent>) -> Self {
        let click_tx = sender.clone();
        let dismiss_tx = sender.clone();
        let fail_tx = sender;

        Self::new()
            .on_clicked(move |action| {
                let _ = click_tx.send(ToastEvent::Activated { action });
            })
            .on_dismissed(move |reason| {
                let _ = dismiss_tx.send(ToastEvent::Dismissed(reason));
            })
            .on_failed(move || {
                let _ = fail_tx.send(ToastEvent::Failed);
            })
    }

    /// Handler paired with the receiving end of its event channel
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ToastEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::from_sender(tx), rx)
    }

    pub(crate) fn clicked(&self, action: i32) {
        (self.on_clicked)(action)
    }

    pub(crate) fn dismissed(&self, reason: DismissalReason) {
        (self.on_dismissed)(reason)
    }

    pub(crate) fn failed(&self) {
        (self.on_failed)()
    }
}

impl Default for ToastHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToastHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastHandler").finish_non_exhaustive()
    }
}

/// The three platform-facing callbacks for one notification
pub(crate) struct Thunks {
    pub activated: ActivatedCallback,
    pub dismissed: DismissedCallback,
    pub failed: FailedCallback,
}

impl Thunks {
    /// Wrap `handler` into platform callbacks.
    ///
    /// The dismissal thunk reclassifies late user cancellations against
    /// `expires_at` using `clock`.
    pub fn new(handler: &ToastHandler, expires_at: Option<FileTime>, clock: Arc<dyn Clock>) -> Self {
        let on_click = handler.clone();
        let on_dismiss = handler.clone();
        let on_fail = handler.clone();

        Self {
            activated: Box::new(move |arguments| {
                let action = parse_action_index(arguments.as_deref());
                tracing::debug!(action, "Toast activated");
                on_click.clicked(action);
            }),
            dismissed: Box::new(move |reported| {
                let reason = reclassify_dismissal(reported, expires_at, clock.now());
                tracing::debug!(%reported, %reason, "Toast dismissed");
                on_dismiss.dismissed(reason);
            }),
            failed: Box::new(move || {
                tracing::debug!("Toast failed");
                on_fail.failed();
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};

    use super::*;

    struct FixedClock(AtomicI64);

    impl Clock for FixedClock {
        fn now(&self) -> FileTime {
            FileTime::from_ticks(self.0.load(Ordering::SeqCst))
        }
    }

    fn clock_at(ticks: i64) -> Arc<FixedClock> {
        Arc::new(FixedClock(AtomicI64::new(ticks)))
    }

    #[test]
    fn default_handler_ignores_events() {
        let handler = ToastHandler::default();
        handler.clicked(1);
        handler.dismissed(DismissalReason::TimedOut);
        handler.failed();
    }

    #[test]
    fn channel_forwards_events_in_order() {
        let (handler, mut rx) = ToastHandler::channel();
        handler.clicked(2);
        handler.dismissed(DismissalReason::ApplicationHidden);
        handler.failed();

        assert_eq!(rx.try_recv().unwrap(), ToastEvent::Activated { action: 2 });
        assert_eq!(
            rx.try_recv().unwrap(),
            ToastEvent::Dismissed(DismissalReason::ApplicationHidden)
        );
        assert_eq!(rx.try_recv().unwrap(), ToastEvent::Failed);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn channel_survives_dropped_receiver() {
        let (handler, rx) = ToastHandler::channel();
        drop(rx);
        handler.clicked(0);
    }

    #[test]
    fn activation_thunk_parses_arguments() {
        let (handler, mut rx) = ToastHandler::channel();
        let thunks = Thunks::new(&handler, None, clock_at(0));

        (thunks.activated)(Some("3".to_string()));
        (thunks.activated)(Some(String::new()));
        (thunks.activated)(None);

        assert_eq!(rx.try_recv().unwrap(), ToastEvent::Activated { action: 3 });
        assert_eq!(rx.try_recv().unwrap(), ToastEvent::Activated { action: -1 });
        assert_eq!(rx.try_recv().unwrap(), ToastEvent::Activated { action: -1 });
    }

    #[test]
    fn dismissal_thunk_reclassifies_after_expiration() {
        let (handler, mut rx) = ToastHandler::channel();
        let clock = clock_at(100);
        let thunks = Thunks::new(&handler, Some(FileTime::from_ticks(200)), clock.clone());

        (thunks.dismissed)(DismissalReason::UserCanceled);
        clock.0.store(200, Ordering::SeqCst);
        (thunks.dismissed)(DismissalReason::UserCanceled);

        assert_eq!(
            rx.try_recv().unwrap(),
            ToastEvent::Dismissed(DismissalReason::UserCanceled)
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            ToastEvent::Dismissed(DismissalReason::TimedOut)
        );
    }

    #[test]
    fn failed_thunk_forwards() {
        let (handler, mut rx) = ToastHandler::channel();
        let thunks = Thunks::new(&handler, None, clock_at(0));
        (thunks.failed)();
        assert_eq!(rx.try_recv().unwrap(), ToastEvent::Failed);
    }
}
