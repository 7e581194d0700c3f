//! User-facing toast notifications and the message keys the page shows.

pub mod translation;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{info, warn};

pub use translation::{TranslationCatalog, TranslationError, Translator};

/// How long a toast stays on screen before it dismisses itself.
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(2500);

/// Translation keys used by the reservation page.
pub mod keys {
    pub const NO_RESPONSE_DATA: &str = "RESERVATION.NO_RESPONSE_DATA";
    pub const NO_PRODUCT_DATA: &str = "RESERVATION.NO_PRODUCT_DATA";
    pub const ACTION_SUCCESS: &str = "RESERVATION.ACTION.SUCCESS";
    pub const ACTION_UNSUCCESSFUL: &str = "RESERVATION.ACTION.UNSUCCESSFUL";
    pub const ACTION_ERROR: &str = "RESERVATION.ACTION.ERROR";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStyle {
    Error,
    Success,
}

impl NotificationStyle {
    /// CSS panel class of the toast.
    pub fn panel_class(&self) -> &'static str {
        match self {
            NotificationStyle::Error => "error-snack",
            NotificationStyle::Success => "success-snack",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub style: NotificationStyle,
    pub duration: Duration,
}

/// Display surface for toasts. Must not block: showing is fire-and-forget.
pub trait Notifier: Send + Sync + 'static {
    fn show(&self, notification: Notification);
}

/// Renders toasts as log events. Used when there is no screen to draw on.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn show(&self, notification: Notification) {
        let duration_ms = notification.duration.as_millis();
        match notification.style {
            NotificationStyle::Error => warn!(
                panel = notification.style.panel_class(),
                duration_ms,
                "{}",
                notification.message
            ),
            NotificationStyle::Success => info!(
                panel = notification.style.panel_class(),
                duration_ms,
                "{}",
                notification.message
            ),
        }
    }
}

/// Forwards toasts to a channel so an embedding UI (or a test) can render them.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    #[allow(dead_code)]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn show(&self, notification: Notification) {
        // Nobody listening means nobody to show it to.
        let _ = self.sender.send(notification);
    }
}

/// Resolves message keys and hands the result to the notifier.
#[derive(Clone)]
pub struct NotificationCenter {
    notifier: Arc<dyn Notifier>,
    translator: Arc<dyn Translator>,
}

impl NotificationCenter {
    pub fn new(notifier: Arc<dyn Notifier>, translator: Arc<dyn Translator>) -> Self {
        Self { notifier, translator }
    }

    /// Error toast for a translation key.
    pub fn show_error(&self, key: &str) {
        self.show_error_text(&self.translator.resolve(key));
    }

    /// Error toast with text that is shown exactly as given.
    pub fn show_error_text(&self, text: &str) {
        self.notifier.show(Notification {
            message: text.to_string(),
            style: NotificationStyle::Error,
            duration: NOTIFICATION_DURATION,
        });
    }

    pub fn show_success(&self, key: &str) {
        self.notifier.show(Notification {
            message: self.translator.resolve(key),
            style: NotificationStyle::Success,
            duration: NOTIFICATION_DURATION,
        });
    }
}
