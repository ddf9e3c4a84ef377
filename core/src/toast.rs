//! Toast notifications.
//!
//! A toast is a short, non-blocking message that dismisses itself. The
//! library only describes toasts; rendering belongs to whatever implements
//! [`Notifier`] on the host side.

use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Icon / category of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
    Question,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
            ToastKind::Warning => "warning",
            ToastKind::Question => "question",
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPosition {
    Top,
    TopStart,
    TopEnd,
    Center,
    Bottom,
    BottomStart,
    BottomEnd,
}

/// Presentation settings shared by every toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastOptions {
    pub position: ToastPosition,
    pub timer: Duration,
    pub timer_progress_bar: bool,
    pub show_confirm_button: bool,
    pub icon_color: String,
    /// CSS class applied to the popup; `colored-toast` paints the
    /// background by kind.
    pub popup_class: String,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            position: ToastPosition::Top,
            timer: Duration::from_millis(2000),
            timer_progress_bar: true,
            show_confirm_button: false,
            icon_color: "white".to_string(),
            popup_class: "colored-toast".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub options: ToastOptions,
}

impl Toast {
    pub fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            options: ToastOptions::default(),
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title)
    }
}

/// Displays toasts. Each call is independent; stacking of overlapping
/// toasts is up to the implementation.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);

    fn toast(&self, kind: ToastKind, title: &str) {
        self.notify(Toast::new(kind, title));
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, toast: Toast) {
        (**self).notify(toast)
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, toast: Toast) {
        (**self).notify(toast)
    }
}

/// Headless notifier: every toast becomes a log event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        tracing::info!(
            kind = %toast.kind,
            timer_ms = toast.options.timer.as_millis() as u64,
            "toast: {}",
            toast.title
        );
    }
}

/// Keeps every toast it is given, oldest first.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_auto_dismiss_after_two_seconds() {
        let options = ToastOptions::default();
        assert_eq!(options.position, ToastPosition::Top);
        assert_eq!(options.timer, Duration::from_millis(2000));
        assert!(options.timer_progress_bar);
        assert!(!options.show_confirm_button);
        assert_eq!(options.popup_class, "colored-toast");
    }

    #[test]
    fn memory_notifier_records_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.toast(ToastKind::Success, "saved");
        notifier.toast(ToastKind::Error, "failed");

        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert_eq!(notifier.last().unwrap().title, "failed");

        assert_eq!(notifier.drain().len(), 2);
        assert!(notifier.toasts().is_empty());
    }

    #[test]
    fn kinds_render_lowercase() {
        let kinds = [
            ToastKind::Success,
            ToastKind::Error,
            ToastKind::Info,
            ToastKind::Warning,
            ToastKind::Question,
        ];
        let names: Vec<String> = kinds.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["success", "error", "info", "warning", "question"]);
    }

    #[test]
    fn notifier_works_through_references() {
        let notifier = MemoryNotifier::new();
        let by_ref: &dyn Notifier = &notifier;
        by_ref.toast(ToastKind::Info, "hello");
        assert_eq!(notifier.toasts().len(), 1);
    }
}
