//! Notification and audio capability seam.
//!
//! The core only requests notifications; delivery belongs to the
//! environment. A denied or absent capability is a silent no-op, never an
//! error surfaced to the user.

/// Fire-and-forget notification sink.
pub trait Notifier {
    fn notify(&self, title: &str, body: &str);

    /// Trigger the completion sound. Best-effort.
    fn play_sound(&self) {}
}

/// Notifier that drops everything. Used in tests and headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _title: &str, _body: &str) {}
}
