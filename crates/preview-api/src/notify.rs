//! User-facing notifications

use std::fmt::Debug;

/// Surface a message to the person using the tool
pub trait Notifier: Send + Sync + Debug {
    /// Show `message`
    fn notify(&self, message: &str);
}

/// Notifier writing to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(target: "preview::notify", "{message}");
    }
}
