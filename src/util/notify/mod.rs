// src/util/notify/mod.rs
use std::sync::{Arc, Mutex};

pub const APP_NAME: &str = "time-tracker";

pub trait Notifier {
    fn notify(&mut self, summary: &str, body: &str) -> Result<(), String>;
}

/// Sends through the desktop's notification service.
struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&mut self, summary: &str, body: &str) -> Result<(), String> {
        notify_rust::Notification::new()
            .summary(summary)
            .body(body)
            .appname(APP_NAME)
            .show()
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// For headless runs and when notifications are turned off.
struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&mut self, _: &str, _: &str) -> Result<(), String> { Ok(()) }
}

/// A notifier shared between views, cheap to clone.
#[derive(Clone)]
pub struct Notice {
    inner: Arc<Mutex<dyn Notifier + Send>>,
}

impl std::fmt::Debug for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notice").finish_non_exhaustive()
    }
}

impl Notice {
    pub fn desktop() -> Self {
        Self::with_notifier(DesktopNotifier)
    }

    pub fn silent() -> Self {
        Self::with_notifier(SilentNotifier)
    }

    pub fn with_notifier<N: Notifier + Send + 'static>(notifier: N) -> Self {
        Self {
            inner: Arc::new(Mutex::new(notifier)),
        }
    }

    pub fn send(&self, summary: &str, body: &str) -> Result<(), String> {
        self.inner.lock().map_err(|e| e.to_string())?.notify(summary, body)
    }
}
