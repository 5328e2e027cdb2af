use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::{
    log_debug, log_warn,
    provider::{commands, DataProvider},
    util::{audio::Chime, notify::Notice},
};

const NOTICE_SUMMARY: &str = "Finished";
const NOTICE_BODY: &str = "time has expired";

/// "Finished" screen: chimes when shown, asks the backend to close it when acknowledged.
#[derive(Debug)]
pub struct AlertView {
    provider: Arc<dyn DataProvider>,
    chime: Chime,
    notice: Notice,
    visible: bool,
}

impl AlertView {
    pub fn new(provider: Arc<dyn DataProvider>, chime: Chime, notice: Notice) -> Self {
        Self {
            provider,
            chime,
            notice,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Display the alert. The chime and the desktop notice go out once per display.
    pub fn show(&mut self) {
        if self.visible {
            return;
        }
        self.visible = true;

        if let Err(e) = self.chime.play() {
            log_warn!("Could not play alert sound {}: {}", self.chime.path(), e);
        }
        if let Err(e) = self.notice.send(NOTICE_SUMMARY, NOTICE_BODY) {
            log_warn!("Could not show desktop notification: {}", e);
        }
    }

    /// Fire-and-forget `close_alert_window`; neither outcome is acted on here.
    pub fn acknowledge(&self) -> JoinHandle<()> {
        let provider = Arc::clone(&self.provider);

        tokio::spawn(async move {
            match provider.invoke(commands::CLOSE_ALERT_WINDOW, None).await {
                Ok(_) => log_debug!("close_alert_window acknowledged"),
                Err(e) => log_debug!("close_alert_window ignored failure: {}", e),
            }
        })
    }

    /// Called once the backend has closed the alert.
    pub fn hide(&mut self) {
        self.visible = false;
        let _ = self.chime.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{testing::ScriptedProvider, InvokeError};
    use crate::util::{audio::AudioPlayer, notify::Notifier};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingPlayer {
        plays: Arc<AtomicUsize>,
    }

    impl AudioPlayer for CountingPlayer {
        fn play(&mut self, _: &str) -> Result<(), String> {
            self.plays.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        fn stop(&mut self, _: &str) -> Result<(), String> { Ok(()) }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Arc<Mutex<Vec<(String, String)>>>,
        fail: bool,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, summary: &str, body: &str) -> Result<(), String> {
            self.sent.lock().unwrap().push((summary.to_string(), body.to_string()));
            if self.fail {
                return Err("no notification daemon".to_string());
            }
            Ok(())
        }
    }

    fn alert(provider: Arc<ScriptedProvider>) -> (AlertView, Arc<AtomicUsize>) {
        let player = CountingPlayer::default();
        let plays = Arc::clone(&player.plays);
        let chime = Chime::with_player("gong.mp3", player);
        (AlertView::new(provider, chime, Notice::silent()), plays)
    }

    #[tokio::test]
    async fn test_show_plays_once_per_display() {
        let (mut alert, plays) = alert(Arc::new(ScriptedProvider::new(vec![])));

        alert.show();
        alert.show();
        assert_eq!(plays.load(Ordering::SeqCst), 1);
        assert!(alert.is_visible());

        alert.hide();
        alert.show();
        assert_eq!(plays.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_acknowledge_invokes_close_command() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(serde_json::Value::Null)]));
        let (alert, _) = alert(provider.clone());

        alert.acknowledge().await.unwrap();

        assert_eq!(provider.calls(), vec![("close_alert_window".to_string(), None)]);
    }

    #[tokio::test]
    async fn test_acknowledge_ignores_failure() {
        let provider = Arc::new(ScriptedProvider::new(vec![Err(InvokeError::UnknownCommand(
            "close_alert_window".into(),
        ))]));
        let (mut alert, _) = alert(provider.clone());
        alert.show();

        // the task completes without panicking and the view is untouched
        alert.acknowledge().await.unwrap();

        assert!(alert.is_visible());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_show_sends_one_notice_per_display() {
        let notifier = RecordingNotifier::default();
        let sent = Arc::clone(&notifier.sent);
        let mut alert = AlertView::new(
            Arc::new(ScriptedProvider::new(vec![])),
            Chime::silent(),
            Notice::with_notifier(notifier),
        );

        alert.show();
        alert.show();

        assert_eq!(
            *sent.lock().unwrap(),
            vec![("Finished".to_string(), "time has expired".to_string())]
        );
    }

    #[tokio::test]
    async fn test_failed_notice_still_shows_the_alert() {
        let notifier = RecordingNotifier {
            fail: true,
            ..RecordingNotifier::default()
        };
        let player = CountingPlayer::default();
        let plays = Arc::clone(&player.plays);
        let mut alert = AlertView::new(
            Arc::new(ScriptedProvider::new(vec![])),
            Chime::with_player("gong.mp3", player),
            Notice::with_notifier(notifier),
        );

        alert.show();

        assert!(alert.is_visible());
        assert_eq!(plays.load(Ordering::SeqCst), 1);
    }
}
