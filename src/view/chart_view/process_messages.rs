use crate::{log_debug, log_error, log_info};

use super::{ChartView, ViewMessage};

impl ChartView {
    /// Non-blocking: apply every queued response.
    pub fn process_messages(&mut self) {
        while let Ok(msg) = self.message_rx.try_recv() {
            self.apply(msg);
        }
    }

    /// Wait for the live activation's response, if it has not arrived yet.
    pub async fn settle(&mut self) {
        while self.is_pending() {
            match self.message_rx.recv().await {
                Some(msg) => self.apply(msg),
                None => break,
            }
        }
    }

    pub(super) fn apply(&mut self, msg: ViewMessage) {
        match msg {
            ViewMessage::Fetched { activation, result } => {
                let Some(live) = self.activation.as_mut().filter(|a| a.id == activation) else {
                    log_debug!("Discarding response for stale activation {}", activation);
                    return;
                };
                live.resolved = true;

                match result {
                    Ok(dataset) => {
                        log_info!("🟢 Chart dataset replaced: {} points", dataset.len());
                        self.dataset = dataset;
                        self.last_fetch_failed = false;
                    }
                    Err(e) => {
                        log_error!("❌ {}; keeping previous {} points", e, self.dataset.len());
                        self.last_fetch_failed = true;
                    }
                }
            }
        }
    }
}
