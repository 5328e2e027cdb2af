use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use crate::{
    log_debug, log_info,
    provider::{fetch_initial_dataset, FailureReason, FetchFailed},
};

use super::{Activation, ChartView, ViewMessage};

impl ChartView {
    /// Start this activation's single fetch. Returns `false` when the view is
    /// already active, in which case nothing is issued.
    pub fn activate(&mut self) -> bool {
        if let Some(activation) = &self.activation {
            log_debug!("Chart view already active (activation {}), not refetching", activation.id);
            return false;
        }

        self.next_activation_id += 1;
        let id = self.next_activation_id;

        let tx = self.message_tx.clone();
        let provider = Arc::clone(&self.provider);
        let request = self.request.clone();

        let handle = tokio::spawn(async move {
            let fetch = fetch_initial_dataset(
                provider.as_ref(),
                &request.command,
                request.args.as_ref(),
            );

            // A provider that panics still resolves this activation
            let result = AssertUnwindSafe(fetch)
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| {
                    Err(FetchFailed {
                        command: request.command.clone(),
                        reason: FailureReason::Panicked(panic_message(panic.as_ref())),
                    })
                });

            let _ = tx.send(ViewMessage::Fetched { activation: id, result });
        });

        log_info!("📡 Chart view activated ({}), requesting {}", id, self.request.command);

        self.activation = Some(Activation {
            id,
            handle,
            resolved: false,
        });

        true
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
