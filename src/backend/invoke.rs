use async_trait::async_trait;
use serde_json::Value;

use crate::{
    log_debug, log_error,
    provider::{commands, CommandArgs, DataProvider, InvokeError},
};

use super::{Backend, BackendEvent};

impl Backend {
    fn chart_payload(&self) -> Result<Value, InvokeError> {
        let dataset = self.window_ending(Self::today()).map_err(|e| {
            log_error!("Failed to read tally: {}", e);
            InvokeError::Backend(e.to_string())
        })?;

        serde_json::to_value(dataset).map_err(|e| InvokeError::Backend(e.to_string()))
    }
}

#[async_trait]
impl DataProvider for Backend {
    #[tracing::instrument(skip(self, args))]
    async fn invoke(&self, command: &str, args: Option<&CommandArgs>) -> Result<Value, InvokeError> {
        match command {
            commands::GET_PREVIOUS => self.chart_payload(),

            commands::GET_PREVIOUS_ENDING_TODAY => {
                // `n` has no agreed meaning yet; it is carried, not read.
                let n = args.and_then(|a| a.get("n"));
                log_debug!("{} called with n={:?}", command, n);
                self.chart_payload()
            }

            commands::CLOSE_ALERT_WINDOW => {
                self.event_tx
                    .send(BackendEvent::CloseAlertWindow)
                    .map_err(|e| InvokeError::Backend(e.to_string()))?;
                Ok(Value::Null)
            }

            other => Err(InvokeError::UnknownCommand(other.to_string())),
        }
    }
}
