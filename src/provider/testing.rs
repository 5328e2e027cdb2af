use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use super::{CommandArgs, DataProvider, InvokeError};

/// Answers from a script, in order, and records every call it gets.
#[derive(Debug)]
pub(crate) struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<Value, InvokeError>>>,
    calls: Mutex<Vec<(String, Option<CommandArgs>)>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedProvider {
    pub(crate) fn new(responses: Vec<Result<Value, InvokeError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Each answer waits for one permit on the returned semaphore.
    pub(crate) fn gated(responses: Vec<Result<Value, InvokeError>>) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let provider = Self {
            gate: Some(Arc::clone(&gate)),
            ..Self::new(responses)
        };
        (provider, gate)
    }

    pub(crate) fn calls(&self) -> Vec<(String, Option<CommandArgs>)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl DataProvider for ScriptedProvider {
    async fn invoke(&self, command: &str, args: Option<&CommandArgs>) -> Result<Value, InvokeError> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), args.cloned()));

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!([])))
    }
}
