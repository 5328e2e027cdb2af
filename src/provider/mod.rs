mod fetch;
#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt::{self, Debug, Display};
use thiserror::Error;

use crate::chart::PayloadError;

pub use fetch::fetch_initial_dataset;

/// Command names understood by the native backend.
pub mod commands {
    pub const GET_PREVIOUS: &str = "get_previous";
    pub const GET_PREVIOUS_ENDING_TODAY: &str = "get_previous_ending_today";
    pub const CLOSE_ALERT_WINDOW: &str = "close_alert_window";
}

/// Arguments are forwarded to the backend untouched.
pub type CommandArgs = Map<String, Value>;

/// Failure reported by a provider for a single invocation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvokeError {
    #[error("command `{0}` is not registered")]
    UnknownCommand(String),

    #[error("{0}")]
    Backend(String),
}

/// Anything that answers named commands with JSON-like data.
#[async_trait]
pub trait DataProvider: Send + Sync + Debug {
    async fn invoke(&self, command: &str, args: Option<&CommandArgs>) -> Result<Value, InvokeError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    Invoke(InvokeError),
    Malformed(PayloadError),
    /// The fetch panicked before producing an answer.
    Panicked(String),
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Invoke(e) => write!(f, "backend call failed: {e}"),
            FailureReason::Malformed(e) => write!(f, "malformed payload: {e}"),
            FailureReason::Panicked(msg) => write!(f, "fetch panicked: {msg}"),
        }
    }
}

/// The one error a chart fetch can end in.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("fetch failed for `{command}`: {reason}")]
pub struct FetchFailed {
    pub command: String,
    pub reason: FailureReason,
}

/// What a chart view asks for on activation.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub command: String,
    pub args: Option<CommandArgs>,
}

impl FetchRequest {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into(), args: None }
    }

    pub fn with_args(mut self, args: CommandArgs) -> Self {
        self.args = Some(args);
        self
    }
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self::new(commands::GET_PREVIOUS)
    }
}
