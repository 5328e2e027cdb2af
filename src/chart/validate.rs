use serde_json::Value;
use thiserror::Error;

use super::{ChartDataset, ChartPoint};

/// Why a backend payload was not accepted as a [`ChartDataset`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayloadError {
    #[error("expected a list of points, got {0}")]
    NotAList(&'static str),

    #[error("point {index} is not an object")]
    NotAnObject { index: usize },

    #[error("point {index} has no text `label`")]
    MissingLabel { index: usize },

    #[error("point {index} has no numeric `value`")]
    MissingValue { index: usize },
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

impl ChartDataset {
    /// Accept a payload only if every element is `{ label: string, value: number }`.
    /// One bad element rejects the whole payload.
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        let items = payload
            .as_array()
            .ok_or_else(|| PayloadError::NotAList(kind_of(payload)))?;

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let obj = item.as_object().ok_or(PayloadError::NotAnObject { index })?;

                let label = obj
                    .get("label")
                    .and_then(|v| v.as_str())
                    .ok_or(PayloadError::MissingLabel { index })?;

                let value = obj
                    .get("value")
                    .and_then(|v| v.as_f64())
                    .filter(|v| v.is_finite())
                    .ok_or(PayloadError::MissingValue { index })?;

                Ok(ChartPoint::new(label, value))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(ChartDataset::new)
    }
}
