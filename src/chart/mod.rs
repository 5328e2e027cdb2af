mod validate;

use serde::{Deserialize, Serialize};

pub use validate::PayloadError;

/// A single plotted observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self { label: label.into(), value }
    }
}

/// Ordered points; position in the sequence is the position on the axis.
///
/// A dataset is only ever replaced as a whole, never patched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartDataset(Vec<ChartPoint>);

impl ChartDataset {
    pub fn new(points: Vec<ChartPoint>) -> Self {
        Self(points)
    }

    /// Shown until the first successful fetch.
    pub fn placeholder() -> Self {
        Self(vec![ChartPoint::new("a", 5.0), ChartPoint::new("b", 10.0)])
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn max_value(&self) -> Option<f64> {
        self.0.iter().map(|p| p.value).reduce(f64::max)
    }
}
