use std::sync::Arc;
use tokio::sync::mpsc;

use crate::{
    chart::ChartDataset,
    provider::{DataProvider, FetchRequest},
};

use super::ChartView;

impl ChartView {
    pub fn new(provider: Arc<dyn DataProvider>, request: FetchRequest) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();

        Self {
            provider,
            request,
            dataset: ChartDataset::placeholder(),
            last_fetch_failed: false,
            activation: None,
            next_activation_id: 0,
            message_tx,
            message_rx,
        }
    }
}
