use crate::chart::ChartDataset;
use crate::log_debug;

use super::{CommandArgs, DataProvider, FailureReason, FetchFailed};

/// Ask `provider` for a dataset and validate it. No retries.
#[tracing::instrument(skip(provider, args))]
pub async fn fetch_initial_dataset(
    provider: &dyn DataProvider,
    command: &str,
    args: Option<&CommandArgs>,
) -> Result<ChartDataset, FetchFailed> {
    let failed = |reason| FetchFailed {
        command: command.to_string(),
        reason,
    };

    let payload = provider
        .invoke(command, args)
        .await
        .map_err(|e| failed(FailureReason::Invoke(e)))?;

    let dataset = ChartDataset::from_payload(&payload)
        .map_err(|e| failed(FailureReason::Malformed(e)))?;

    log_debug!("Fetched {} points via {}", dataset.len(), command);
    tracing::debug!(points = dataset.len(), "dataset accepted");

    Ok(dataset)
}
