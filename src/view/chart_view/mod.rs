mod new;
mod activate;
mod deactivate;
mod process_messages;

use std::sync::Arc;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    chart::ChartDataset,
    provider::{DataProvider, FetchFailed, FetchRequest},
};

#[derive(Debug)]
enum ViewMessage {
    Fetched {
        activation: u64,
        result: Result<ChartDataset, FetchFailed>,
    },
}

#[derive(Debug)]
struct Activation {
    id: u64,
    handle: JoinHandle<()>,
    resolved: bool,
}

/// Holds the dataset a chart shows and fetches it once per activation.
///
/// The dataset has one writer, the response handling in [`ChartView::process_messages`].
/// A failed fetch never clears what is already shown.
#[derive(Debug)]
pub struct ChartView {
    provider: Arc<dyn DataProvider>,
    request: FetchRequest,
    dataset: ChartDataset,
    last_fetch_failed: bool,
    activation: Option<Activation>,
    next_activation_id: u64,
    message_tx: mpsc::UnboundedSender<ViewMessage>,
    message_rx: mpsc::UnboundedReceiver<ViewMessage>,
}

impl ChartView {
    pub fn dataset(&self) -> &ChartDataset {
        &self.dataset
    }

    /// Whether the most recent response for a live activation was a failure.
    pub fn last_fetch_failed(&self) -> bool {
        self.last_fetch_failed
    }

    pub fn is_active(&self) -> bool {
        self.activation.is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.activation.as_ref().is_some_and(|a| !a.resolved)
    }
}

impl Drop for ChartView {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartPoint;
    use crate::provider::{testing::ScriptedProvider, CommandArgs, FailureReason, InvokeError};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    #[derive(Debug)]
    struct PanickingProvider;

    #[async_trait]
    impl DataProvider for PanickingProvider {
        async fn invoke(&self, _: &str, _: Option<&CommandArgs>) -> Result<Value, InvokeError> {
            panic!("backend fell over")
        }
    }

    fn view_with(provider: &Arc<ScriptedProvider>) -> ChartView {
        ChartView::new(provider.clone(), FetchRequest::default())
    }

    async fn let_tasks_run() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_success_replaces_dataset_exactly() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(json!([
            { "label": "Mon", "value": 30 },
            { "label": "Sun", "value": 10 },
            { "label": "Tue", "value": 100 }
        ]))]));
        let mut view = view_with(&provider);

        assert!(view.activate());
        view.settle().await;

        assert_eq!(
            view.dataset().points(),
            &[
                ChartPoint::new("Mon", 30.0),
                ChartPoint::new("Sun", 10.0),
                ChartPoint::new("Tue", 100.0),
            ]
        );
        assert!(!view.last_fetch_failed());
        assert!(!view.is_pending());
    }

    #[tokio::test]
    async fn test_scenario_two_points_in_order() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(json!([
            { "label": "a", "value": 5 },
            { "label": "b", "value": 10 }
        ]))]));
        let mut view = view_with(&provider);

        view.activate();
        view.settle().await;

        assert_eq!(
            view.dataset().points(),
            &[ChartPoint::new("a", 5.0), ChartPoint::new("b", 10.0)]
        );
    }

    #[tokio::test]
    async fn test_rejection_keeps_placeholder() {
        let provider = Arc::new(ScriptedProvider::new(vec![Err(InvokeError::Backend(
            "timed out".into(),
        ))]));
        let mut view = view_with(&provider);

        view.activate();
        view.settle().await;

        assert_eq!(view.dataset(), &ChartDataset::placeholder());
        assert!(view.last_fetch_failed());
    }

    #[tokio::test]
    async fn test_empty_response_is_an_empty_chart_not_an_error() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(json!([]))]));
        let mut view = view_with(&provider);

        view.activate();
        view.settle().await;

        assert!(view.dataset().is_empty());
        assert!(!view.last_fetch_failed());
    }

    #[tokio::test]
    async fn test_malformed_element_rejects_whole_response() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(json!([
            { "label": "a", "value": 1 },
            { "label": "b" }
        ]))]));
        let mut view = view_with(&provider);

        view.activate();
        view.settle().await;

        assert_eq!(view.dataset(), &ChartDataset::placeholder());
        assert!(view.last_fetch_failed());
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_real_data() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(json!([{ "label": "x", "value": 3 }])),
            Err(InvokeError::UnknownCommand("get_previous".into())),
        ]));
        let mut view = view_with(&provider);

        view.activate();
        view.settle().await;
        view.deactivate();
        view.activate();
        view.settle().await;

        assert_eq!(view.dataset().points(), &[ChartPoint::new("x", 3.0)]);
        assert!(view.last_fetch_failed());
    }

    #[tokio::test]
    async fn test_fetch_issued_once_per_activation() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(json!([]))]));
        let mut view = view_with(&provider);

        assert!(view.activate());
        assert!(!view.activate());
        view.settle().await;

        // re-rendering drains messages but never refetches
        for _ in 0..5 {
            view.process_messages();
            assert!(!view.activate());
        }
        let_tasks_run().await;

        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_new_activation_issues_new_fetch() {
        let provider = Arc::new(ScriptedProvider::new(vec![]));
        let mut view = view_with(&provider);

        view.activate();
        view.settle().await;
        view.deactivate();
        assert!(!view.is_active());

        assert!(view.activate());
        view.settle().await;

        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_response_after_teardown_is_discarded() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(json!([
            { "label": "late", "value": 1 }
        ]))]));
        let mut view = view_with(&provider);

        view.activate();
        // the fetch completes and its response is queued...
        let_tasks_run().await;
        // ...but the view is torn down before it is processed
        view.deactivate();
        view.process_messages();

        assert_eq!(view.dataset(), &ChartDataset::placeholder());
        assert!(!view.last_fetch_failed());
    }

    #[tokio::test]
    async fn test_teardown_aborts_in_flight_fetch() {
        let (provider, gate) = ScriptedProvider::gated(vec![Ok(json!([
            { "label": "late", "value": 1 }
        ]))]);
        let provider = Arc::new(provider);
        let mut view = view_with(&provider);

        view.activate();
        let_tasks_run().await;
        assert_eq!(provider.call_count(), 1);
        assert!(view.is_pending());

        view.deactivate();
        gate.add_permits(1);
        let_tasks_run().await;
        view.process_messages();

        assert_eq!(view.dataset(), &ChartDataset::placeholder());
        assert!(!view.is_pending());
    }

    #[tokio::test]
    async fn test_stale_response_does_not_override_new_activation() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(json!([{ "label": "old", "value": 1 }])),
            Ok(json!([{ "label": "new", "value": 2 }])),
        ]));
        let mut view = view_with(&provider);

        view.activate();
        let_tasks_run().await;
        view.deactivate();
        view.activate();

        // only the first response can be queued at this point
        view.process_messages();
        assert_eq!(view.dataset(), &ChartDataset::placeholder());
        assert!(view.is_pending());

        view.settle().await;
        assert_eq!(view.dataset().points(), &[ChartPoint::new("new", 2.0)]);
    }

    #[tokio::test]
    async fn test_panicking_fetch_resolves_as_failure() {
        let mut view = ChartView::new(Arc::new(PanickingProvider), FetchRequest::default());

        view.activate();
        view.settle().await;

        assert!(!view.is_pending());
        assert!(view.last_fetch_failed());
        assert_eq!(view.dataset(), &ChartDataset::placeholder());
    }

    #[test]
    fn test_panic_reason_reads_well() {
        let reason = FailureReason::Panicked("backend fell over".into());
        assert_eq!(reason.to_string(), "fetch panicked: backend fell over");
    }
}
