use crate::log_info;

use super::ChartView;

impl ChartView {
    /// Tear the view down. An in-flight fetch is aborted and anything it
    /// still manages to deliver is ignored.
    pub fn deactivate(&mut self) {
        if let Some(activation) = self.activation.take() {
            if !activation.resolved {
                activation.handle.abort();
                log_info!("Chart view deactivated ({}) with fetch in flight", activation.id);
            }
        }
    }
}
