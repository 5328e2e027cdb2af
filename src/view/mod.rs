pub mod chart_view;
pub mod alert_view;

pub use alert_view::AlertView;
pub use chart_view::ChartView;
