pub mod app;
pub mod backend;
pub mod chart;
pub mod config;
pub mod error;
pub mod event;
pub mod provider;
pub mod timer;
pub mod ui;
pub mod util;
pub mod view;

pub use app::App;
pub use config::AppConfig;
pub use error::{Result, TrackerError};
