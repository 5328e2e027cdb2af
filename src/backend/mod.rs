// src/backend/mod.rs
// The native side: owns the tally and answers the chart commands.

mod invoke;
pub mod store;

use chrono::{Local, NaiveDate};
use tokio::sync::mpsc;

use crate::{
    chart::{ChartDataset, ChartPoint},
    log_info, log_warn,
};

pub use store::TallyStore;

/// Label format used for days on the chart axis.
pub const DAY_LABEL_FORMAT: &str = "%d-%m";

/// Widest window the chart can ask for, ten years of days.
pub const MAX_WINDOW_DAYS: usize = 3660;

/// Things the backend asks the UI to do.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    CloseAlertWindow,
}

pub type BackendReceiver = mpsc::UnboundedReceiver<BackendEvent>;

#[derive(Debug)]
pub struct Backend {
    store: TallyStore,
    window_days: usize,
    event_tx: mpsc::UnboundedSender<BackendEvent>,
}

impl Backend {
    pub fn new(store: TallyStore, window_days: usize) -> (Self, BackendReceiver) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        if window_days > MAX_WINDOW_DAYS {
            log_warn!("Window of {} days is too wide, using {}", window_days, MAX_WINDOW_DAYS);
        }
        let window_days = window_days.min(MAX_WINDOW_DAYS);

        (
            Self {
                store,
                window_days,
                event_tx,
            },
            event_rx,
        )
    }

    /// Record one finished block on `date`.
    pub fn record_block(&self, date: NaiveDate) -> rusqlite::Result<()> {
        self.store.increment_or_insert_date(date)?;
        log_info!("Recorded block for {}", date);
        Ok(())
    }

    pub fn record_block_today(&self) -> rusqlite::Result<()> {
        self.record_block(Self::today())
    }

    /// The configured window of days ending at `end`, shaped for the chart.
    pub fn window_ending(&self, end: NaiveDate) -> rusqlite::Result<ChartDataset> {
        let points = self
            .store
            .get_previous(end, self.window_days)?
            .into_iter()
            .map(|(day, blocks)| ChartPoint::new(day.format(DAY_LABEL_FORMAT).to_string(), blocks as f64))
            .collect::<Vec<_>>();

        Ok(ChartDataset::new(points))
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}
