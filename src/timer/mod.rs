// src/timer/mod.rs
// Counts one block down on its own task, reporting back over a channel.

use std::time::Duration;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::interval,
};

use crate::{log_debug, log_info};

#[derive(Debug, Clone, PartialEq)]
enum TimerMessage {
    Tick(u64),
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TimerControl {
    Pause,
    Resume,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerOutcome {
    Finished,
}

/// A running block.
#[derive(Debug)]
pub struct Timing {
    rx: mpsc::UnboundedReceiver<TimerMessage>,
    control_tx: mpsc::UnboundedSender<TimerControl>,
    handle: JoinHandle<()>,
    total_secs: u64,
    elapsed_secs: u64,
    paused: bool,
}

impl Timing {
    pub fn start(total: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (control_tx, mut control_rx) = mpsc::unbounded_channel();
        let total_secs = total.as_secs();

        let handle = tokio::spawn(async move {
            let mut interval = interval(Duration::from_secs(1));
            // first tick completes immediately
            interval.tick().await;

            let mut elapsed = 0;
            let mut paused = false;

            while elapsed < total_secs {
                tokio::select! {
                    _ = interval.tick(), if !paused => {
                        elapsed += 1;
                        if tx.send(TimerMessage::Tick(elapsed)).is_err() {
                            return;
                        }
                    }
                    control = control_rx.recv() => match control {
                        Some(TimerControl::Pause) => paused = true,
                        Some(TimerControl::Resume) => {
                            paused = false;
                            interval.reset();
                        }
                        None => return,
                    }
                }
            }

            let _ = tx.send(TimerMessage::Finished);
        });

        log_info!("⏱️ Block started: {}s", total_secs);

        Self {
            rx,
            control_tx,
            handle,
            total_secs,
            elapsed_secs: 0,
            paused: false,
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn remaining_secs(&self) -> u64 {
        self.total_secs.saturating_sub(self.elapsed_secs)
    }

    /// Share of the block done, in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        if self.total_secs == 0 {
            return 1.0;
        }
        (self.elapsed_secs as f64 / self.total_secs as f64).clamp(0.0, 1.0)
    }

    pub fn pause(&mut self) {
        if !self.paused && self.control_tx.send(TimerControl::Pause).is_ok() {
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.paused && self.control_tx.send(TimerControl::Resume).is_ok() {
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Drain progress; `Some(Finished)` once the block is complete.
    pub fn poll(&mut self) -> Option<TimerOutcome> {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                TimerMessage::Tick(elapsed) => self.elapsed_secs = elapsed,
                TimerMessage::Finished => {
                    self.elapsed_secs = self.total_secs;
                    log_info!("✅ Block finished");
                    return Some(TimerOutcome::Finished);
                }
            }
        }
        None
    }

    pub fn cancel(self) {
        self.handle.abort();
        log_debug!("Block cancelled at {}s", self.elapsed_secs);
    }
}

/// `mm:ss` of what is left.
pub fn format_remaining(remaining_secs: u64) -> String {
    format!("{:0>2}:{:0>2}", remaining_secs / 60, remaining_secs % 60)
}
