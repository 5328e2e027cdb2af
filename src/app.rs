use crate::backend::{Backend, BackendEvent, BackendReceiver};
use crate::config::{AppConfig, ChartConfig};
use crate::event::{AppEvent, Event, EventHandler};
use crate::provider::DataProvider;
use crate::timer::{TimerOutcome, Timing};
use crate::util::{audio::Chime, notify::Notice};
use crate::view::{AlertView, ChartView};
use crate::{log_error, log_info};
use color_eyre::Result;
use ratatui::{
    DefaultTerminal,
    crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Main,
    Alert,
}

/// Application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    pub screen: Screen,

    pub backend: Arc<Backend>,
    backend_rx: BackendReceiver,

    pub chart_view: ChartView,
    pub alert_view: AlertView,
    pub chart_config: ChartConfig,

    /// The block in progress, if any.
    pub timer: Option<Timing>,
    block_duration: Duration,

    /// Event handler.
    pub events: EventHandler,
}

impl App {
    /// Builds the app and activates the chart view, which issues its first fetch.
    pub fn new(
        config: &AppConfig,
        backend: Backend,
        backend_rx: BackendReceiver,
        chime: Chime,
        notice: Notice,
        events: EventHandler,
    ) -> Self {
        let backend = Arc::new(backend);
        let provider: Arc<dyn DataProvider> = backend.clone();

        let mut chart_view = ChartView::new(Arc::clone(&provider), config.fetch.request());
        chart_view.activate();

        Self {
            running: true,
            screen: Screen::Main,
            backend,
            backend_rx,
            chart_view,
            alert_view: AlertView::new(provider, chime, notice),
            chart_config: config.chart.clone(),
            timer: None,
            block_duration: config.block_duration(),
            events,
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while self.running {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;

            tokio::select! {
                event = self.events.next() => self.handle_event(event?),
                Some(backend_event) = self.backend_rx.recv() => {
                    self.handle_backend_event(backend_event);
                }
            }
        }

        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Tick => self.tick(),
            Event::Crossterm(CrosstermEvent::Key(key_event)) => {
                self.handle_key_events(key_event)
            }
            Event::Crossterm(_) => {}
            Event::App(app_event) => self.handle_app_event(app_event),
        }
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) {
        if key_event.kind != KeyEventKind::Press {
            return;
        }

        match key_event.code {
            KeyCode::Esc | KeyCode::Char('q') => self.events.send(AppEvent::Quit),
            KeyCode::Char('c' | 'C') if key_event.modifiers == KeyModifiers::CONTROL => {
                self.events.send(AppEvent::Quit)
            }
            KeyCode::Enter if self.screen == Screen::Alert => {
                self.events.send(AppEvent::AcknowledgeAlert)
            }
            KeyCode::Char('n') => self.events.send(AppEvent::StartBlock),
            KeyCode::Char('p') => self.events.send(AppEvent::TogglePause),
            KeyCode::Char('c') => self.events.send(AppEvent::CancelBlock),
            KeyCode::Char('t') => self.events.send(AppEvent::ToggleChartKind),
            KeyCode::Char('r') => self.events.send(AppEvent::Refresh),
            _ => {}
        }
    }

    pub fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::StartBlock => self.start_block(),
            AppEvent::TogglePause => {
                if let Some(timer) = self.timer.as_mut() {
                    timer.toggle_pause();
                }
            }
            AppEvent::CancelBlock => {
                if let Some(timer) = self.timer.take() {
                    timer.cancel();
                }
            }
            AppEvent::ToggleChartKind => {
                self.chart_config.kind = self.chart_config.kind.toggled();
            }
            AppEvent::Refresh => self.refresh_chart(),
            AppEvent::AcknowledgeAlert => {
                // the screen changes when the backend answers with CloseAlertWindow
                let _ = self.alert_view.acknowledge();
            }
            AppEvent::Quit => self.quit(),
        }
    }

    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::CloseAlertWindow => {
                self.alert_view.hide();
                self.screen = Screen::Main;
            }
        }
    }

    /// Handles the tick event of the terminal.
    pub fn tick(&mut self) {
        self.chart_view.process_messages();

        let finished = self
            .timer
            .as_mut()
            .and_then(Timing::poll)
            .is_some_and(|outcome| outcome == TimerOutcome::Finished);

        if finished {
            self.timer = None;
            self.finish_block();
        }
    }

    fn start_block(&mut self) {
        if self.timer.is_some() {
            return;
        }
        self.timer = Some(Timing::start(self.block_duration));
    }

    fn finish_block(&mut self) {
        if let Err(e) = self.backend.record_block_today() {
            log_error!("Failed to record block: {}", e);
        }

        self.refresh_chart();
        self.alert_view.show();
        self.screen = Screen::Alert;
    }

    /// Tear the chart view down and bring it back, issuing one new fetch.
    fn refresh_chart(&mut self) {
        self.chart_view.deactivate();
        self.chart_view.activate();
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        log_info!("Quitting");
        self.running = false;
    }
}
