use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

use crate::app::App;
use crate::timer::format_remaining;
use crate::ui::chart::ChartWidget;

const HELP: &str = "[n] start  [p] pause  [c] cancel  [t] bar/line  [r] refresh  [q] quit";

pub fn render_main(app: &App, area: Rect, buf: &mut Buffer) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // chart
            Constraint::Length(3), // timer
            Constraint::Length(1), // help
        ])
        .split(area);

    let status_suffix = if app.chart_view.is_pending() {
        " (loading)"
    } else if app.chart_view.last_fetch_failed() {
        " [stale]"
    } else {
        ""
    };

    ChartWidget::new(app.chart_view.dataset(), &app.chart_config)
        .status_suffix(status_suffix)
        .render(layout[0], buf);

    render_timer(app, layout[1], buf);

    Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .render(layout[2], buf);
}

fn render_timer(app: &App, area: Rect, buf: &mut Buffer) {
    let (ratio, label, color) = match &app.timer {
        Some(timer) if timer.is_paused() => (
            timer.ratio(),
            format!("{} (paused)", format_remaining(timer.remaining_secs())),
            Color::Yellow,
        ),
        Some(timer) => (
            timer.ratio(),
            format_remaining(timer.remaining_secs()),
            Color::Green,
        ),
        None => (0.0, "press n to start a block".to_string(), Color::DarkGray),
    };

    Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" block "))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio)
        .label(label)
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::Screen,
        backend::{Backend, TallyStore},
        config::AppConfig,
        event::EventHandler,
        util::{audio::Chime, notify::Notice},
    };

    fn text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    fn app() -> App {
        let (backend, rx) = Backend::new(TallyStore::open_in_memory().unwrap(), 5);
        App::new(
            &AppConfig::default(),
            backend,
            rx,
            Chime::silent(),
            Notice::silent(),
            EventHandler::without_terminal(),
        )
    }

    #[tokio::test]
    async fn test_main_screen_shows_chart_and_idle_timer() {
        let mut app = app();
        app.chart_view.settle().await;
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);

        (&app).render(area, &mut buf);

        let text = text(&buf);
        assert!(text.contains("past 30 days"));
        assert!(text.contains("press n to start a block"));
        assert!(!text.contains("Finished"));
    }

    #[tokio::test]
    async fn test_alert_screen_overlays_finished_box() {
        let mut app = app();
        app.chart_view.settle().await;
        app.screen = Screen::Alert;
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);

        (&app).render(area, &mut buf);

        let text = text(&buf);
        assert!(text.contains("Finished"));
        assert!(text.contains("[Enter] ok"));
    }
}
