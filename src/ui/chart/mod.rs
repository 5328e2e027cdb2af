mod render_bar_chart;
mod render_line_chart;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Widget},
};

use crate::{
    chart::ChartDataset,
    config::{ChartConfig, ChartKind},
};

const FALLBACK_COLOR: Color = Color::Magenta;
const GRID_STEPS: usize = 4;

/// Draws a [`ChartDataset`] with ratatui's chart widgets. Reads only.
#[derive(Debug)]
pub struct ChartWidget<'a> {
    dataset: &'a ChartDataset,
    config: &'a ChartConfig,
    status_suffix: &'a str,
}

struct ViewData<'a> {
    block: Block<'a>,
    color: Color,
    y_max: f64,
}

impl<'a> ChartWidget<'a> {
    pub fn new(dataset: &'a ChartDataset, config: &'a ChartConfig) -> Self {
        Self {
            dataset,
            config,
            status_suffix: "",
        }
    }

    /// Appended to the title, e.g. to mark stale data.
    pub fn status_suffix(mut self, suffix: &'a str) -> Self {
        self.status_suffix = suffix;
        self
    }

    fn get_view_data(&self) -> ViewData<'a> {
        let color = self.config.color.parse::<Color>().unwrap_or(FALLBACK_COLOR);

        let data_max = self.dataset.max_value().unwrap_or(0.0);
        let y_max = self.config.y_max.unwrap_or(0.0).max(data_max).max(1.0);

        let block = Block::default()
            .title(format!(" {}{} ", self.config.title, self.status_suffix))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));

        ViewData { block, color, y_max }
    }
}

/// Values at which horizontal gridlines sit, excluding 0 and the top.
fn grid_levels(y_max: f64) -> Vec<f64> {
    (1..GRID_STEPS)
        .map(|step| y_max * step as f64 / GRID_STEPS as f64)
        .collect()
}

/// Display width of `text` in columns, saturating for absurd lengths.
fn text_width(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}

impl Widget for ChartWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.config.kind {
            ChartKind::Bar => self.render_bar_chart(area, buf),
            ChartKind::Line => self.render_line_chart(area, buf),
        }
    }
}
