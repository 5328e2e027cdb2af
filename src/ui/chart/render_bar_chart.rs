use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::{Color, Style, Widget},
    widgets::BarChart,
};

use super::{grid_levels, ChartWidget, ViewData};

const BAR_GAP: u16 = 1;

impl ChartWidget<'_> {
    pub(super) fn render_bar_chart(&self, area: Rect, buf: &mut Buffer) {
        let ViewData { block, color, y_max } = self.get_view_data();

        let inner_area = block.inner(area);

        if self.dataset.is_empty() || inner_area.width == 0 || inner_area.height < 2 {
            block.render(area, buf);
            return;
        }

        // One column per bar at the least; when they do not all fit, the most recent points win
        let fits = usize::from((inner_area.width.saturating_add(BAR_GAP) / (1 + BAR_GAP)).max(1));
        let points = self.dataset.points();
        let visible = &points[points.len().saturating_sub(fits)..];

        // Bars share the inner width evenly, one column of gap between them
        let bars = u16::try_from(visible.len()).unwrap_or(u16::MAX).max(1);
        let bar_width = (inner_area.width.saturating_add(BAR_GAP) / bars)
            .saturating_sub(BAR_GAP)
            .max(1);

        // BarChart wants (&str, u64); negative values draw as empty bars
        let bar_data: Vec<(&str, u64)> = visible
            .iter()
            .map(|p| (p.label.as_str(), p.value.max(0.0).round() as u64))
            .collect();

        let bar_chart = BarChart::default()
            .block(block)
            .data(&bar_data)
            .bar_width(bar_width)
            .bar_gap(BAR_GAP)
            .max(y_max.ceil() as u64)
            .bar_style(Style::default().fg(color))
            .value_style(Style::default().fg(Color::Black).bg(color));

        Widget::render(bar_chart, area, buf);

        if self.config.gridlines {
            // bottom row of the inner area holds the labels
            let bars_bottom = inner_area.bottom() - 1;
            let bars_height = (inner_area.height - 1) as f64;

            for level in grid_levels(y_max) {
                let offset = (level / y_max * bars_height).round() as u16;
                if offset == 0 || offset > bars_bottom - inner_area.y {
                    continue;
                }
                let y = bars_bottom - offset;

                for x in inner_area.left()..inner_area.right() {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        if cell.symbol() == " " {
                            cell.set_symbol("┈").set_fg(Color::DarkGray);
                        }
                    }
                }
            }
        }
    }
}
