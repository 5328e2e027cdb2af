use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::{Color, Style, Widget},
};

use super::{grid_levels, text_width, ChartWidget, ViewData};

impl ChartWidget<'_> {
    pub(super) fn render_line_chart(&self, area: Rect, buf: &mut Buffer) {
        let ViewData { block, color, y_max } = self.get_view_data();

        let inner_area = block.inner(area);
        block.render(area, buf);

        let top_label = format!("{:.0}", y_max);
        // y labels on the left, x labels along the bottom
        let gutter = text_width(&top_label).saturating_add(1);

        if self.dataset.is_empty() || inner_area.width <= gutter.saturating_add(1) || inner_area.height < 3 {
            return;
        }

        let plot = Rect {
            x: inner_area.x + gutter,
            y: inner_area.y,
            width: inner_area.width - gutter,
            height: inner_area.height - 1,
        };
        let axis_style = Style::default().fg(Color::DarkGray);

        let row_of = |value: f64| -> u16 {
            let normalized = (value / y_max).clamp(0.0, 1.0);
            plot.bottom() - 1 - (normalized * (plot.height - 1) as f64).round() as u16
        };

        if self.config.gridlines {
            for level in grid_levels(y_max) {
                let y = row_of(level);
                for x in plot.left()..plot.right() {
                    buf.set_string(x, y, "┈", axis_style);
                }
            }
        }

        buf.set_string(inner_area.x, plot.top(), &top_label, axis_style);
        buf.set_string(inner_area.x, plot.bottom() - 1, "0", axis_style);

        // Spread points across the plot width and join neighbours column by column
        let points = self.dataset.points();
        let last = points.len().saturating_sub(1).max(1) as f64;
        let column_of = |i: usize| -> u16 {
            if points.len() == 1 {
                plot.x + plot.width / 2
            } else {
                plot.x + ((i as f64 / last) * (plot.width - 1) as f64).round() as u16
            }
        };
        let line_style = Style::default().fg(color);

        for (i, pair) in points.windows(2).enumerate() {
            let (x0, x1) = (column_of(i), column_of(i + 1));
            let span = (x1 - x0).max(1) as f64;
            for x in x0..x1 {
                let t = (x - x0) as f64 / span;
                let value = pair[0].value + (pair[1].value - pair[0].value) * t;
                buf.set_string(x, row_of(value), "·", line_style);
            }
        }

        for (i, point) in points.iter().enumerate() {
            buf.set_string(column_of(i), row_of(point.value), "•", line_style);
        }

        // First and last labels always; the middle one when there is room
        let label_row = inner_area.bottom() - 1;
        let first = &points[0].label;
        buf.set_stringn(plot.x, label_row, first, plot.width as usize, axis_style);

        if points.len() > 1 {
            let last_label = &points[points.len() - 1].label;
            // right-aligned, cut short rather than run over the first label
            let first_end = plot.x.saturating_add(text_width(first)).min(plot.right());
            let room = plot.right().saturating_sub(first_end.saturating_add(1));
            let shown = text_width(last_label).min(room);
            let x = plot.right() - shown;
            if shown > 0 {
                buf.set_stringn(x, label_row, last_label, usize::from(shown), axis_style);
            }

            let mid = points.len() / 2;
            if mid > 0 && mid < points.len() - 1 {
                let mid_label = &points[mid].label;
                let mid_width = text_width(mid_label);
                let mid_x = column_of(mid).saturating_sub(mid_width / 2);
                let clear_of_first = mid_x > plot.x.saturating_add(text_width(first));
                if clear_of_first && mid_x.saturating_add(mid_width) < x {
                    buf.set_string(mid_x, label_row, mid_label, axis_style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        chart::{ChartDataset, ChartPoint},
        config::{ChartConfig, ChartKind},
    };

    fn render(dataset: &ChartDataset) -> Buffer {
        let config = ChartConfig {
            kind: ChartKind::Line,
            gridlines: false,
            y_max: Some(10.0),
            ..ChartConfig::default()
        };
        let area = Rect::new(0, 0, 30, 8);
        let mut buf = Buffer::empty(area);
        ChartWidget::new(dataset, &config).render(area, &mut buf);
        buf
    }

    #[test]
    fn test_points_sit_at_their_height() {
        let dataset = ChartDataset::new(vec![
            ChartPoint::new("lo", 0.0),
            ChartPoint::new("hi", 10.0),
        ]);

        let buf = render(&dataset);

        // inner area is 28x6, plot rows 1..=5 after the label row, gutter of 3
        assert_eq!(buf[(4, 5)].symbol(), "•");
        assert_eq!(buf[(28, 1)].symbol(), "•");
        assert_eq!(buf[(1, 1)].symbol(), "1");
        assert_eq!(buf[(1, 5)].symbol(), "0");
    }

    #[test]
    fn test_single_point_is_centered() {
        let dataset = ChartDataset::new(vec![ChartPoint::new("only", 5.0)]);

        let buf = render(&dataset);

        let row: String = (0..30).map(|x| buf[(x, 6)].symbol().to_string()).collect();
        assert!(row.contains("only"));
        assert!((0..30).any(|x| buf[(x, 3)].symbol() == "•"));
    }

    #[test]
    fn test_overlong_labels_are_cut_to_the_plot() {
        let long = "x".repeat(70_000);
        let dataset = ChartDataset::new(vec![
            ChartPoint::new("lo", 1.0),
            ChartPoint::new(long.clone(), 2.0),
            ChartPoint::new(long, 3.0),
        ]);

        let buf = render(&dataset);

        let row: String = (0..30).map(|x| buf[(x, 6)].symbol().to_string()).collect();
        assert!(row.contains("lo"));
        assert!(row.ends_with("x│"));
    }
}
