use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::state::Bar;

/// Columns a bar occupies when `columns` stand for `max_width` pixels.
pub fn bar_cells(width: f64, max_width: f64, columns: u16) -> u16 {
    if max_width <= 0.0 || width <= 0.0 {
        return 0;
    }
    let ratio = (width / max_width).min(1.0);
    (ratio * columns as f64).round() as u16
}

pub fn draw_result(
    f: &mut Frame,
    area: Rect,
    heading: Option<&str>,
    open_visible: bool,
    bars: Option<&[Bar; 2]>,
    max_width: f64,
) {
    let mut lines = vec![Line::from("")];
    if let Some(q) = heading {
        lines.push(Line::from(Span::styled(
            format!("Q. {}", q),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    if open_visible {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  ▶ 結果をオープン！ [Enter]  ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }

    if let Some(bars) = bars {
        let columns = area.width.saturating_sub(6).min(60);
        for (bar, color) in bars.iter().zip([Color::Red, Color::Blue]) {
            let cells = bar_cells(bar.width, max_width, columns) as usize;
            lines.push(Line::from(bar.text.clone()));
            lines.push(Line::from(vec![
                Span::styled("█".repeat(cells), Style::default().fg(color)),
                Span::styled(
                    "░".repeat((columns as usize).saturating_sub(cells)),
                    Style::default().fg(Color::Rgb(50, 50, 50)),
                ),
            ]));
            lines.push(Line::from(""));
        }
    }

    let block = Block::default().borders(Borders::ALL).title(" 結果 ");
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_cells_scale_pixels_to_columns() {
        assert_eq!(bar_cells(225.0, 300.0, 40), 30);
        assert_eq!(bar_cells(75.0, 300.0, 40), 10);
        assert_eq!(bar_cells(0.0, 300.0, 40), 0);
        assert_eq!(bar_cells(500.0, 300.0, 40), 40);
    }
}
