use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::view::ListEntry;

pub fn draw_list(f: &mut Frame, area: Rect, title: &str, entries: &[ListEntry]) {
    let mut lines: Vec<Line> = Vec::new();
    let mut selected_row = 0usize;

    for entry in entries {
        match entry {
            ListEntry::Placeholder(text) => {
                lines.push(Line::from(Span::styled(
                    format!(" {}", text),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            ListEntry::Text(text) => {
                lines.push(Line::from(format!(" • {}", text)));
            }
            ListEntry::Editable {
                title,
                subtitle,
                selected,
                ..
            } => {
                let (cursor, style) = if *selected {
                    selected_row = lines.len();
                    (
                        "▸",
                        Style::default()
                            .fg(Color::White)
                            .bg(Color::DarkGray)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    (" ", Style::default().fg(Color::White))
                };
                lines.push(Line::from(Span::styled(
                    format!("{} {}", cursor, title),
                    style,
                )));
                lines.push(Line::from(Span::styled(
                    format!("    {}", subtitle),
                    Style::default().fg(Color::Gray),
                )));
            }
        }
    }

    // Keep the selection on screen
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = (selected_row + 2).saturating_sub(inner_height) as u16;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title));
    let widget = Paragraph::new(lines).block(block).scroll((scroll, 0));
    f.render_widget(widget, area);
}
