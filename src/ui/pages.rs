use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw_top(f: &mut Frame, area: Rect, items: &[&str], cursor: usize) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "究極の二択",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("意見が割れたら、多数決で決めよう"),
        Line::from(""),
    ];

    for (i, item) in items.iter().enumerate() {
        let text = format!("{}. {}", i + 1, item);
        if i == cursor {
            lines.push(Line::from(Span::styled(
                format!("▶ {} ◀", text),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(text));
        }
        lines.push(Line::from(""));
    }

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

pub fn draw_question(f: &mut Frame, area: Rect, prompt: &str, option_a: &str, option_b: &str) {
    let option_style = |color: Color| {
        Style::default()
            .fg(Color::White)
            .bg(color)
            .add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            prompt.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  A  {}  ", option_a), option_style(Color::Red)),
            Span::raw("    vs    "),
            Span::styled(format!("  B  {}  ", option_b), option_style(Color::Blue)),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "[a] A に投票    [b] B に投票",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
