use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::state::{FormField, QuestionForm};

const FIELDS: [(FormField, &str); 3] = [
    (FormField::Question, "お題"),
    (FormField::OptionA, "選択肢 A"),
    (FormField::OptionB, "選択肢 B"),
];

pub fn draw_form(f: &mut Frame, area: Rect, title: &str, form: &QuestionForm) {
    let mut lines = vec![Line::from("")];

    for (field, label) in FIELDS {
        let focused = form.focus == field;
        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(format!("  {}", label), label_style)));

        let mut value = vec![
            Span::raw("  > "),
            Span::styled(form.field(field).to_string(), Style::default().fg(Color::White)),
        ];
        if focused {
            value.push(Span::styled(
                "█",
                Style::default().fg(Color::White),
            ));
        }
        lines.push(Line::from(value));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "  [Ctrl+S] 保存    [Esc] 戻る",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title));
    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, area);
}
