use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::AppState;

pub fn draw_statusbar(f: &mut Frame, area: Rect, state: &AppState) {
    let synced = match state.synced_at {
        Some(at) => Span::styled(
            format!("✓ synced {}", at.format("%H:%M:%S")),
            Style::default().fg(Color::Green),
        ),
        None => Span::styled("· not synced", Style::default().fg(Color::DarkGray)),
    };

    let question = match state.session.current_question_id() {
        Some(id) => Span::styled(
            format!("question #{}", id),
            Style::default().fg(Color::LightBlue),
        ),
        None => Span::styled("no question", Style::default().fg(Color::DarkGray)),
    };

    let line = Line::from(vec![
        Span::raw(" "),
        synced,
        Span::raw("   "),
        question,
        Span::raw("   "),
        Span::styled(state.page.id(), Style::default().fg(Color::White)),
        Span::raw("   "),
        Span::styled("[?] help", Style::default().fg(Color::DarkGray)),
    ]);

    let widget = Paragraph::new(line).style(Style::default().bg(Color::Rgb(30, 30, 30)));
    f.render_widget(widget, area);
}
