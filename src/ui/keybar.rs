use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::{AppState, Dialog, Page};

pub fn key_bindings(state: &AppState) -> Vec<(&'static str, &'static str)> {
    match state.top_dialog() {
        Some(Dialog::ConfirmDelete(_)) => return vec![("y/Enter", "delete"), ("n/Esc", "cancel")],
        Some(Dialog::Notice(_)) | Some(Dialog::Help) => return vec![("Enter/Esc", "close")],
        None => {}
    }

    match state.page {
        Page::Top => vec![
            ("↑/↓", "select"),
            ("Enter", "open"),
            ("1-4", "jump"),
            ("q", "quit"),
        ],
        Page::Question => vec![
            ("a/←", "vote A"),
            ("b/→", "vote B"),
            ("r", "reload"),
            ("Esc", "top"),
            ("Ctrl+Q", "quit"),
        ],
        Page::Result => vec![("Enter", "open result"), ("Esc", "top"), ("Ctrl+Q", "quit")],
        Page::History => vec![("Esc", "top"), ("Ctrl+Q", "quit")],
        Page::EditList => vec![
            ("↑/↓", "select"),
            ("e/Enter", "edit"),
            ("d", "delete"),
            ("r", "reload"),
            ("Esc", "top"),
        ],
        Page::Create | Page::EditDetail => vec![
            ("Tab", "next field"),
            ("Enter", "next/submit"),
            ("Ctrl+S", "submit"),
            ("Esc", "back"),
        ],
    }
}

pub fn draw_keybar(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, action)) in key_bindings(state).iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", action)));
    }

    let line = Line::from(spans);
    let widget = Paragraph::new(line).style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(widget, area);
}
