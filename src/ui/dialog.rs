use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::model::QuestionId;
use crate::state::{AppState, Dialog, Notice, NoticeKind};
use crate::ui::layout::centered_rect;

pub fn draw_dialog(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(dialog) = state.top_dialog() else {
        return;
    };

    match dialog {
        Dialog::Notice(notice) => draw_notice(f, area, notice),
        Dialog::ConfirmDelete(id) => draw_confirm_delete(f, area, state, id),
        Dialog::Help => draw_help(f, area),
    }
}

fn draw_notice(f: &mut Frame, area: Rect, notice: &Notice) {
    let color = match notice.kind {
        NoticeKind::Info => Color::Green,
        NoticeKind::Error => Color::Red,
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("   {}", notice.message),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(detail) = &notice.detail {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("   エラーが発生しました: {}", detail),
            Style::default().fg(Color::White),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "           [OK]",
        Style::default().fg(Color::Green),
    )));
    lines.push(Line::from(""));

    let rect = centered_rect(52, lines.len() as u16 + 2, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let widget = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(widget, rect);
}

fn draw_confirm_delete(f: &mut Frame, area: Rect, state: &AppState, id: &QuestionId) {
    let title = state
        .edit_list
        .as_ref()
        .and_then(|list| list.iter().find(|q| &q.id == id))
        .map(|q| q.q.clone())
        .unwrap_or_else(|| format!("#{}", id));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   この問題を削除しますか？",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("   {}", title)),
        Line::from(""),
        Line::from(vec![
            Span::styled("   [y] Delete", Style::default().fg(Color::Red)),
            Span::raw("    "),
            Span::styled("[n] Cancel", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
    ];

    let rect = centered_rect(46, lines.len() as u16 + 2, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, rect);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Key Bindings",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("   1-4        Open menu entry"),
        Line::from("   a / b      Vote"),
        Line::from("   Enter      Open result"),
        Line::from("   e / d      Edit / delete question"),
        Line::from("   Tab        Next form field"),
        Line::from("   Ctrl+S     Submit form"),
        Line::from("   Esc        Back"),
        Line::from("   Ctrl+Q     Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "        [Esc] Close",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    let rect = centered_rect(44, lines.len() as u16 + 2, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Cyan));
    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, rect);
}
