use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::AppState;

pub const APP_TITLE: &str = "究極の二択";

pub fn draw_titlebar(f: &mut Frame, area: Rect, state: &AppState) {
    let title_text = format!("[ {} ]", APP_TITLE);
    let page_text = format!(" {} ", state.page.title());

    // Center the title; the page name sits at the right edge
    let available = area.width as usize;
    let title_len = Span::raw(title_text.as_str()).width();
    let page_len = Span::raw(page_text.as_str()).width();
    let center_pad = available.saturating_sub(title_len) / 2;
    let right_pad = available.saturating_sub(center_pad + title_len + page_len);

    let line = Line::from(vec![
        Span::raw(" ".repeat(center_pad)),
        Span::styled(
            title_text,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(right_pad)),
        Span::styled(page_text, Style::default().fg(Color::Rgb(200, 200, 120))),
    ]);

    let widget = Paragraph::new(line)
        .style(Style::default().bg(Color::DarkGray))
        .alignment(Alignment::Left);
    f.render_widget(widget, area);
}
