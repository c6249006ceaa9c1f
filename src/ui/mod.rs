pub mod dialog;
pub mod form;
pub mod keybar;
pub mod layout;
pub mod list;
pub mod pages;
pub mod result;
pub mod statusbar;
pub mod titlebar;

use ratatui::Frame;

use crate::controller::Controller;
use crate::view::{self, PageView};

pub fn draw(f: &mut Frame, controller: &Controller) {
    let state = controller.state();
    let area = f.area();
    let layout = layout::compute_layout(area);

    titlebar::draw_titlebar(f, layout.titlebar, state);

    match view::build(state, controller.settings().bar_max_width) {
        PageView::Top { items, cursor } => pages::draw_top(f, layout.main, &items, cursor),
        PageView::Question {
            prompt,
            option_a,
            option_b,
        } => pages::draw_question(f, layout.main, &prompt, &option_a, &option_b),
        PageView::Result {
            heading,
            open_visible,
            bars,
            max_width,
        } => result::draw_result(
            f,
            layout.main,
            heading.as_deref(),
            open_visible,
            bars.as_ref(),
            max_width,
        ),
        PageView::Create(form) => form::draw_form(f, layout.main, "新しいお題", &form),
        PageView::EditDetail(form) => form::draw_form(f, layout.main, "お題を編集", &form),
        PageView::History(entries) => list::draw_list(f, layout.main, "過去のお題", &entries),
        PageView::EditList(entries) => list::draw_list(f, layout.main, "お題一覧", &entries),
    }

    statusbar::draw_statusbar(f, layout.statusbar, state);
    keybar::draw_keybar(f, layout.keybar, state);

    // Draw dialog overlay if any
    if state.has_dialog() {
        dialog::draw_dialog(f, area, state);
    }
}
