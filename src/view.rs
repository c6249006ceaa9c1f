//! Pure mapping from controller state to what a page shows.
//!
//! Nothing here knows about the terminal; `ui` draws these values.

use crate::flow::Flow;
use crate::model::{PollResult, QuestionId};
use crate::state::{AppState, Bar, Page, QuestionForm};

pub const NO_HISTORY: &str = "履歴がありません";
pub const NO_QUESTIONS: &str = "問題がありません";
pub const LOADING: &str = "読み込み中...";

pub const TOP_MENU: [(&str, Page); 4] = [
    ("お題に答える", Page::Question),
    ("お題を作成する", Page::Create),
    ("過去のお題", Page::History),
    ("お題を編集する", Page::EditList),
];

pub fn bar_text(label: &str, votes: u64, percentage: f64) -> String {
    format!("{}: {}票 ({}%)", label, votes, percentage)
}

/// Bar widths in pixels. A zero total yields empty bars.
pub fn bar_widths(result: &PollResult, max_width: f64) -> [f64; 2] {
    if result.total == 0 {
        return [0.0, 0.0];
    }
    let total = result.total as f64;
    [
        result.votes_a as f64 / total * max_width,
        result.votes_b as f64 / total * max_width,
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListEntry {
    Placeholder(&'static str),
    Text(String),
    Editable {
        id: QuestionId,
        title: String,
        subtitle: String,
        selected: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Top {
        items: Vec<&'static str>,
        cursor: usize,
    },
    Question {
        prompt: String,
        option_a: String,
        option_b: String,
    },
    Result {
        heading: Option<String>,
        open_visible: bool,
        bars: Option<[Bar; 2]>,
        max_width: f64,
    },
    Create(QuestionForm),
    History(Vec<ListEntry>),
    EditList(Vec<ListEntry>),
    EditDetail(QuestionForm),
}

pub fn history_entries(items: &[String]) -> Vec<ListEntry> {
    if items.is_empty() {
        return vec![ListEntry::Placeholder(NO_HISTORY)];
    }
    items.iter().cloned().map(ListEntry::Text).collect()
}

pub fn edit_entries(state: &AppState) -> Vec<ListEntry> {
    let questions = state.edit_list.as_deref().unwrap_or_default();
    if questions.is_empty() {
        return vec![ListEntry::Placeholder(NO_QUESTIONS)];
    }
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| ListEntry::Editable {
            id: q.id.clone(),
            title: q.q.clone(),
            subtitle: format!("A: {} / B: {}", q.a, q.b),
            selected: i == state.edit_cursor,
        })
        .collect()
}

fn unloaded(failed: bool, flow: Flow) -> ListEntry {
    if failed {
        ListEntry::Placeholder(flow.failure_message())
    } else {
        ListEntry::Placeholder(LOADING)
    }
}

pub fn build(state: &AppState, max_width: f64) -> PageView {
    match state.page {
        Page::Top => PageView::Top {
            items: TOP_MENU.iter().map(|(label, _)| *label).collect(),
            cursor: state.top_cursor,
        },
        Page::Question => PageView::Question {
            prompt: state.question.prompt.clone(),
            option_a: state.question.option_a.clone().unwrap_or_default(),
            option_b: state.question.option_b.clone().unwrap_or_default(),
        },
        Page::Result => PageView::Result {
            heading: state
                .session
                .last_result()
                .and_then(|r| r.question.clone()),
            open_visible: state.result.open_visible,
            bars: state
                .result
                .panel_visible
                .then(|| state.result.bars.clone()),
            max_width,
        },
        Page::Create => PageView::Create(state.create_form.clone()),
        Page::History => PageView::History(match &state.history {
            Some(items) => history_entries(items),
            None => vec![unloaded(state.history_failed, Flow::LoadHistory)],
        }),
        Page::EditList => PageView::EditList(if state.edit_list.is_some() {
            edit_entries(state)
        } else {
            vec![unloaded(state.edit_list_failed, Flow::LoadEditList)]
        }),
        Page::EditDetail => PageView::EditDetail(state.edit_form.clone()),
    }
}
