use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use chrono::{DateTime, Local};

use crate::model::{PollResult, Question, QuestionDraft, QuestionId};

pub const QUESTION_LOAD_FAILED: &str = "Q. お題の読み込みに失敗しました";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Top,
    Question,
    Result,
    Create,
    History,
    EditList,
    EditDetail,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Top,
        Page::Question,
        Page::Result,
        Page::Create,
        Page::History,
        Page::EditList,
        Page::EditDetail,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Page::Top => "top-page",
            Page::Question => "question-page",
            Page::Result => "result-page",
            Page::Create => "create-page",
            Page::History => "history-page",
            Page::EditList => "edit-list-page",
            Page::EditDetail => "edit-detail-page",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Top => "トップメニュー",
            Page::Question => "お題",
            Page::Result => "結果",
            Page::Create => "お題を作成",
            Page::History => "履歴",
            Page::EditList => "お題の編集",
            Page::EditDetail => "お題の詳細編集",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| format!("Unknown page: {}", s))
    }
}

/// Identifiers and payloads the flows hand to each other.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current_question_id: Option<QuestionId>,
    current_editing_id: Option<QuestionId>,
    last_result: Option<PollResult>,
}

impl Session {
    pub fn current_question_id(&self) -> Option<&QuestionId> {
        self.current_question_id.as_ref()
    }

    pub fn set_current_question_id(&mut self, id: QuestionId) {
        self.current_question_id = Some(id);
    }

    pub fn current_editing_id(&self) -> Option<&QuestionId> {
        self.current_editing_id.as_ref()
    }

    pub fn set_current_editing_id(&mut self, id: QuestionId) {
        self.current_editing_id = Some(id);
    }

    pub fn clear_current_editing_id(&mut self) {
        self.current_editing_id = None;
    }

    pub fn last_result(&self) -> Option<&PollResult> {
        self.last_result.as_ref()
    }

    pub fn set_last_result(&mut self, result: PollResult) {
        self.last_result = Some(result);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Question,
    OptionA,
    OptionB,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Question => FormField::OptionA,
            FormField::OptionA => FormField::OptionB,
            FormField::OptionB => FormField::Question,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Question => FormField::OptionB,
            FormField::OptionA => FormField::Question,
            FormField::OptionB => FormField::OptionA,
        }
    }
}

/// The three text inputs shared by the create and edit pages.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionForm {
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub focus: FormField,
}

impl Default for QuestionForm {
    fn default() -> Self {
        Self {
            question: String::new(),
            option_a: String::new(),
            option_b: String::new(),
            focus: FormField::Question,
        }
    }
}

impl QuestionForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Question => &self.question,
            FormField::OptionA => &self.option_a,
            FormField::OptionB => &self.option_b,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Question => &mut self.question,
            FormField::OptionA => &mut self.option_a,
            FormField::OptionB => &mut self.option_b,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    pub fn fill(&mut self, question: &Question) {
        self.question = question.q.clone();
        self.option_a = question.a.clone();
        self.option_b = question.b.clone();
        self.focus = FormField::Question;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Trimmed draft, or `None` when any field is blank.
    pub fn draft(&self) -> Option<QuestionDraft> {
        let q = self.question.trim();
        let a = self.option_a.trim();
        let b = self.option_b.trim();
        if q.is_empty() || a.is_empty() || b.is_empty() {
            return None;
        }
        Some(QuestionDraft {
            q: q.to_string(),
            a: a.to_string(),
            b: b.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionPanel {
    pub prompt: String,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub text: String,
    /// Pixels, relative to the configured maximum width.
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reveal {
    Closed,
    /// Panel is visible, widths are applied once `at` passes.
    Scheduled { at: Instant, widths: [f64; 2] },
    Shown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultPanel {
    pub open_visible: bool,
    pub panel_visible: bool,
    pub bars: [Bar; 2],
    pub reveal: Reveal,
}

impl Default for ResultPanel {
    fn default() -> Self {
        let empty = Bar {
            text: String::new(),
            width: 0.0,
        };
        Self {
            open_visible: false,
            panel_visible: false,
            bars: [empty.clone(), empty],
            reveal: Reveal::Closed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub detail: Option<String>,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
            detail: None,
        }
    }

    pub fn error(message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            detail,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    Notice(Notice),
    ConfirmDelete(QuestionId),
    Help,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub page: Page,
    pub session: Session,
    pub question: QuestionPanel,
    pub result: ResultPanel,
    pub history: Option<Vec<String>>,
    pub history_failed: bool,
    pub edit_list: Option<Vec<Question>>,
    pub edit_list_failed: bool,
    pub edit_cursor: usize,
    pub top_cursor: usize,
    pub create_form: QuestionForm,
    pub edit_form: QuestionForm,
    pub dialog_stack: Vec<Dialog>,
    pub synced_at: Option<DateTime<Local>>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            page: Page::Top,
            session: Session::default(),
            question: QuestionPanel::default(),
            result: ResultPanel::default(),
            history: None,
            history_failed: false,
            edit_list: None,
            edit_list_failed: false,
            edit_cursor: 0,
            top_cursor: 0,
            create_form: QuestionForm::default(),
            edit_form: QuestionForm::default(),
            dialog_stack: Vec::new(),
            synced_at: None,
            should_quit: false,
        }
    }

    pub fn is_active(&self, page: Page) -> bool {
        self.page == page
    }

    pub fn selected_question(&self) -> Option<&Question> {
        self.edit_list.as_ref()?.get(self.edit_cursor)
    }

    pub fn has_dialog(&self) -> bool {
        !self.dialog_stack.is_empty()
    }

    pub fn top_dialog(&self) -> Option<&Dialog> {
        self.dialog_stack.last()
    }

    pub fn push_dialog(&mut self, dialog: Dialog) {
        self.dialog_stack.push(dialog);
    }

    pub fn pop_dialog(&mut self) -> Option<Dialog> {
        self.dialog_stack.pop()
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.dialog_stack.iter().filter_map(|d| match d {
            Dialog::Notice(n) => Some(n),
            _ => None,
        })
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
