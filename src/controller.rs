use std::collections::HashMap;
use std::error::Error as _;
use std::time::{Duration, Instant};

use chrono::Local;
use tracing::{info, warn};

use crate::api::PollApi;
use crate::error::FlowError;
use crate::flow::{Completed, Flow, Pending, Request, Response, Slot, Ticket};
use crate::model::{Choice, QuestionId, VoteRequest};
use crate::state::{AppState, Dialog, Notice, Page, ResultPanel, Reveal, QUESTION_LOAD_FAILED};
use crate::view::{bar_text, bar_widths};

pub const DEFAULT_BAR_MAX_WIDTH: f64 = 300.0;
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct Settings {
    pub bar_max_width: f64,
    pub reveal_delay: Duration,
    pub user_name: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bar_max_width: DEFAULT_BAR_MAX_WIDTH,
            reveal_delay: DEFAULT_REVEAL_DELAY,
            user_name: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

/// Drives pages and flows.
///
/// Flows never touch the network themselves: they queue [`Pending`] tickets
/// which a driver executes and feeds back through [`Controller::complete`].
pub struct Controller {
    state: AppState,
    settings: Settings,
    generation: u64,
    next_seq: u64,
    latest: HashMap<Slot, u64>,
    outbox: Vec<Pending>,
}

impl Controller {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: AppState::new(),
            settings,
            generation: 0,
            next_seq: 0,
            latest: HashMap::new(),
            outbox: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ---- routing ----

    pub fn show_page(&mut self, page: Page) {
        info!(page = page.id(), "show page");
        self.state.page = page;
        self.generation += 1;

        match page {
            Page::Question => self.load_question(),
            Page::History => self.load_history(),
            Page::EditList => self.load_edit_list(),
            Page::Top | Page::Result | Page::Create | Page::EditDetail => {}
        }
    }

    // ---- tickets ----

    fn issue(&mut self, flow: Flow, request: Request) {
        self.next_seq += 1;
        let ticket = Ticket {
            seq: self.next_seq,
            generation: self.generation,
            flow,
        };
        self.latest.insert(ticket.flow.slot(), ticket.seq);
        info!(flow = ?ticket.flow, seq = ticket.seq, "issue request");
        self.outbox.push(Pending { ticket, request });
    }

    pub fn has_pending(&self) -> bool {
        !self.outbox.is_empty()
    }

    pub fn take_pending(&mut self) -> Vec<Pending> {
        std::mem::take(&mut self.outbox)
    }

    /// Executes queued requests in-line until none remain, including the
    /// ones issued by completions.
    pub fn run_pending(&mut self, api: &dyn PollApi) {
        while self.has_pending() {
            for pending in self.take_pending() {
                let result = pending.request.execute(api);
                self.complete(Completed {
                    ticket: pending.ticket,
                    result,
                });
            }
        }
    }

    pub fn complete(&mut self, completed: Completed) -> Completion {
        let Completed { ticket, result } = completed;
        let superseded = self.latest.get(&ticket.flow.slot()) != Some(&ticket.seq);
        let navigated = ticket.generation != self.generation;

        if ticket.flow.is_load() && (superseded || navigated) {
            warn!(flow = ?ticket.flow, seq = ticket.seq, "discarding stale response");
            return Completion::Stale;
        }

        let response = match result {
            Ok(response) => response,
            Err(source) => {
                self.fail(FlowError::Request {
                    flow: ticket.flow,
                    source,
                });
                return Completion::Applied;
            }
        };
        info!(flow = ?ticket.flow, seq = ticket.seq, "request completed");

        match (ticket.flow, response) {
            (Flow::LoadQuestion, Response::Question(q)) => {
                self.state.session.set_current_question_id(q.id.clone());
                self.state.question.prompt = format!("Q. {}", q.q);
                self.state.question.option_a = Some(q.a);
                self.state.question.option_b = Some(q.b);
                self.mark_synced();
            }
            (Flow::Vote, Response::Done) => {
                if navigated {
                    self.notify(Notice::info("投票しました"));
                } else {
                    self.show_page(Page::Result);
                    self.load_results();
                }
            }
            (Flow::LoadResults, Response::Results(result)) => {
                self.state.session.set_last_result(result);
                self.state.result = ResultPanel {
                    open_visible: true,
                    ..ResultPanel::default()
                };
                self.mark_synced();
            }
            (Flow::CreateQuestion, Response::Done) => {
                self.notify(Notice::info("問題を登録しました"));
                self.state.create_form.clear();
                if !navigated {
                    self.show_page(Page::Top);
                }
            }
            (Flow::LoadHistory, Response::History(items)) => {
                self.state.history = Some(items);
                self.state.history_failed = false;
                self.mark_synced();
            }
            (Flow::LoadEditList, Response::Questions(questions)) => {
                let len = questions.len();
                self.state.edit_list = Some(questions);
                self.state.edit_list_failed = false;
                self.state.edit_cursor = self.state.edit_cursor.min(len.saturating_sub(1));
                self.mark_synced();
            }
            (Flow::BeginEdit(_), Response::Question(q)) => {
                self.state.edit_form.fill(&q);
                self.show_page(Page::EditDetail);
            }
            (Flow::SaveEdit, Response::Done) => {
                self.notify(Notice::info("変更を保存しました"));
                self.state.session.clear_current_editing_id();
                if !navigated {
                    self.show_page(Page::EditList);
                }
            }
            (Flow::DeleteQuestion(_), Response::Done) => {
                self.notify(Notice::info("問題を削除しました"));
                self.load_edit_list();
            }
            (flow, response) => {
                warn!(?flow, ?response, "response does not match flow");
                return Completion::Stale;
            }
        }
        Completion::Applied
    }

    fn fail(&mut self, err: FlowError) {
        warn!(error = %err, "flow failed");
        match err {
            FlowError::Request {
                flow: Flow::LoadQuestion,
                ..
            } => {
                // Reported inline; options keep whatever they showed before.
                self.state.question.prompt = QUESTION_LOAD_FAILED.to_string();
                return;
            }
            FlowError::Request {
                flow: Flow::LoadHistory,
                ..
            } => self.state.history_failed = true,
            FlowError::Request {
                flow: Flow::LoadEditList,
                ..
            } => self.state.edit_list_failed = true,
            _ => {}
        }
        let detail = err.source().map(|s| s.to_string());
        self.notify(Notice::error(err.to_string(), detail));
    }

    fn notify(&mut self, notice: Notice) {
        self.state.push_dialog(Dialog::Notice(notice));
    }

    fn mark_synced(&mut self) {
        self.state.synced_at = Some(Local::now());
    }

    // ---- question flow ----

    pub fn load_question(&mut self) {
        self.issue(Flow::LoadQuestion, Request::CurrentQuestion);
    }

    pub fn vote(&mut self, choice: Choice) -> Result<(), FlowError> {
        let question_id = self
            .state
            .session
            .current_question_id()
            .cloned()
            .ok_or(FlowError::NoQuestionLoaded)?;
        let vote = VoteRequest {
            question_id,
            choice,
            user_name: self.settings.user_name.clone(),
        };
        self.issue(Flow::Vote, Request::Vote(vote));
        Ok(())
    }

    pub fn create_question(&mut self) -> Result<(), FlowError> {
        let draft = self
            .state
            .create_form
            .draft()
            .ok_or(FlowError::MissingFields)?;
        self.issue(Flow::CreateQuestion, Request::CreateQuestion(draft));
        Ok(())
    }

    // ---- result reveal ----

    pub fn load_results(&mut self) {
        let Some(id) = self.state.session.current_question_id().cloned() else {
            warn!("no question loaded, skipping results");
            return;
        };
        self.issue(Flow::LoadResults, Request::Results(id));
    }

    /// Shows the result panel with its labels; widths follow after the
    /// reveal delay, see [`Controller::tick`].
    pub fn open_result(&mut self, now: Instant) {
        if self.state.result.panel_visible && !self.state.result.open_visible {
            return;
        }
        let Some(result) = self.state.session.last_result() else {
            return;
        };
        let bars = [
            bar_text(&result.option_a, result.votes_a, result.percentage_a),
            bar_text(&result.option_b, result.votes_b, result.percentage_b),
        ];
        let widths = bar_widths(result, self.settings.bar_max_width);

        let panel = &mut self.state.result;
        panel.open_visible = false;
        panel.panel_visible = true;
        for (bar, text) in panel.bars.iter_mut().zip(bars) {
            bar.text = text;
            bar.width = 0.0;
        }
        panel.reveal = Reveal::Scheduled {
            at: now + self.settings.reveal_delay,
            widths,
        };
    }

    /// Applies a scheduled reveal once its time has come. Returns whether
    /// anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let panel = &mut self.state.result;
        let Reveal::Scheduled { at, widths } = panel.reveal else {
            return false;
        };
        if now < at {
            return false;
        }
        panel.bars[0].width = widths[0];
        panel.bars[1].width = widths[1];
        panel.reveal = Reveal::Shown;
        true
    }

    // ---- history ----

    pub fn load_history(&mut self) {
        self.state.history_failed = false;
        self.issue(Flow::LoadHistory, Request::History);
    }

    // ---- edit flow ----

    pub fn load_edit_list(&mut self) {
        self.state.edit_list_failed = false;
        self.issue(Flow::LoadEditList, Request::Questions);
    }

    pub fn begin_edit(&mut self, id: QuestionId) {
        self.state.session.set_current_editing_id(id.clone());
        self.issue(Flow::BeginEdit(id.clone()), Request::Question(id));
    }

    pub fn save_edit(&mut self) -> Result<(), FlowError> {
        let id = self
            .state
            .session
            .current_editing_id()
            .cloned()
            .ok_or(FlowError::NoEditTarget)?;
        let draft = self
            .state
            .edit_form
            .draft()
            .ok_or(FlowError::MissingFields)?;
        self.issue(Flow::SaveEdit, Request::UpdateQuestion(id, draft));
        Ok(())
    }

    /// Asks for confirmation; nothing is sent until [`Controller::resolve_delete`].
    pub fn request_delete(&mut self, id: QuestionId) {
        self.state.push_dialog(Dialog::ConfirmDelete(id));
    }

    pub fn resolve_delete(&mut self, confirmed: bool) {
        let Some(Dialog::ConfirmDelete(id)) = self.state.top_dialog().cloned() else {
            return;
        };
        self.state.pop_dialog();
        if confirmed {
            self.issue(Flow::DeleteQuestion(id.clone()), Request::DeleteQuestion(id));
        } else {
            info!(%id, "delete declined");
        }
    }
}
