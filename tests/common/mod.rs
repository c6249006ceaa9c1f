#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;

use twochoice::api::{ApiError, PollApi};
use twochoice::controller::{Controller, Settings};
use twochoice::model::{PollResult, Question, QuestionDraft, QuestionId, VoteRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CurrentQuestion,
    Question(QuestionId),
    Questions,
    Create(QuestionDraft),
    Update(QuestionId, QuestionDraft),
    Delete(QuestionId),
    Vote(serde_json::Value),
    Results(QuestionId),
    History,
}

/// In-memory stand-in for the polling service that records every call.
pub struct FakeApi {
    pub questions: RefCell<Vec<Question>>,
    pub history: Vec<String>,
    pub results: PollResult,
    failing: RefCell<HashSet<&'static str>>,
    calls: RefCell<Vec<Call>>,
}

pub fn question(id: u64, q: &str, a: &str, b: &str) -> Question {
    Question {
        id: QuestionId::Number(id),
        q: q.to_string(),
        a: a.to_string(),
        b: b.to_string(),
    }
}

pub fn cats_and_dogs() -> PollResult {
    PollResult {
        question_id: Some(QuestionId::Number(1)),
        question: Some("Cats or dogs?".to_string()),
        option_a: "Cats".to_string(),
        option_b: "Dogs".to_string(),
        votes_a: 3,
        votes_b: 1,
        total: 4,
        percentage_a: 75.0,
        percentage_b: 25.0,
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            questions: RefCell::new(vec![
                question(2, "Tea or coffee?", "Tea", "Coffee"),
                question(1, "Cats or dogs?", "Cats", "Dogs"),
            ]),
            history: vec!["Cats or dogs?".to_string(), "Tea or coffee?".to_string()],
            results: cats_and_dogs(),
            failing: RefCell::new(HashSet::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        let api = Self::new();
        api.questions.borrow_mut().clear();
        Self {
            history: Vec::new(),
            ..api
        }
    }

    /// Makes the named endpoint answer with HTTP 500.
    pub fn fail(&self, endpoint: &'static str) {
        self.failing.borrow_mut().insert(endpoint);
    }

    pub fn heal(&self) {
        self.failing.borrow_mut().clear();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, endpoint: &'static str, call: Call) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        if self.failing.borrow().contains(endpoint) {
            return Err(ApiError::RequestFailed { status: 500 });
        }
        Ok(())
    }

    fn find(&self, id: &QuestionId) -> Result<Question, ApiError> {
        self.questions
            .borrow()
            .iter()
            .find(|q| &q.id == id)
            .cloned()
            .ok_or(ApiError::RequestFailed { status: 404 })
    }
}

impl PollApi for FakeApi {
    fn current_question(&self) -> Result<Question, ApiError> {
        self.record("current_question", Call::CurrentQuestion)?;
        let latest = self.questions.borrow().first().cloned();
        latest.ok_or(ApiError::RequestFailed { status: 404 })
    }

    fn question(&self, id: &QuestionId) -> Result<Question, ApiError> {
        self.record("question", Call::Question(id.clone()))?;
        self.find(id)
    }

    fn questions(&self) -> Result<Vec<Question>, ApiError> {
        self.record("questions", Call::Questions)?;
        Ok(self.questions.borrow().clone())
    }

    fn create_question(&self, draft: &QuestionDraft) -> Result<(), ApiError> {
        self.record("create", Call::Create(draft.clone()))
    }

    fn update_question(&self, id: &QuestionId, draft: &QuestionDraft) -> Result<(), ApiError> {
        self.record("update", Call::Update(id.clone(), draft.clone()))?;
        let mut questions = self.questions.borrow_mut();
        if let Some(q) = questions.iter_mut().find(|q| &q.id == id) {
            q.q = draft.q.clone();
            q.a = draft.a.clone();
            q.b = draft.b.clone();
        }
        Ok(())
    }

    fn delete_question(&self, id: &QuestionId) -> Result<(), ApiError> {
        self.record("delete", Call::Delete(id.clone()))?;
        self.questions.borrow_mut().retain(|q| &q.id != id);
        Ok(())
    }

    fn vote(&self, vote: &VoteRequest) -> Result<(), ApiError> {
        let body = serde_json::to_value(vote).map_err(ApiError::Decode)?;
        self.record("vote", Call::Vote(body))
    }

    fn results(&self, id: &QuestionId) -> Result<PollResult, ApiError> {
        self.record("results", Call::Results(id.clone()))?;
        Ok(self.results.clone())
    }

    fn history(&self) -> Result<Vec<String>, ApiError> {
        self.record("history", Call::History)?;
        Ok(self.history.clone())
    }
}

pub fn controller() -> Controller {
    Controller::new(Settings::default())
}
