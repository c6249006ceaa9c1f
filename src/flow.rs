use crate::api::{ApiError, PollApi};
use crate::model::{PollResult, Question, QuestionDraft, QuestionId, VoteRequest};

/// What a ticket's completion should do once the response arrives.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    LoadQuestion,
    Vote,
    LoadResults,
    CreateQuestion,
    LoadHistory,
    LoadEditList,
    BeginEdit(QuestionId),
    SaveEdit,
    DeleteQuestion(QuestionId),
}

/// Tickets in the same slot supersede each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Question,
    Vote,
    Results,
    Create,
    History,
    EditList,
    EditDetail,
    Save,
    Delete,
}

impl Flow {
    pub fn slot(&self) -> Slot {
        match self {
            Flow::LoadQuestion => Slot::Question,
            Flow::Vote => Slot::Vote,
            Flow::LoadResults => Slot::Results,
            Flow::CreateQuestion => Slot::Create,
            Flow::LoadHistory => Slot::History,
            Flow::LoadEditList => Slot::EditList,
            Flow::BeginEdit(_) => Slot::EditDetail,
            Flow::SaveEdit => Slot::Save,
            Flow::DeleteQuestion(_) => Slot::Delete,
        }
    }

    /// Loads only read; their responses can be dropped when stale.
    pub fn is_load(&self) -> bool {
        matches!(
            self,
            Flow::LoadQuestion
                | Flow::LoadResults
                | Flow::LoadHistory
                | Flow::LoadEditList
                | Flow::BeginEdit(_)
        )
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Flow::LoadQuestion => "お題の読み込みに失敗しました",
            Flow::Vote => "投票に失敗しました",
            Flow::LoadResults => "結果の読み込みに失敗しました",
            Flow::CreateQuestion => "問題の登録に失敗しました",
            Flow::LoadHistory => "履歴の読み込みに失敗しました",
            Flow::LoadEditList => "編集リストの読み込みに失敗しました",
            Flow::BeginEdit(_) => "問題の読み込みに失敗しました",
            Flow::SaveEdit => "変更の保存に失敗しました",
            Flow::DeleteQuestion(_) => "問題の削除に失敗しました",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    CurrentQuestion,
    Question(QuestionId),
    Questions,
    CreateQuestion(QuestionDraft),
    UpdateQuestion(QuestionId, QuestionDraft),
    DeleteQuestion(QuestionId),
    Vote(VoteRequest),
    Results(QuestionId),
    History,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Question(Question),
    Questions(Vec<Question>),
    Results(PollResult),
    History(Vec<String>),
    Done,
}

impl Request {
    pub fn execute(&self, api: &dyn PollApi) -> Result<Response, ApiError> {
        match self {
            Request::CurrentQuestion => api.current_question().map(Response::Question),
            Request::Question(id) => api.question(id).map(Response::Question),
            Request::Questions => api.questions().map(Response::Questions),
            Request::CreateQuestion(draft) => api.create_question(draft).map(|_| Response::Done),
            Request::UpdateQuestion(id, draft) => {
                api.update_question(id, draft).map(|_| Response::Done)
            }
            Request::DeleteQuestion(id) => api.delete_question(id).map(|_| Response::Done),
            Request::Vote(vote) => api.vote(vote).map(|_| Response::Done),
            Request::Results(id) => api.results(id).map(Response::Results),
            Request::History => api.history().map(Response::History),
        }
    }
}

/// An issued request, tagged so its completion can be matched to the
/// navigation state it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub seq: u64,
    pub generation: u64,
    pub flow: Flow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pending {
    pub ticket: Ticket,
    pub request: Request,
}

#[derive(Debug)]
pub struct Completed {
    pub ticket: Ticket,
    pub result: Result<Response, ApiError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_and_writes_are_told_apart() {
        assert!(Flow::LoadQuestion.is_load());
        assert!(Flow::BeginEdit(QuestionId::Number(1)).is_load());
        assert!(!Flow::Vote.is_load());
        assert!(!Flow::DeleteQuestion(QuestionId::Number(1)).is_load());
    }

    #[test]
    fn edits_share_a_slot() {
        let first = Flow::BeginEdit(QuestionId::Number(1));
        let second = Flow::BeginEdit(QuestionId::Number(2));
        assert_eq!(first.slot(), second.slot());
    }
}
