use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned question identifier.
///
/// Kept in whatever JSON shape the server used so it can be echoed back
/// unchanged in vote and result requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(u64),
    Text(String),
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Number(n) => write!(f, "{}", n),
            QuestionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for QuestionId {
    fn from(n: u64) -> Self {
        QuestionId::Number(n)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub q: String,
    pub a: String,
    pub b: String,
}

/// Body of create and update requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub q: String,
    pub a: String,
    pub b: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteRequest {
    pub question_id: QuestionId,
    pub choice: Choice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// Aggregated tally for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<QuestionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(rename = "optionA")]
    pub option_a: String,
    #[serde(rename = "optionB")]
    pub option_b: String,
    #[serde(rename = "votes_A")]
    pub votes_a: u64,
    #[serde(rename = "votes_B")]
    pub votes_b: u64,
    pub total: u64,
    #[serde(rename = "percentage_A")]
    pub percentage_a: f64,
    #[serde(rename = "percentage_B")]
    pub percentage_b: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_id_keeps_json_shape() {
        let q: Question = serde_json::from_str(r#"{"id":7,"q":"x","a":"y","b":"z"}"#).unwrap();
        assert_eq!(q.id, QuestionId::Number(7));
        assert_eq!(serde_json::to_string(&q.id).unwrap(), "7");

        let q: Question = serde_json::from_str(r#"{"id":"abc","q":"x","a":"y","b":"z"}"#).unwrap();
        assert_eq!(q.id, QuestionId::Text("abc".to_string()));
        assert_eq!(serde_json::to_string(&q.id).unwrap(), "\"abc\"");
    }

    #[test]
    fn vote_omits_missing_user_name() {
        let vote = VoteRequest {
            question_id: QuestionId::Number(3),
            choice: Choice::B,
            user_name: None,
        };
        let value = serde_json::to_value(&vote).unwrap();
        assert_eq!(value, serde_json::json!({"question_id": 3, "choice": "B"}));
    }

    #[test]
    fn result_accepts_server_payload() {
        let body = r#"{
            "question_id": 1,
            "question": "一生食べるならどっち？",
            "optionA": "高級寿司",
            "optionB": "至高の焼肉",
            "votes_A": 2,
            "votes_B": 1,
            "total": 3,
            "percentage_A": 66.7,
            "percentage_B": 33.3
        }"#;
        let result: PollResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.option_a, "高級寿司");
        assert_eq!(result.votes_a, 2);
        assert_eq!(result.question.as_deref(), Some("一生食べるならどっち？"));
    }

    #[test]
    fn result_without_optional_fields() {
        let body = r#"{"optionA":"Cats","optionB":"Dogs","votes_A":3,"votes_B":1,
            "total":4,"percentage_A":75,"percentage_B":25}"#;
        let result: PollResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.question_id, None);
        assert_eq!(result.percentage_a, 75.0);
    }
}
