use std::fmt;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::model::{PollResult, Question, QuestionDraft, QuestionId, VoteRequest};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error! status: {status}")]
    RequestFailed { status: u16 },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// The remote polling service, one method per endpoint.
pub trait PollApi {
    fn current_question(&self) -> Result<Question, ApiError>;
    fn question(&self, id: &QuestionId) -> Result<Question, ApiError>;
    fn questions(&self) -> Result<Vec<Question>, ApiError>;
    fn create_question(&self, draft: &QuestionDraft) -> Result<(), ApiError>;
    fn update_question(&self, id: &QuestionId, draft: &QuestionDraft) -> Result<(), ApiError>;
    fn delete_question(&self, id: &QuestionId) -> Result<(), ApiError>;
    fn vote(&self, vote: &VoteRequest) -> Result<(), ApiError>;
    fn results(&self, id: &QuestionId) -> Result<PollResult, ApiError>;
    fn history(&self) -> Result<Vec<String>, ApiError>;
}

/// Ids are opaque, so they are encoded wherever they land in a URL.
fn encode_id(id: &QuestionId) -> String {
    utf8_percent_encode(&id.to_string(), NON_ALPHANUMERIC).to_string()
}

pub fn question_path(id: &QuestionId) -> String {
    format!("/question/{}", encode_id(id))
}

pub fn results_path(id: &QuestionId) -> String {
    format!("/results?question_id={}", encode_id(id))
}

/// HTTP implementation of [`PollApi`].
///
/// Every request goes through [`HttpGateway::call`], which is also the only
/// place a transport failure gets logged.
pub struct HttpGateway {
    client: Client,
    base: String,
}

impl HttpGateway {
    pub fn new(base: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn call<T, P>(&self, endpoint: &str, method: Method, payload: Option<&P>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base, endpoint);
        debug!(%method, %url, "api call");

        let result = self.send(&url, method, payload);
        if let Err(e) = &result {
            error!(%method, %url, error = %e, "api call failed");
        }
        result
    }

    fn send<T, P>(&self, url: &str, method: Method, payload: Option<&P>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let mut request = self
            .client
            .request(method.as_reqwest(), url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = payload {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn call_unit<P>(&self, endpoint: &str, method: Method, payload: Option<&P>) -> Result<(), ApiError>
    where
        P: Serialize + ?Sized,
    {
        // Body is not inspected but must still be JSON.
        self.call::<serde_json::Value, P>(endpoint, method, payload)
            .map(|_| ())
    }
}

const NO_BODY: Option<&()> = None;

impl PollApi for HttpGateway {
    fn current_question(&self) -> Result<Question, ApiError> {
        self.call("/question", Method::Get, NO_BODY)
    }

    fn question(&self, id: &QuestionId) -> Result<Question, ApiError> {
        self.call(&question_path(id), Method::Get, NO_BODY)
    }

    fn questions(&self) -> Result<Vec<Question>, ApiError> {
        self.call("/questions", Method::Get, NO_BODY)
    }

    fn create_question(&self, draft: &QuestionDraft) -> Result<(), ApiError> {
        self.call_unit("/question", Method::Post, Some(draft))
    }

    fn update_question(&self, id: &QuestionId, draft: &QuestionDraft) -> Result<(), ApiError> {
        self.call_unit(&question_path(id), Method::Put, Some(draft))
    }

    fn delete_question(&self, id: &QuestionId) -> Result<(), ApiError> {
        self.call_unit(&question_path(id), Method::Delete, NO_BODY)
    }

    fn vote(&self, vote: &VoteRequest) -> Result<(), ApiError> {
        self.call_unit("/vote", Method::Post, Some(vote))
    }

    fn results(&self, id: &QuestionId) -> Result<PollResult, ApiError> {
        self.call(&results_path(id), Method::Get, NO_BODY)
    }

    fn history(&self) -> Result<Vec<String>, ApiError> {
        self.call("/history", Method::Get, NO_BODY)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// Serves one canned HTTP response and hands back the raw request.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/api", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (base, handle)
    }

    fn gateway(base: &str) -> HttpGateway {
        HttpGateway::new(base, Some(Duration::from_secs(5))).unwrap()
    }

    #[test]
    fn paths_embed_id() {
        let id = QuestionId::Number(12);
        assert_eq!(question_path(&id), "/question/12");
        assert_eq!(results_path(&id), "/results?question_id=12");
    }

    #[test]
    fn paths_encode_text_ids() {
        let id = QuestionId::Text("a&b#c/d e".to_string());
        assert_eq!(question_path(&id), "/question/a%26b%23c%2Fd%20e");
        assert_eq!(results_path(&id), "/results?question_id=a%26b%23c%2Fd%20e");
    }

    #[test]
    fn base_drops_trailing_slash() {
        let gw = HttpGateway::new("http://localhost:8000/api/", None).unwrap();
        assert_eq!(gw.base(), "http://localhost:8000/api");
    }

    #[test]
    fn request_failed_carries_status() {
        let err = ApiError::RequestFailed { status: 404 };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "HTTP error! status: 404");
    }

    #[test]
    fn success_decodes_body_and_sends_json_header() {
        let (base, server) = serve_once("200 OK", r#"["旅行に行くなら？"]"#);
        let history = gateway(&base).history().unwrap();
        assert_eq!(history, vec!["旅行に行くなら？".to_string()]);

        let request = server.join().unwrap().to_ascii_lowercase();
        assert!(request.starts_with("get /api/history "));
        assert!(request.contains("content-type: application/json"));
    }

    #[test]
    fn non_success_status_is_request_failed() {
        for (line, code) in [("404 Not Found", 404), ("500 Internal Server Error", 500)] {
            let (base, server) = serve_once(line, "{}");
            match gateway(&base).history() {
                Err(ApiError::RequestFailed { status }) => assert_eq!(status, code),
                other => panic!("Expected status {}, got {:?}", code, other),
            }
            server.join().unwrap();
        }
    }

    #[test]
    fn non_json_body_is_decode_error() {
        let (base, server) = serve_once("200 OK", "hello");
        match gateway(&base).history() {
            Err(ApiError::Decode(_)) => {}
            other => panic!("Expected decode error, got {:?}", other),
        }
        server.join().unwrap();
    }

    #[test]
    fn unreachable_server_is_network_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let gw = gateway(&format!("http://127.0.0.1:{}/api", port));
        match gw.history() {
            Err(ApiError::Network(_)) => {}
            other => panic!("Expected network error, got {:?}", other),
        }
    }
}
