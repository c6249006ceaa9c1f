use std::sync::mpsc;
use std::thread;

use tracing::debug;

use crate::api::PollApi;
use crate::flow::{Completed, Pending};

/// Background thread that owns the gateway and runs requests one at a time,
/// in the order they were submitted.
pub struct Worker {
    jobs: mpsc::Sender<Pending>,
    done: mpsc::Receiver<Completed>,
}

pub fn spawn_worker<A>(api: A) -> Worker
where
    A: PollApi + Send + 'static,
{
    let (jobs_tx, jobs_rx) = mpsc::channel::<Pending>();
    let (done_tx, done_rx) = mpsc::channel();

    thread::spawn(move || {
        for pending in jobs_rx {
            debug!(seq = pending.ticket.seq, "worker executing");
            let result = pending.request.execute(&api);
            if done_tx
                .send(Completed {
                    ticket: pending.ticket,
                    result,
                })
                .is_err()
            {
                break;
            }
        }
    });

    Worker {
        jobs: jobs_tx,
        done: done_rx,
    }
}

impl Worker {
    pub fn submit(&self, pending: Pending) -> Result<(), String> {
        self.jobs
            .send(pending)
            .map_err(|_| "Request worker has stopped".to_string())
    }

    pub fn try_recv(&self) -> Option<Completed> {
        self.done.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::api::ApiError;
    use crate::flow::{Flow, Request, Response, Ticket};
    use crate::model::{PollResult, Question, QuestionDraft, QuestionId, VoteRequest};

    struct HistoryOnly;

    impl PollApi for HistoryOnly {
        fn current_question(&self) -> Result<Question, ApiError> {
            Err(ApiError::RequestFailed { status: 404 })
        }
        fn question(&self, _: &QuestionId) -> Result<Question, ApiError> {
            Err(ApiError::RequestFailed { status: 404 })
        }
        fn questions(&self) -> Result<Vec<Question>, ApiError> {
            Ok(Vec::new())
        }
        fn create_question(&self, _: &QuestionDraft) -> Result<(), ApiError> {
            Ok(())
        }
        fn update_question(&self, _: &QuestionId, _: &QuestionDraft) -> Result<(), ApiError> {
            Ok(())
        }
        fn delete_question(&self, _: &QuestionId) -> Result<(), ApiError> {
            Ok(())
        }
        fn vote(&self, _: &VoteRequest) -> Result<(), ApiError> {
            Ok(())
        }
        fn results(&self, _: &QuestionId) -> Result<PollResult, ApiError> {
            Err(ApiError::RequestFailed { status: 404 })
        }
        fn history(&self) -> Result<Vec<String>, ApiError> {
            Ok(vec!["旅行に行くなら？".to_string()])
        }
    }

    #[test]
    fn completions_come_back_in_order() {
        let worker = spawn_worker(HistoryOnly);
        for seq in 1..=2 {
            worker
                .submit(Pending {
                    ticket: Ticket {
                        seq,
                        generation: 0,
                        flow: Flow::LoadHistory,
                    },
                    request: Request::History,
                })
                .unwrap();
        }

        let mut seen = Vec::new();
        for _ in 0..200 {
            if let Some(done) = worker.try_recv() {
                assert!(matches!(done.result, Ok(Response::History(_))));
                seen.push(done.ticket.seq);
                if seen.len() == 2 {
                    break;
                }
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(seen, vec![1, 2]);
    }
}
