use thiserror::Error;

use crate::api::ApiError;
use crate::flow::Flow;

/// Why a flow did not run to completion.
///
/// The first three are caught before any request is issued.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("お題が読み込まれていません")]
    NoQuestionLoaded,

    #[error("すべての項目を入力してください")]
    MissingFields,

    #[error("編集する問題が選択されていません")]
    NoEditTarget,

    #[error("{}", .flow.failure_message())]
    Request {
        flow: Flow,
        #[source]
        source: ApiError,
    },
}

impl FlowError {
    pub fn is_validation(&self) -> bool {
        !matches!(self, FlowError::Request { .. })
    }
}
