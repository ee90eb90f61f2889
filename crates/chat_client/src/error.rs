use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The call did not settle before its deadline.
    #[error("request timed out after {} ms", .after.as_millis())]
    Timeout { after: Duration },
    /// Transport failed before any status was received.
    #[error("network failure: {0}")]
    NetworkFailure(String),
    /// A status arrived but was outside 2xx.
    #[error("request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },
    #[error("response body exceeded {max_bytes} bytes")]
    ResponseTooLarge { max_bytes: u64 },
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            return ClientError::Timeout { after: timeout };
        }
        ClientError::NetworkFailure(err.to_string())
    }
}
