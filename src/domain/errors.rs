//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Signer input could not be encoded (e.g. timestamp outside 32 bits).
    #[error("Signing error: {0}")]
    Signing(String),

    /// Network-level failure: connect, TLS, timeout, broken body stream.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx status or an empty response body. TikTok answers requests
    /// with stale credentials or a bad signature with a 200 and no body.
    #[error("Request rejected (status {status}): {detail}")]
    AuthRejected { status: u16, detail: String },

    /// Response body did not match the expected model.
    #[error("Response parse error: {0}")]
    Parse(String),

    #[error("Decision agent error: {0}")]
    Decision(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl DomainError {
    /// True when a single API call failed and the caller may move on.
    pub fn is_call_failure(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::AuthRejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_failure_kinds() {
        assert!(DomainError::Transport("timeout".into()).is_call_failure());
        assert!(
            DomainError::AuthRejected {
                status: 200,
                detail: "empty body".into()
            }
            .is_call_failure()
        );
        assert!(!DomainError::Parse("missing field `id`".into()).is_call_failure());
        assert!(!DomainError::Config("bad".into()).is_call_failure());
    }

    #[test]
    fn test_auth_rejected_message_carries_status() {
        let err = DomainError::AuthRejected {
            status: 403,
            detail: "forbidden".into(),
        };
        assert_eq!(err.to_string(), "Request rejected (status 403): forbidden");
    }
}
