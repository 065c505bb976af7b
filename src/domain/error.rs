use thiserror::Error;

use super::models::SessionField;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Incomplete session: missing {}", SessionField::join(.missing))]
    IncompleteSession { missing: Vec<SessionField> },

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Rate limited: {message}")]
    RateLimited {
        message: String,
        retry_after_secs: Option<u64>,
    },

    #[error("Lookup failed: {0}")]
    LookupFailed(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn incomplete(missing: Vec<SessionField>) -> Self {
        Self::IncompleteSession { missing }
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::UpstreamUnavailable(msg.into())
    }

    pub fn rate_limited(msg: impl Into<String>, retry_after_secs: Option<u64>) -> Self {
        Self::RateLimited {
            message: msg.into(),
            retry_after_secs,
        }
    }

    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::LookupFailed(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_incomplete_session(&self) -> bool {
        matches!(self, Self::IncompleteSession { .. })
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Failures of the language model call that end the turn with an error
    /// message instead of an error value.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable(_) | Self::RateLimited { .. })
    }

    /// Chat-friendly wording of the error, shown as an assistant turn.
    pub fn user_message(&self) -> String {
        match self {
            Self::IncompleteSession { missing } => format!(
                "I still need your {} before I can recommend a build.",
                SessionField::join(missing)
            ),
            Self::RateLimited {
                retry_after_secs: Some(secs),
                ..
            } => format!(
                "The recommendation service is busy right now. Please try again in about {secs} seconds."
            ),
            Self::RateLimited { .. } => {
                "The recommendation service is busy right now. Please try again in a moment."
                    .to_string()
            }
            Self::UpstreamUnavailable(_) => {
                "I couldn't reach the recommendation service. Please try again.".to_string()
            }
            Self::LookupFailed(_) => {
                "I couldn't look up prices for that part right now.".to_string()
            }
            _ => "I'm sorry, something went wrong on my side. Please try again.".to_string(),
        }
    }
}
