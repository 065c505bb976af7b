//! Error mapping shared by the HTTP language-model clients.

use reqwest::{Response, StatusCode};
use tracing::warn;

use crate::domain::DomainError;

/// Map a transport error (connect, timeout, TLS, ...) to a domain error.
pub(crate) fn send_error(provider: &str, e: reqwest::Error) -> DomainError {
    if e.is_timeout() {
        DomainError::upstream(format!("{provider}: request timed out: {e}"))
    } else if e.is_connect() {
        DomainError::upstream(format!("{provider}: connection failed: {e}"))
    } else {
        DomainError::upstream(format!("{provider}: request failed: {e}"))
    }
}

/// Pass successful responses through; turn everything else into
/// `RateLimited` (429) or `UpstreamUnavailable`.
pub(crate) async fn check_status(provider: &str, response: Response) -> Result<Response, DomainError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let body = response.text().await.unwrap_or_default();
    warn!("{provider}: API returned {status}: {body}");

    Err(status_error(provider, status, retry_after))
}

pub(crate) fn status_error(provider: &str, status: StatusCode, retry_after: Option<u64>) -> DomainError {
    match status.as_u16() {
        429 => DomainError::rate_limited(format!("{provider}: API returned {status}"), retry_after),
        401 | 403 => DomainError::upstream(format!(
            "{provider}: authentication failed ({status}), check the API key"
        )),
        _ => DomainError::upstream(format!("{provider}: API returned {status}")),
    }
}
