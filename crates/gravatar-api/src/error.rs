//! Classification of upstream failures into the typed error taxonomy.
//!
//! Two distinct paths: [`map_status()`] classifies an HTTP *response* by
//! status code, [`transport()`] wraps failures where no response arrived at
//! all (DNS, timeout, connection reset). The two are never conflated.

use chrono::{DateTime, Duration, Utc};
use gravatar_core::GravatarError;

/// Header carrying the epoch second at which a 429 window resets.
const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// Map a non-success HTTP status code to a typed error.
///
/// For 429, `reset` is the upstream-provided window reset; when absent the
/// reset defaults to 60 seconds from now.
pub fn map_status(
    status: u16,
    message: impl Into<String>,
    reset: Option<DateTime<Utc>>,
) -> GravatarError {
    let message = message.into();
    match status {
        400 => GravatarError::Validation(message),
        401 => GravatarError::Authentication(message),
        403 => GravatarError::Permission(message),
        404 => GravatarError::NotFound(message),
        429 => GravatarError::RateLimit {
            message,
            reset: reset.unwrap_or_else(|| Utc::now() + Duration::seconds(60)),
        },
        status => GravatarError::Api { status, message },
    }
}

/// Wrap a request that produced no HTTP response.
pub fn transport(err: reqwest::Error) -> GravatarError {
    GravatarError::Transport(err.to_string())
}

/// Classify a non-2xx response: pull the message from the JSON `error` field
/// when the body carries one, fall back to the status text.
pub(crate) async fn classify_response(resp: reqwest::Response) -> GravatarError {
    let status = resp.status();
    let reset = resp
        .headers()
        .get(RATE_LIMIT_RESET_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));

    let fallback = status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string();
    let message = match resp.text().await {
        Ok(body) => serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(fallback),
        Err(_) => fallback,
    };

    map_status(status.as_u16(), message, reset)
}
