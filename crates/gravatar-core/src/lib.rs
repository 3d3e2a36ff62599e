//! Core types and error definitions shared across the gravatar-mcp workspace.
//!
//! # Main types
//!
//! - [`GravatarError`] — Typed error taxonomy for validation, upstream API,
//!   and transport failures.
//! - [`GravatarResult`] — Convenience alias for `Result<T, GravatarError>`.
//! - [`Content`] — A single MCP content block (text or image).
//! - [`ToolResponse`] — The content envelope returned by a tool invocation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Error types ---

/// Typed errors surfaced by identifier handling and upstream API calls.
///
/// `Validation` is raised locally and never reaches the network. All other
/// variants except `Transport` classify an HTTP response; `Transport` covers
/// failures where no response was received at all (DNS, timeout, reset).
#[derive(Debug, thiserror::Error)]
pub enum GravatarError {
    /// Input failed local validation or the upstream rejected it (HTTP 400).
    #[error("Validation Error: {0}")]
    Validation(String),

    /// Missing or invalid credentials (HTTP 401).
    #[error("Authentication Failed: {0}")]
    Authentication(String),

    /// The credentials do not grant access to the resource (HTTP 403).
    #[error("Permission Denied: {0}")]
    Permission(String),

    /// The requested profile or avatar does not exist (HTTP 404).
    #[error("Resource Not Found: {0}")]
    NotFound(String),

    /// The upstream rate limit was hit (HTTP 429).
    #[error("Rate Limit Exceeded: {message} (resets at {reset})")]
    RateLimit {
        /// Upstream-provided message.
        message: String,
        /// When the rate limit window resets.
        reset: DateTime<Utc>,
    },

    /// Any other non-success HTTP response.
    #[error("API Error {status}: {message}")]
    Api {
        /// The raw HTTP status code.
        status: u16,
        /// Upstream-provided message.
        message: String,
    },

    /// The request never produced an HTTP response.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl GravatarError {
    /// True for errors detected locally, before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(self, GravatarError::Validation(_))
    }
}

/// A convenience `Result` alias using [`GravatarError`].
pub type GravatarResult<T> = Result<T, GravatarError>;

// --- Content envelope types ---

/// A single MCP content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    /// A textual content block.
    Text {
        /// The text payload.
        text: String,
    },
    /// A base64-encoded image content block.
    Image {
        /// Base64-encoded image bytes.
        data: String,
        /// MIME type of the image.
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
}

impl Content {
    /// Creates a text content block.
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text { text: text.into() }
    }

    /// Creates an image content block from already-encoded base64 data.
    pub fn image(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Content::Image {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// The envelope returned to the MCP transport after executing a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Content blocks produced by the tool.
    pub content: Vec<Content>,
    /// Whether the invocation ended in an error.
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

impl ToolResponse {
    /// Creates a successful text response.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::text(text)],
            is_error: false,
        }
    }

    /// Creates a successful image response from base64 data.
    pub fn image(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            content: vec![Content::image(data, mime_type)],
            is_error: false,
        }
    }

    /// Creates an error response carrying a message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![Content::text(message)],
            is_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_prefixes() {
        let e = GravatarError::Validation("bad hash".into());
        assert_eq!(e.to_string(), "Validation Error: bad hash");

        let e = GravatarError::Authentication("missing key".into());
        assert_eq!(e.to_string(), "Authentication Failed: missing key");

        let e = GravatarError::Permission("forbidden".into());
        assert_eq!(e.to_string(), "Permission Denied: forbidden");

        let e = GravatarError::NotFound("no such profile".into());
        assert_eq!(e.to_string(), "Resource Not Found: no such profile");

        let e = GravatarError::Api {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(e.to_string().starts_with("API Error 503"));
    }

    #[test]
    fn test_rate_limit_carries_reset() {
        let reset = Utc::now();
        let e = GravatarError::RateLimit {
            message: "slow down".into(),
            reset,
        };
        assert!(e.to_string().contains("slow down"));
        assert!(e.to_string().contains("resets at"));
    }

    #[test]
    fn test_text_content_serialization() {
        let resp = ToolResponse::text("hello");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][0]["text"], "hello");
        assert_eq!(json["isError"], false);
    }

    #[test]
    fn test_image_content_serialization() {
        let resp = ToolResponse::image("aGVsbG8=", "image/png");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["content"][0]["type"], "image");
        assert_eq!(json["content"][0]["data"], "aGVsbG8=");
        assert_eq!(json["content"][0]["mimeType"], "image/png");
    }

    #[test]
    fn test_error_response() {
        let resp = ToolResponse::error("boom");
        assert!(resp.is_error);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["isError"], true);
        assert_eq!(json["content"][0]["text"], "boom");
    }
}
