//! Upstream Gravatar API clients.
//!
//! Each client translates a validated lookup hash into exactly one outbound
//! HTTP GET and back into a typed result. Failures are classified into the
//! [`gravatar_core::GravatarError`] taxonomy by the [`error`] module; no
//! retries, no caching, no shared mutable state.
//!
//! # Main entry points
//!
//! - [`ApiConfig`] — environment-sourced endpoint and credential settings.
//! - [`ProfileClient`] — profile and inferred-interest lookups.
//! - [`AvatarClient`] — avatar image fetches.

/// Avatar image client and URL construction.
pub mod avatars;
/// Endpoint and credential configuration.
pub mod config;
/// HTTP status and transport failure classification.
pub mod error;
/// Profile and inferred-interest client.
pub mod profiles;

pub use avatars::{AvatarClient, AvatarParams, DefaultAvatar, Rating};
pub use config::ApiConfig;
pub use error::map_status;
pub use profiles::{Interest, ProfileClient};

use gravatar_core::{GravatarError, GravatarResult};

/// Reject syntactically invalid hashes before any request is built.
pub(crate) fn ensure_valid_hash(hash: &str) -> GravatarResult<()> {
    if gravatar_identity::is_valid_hash(hash) {
        Ok(())
    } else {
        Err(GravatarError::Validation(format!(
            "invalid identifier '{hash}': expected 32 or 64 hexadecimal characters"
        )))
    }
}
