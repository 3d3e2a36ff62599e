//! Profile and inferred-interest lookups.

use crate::config::ApiConfig;
use crate::{ensure_valid_hash, error};
use gravatar_core::{GravatarError, GravatarResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// One inferred interest record as returned by the upstream API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interest {
    /// Upstream identifier for the interest.
    pub id: i64,
    /// Human-readable interest name.
    pub name: String,
}

/// Client for the profile API family.
///
/// Holds only an immutable HTTP client and config, so it is freely shareable
/// across concurrent tool calls.
pub struct ProfileClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ProfileClient {
    /// Create a client with the standard 30 second request timeout.
    #[allow(clippy::expect_used)]
    pub fn new(config: ApiConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");
        Self { http, config }
    }

    /// Fetch a profile by its lookup hash, returned as the decoded upstream
    /// JSON without restructuring.
    pub async fn fetch_profile(&self, hash: &str) -> GravatarResult<serde_json::Value> {
        ensure_valid_hash(hash)?;
        let url = format!(
            "{}/{}",
            self.config.profile_base_url.trim_end_matches('/'),
            hash
        );
        debug!(hash = %hash, "fetching profile");

        let resp = self.get(&url).await?;
        let status = resp.status().as_u16();
        resp.json().await.map_err(|e| GravatarError::Api {
            status,
            message: format!("malformed profile payload: {e}"),
        })
    }

    /// Fetch the inferred interests for a profile, as the full `{id, name}`
    /// record list.
    pub async fn fetch_interests(&self, hash: &str) -> GravatarResult<Vec<Interest>> {
        ensure_valid_hash(hash)?;
        let url = format!(
            "{}/{}/inferred-interests",
            self.config.profile_base_url.trim_end_matches('/'),
            hash
        );
        debug!(hash = %hash, "fetching inferred interests");

        let resp = self.get(&url).await?;
        let status = resp.status().as_u16();
        resp.json().await.map_err(|e| GravatarError::Api {
            status,
            message: format!("malformed interests payload: {e}"),
        })
    }

    /// One GET with identification and optional bearer auth; non-2xx responses
    /// go through the error mapper.
    async fn get(&self, url: &str) -> GravatarResult<reqwest::Response> {
        let mut req = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, self.config.user_agent());
        if let Some(key) = &self.config.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await.map_err(error::transport)?;
        if !resp.status().is_success() {
            return Err(error::classify_response(resp).await);
        }
        Ok(resp)
    }
}
