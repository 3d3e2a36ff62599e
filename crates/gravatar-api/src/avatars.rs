//! Avatar image fetches and URL construction.

use crate::config::ApiConfig;
use crate::{ensure_valid_hash, error};
use gravatar_core::{GravatarError, GravatarResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Fallback image style served when no avatar exists for a hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultAvatar {
    /// Return HTTP 404 instead of an image.
    #[serde(rename = "404")]
    NotFound,
    /// Mystery person silhouette.
    Mp,
    /// Geometric pattern derived from the hash.
    Identicon,
    /// Generated monster face.
    Monsterid,
    /// Generated cartoon face.
    Wavatar,
    /// 8-bit arcade style face.
    Retro,
    /// Generated robot.
    Robohash,
    /// Transparent PNG.
    Blank,
}

impl DefaultAvatar {
    fn as_query(self) -> &'static str {
        match self {
            DefaultAvatar::NotFound => "404",
            DefaultAvatar::Mp => "mp",
            DefaultAvatar::Identicon => "identicon",
            DefaultAvatar::Monsterid => "monsterid",
            DefaultAvatar::Wavatar => "wavatar",
            DefaultAvatar::Retro => "retro",
            DefaultAvatar::Robohash => "robohash",
            DefaultAvatar::Blank => "blank",
        }
    }
}

/// Maximum audience rating of the served image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rating {
    /// Suitable for any audience.
    #[serde(alias = "g")]
    G,
    /// May contain rude gestures or mild violence.
    #[serde(alias = "pg")]
    Pg,
    /// May contain harsh language or nudity.
    #[serde(alias = "r")]
    R,
    /// Hardcore imagery.
    #[serde(alias = "x")]
    X,
}

impl Rating {
    fn as_query(self) -> &'static str {
        match self {
            Rating::G => "g",
            Rating::Pg => "pg",
            Rating::R => "r",
            Rating::X => "x",
        }
    }
}

/// Optional rendering parameters for an avatar fetch.
///
/// Every field is optional; an absent field is simply omitted from the query
/// string so the upstream default applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvatarParams {
    /// Square pixel size, 1–2048 (validated at the tool boundary).
    pub size: Option<u32>,
    /// Fallback style when no avatar exists.
    pub default: Option<DefaultAvatar>,
    /// Serve the fallback even when an avatar exists.
    pub force_default: Option<bool>,
    /// Maximum audience rating.
    pub rating: Option<Rating>,
}

/// Build the avatar URL: `base/{hash}` plus a query pair per supplied field.
pub fn avatar_url(base: &str, hash: &str, params: &AvatarParams) -> String {
    let mut url = format!("{}/{}", base.trim_end_matches('/'), hash);
    let mut query = Vec::new();
    if let Some(size) = params.size {
        query.push(format!("s={size}"));
    }
    if let Some(default) = params.default {
        query.push(format!("d={}", default.as_query()));
    }
    if params.force_default == Some(true) {
        query.push("f=y".to_string());
    }
    if let Some(rating) = params.rating {
        query.push(format!("r={}", rating.as_query()));
    }
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query.join("&"));
    }
    url
}

/// Client for the legacy avatar image endpoint.
pub struct AvatarClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl AvatarClient {
    /// Create a client with the standard 30 second request timeout.
    #[allow(clippy::expect_used)]
    pub fn new(config: ApiConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");
        Self { http, config }
    }

    /// Fetch the raw avatar image bytes for a lookup hash.
    pub async fn fetch_avatar(&self, hash: &str, params: &AvatarParams) -> GravatarResult<Vec<u8>> {
        ensure_valid_hash(hash)?;
        let url = avatar_url(&self.config.avatar_base_url, hash, params);
        debug!(hash = %hash, url = %url, "fetching avatar");

        let mut req = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, self.config.user_agent());
        if let Some(key) = &self.config.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await.map_err(error::transport)?;
        let status = resp.status();
        if !status.is_success() {
            // The image endpoint has no JSON error body; surface the status text.
            return Err(GravatarError::Validation(format!(
                "avatar request failed: {}",
                status.canonical_reason().unwrap_or("unknown status")
            )));
        }

        let bytes = resp.bytes().await.map_err(error::transport)?;
        Ok(bytes.to_vec())
    }
}
