//! Endpoint and credential configuration, read once at process start.

use serde::Deserialize;

/// Settings shared by all upstream clients.
///
/// Deserializable so a config file can supply it, but the usual path is
/// [`ApiConfig::from_env()`] at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL for profile lookups (hash appended as a path segment).
    #[serde(default = "default_profile_base_url")]
    pub profile_base_url: String,
    /// Base URL for avatar image fetches.
    #[serde(default = "default_avatar_base_url")]
    pub avatar_base_url: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Bearer token for authenticated requests, if configured.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Client identification prepended to the `User-Agent` header.
    #[serde(default = "default_client_name")]
    pub client_name: String,
}

fn default_profile_base_url() -> String {
    "https://api.gravatar.com/v3/profiles".to_string()
}

fn default_avatar_base_url() -> String {
    "https://gravatar.com/avatar".to_string()
}

fn default_api_key_env() -> String {
    "GRAVATAR_API_KEY".to_string()
}

fn default_client_name() -> String {
    "gravatar-mcp".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            profile_base_url: default_profile_base_url(),
            avatar_base_url: default_avatar_base_url(),
            api_key_env: default_api_key_env(),
            api_key: None,
            client_name: default_client_name(),
        }
    }
}

impl ApiConfig {
    /// Build a config from the process environment.
    ///
    /// `GRAVATAR_PROFILE_BASE_URL` and `GRAVATAR_AVATAR_BASE_URL` override the
    /// endpoints; the API key is read from the variable named by
    /// `api_key_env` (default `GRAVATAR_API_KEY`). Empty values are treated
    /// as unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = env_nonempty("GRAVATAR_PROFILE_BASE_URL") {
            config.profile_base_url = url;
        }
        if let Some(url) = env_nonempty("GRAVATAR_AVATAR_BASE_URL") {
            config.avatar_base_url = url;
        }
        config.api_key = env_nonempty(&config.api_key_env);
        config
    }

    /// The `User-Agent` value sent with every upstream request.
    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.client_name, env!("CARGO_PKG_VERSION"))
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
