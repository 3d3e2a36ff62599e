//! Profile lookup tools.

use crate::tool::{parse_args, render_json, Tool, ToolDescriptor};
use async_trait::async_trait;
use gravatar_api::ProfileClient;
use gravatar_core::{GravatarResult, ToolResponse};
use gravatar_identity::derive_hash;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
struct ByIdArgs {
    #[serde(rename = "profileIdentifier")]
    profile_identifier: String,
}

#[derive(Deserialize)]
struct ByEmailArgs {
    email: String,
}

async fn fetch_rendered(client: &ProfileClient, hash: &str) -> GravatarResult<ToolResponse> {
    let profile = client.fetch_profile(hash).await?;
    Ok(ToolResponse::text(render_json(&profile)))
}

/// `get_profile_by_id` — profile lookup keyed by a precomputed hash.
pub struct ProfileByIdTool {
    descriptor: ToolDescriptor,
    client: Arc<ProfileClient>,
}

impl ProfileByIdTool {
    /// Create the tool around a shared profile client.
    pub fn new(client: Arc<ProfileClient>) -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: "get_profile_by_id".to_string(),
                description: "Retrieve a Gravatar profile as JSON, keyed by a profile \
                              identifier (a 64-character SHA-256 hash of the account \
                              email, or a legacy 32-character MD5 hash)."
                    .to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "profileIdentifier": {
                            "type": "string",
                            "description": "32 or 64 character hexadecimal profile identifier",
                            "pattern": "^([a-fA-F0-9]{64}|[a-fA-F0-9]{32})$"
                        }
                    },
                    "required": ["profileIdentifier"]
                }),
            },
            client,
        }
    }
}

#[async_trait]
impl Tool for ProfileByIdTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, arguments: serde_json::Value) -> GravatarResult<ToolResponse> {
        let args: ByIdArgs = parse_args(arguments)?;
        fetch_rendered(&self.client, &args.profile_identifier).await
    }
}

/// `get_profile_by_email` — normalizes the email, derives the hash, then
/// delegates to the same fetch path as the by-id tool.
pub struct ProfileByEmailTool {
    descriptor: ToolDescriptor,
    client: Arc<ProfileClient>,
}

impl ProfileByEmailTool {
    /// Create the tool around a shared profile client.
    pub fn new(client: Arc<ProfileClient>) -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: "get_profile_by_email".to_string(),
                description: "Retrieve a Gravatar profile as JSON, keyed by email address. \
                              The address is normalized and hashed before lookup."
                    .to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "email": {
                            "type": "string",
                            "format": "email",
                            "description": "Email address associated with the profile"
                        }
                    },
                    "required": ["email"]
                }),
            },
            client,
        }
    }
}

#[async_trait]
impl Tool for ProfileByEmailTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, arguments: serde_json::Value) -> GravatarResult<ToolResponse> {
        let args: ByEmailArgs = parse_args(arguments)?;
        let hash = derive_hash(&args.email)?;
        fetch_rendered(&self.client, &hash).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravatar_api::ApiConfig;

    fn tool() -> ProfileByIdTool {
        ProfileByIdTool::new(Arc::new(ProfileClient::new(ApiConfig::default())))
    }

    #[test]
    fn test_descriptor_shape() {
        let tool = tool();
        let desc = tool.descriptor();
        assert_eq!(desc.name, "get_profile_by_id");
        assert_eq!(
            desc.input_schema["required"],
            serde_json::json!(["profileIdentifier"])
        );
    }

    #[tokio::test]
    async fn test_missing_argument_is_validation_error() {
        let tool = tool();
        let err = tool.invoke(serde_json::json!({})).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_invalid_email_rejected_before_fetch() {
        let tool = ProfileByEmailTool::new(Arc::new(ProfileClient::new(ApiConfig::default())));
        let err = tool
            .invoke(serde_json::json!({"email": "not-an-email"}))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }
}
