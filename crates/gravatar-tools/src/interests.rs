//! Inferred-interest lookup tools.

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

/// The adapter returns the full `{id, name}` records; the answer surfaced to
/// the agent is just the name list.
async fn fetch_rendered(client: &ProfileClient, hash: &str) -> GravatarResult<ToolResponse> {
    let interests = client.fetch_interests(hash).await?;
    let names: Vec<&str> = interests.iter().map(|i| i.name.as_str()).collect();
    Ok(ToolResponse::text(render_json(&serde_json::json!(names))))
}

/// `get_inferred_interests_by_id` — AI-inferred interests for a profile hash.
pub struct InterestsByIdTool {
    descriptor: ToolDescriptor,
    client: Arc<ProfileClient>,
}

impl InterestsByIdTool {
    /// Create the tool around a shared profile client.
    pub fn new(client: Arc<ProfileClient>) -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: "get_inferred_interests_by_id".to_string(),
                description: "List AI-inferred interest names for a Gravatar profile, \
                              keyed by a 32 or 64 character profile identifier."
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
impl Tool for InterestsByIdTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, arguments: serde_json::Value) -> GravatarResult<ToolResponse> {
        let args: ByIdArgs = parse_args(arguments)?;
        fetch_rendered(&self.client, &args.profile_identifier).await
    }
}

/// `get_inferred_interests_by_email` — email variant; derives the hash and
/// delegates.
pub struct InterestsByEmailTool {
    descriptor: ToolDescriptor,
    client: Arc<ProfileClient>,
}

impl InterestsByEmailTool {
    /// Create the tool around a shared profile client.
    pub fn new(client: Arc<ProfileClient>) -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: "get_inferred_interests_by_email".to_string(),
                description: "List AI-inferred interest names for a Gravatar profile, \
                              keyed by email address."
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
impl Tool for InterestsByEmailTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, arguments: serde_json::Value) -> GravatarResult<ToolResponse> {
        let args: ByEmailArgs = parse_args(arguments)?;
        let hash = derive_hash(&args.email)?;
        fetch_rendered(&self.client, &hash).await
    }
}
