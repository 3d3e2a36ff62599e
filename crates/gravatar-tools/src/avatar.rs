//! Avatar image tools.

use crate::tool::{parse_args, Tool, ToolDescriptor};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use gravatar_api::{AvatarClient, AvatarParams, DefaultAvatar, Rating};
use gravatar_core::{GravatarError, GravatarResult, ToolResponse};
use gravatar_identity::derive_hash;
use serde::Deserialize;
use std::sync::Arc;

/// MIME type reported for avatar payloads.
const AVATAR_MIME_TYPE: &str = "image/png";

#[derive(Deserialize)]
struct ByIdArgs {
    #[serde(rename = "avatarIdentifier")]
    avatar_identifier: String,
    #[serde(flatten)]
    options: AvatarOptions,
}

#[derive(Deserialize)]
struct ByEmailArgs {
    email: String,
    #[serde(flatten)]
    options: AvatarOptions,
}

/// The optional rendering parameters shared by both avatar tools.
#[derive(Deserialize, Default)]
struct AvatarOptions {
    size: Option<u32>,
    #[serde(rename = "defaultOption")]
    default_option: Option<DefaultAvatar>,
    #[serde(rename = "forceDefault")]
    force_default: Option<bool>,
    rating: Option<Rating>,
}

impl AvatarOptions {
    /// Range-check and convert into adapter params.
    fn into_params(self) -> GravatarResult<AvatarParams> {
        if let Some(size) = self.size {
            if !(1..=2048).contains(&size) {
                return Err(GravatarError::Validation(format!(
                    "size must be between 1 and 2048, got {size}"
                )));
            }
        }
        Ok(AvatarParams {
            size: self.size,
            default: self.default_option,
            force_default: self.force_default,
            rating: self.rating,
        })
    }
}

fn options_schema() -> serde_json::Value {
    serde_json::json!({
        "size": {
            "type": "integer",
            "minimum": 1,
            "maximum": 2048,
            "description": "Square image size in pixels"
        },
        "defaultOption": {
            "type": "string",
            "enum": ["404", "mp", "identicon", "monsterid", "wavatar", "retro", "robohash", "blank"],
            "description": "Fallback style when no avatar exists"
        },
        "forceDefault": {
            "type": "boolean",
            "description": "Serve the fallback even when an avatar exists"
        },
        "rating": {
            "type": "string",
            "enum": ["G", "PG", "R", "X"],
            "description": "Maximum audience rating of the served image"
        }
    })
}

async fn fetch_encoded(
    client: &AvatarClient,
    hash: &str,
    params: &AvatarParams,
) -> GravatarResult<ToolResponse> {
    let bytes = client.fetch_avatar(hash, params).await?;
    Ok(ToolResponse::image(BASE64.encode(bytes), AVATAR_MIME_TYPE))
}

/// `get_avatar_by_id` — avatar image for a precomputed hash, base64-encoded.
pub struct AvatarByIdTool {
    descriptor: ToolDescriptor,
    client: Arc<AvatarClient>,
}

impl AvatarByIdTool {
    /// Create the tool around a shared avatar client.
    pub fn new(client: Arc<AvatarClient>) -> Self {
        let mut properties = options_schema();
        properties["avatarIdentifier"] = serde_json::json!({
            "type": "string",
            "description": "32 or 64 character hexadecimal avatar identifier",
            "pattern": "^([a-fA-F0-9]{64}|[a-fA-F0-9]{32})$"
        });
        Self {
            descriptor: ToolDescriptor {
                name: "get_avatar_by_id".to_string(),
                description: "Fetch the avatar image for a 32 or 64 character avatar \
                              identifier, returned as a base64-encoded image."
                    .to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": properties,
                    "required": ["avatarIdentifier"]
                }),
            },
            client,
        }
    }
}

#[async_trait]
impl Tool for AvatarByIdTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, arguments: serde_json::Value) -> GravatarResult<ToolResponse> {
        let args: ByIdArgs = parse_args(arguments)?;
        let params = args.options.into_params()?;
        fetch_encoded(&self.client, &args.avatar_identifier, &params).await
    }
}

/// `get_avatar_by_email` — email variant; derives the hash and delegates.
pub struct AvatarByEmailTool {
    descriptor: ToolDescriptor,
    client: Arc<AvatarClient>,
}

impl AvatarByEmailTool {
    /// Create the tool around a shared avatar client.
    pub fn new(client: Arc<AvatarClient>) -> Self {
        let mut properties = options_schema();
        properties["email"] = serde_json::json!({
            "type": "string",
            "format": "email",
            "description": "Email address associated with the avatar"
        });
        Self {
            descriptor: ToolDescriptor {
                name: "get_avatar_by_email".to_string(),
                description: "Fetch the avatar image for an email address, returned as a \
                              base64-encoded image."
                    .to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": properties,
                    "required": ["email"]
                }),
            },
            client,
        }
    }
}

#[async_trait]
impl Tool for AvatarByEmailTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, arguments: serde_json::Value) -> GravatarResult<ToolResponse> {
        let args: ByEmailArgs = parse_args(arguments)?;
        let params = args.options.into_params()?;
        let hash = derive_hash(&args.email)?;
        fetch_encoded(&self.client, &hash, &params).await
    }
}
