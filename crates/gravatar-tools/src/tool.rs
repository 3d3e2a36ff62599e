//! The tool abstraction exposed to the MCP transport.

use async_trait::async_trait;
use gravatar_core::{GravatarError, GravatarResult, ToolResponse};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Metadata describing a tool's name, purpose, and input shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name as exposed over `tools/list`.
    pub name: String,
    /// Human-readable description shown to the calling agent.
    pub description: String,
    /// JSON schema for the tool's arguments.
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// A named, schema-validated operation.
///
/// Implementations raise typed [`GravatarError`]s on failure; translation
/// into the `isError` envelope happens only at the server boundary.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's descriptor.
    fn descriptor(&self) -> &ToolDescriptor;

    /// Validate the arguments and execute the operation.
    async fn invoke(&self, arguments: serde_json::Value) -> GravatarResult<ToolResponse>;
}

/// Deserialize tool arguments, reporting mismatches as validation errors.
pub(crate) fn parse_args<T: DeserializeOwned>(arguments: serde_json::Value) -> GravatarResult<T> {
    serde_json::from_value(arguments)
        .map_err(|e| GravatarError::Validation(format!("invalid arguments: {e}")))
}

/// Pretty-print a JSON value for a text envelope.
pub(crate) fn render_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
