//! The gravatar-mcp stdio server.
//!
//! Wires the tool registry to a line-delimited JSON-RPC 2.0 transport over
//! stdin/stdout. See [`McpServer`].

/// JSON-RPC 2.0 message types.
pub mod protocol;
/// The server loop.
pub mod server;

pub use server::McpServer;
