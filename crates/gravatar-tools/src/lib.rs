//! The tool facade: named, schema-validated operations over the Gravatar API.
//!
//! Six tools are exposed, one pair per resource family (hash-keyed and
//! email-keyed variants): profiles, inferred interests, and avatar images.
//! Email variants normalize and hash the address, then delegate to the same
//! fetch path as their by-id counterpart.
//!
//! # Main entry points
//!
//! - [`register_tools()`] — Register the full tool set into a registry.
//! - [`ToolRegistry`] — Name-keyed tool lookup for the transport layer.
//! - [`Tool`] / [`ToolDescriptor`] — The tool abstraction itself.

/// Avatar image tools.
pub mod avatar;
/// Inferred-interest tools.
pub mod interests;
/// Profile lookup tools.
pub mod profile;
/// Tool registry.
pub mod registry;
/// Tool trait and descriptor types.
pub mod tool;

pub use avatar::{AvatarByEmailTool, AvatarByIdTool};
pub use interests::{InterestsByEmailTool, InterestsByIdTool};
pub use profile::{ProfileByEmailTool, ProfileByIdTool};
pub use registry::ToolRegistry;
pub use tool::{Tool, ToolDescriptor};

use gravatar_api::{AvatarClient, ProfileClient};
use std::sync::Arc;

/// Register all six Gravatar tools into the given registry.
pub fn register_tools(
    registry: &mut ToolRegistry,
    profiles: Arc<ProfileClient>,
    avatars: Arc<AvatarClient>,
) {
    registry.register(Arc::new(ProfileByIdTool::new(profiles.clone())));
    registry.register(Arc::new(ProfileByEmailTool::new(profiles.clone())));
    registry.register(Arc::new(InterestsByIdTool::new(profiles.clone())));
    registry.register(Arc::new(InterestsByEmailTool::new(profiles)));
    registry.register(Arc::new(AvatarByIdTool::new(avatars.clone())));
    registry.register(Arc::new(AvatarByEmailTool::new(avatars)));
}
