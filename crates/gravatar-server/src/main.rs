use clap::{Parser, Subcommand};
use gravatar_api::{ApiConfig, AvatarClient, ProfileClient};
use gravatar_server::McpServer;
use gravatar_tools::{register_tools, ToolRegistry};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gravatar-mcp",
    about = "Gravatar MCP server — profiles, interests, and avatars as agent tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over stdio (the default when no command is given)
    Serve,
    /// Manage tools
    Tools {
        #[command(subcommand)]
        action: ToolsAction,
    },
}

#[derive(Subcommand)]
enum ToolsAction {
    /// List exposed tools
    List,
}

fn build_registry(config: ApiConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_tools(
        &mut registry,
        Arc::new(ProfileClient::new(config.clone())),
        Arc::new(AvatarClient::new(config)),
    );
    registry
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is the MCP transport; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let config = ApiConfig::from_env();
    if config.api_key.is_some() {
        info!("API key configured, authenticated requests enabled");
    }

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let registry = build_registry(config);
            info!(count = registry.tool_count(), "Tools registered");
            let server = McpServer::new(Arc::new(registry));
            server.run_stdio().await?;
        }
        Commands::Tools { action } => match action {
            ToolsAction::List => {
                let registry = build_registry(config);
                println!("Exposed tools:");
                let mut descriptors = registry.descriptors();
                descriptors.sort_by(|a, b| a.name.cmp(&b.name));
                for desc in descriptors {
                    println!("  {} — {}", desc.name, desc.description);
                }
                println!("\nTotal: {} tool(s)", registry.tool_count());
            }
        },
    }

    Ok(())
}
