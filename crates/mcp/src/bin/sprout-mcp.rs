// Standalone MCP server binary

use anyhow::Result;
use clap::Parser;
use sprout_mcp::config::DEFAULT_CONFIG_FILE;
use sprout_mcp::{sprout_registry, McpServer, Overrides, ServerConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sprout-mcp")]
#[command(about = "MCP server for the Sprout Social API", version, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "SPROUT_MCP_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Sprout API bearer token
    #[arg(long, env = "SPROUT_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Default customer ID for tools that take one
    #[arg(long, env = "SPROUT_CUSTOMER_ID")]
    customer_id: Option<String>,

    /// Sprout API base URL
    #[arg(long, env = "SPROUT_BASE_URL")]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "SPROUT_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long, env = "SPROUT_LOG_JSON")]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sprout_mcp=info,sprout_sdk=info".into());

    // stdout carries the protocol, so logs go to stderr
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    tracing::info!("Sprout MCP server starting...");

    let config = ServerConfig::load(&args.config)?.with_overrides(Overrides {
        api_token: args.api_token,
        customer_id: args.customer_id,
        base_url: args.base_url,
        timeout_secs: args.timeout_secs,
    });
    tracing::debug!(?config, "Effective configuration");

    let client = config.build_client()?;
    if client.config().customer_id.is_none() {
        tracing::warn!("No default customer ID configured; tools will require customer_id");
    }

    let server = McpServer::new(sprout_registry(&client));
    tracing::info!("Registered {} tools", server.registry().len());

    server.start().await?;

    Ok(())
}
