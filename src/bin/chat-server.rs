//! HTTP chat server: `POST /api/chat`, `GET /health`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use bedrock_chat::api::Server;
use bedrock_chat::config::load_config;
use bedrock_chat::graph::GraphBuilder;
use bedrock_chat::logging::init_logging;
use clap::Parser;

/// Command line arguments for the chat server
#[derive(Parser, Debug)]
#[command(name = "chat-server", about = "Chat API backed by AWS Bedrock")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long, env = "CHAT_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "CHAT_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "CHAT_PORT")]
    port: Option<u16>,

    /// Log level or filter spec (overridden by RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref()).context("loading configuration")?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    let _logger = init_logging(&config.logging)?;

    let graph = GraphBuilder::from_config(config.agent.clone())
        .build()
        .context("building chat graph")?;
    log::info!("CORS origins: {}", config.cors_origins.join(", "));

    Server::new(Arc::new(graph))
        .with_cors_origins(config.cors_origins.clone())
        .run(&config.bind_addr())
        .await?;
    Ok(())
}
