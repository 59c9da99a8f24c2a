//! Managed agent-runtime host: `POST /invocations`, `GET /ping`.

use std::sync::Arc;

use anyhow::Context;
use bedrock_chat::api::serve;
use bedrock_chat::config::{AgentConfig, LoggingConfig, DEFAULT_AGENTCORE_PORT, DEFAULT_HOST};
use bedrock_chat::graph::GraphBuilder;
use bedrock_chat::logging::init_logging;
use bedrock_chat::runtime::runtime_router;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "agentcore", about = "Managed runtime entrypoint for the chat agent")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_AGENTCORE_PORT)]
    port: u16,

    /// Log level or filter spec (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let _logger = init_logging(&LoggingConfig {
        level: args.log_level,
        path: None,
    })?;

    let graph = GraphBuilder::from_config(AgentConfig::from_env())
        .build()
        .context("building chat graph")?;

    serve(
        runtime_router(Arc::new(graph)),
        &format!("{}:{}", args.host, args.port),
    )
    .await?;
    Ok(())
}
