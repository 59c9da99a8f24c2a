//! Prints the chat graph as a Mermaid diagram.

use anyhow::Context;
use bedrock_chat::graph::GraphBuilder;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let graph = GraphBuilder::new().build().context("building chat graph")?;

    println!("=== Mermaid Diagram ===");
    println!("{}", graph.draw_mermaid());
    println!();
    println!("Paste the output above into https://mermaid.live/ to render it.");
    Ok(())
}
