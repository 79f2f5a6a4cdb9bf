//! Exercise the poker tools from the command line.
//!
//! Run with: cargo run -p agent-tools --example test_tools
//!
//! Web search runs only when GOOGLE_API_KEY and GOOGLE_CSE_ID are set.

use std::collections::HashMap;

use agent_tools::{Calculator, PotOdds, ToolRegistry, WebSearch};
use serde_json::{json, Value};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("agent_tools=debug".parse()?),
        )
        .init();

    println!("=== Poker Tools Test ===\n");

    let mut registry = ToolRegistry::new();
    registry.register(PotOdds::new());
    registry.register(Calculator::new());

    let search_env = (
        std::env::var("GOOGLE_API_KEY"),
        std::env::var("GOOGLE_CSE_ID"),
    );
    if let (Ok(key), Ok(cx)) = search_env {
        registry.register(WebSearch::new(key, cx).with_result_count(3));
    }

    println!("Registered tools:");
    for definition in registry.definitions() {
        println!("  - {}: {}", definition.name, definition.description);
    }
    println!();

    let cases = vec![
        ("pot_odds", json!({"input": "50,200"})),
        ("pot_odds", json!({"opponent_bet": 75, "pot_size": 150})),
        ("pot_odds", json!({"input": "fifty,200"})),
        ("calculator", json!({"expression": "1 - 50 / (50 + 200)"})),
        ("calculator", json!({"expression": "2 +"})),
        ("web_search", json!({"query": "WSOP main event winner"})),
    ];

    for (tool, args) in cases {
        if !registry.has_tool(tool) {
            println!("  [SKIP] {} (not configured)", tool);
            continue;
        }
        let params: HashMap<String, Value> = serde_json::from_value(args.clone())?;
        match registry.execute(tool, params).await {
            Ok(result) => println!("  [OK] {} {} => {}", tool, args, result.content),
            Err(e) => println!("  [ERROR] {} {} => {}", tool, args, e),
        }
    }

    println!("\n=== Done ===");
    Ok(())
}
