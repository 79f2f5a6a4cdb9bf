//! Ask the coach a question with the offline tools only.
//!
//! Run with: cargo run -p openai-brain --example test_chat
//! Or with a custom message: cargo run -p openai-brain --example test_chat -- "Your question"
//!
//! Make sure to set environment variables in .env:
//!   OPENAI_API_KEY - OpenAI API key for authentication

use std::env;
use std::sync::Arc;

use agent_tools::{Calculator, PotOdds, RegistryToolExecutor, ToolRegistry};
use openai_brain::{Brain, InboundMessage, OpenAiBrain};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let message_text = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "I bet 50 into a 200 pot, should I call?".to_string()
    };

    let mut registry = ToolRegistry::new();
    registry.register(PotOdds::new());
    registry.register(Calculator::new());

    println!("Initializing OpenAiBrain...");
    let brain = OpenAiBrain::from_env()?.with_tools(Arc::new(RegistryToolExecutor::new(registry)));

    println!("Brain initialized: {}", brain.name());
    println!("API URL: {}", brain.config().api_url);
    println!("Model: {}", brain.config().model);
    if let Some(hash) = brain.system_prompt_hash() {
        println!("System prompt fingerprint: {}", hash);
    }
    println!();

    let message = InboundMessage::in_session("example", message_text);

    println!("Sending: \"{}\"", message.text);
    println!("Waiting for response...\n");

    let response = brain.process(message).await?;

    println!("=== Response ===");
    println!("{}", response.text);
    println!("================");

    Ok(())
}
