//! Tools for the poker coach agent.
//!
//! This crate provides a [`ToolRegistry`] of named tools, each with a
//! natural-language description and a JSON schema, plus the four tools the
//! coach is configured with.
//!
//! # Architecture
//!
//! The [`Tool`] trait is the tool-side contract. A brain never sees it: the
//! [`RegistryToolExecutor`] adapter exposes the registry as a
//! `brain_core::ToolExecutor`, validating arguments against [`ToolInput`]
//! and applying a timeout and retry policy to each call.
//!
//! # Built-in Tools
//!
//! - [`PokerTextbooks`] - Retrieval QA over a Pinecone index of poker textbooks.
//! - [`PotOdds`] - `opponent_bet / (opponent_bet + pot_size)`.
//! - [`Calculator`] - Safe mathematical expression evaluation using `meval`.
//! - [`WebSearch`] - Google Custom Search.
//!
//! # Example
//!
//! ```rust,ignore
//! use agent_tools::{PotOdds, ToolRegistry};
//! use std::collections::HashMap;
//! use serde_json::Value;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut registry = ToolRegistry::new();
//!     registry.register(PotOdds::new());
//!
//!     let mut params = HashMap::new();
//!     params.insert("input".to_string(), Value::String("50,200".to_string()));
//!
//!     let result = registry.execute("pot_odds", params).await.unwrap();
//!     println!("{}", result.content); // "0.2"
//! }
//! ```

mod config;
mod error;
mod executor;
pub mod input;
mod registry;
pub mod retrieval;
mod tool;
pub mod tools;

use std::sync::Arc;

pub use config::PokerToolsConfig;
pub use error::ToolError;
pub use executor::{RegistryToolExecutor, ToolPolicy, DEFAULT_TOOL_TIMEOUT};
pub use input::{MathExpression, PotOddsArgs, RetrievalQuery, SearchQuery, ToolInput};
pub use registry::ToolRegistry;
pub use retrieval::{IndexStats, Passage, PassageRetriever, PineconeRetriever};
pub use tool::{Tool, ToolArgs, ToolOutput};
pub use tools::{
    calculate_pot_odds, parse_pot_odds_input, Calculator, PokerTextbooks, PotOdds, WebSearch,
};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

/// Create the coach's registry: textbooks, pot odds, calculator, web search.
///
/// The textbook tool answers from passages only once a brain is set with
/// `registry.set_brain(brain)`; until then it returns the passages.
pub fn poker_registry(textbooks: PokerTextbooks, web_search: WebSearch) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(textbooks);
    registry.register(PotOdds::new());
    registry.register(Calculator::new());
    registry.register(web_search);

    registry
}

/// Build the coach's registry from configuration and a passage retriever.
pub fn registry_from_config(
    config: &PokerToolsConfig,
    retriever: Arc<dyn PassageRetriever>,
) -> ToolRegistry {
    poker_registry(
        PokerTextbooks::new(retriever).with_top_k(config.retrieval_top_k),
        WebSearch::from_config(config),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoPassages;

    #[async_trait]
    impl PassageRetriever for NoPassages {
        async fn retrieve(&self, _query: &str, _top_k: usize) -> Result<Vec<Passage>, ToolError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_poker_registry_order() {
        let registry = registry_from_config(&PokerToolsConfig::default(), Arc::new(NoPassages));
        assert_eq!(
            registry.list_tools(),
            vec!["poker_textbooks", "pot_odds", "calculator", "web_search"]
        );
    }

    #[test]
    fn test_every_tool_has_description_and_schema() {
        let registry = registry_from_config(&PokerToolsConfig::default(), Arc::new(NoPassages));
        for definition in registry.definitions() {
            assert!(!definition.description.is_empty(), "{}", definition.name);
            assert_eq!(definition.parameters["type"], "object", "{}", definition.name);
        }
    }

    #[test]
    fn test_pot_odds_description_states_convention() {
        assert!(PotOdds::new().description().contains("50,200"));
    }
}
