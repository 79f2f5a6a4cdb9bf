//! Retrieval QA over the poker textbook index.

use std::sync::Arc;

use async_trait::async_trait;
use brain_core::InboundMessage;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::ToolError;
use crate::input::{RetrievalQuery, POKER_TEXTBOOKS};
use crate::retrieval::{Passage, PassageRetriever};
use crate::tool::{Tool, ToolArgs, ToolOutput};

/// Returned when the index has nothing for the question.
pub const NO_PASSAGES_MESSAGE: &str = "No relevant passages were found in the poker textbooks.";

/// Default number of passages used to answer a question.
pub const DEFAULT_TOP_K: usize = 5;

/// Answers questions from retrieved textbook passages.
///
/// With a brain available, the passages are "stuffed" into a single prompt
/// and the brain answers from them alone. Without one the passages are
/// returned as they are.
///
/// # Parameters
///
/// - `query` (required): The question to look up.
pub struct PokerTextbooks {
    retriever: Arc<dyn PassageRetriever>,
    top_k: usize,
}

impl PokerTextbooks {
    pub fn new(retriever: Arc<dyn PassageRetriever>) -> Self {
        Self {
            retriever,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }
}

/// Passages separated by blank lines.
fn join_passages(passages: &[Passage]) -> String {
    passages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the answer prompt for `question` over `passages`.
pub fn stuff_prompt(question: &str, passages: &[Passage]) -> String {
    format!(
        "Use the following pieces of context to answer the question at the end. \
         If you don't know the answer, just say that you don't know, \
         don't try to make up an answer.\n\n{}\n\nQuestion: {}\nHelpful Answer:",
        join_passages(passages),
        question
    )
}

#[async_trait]
impl Tool for PokerTextbooks {
    fn name(&self) -> &str {
        POKER_TEXTBOOKS
    }

    fn description(&self) -> &str {
        "Searches a library of poker textbooks and answers from them. \
         Use it for strategy and theory questions, and after computing pot odds, \
         to check how the odds should inform the decision. \
         Input is a full question. If the books do not cover it, say so rather than making up an answer."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The question to answer from the textbooks"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let RetrievalQuery { query } = args.decode()?;
        if query.trim().is_empty() {
            return Err(ToolError::MalformedInput("query must not be empty".to_string()));
        }

        let passages = self.retriever.retrieve(&query, self.top_k).await?;
        info!(
            "Retrieved {} textbook passages for a {}-char question",
            passages.len(),
            query.len()
        );

        if passages.is_empty() {
            return Ok(ToolOutput::success(NO_PASSAGES_MESSAGE));
        }

        let brain = match args.brain.as_ref() {
            Some(brain) => brain,
            None => return Ok(ToolOutput::success(join_passages(&passages))),
        };

        let prompt = stuff_prompt(&query, &passages);
        debug!("Answering from passages with {}", brain.name());

        let response = brain
            .process(InboundMessage::stateless(prompt))
            .await
            .map_err(|e| ToolError::BrainError(format!("Failed to answer from passages: {}", e)))?;

        Ok(ToolOutput::success(response.text.trim().to_string()))
    }

    fn bounds_own_calls(&self) -> bool {
        true
    }
}
