//! Typed argument shapes for the poker tools.
//!
//! Models send tool arguments as a JSON object. Each tool decodes that
//! object into one of the structs here, and [`ToolInput`] ties the four
//! shapes to the tool names they belong to.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolError;
use crate::tool::decode_params;
use crate::tools::pot_odds::parse_pot_odds_input;

pub const POKER_TEXTBOOKS: &str = "poker_textbooks";
pub const POT_ODDS: &str = "pot_odds";
pub const CALCULATOR: &str = "calculator";
pub const WEB_SEARCH: &str = "web_search";

/// A question for the textbook index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalQuery {
    pub query: String,
}

/// A math expression for the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathExpression {
    pub expression: String,
}

/// A web search query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

/// The bet facing the player and the pot before that bet.
///
/// Accepts either `{"opponent_bet": 50, "pot_size": 200}` or the
/// delimited form `{"input": "50,200"}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPotOddsArgs")]
pub struct PotOddsArgs {
    pub opponent_bet: f64,
    pub pot_size: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPotOddsArgs {
    Typed { opponent_bet: f64, pot_size: f64 },
    Delimited { input: String },
}

impl TryFrom<RawPotOddsArgs> for PotOddsArgs {
    type Error = String;

    fn try_from(raw: RawPotOddsArgs) -> Result<Self, Self::Error> {
        match raw {
            RawPotOddsArgs::Typed {
                opponent_bet,
                pot_size,
            } => Ok(Self {
                opponent_bet,
                pot_size,
            }),
            RawPotOddsArgs::Delimited { input } => {
                let (opponent_bet, pot_size) =
                    parse_pot_odds_input(&input).map_err(|e| match e {
                        ToolError::MalformedInput(message) => message,
                        other => other.to_string(),
                    })?;
                Ok(Self {
                    opponent_bet,
                    pot_size,
                })
            }
        }
    }
}

/// Decoded arguments of a call to one of the poker tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", content = "arguments")]
pub enum ToolInput {
    #[serde(rename = "poker_textbooks")]
    RetrievalQuery(RetrievalQuery),
    #[serde(rename = "pot_odds")]
    PotOdds(PotOddsArgs),
    #[serde(rename = "calculator")]
    MathExpression(MathExpression),
    #[serde(rename = "web_search")]
    SearchQuery(SearchQuery),
}

impl ToolInput {
    /// Decode the arguments of a call to `name`.
    ///
    /// Returns `Ok(None)` for tools that are not one of the poker tools.
    pub fn from_call(
        name: &str,
        params: &HashMap<String, Value>,
    ) -> Result<Option<Self>, ToolError> {
        let input = match name {
            POKER_TEXTBOOKS => ToolInput::RetrievalQuery(decode_params(params)?),
            POT_ODDS => ToolInput::PotOdds(decode_params(params)?),
            CALCULATOR => ToolInput::MathExpression(decode_params(params)?),
            WEB_SEARCH => ToolInput::SearchQuery(decode_params(params)?),
            _ => return Ok(None),
        };
        Ok(Some(input))
    }

    /// Name of the tool these arguments belong to.
    pub fn tool_name(&self) -> &'static str {
        match self {
            ToolInput::RetrievalQuery(_) => POKER_TEXTBOOKS,
            ToolInput::PotOdds(_) => POT_ODDS,
            ToolInput::MathExpression(_) => CALCULATOR,
            ToolInput::SearchQuery(_) => WEB_SEARCH,
        }
    }
}
