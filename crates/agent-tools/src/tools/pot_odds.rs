//! Pot odds: the share of the final pot a call costs.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::ToolError;
use crate::input::{PotOddsArgs, POT_ODDS};
use crate::tool::{Tool, ToolArgs, ToolOutput};

/// Compute `opponent_bet / (opponent_bet + pot_size)`.
///
/// Both amounts must be finite and non-negative, and at least one of them
/// must be positive.
pub fn calculate_pot_odds(opponent_bet: f64, pot_size: f64) -> Result<f64, ToolError> {
    check_amounts(opponent_bet, pot_size).map_err(ToolError::InvalidArgument)?;

    let total = opponent_bet + pot_size;
    let odds = if total.is_finite() {
        opponent_bet / total
    } else {
        // Both amounts are positive here; the ratio form cannot overflow.
        1.0 / (1.0 + pot_size / opponent_bet)
    };

    if opponent_bet > 0.0 && pot_size > 0.0 && !(odds > 0.0 && odds < 1.0) {
        return Err(ToolError::InvalidArgument(format!(
            "pot odds for opponent_bet={} and pot_size={} are not representable",
            opponent_bet, pot_size
        )));
    }
    Ok(odds)
}

/// Parse the delimited `"bet,pot"` form into `(opponent_bet, pot_size)`.
///
/// Whitespace around each part is ignored. Anything that is not exactly two
/// valid amounts is rejected.
pub fn parse_pot_odds_input(raw: &str) -> Result<(f64, f64), ToolError> {
    let mut parts = raw.split(',');
    let (bet, pot) = match (parts.next(), parts.next(), parts.next()) {
        (Some(bet), Some(pot), None) => (bet.trim(), pot.trim()),
        _ => {
            return Err(ToolError::MalformedInput(format!(
                "expected \"opponent_bet,pot_size\", got {:?}",
                raw
            )))
        }
    };

    let opponent_bet = parse_amount(bet, "opponent_bet")?;
    let pot_size = parse_amount(pot, "pot_size")?;
    check_amounts(opponent_bet, pot_size).map_err(ToolError::MalformedInput)?;

    Ok((opponent_bet, pot_size))
}

fn parse_amount(part: &str, field: &str) -> Result<f64, ToolError> {
    part.parse::<f64>()
        .map_err(|_| ToolError::MalformedInput(format!("{} is not a number: {:?}", field, part)))
}

fn check_amounts(opponent_bet: f64, pot_size: f64) -> Result<(), String> {
    if !opponent_bet.is_finite() || !pot_size.is_finite() {
        return Err(format!(
            "amounts must be finite (opponent_bet={}, pot_size={})",
            opponent_bet, pot_size
        ));
    }
    if opponent_bet < 0.0 || pot_size < 0.0 {
        return Err(format!(
            "amounts must not be negative (opponent_bet={}, pot_size={})",
            opponent_bet, pot_size
        ));
    }
    if opponent_bet + pot_size <= 0.0 {
        return Err("opponent_bet and pot_size cannot both be zero".to_string());
    }
    Ok(())
}

/// Pot odds tool.
///
/// # Parameters
///
/// - `opponent_bet`, `pot_size` (numbers), or
/// - `input`: the string `"opponent_bet,pot_size"`.
///
/// The output is the bare ratio, e.g. `0.2` for a 50 bet into a 200 pot.
pub struct PotOdds;

impl PotOdds {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PotOdds {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for PotOdds {
    fn name(&self) -> &str {
        POT_ODDS
    }

    fn description(&self) -> &str {
        "Calculates pot odds: the fraction of the final pot the player must put in to call. \
         Use it whenever the question involves an opponent's bet and the pot size. \
         Pass opponent_bet (the amount the opponent bet) and pot_size (the pot before that bet), \
         or a single input string of the two numbers separated by a comma, for example \"50,200\" \
         for a 50 bet into a 200 pot. Returns a number between 0 and 1."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "opponent_bet": {
                    "type": "number",
                    "description": "The amount the opponent bet"
                },
                "pot_size": {
                    "type": "number",
                    "description": "The size of the pot before the opponent's bet"
                },
                "input": {
                    "type": "string",
                    "description": "Alternative form: \"opponent_bet,pot_size\", e.g. \"50,200\""
                }
            }
        })
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let PotOddsArgs {
            opponent_bet,
            pot_size,
        } = args.decode()?;

        let odds = calculate_pot_odds(opponent_bet, pot_size)?;
        debug!(
            "Pot odds for bet {} into pot {}: {}",
            opponent_bet, pot_size, odds
        );

        Ok(ToolOutput::success(odds.to_string()))
    }
}
