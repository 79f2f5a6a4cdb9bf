//! Built-in tool implementations.

mod calculator;
pub mod poker_textbooks;
pub mod pot_odds;
pub mod web_search;

pub use calculator::Calculator;
pub use poker_textbooks::PokerTextbooks;
pub use pot_odds::{calculate_pot_odds, parse_pot_odds_input, PotOdds};
pub use web_search::WebSearch;
