//! Service configuration.

use std::env;
use std::net::SocketAddr;

use agent_tools::PokerToolsConfig;
use openai_brain::OpenAiBrainConfig;

use crate::error::ConfigError;

/// Default bind address.
pub const DEFAULT_ADDR: &str = "0.0.0.0:5000";

/// Everything the service needs to start.
#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub brain: OpenAiBrainConfig,
    pub tools: PokerToolsConfig,
}

impl Config {
    /// Read `POKER_API_ADDR` plus the brain and tool settings.
    ///
    /// Missing credentials are reported here, before anything is started.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            addr: parse_addr(&env::var("POKER_API_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string()))?,
            brain: OpenAiBrainConfig::from_env()?,
            tools: PokerToolsConfig::from_env()?,
        })
    }
}

fn parse_addr(addr: &str) -> Result<SocketAddr, ConfigError> {
    addr.parse().map_err(|source| ConfigError::InvalidAddr {
        addr: addr.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_addr() {
        assert_eq!(parse_addr(DEFAULT_ADDR).unwrap().port(), 5000);
        assert!(matches!(
            parse_addr("localhost"),
            Err(ConfigError::InvalidAddr { .. })
        ));
    }
}
