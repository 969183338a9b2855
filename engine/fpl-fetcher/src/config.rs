use serde::{Deserialize, Serialize};
use tracing::warn;
use whatif_engine::RankConfig;

/// Configuration for the FPL fetcher and what-if service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Upstream API configuration
    pub fpl: FplApiConfig,

    /// Rank estimation parameters
    pub rank: RankConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FplApiConfig {
    /// API root, without trailing slash
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for FplApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://fantasy.premierleague.com/api".to_string(),
            timeout_secs: 15,
            user_agent: concat!("fpl-what-if/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self { fpl: FplApiConfig::default(), rank: RankConfig::default() }
    }
}

impl FetcherConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self { fpl: FplApiConfig::default(), rank: RankConfig::from_env()? };

        if let Ok(base_url) = std::env::var("FPL_BASE_URL") {
            config.fpl.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Ok(timeout) = std::env::var("FPL_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.fpl.timeout_secs = secs,
                _ => warn!("Ignoring invalid FPL_TIMEOUT_SECS={}", timeout),
            }
        }

        if let Ok(user_agent) = std::env::var("FPL_USER_AGENT") {
            config.fpl.user_agent = user_agent;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetcherConfig::default();
        assert_eq!(config.fpl.base_url, "https://fantasy.premierleague.com/api");
        assert_eq!(config.fpl.timeout_secs, 15);
        assert!(config.fpl.user_agent.starts_with("fpl-what-if/"));
        assert_eq!(config.rank.default_total_players, 10_000_000);
    }
}
