use serde::{Deserialize, Serialize};
use tracing::warn;

/// Fallback entrant count when upstream does not report one
pub const DEFAULT_TOTAL_PLAYERS: u64 = 10_000_000;

/// Assumed standard deviation of gameweek scores, in points
pub const DEFAULT_SCORE_SPREAD: f64 = 15.0;

/// Configuration for rank estimation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankConfig {
    /// Entrant count used when the caller has none
    pub default_total_players: u64,

    /// Spread of the score distribution around the gameweek average
    pub score_spread: f64,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self { default_total_players: DEFAULT_TOTAL_PLAYERS, score_spread: DEFAULT_SCORE_SPREAD }
    }
}

impl RankConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(total) = std::env::var("WHATIF_DEFAULT_TOTAL_PLAYERS") {
            match total.parse::<u64>() {
                Ok(value) if value > 0 => config.default_total_players = value,
                _ => warn!("Ignoring invalid WHATIF_DEFAULT_TOTAL_PLAYERS={}", total),
            }
        }

        if let Ok(spread) = std::env::var("WHATIF_SCORE_SPREAD") {
            match spread.parse::<f64>() {
                Ok(value) if value.is_finite() && value > 0.0 => config.score_spread = value,
                _ => warn!("Ignoring invalid WHATIF_SCORE_SPREAD={}", spread),
            }
        }

        Ok(config)
    }

    /// Entrant count to rank against, falling back to the configured default
    pub fn resolve_total_players(&self, reported: Option<u64>) -> u64 {
        match reported {
            Some(total) if total > 0 => total,
            _ => self.default_total_players,
        }
    }
}
