//! Rank estimation from a points total and the gameweek average.
//!
//! Upstream data only supplies the mean score, so the distribution of
//! entrants is modelled as a logistic curve centred on the average with a
//! configured spread. The logistic scale is chosen so its standard deviation
//! matches `score_spread`.

use crate::config::{RankConfig, DEFAULT_SCORE_SPREAD};
use crate::models::SimulationResult;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Estimates finishing position among all entrants
#[derive(Debug, Clone)]
pub struct RankEstimator {
    scale: f64,
}

/// Original and simulated rank for one simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankImpact {
    pub original_rank: u64,
    pub simulated_rank: u64,

    /// Places gained (positive) or lost (negative)
    pub rank_change: i64,
}

impl RankEstimator {
    pub fn new(config: &RankConfig) -> Self {
        let spread = if config.score_spread.is_finite() && config.score_spread > 0.0 {
            config.score_spread
        } else {
            DEFAULT_SCORE_SPREAD
        };
        Self { scale: spread * 3f64.sqrt() / PI }
    }

    /// Estimated rank in `[1, total_players]`, non-increasing in `points`.
    ///
    /// A score equal to the average lands at about `total_players / 2`.
    pub fn estimate_rank(&self, points: i64, average_score: f64, total_players: u64) -> u64 {
        let total_players = total_players.max(1);

        let z = (points as f64 - average_score) / self.scale;
        let share_above = if z.is_nan() { 0.5 } else { 1.0 / (1.0 + z.exp()) };

        let rank = (share_above * total_players as f64).round() as u64;
        rank.clamp(1, total_players)
    }

    /// Rank both sides of a simulation against the same population
    pub fn rank_impact(
        &self,
        result: &SimulationResult,
        average_score: f64,
        total_players: u64,
    ) -> RankImpact {
        let original_rank = self.estimate_rank(result.original_points, average_score, total_players);
        let simulated_rank =
            self.estimate_rank(result.simulated_points, average_score, total_players);

        RankImpact {
            original_rank,
            simulated_rank,
            rank_change: original_rank as i64 - simulated_rank as i64,
        }
    }
}

impl Default for RankEstimator {
    fn default() -> Self {
        Self::new(&RankConfig::default())
    }
}
