use crate::error::{Result, WhatIfError};
use crate::models::{LiveScores, Pick, SQUAD_SIZE};
use tracing::warn;

/// Gameweek points for a multiplier assignment
pub struct PointsModel;

impl PointsModel {
    /// Sum `points * multiplier` over every scoring pick.
    ///
    /// Picks with multiplier 0 contribute nothing. A scoring pick with no live
    /// record counts as 0 points. Fails only when the assignment is not a full
    /// squad.
    pub fn compute_total(picks: &[Pick], live: &LiveScores) -> Result<i64> {
        if picks.len() != SQUAD_SIZE {
            return Err(WhatIfError::MalformedSquad(format!(
                "cannot score {} picks, expected {}",
                picks.len(),
                SQUAD_SIZE
            )));
        }

        let total = picks
            .iter()
            .filter(|pick| pick.multiplier > 0)
            .map(|pick| match live.get(&pick.player_id) {
                Some(score) => i64::from(score.points) * i64::from(pick.multiplier),
                None => {
                    warn!("No live score for player {}, counting 0 points", pick.player_id);
                    0
                }
            })
            .sum();

        Ok(total)
    }
}
