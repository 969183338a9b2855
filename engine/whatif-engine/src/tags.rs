//! Strategic player tags derived from ownership, price and expected points

use crate::models::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ownership above which a player is part of the template
pub const TEMPLATE_OWNERSHIP_PCT: f64 = 30.0;

/// Ownership below which a top-quartile projection is a differential
pub const DIFFERENTIAL_OWNERSHIP_PCT: f64 = 10.0;

pub const ULTRA_DIFFERENTIAL_OWNERSHIP_PCT: f64 = 2.0;

/// Recent points above this multiple of expected points flag regression risk
pub const TRAP_OVERPERFORMANCE: f64 = 1.5;

/// Expected points per million above which a player is a value pick
pub const VALUE_BEAST_RATIO: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayerTag {
    Template,
    Differential,
    UltraDifferential,
    Trap,
    ValueBeast,
}

impl PlayerTag {
    pub fn label(&self) -> &'static str {
        match self {
            PlayerTag::Template => "Template",
            PlayerTag::Differential => "Differential",
            PlayerTag::UltraDifferential => "Ultra-Differential",
            PlayerTag::Trap => "Trap",
            PlayerTag::ValueBeast => "Value Beast",
        }
    }
}

impl fmt::Display for PlayerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-player figures the tagger works from
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TagInputs {
    pub player_id: PlayerId,

    /// Percentage of entrants owning the player (0-100)
    pub ownership_pct: f64,

    /// Price in tenths of a million
    pub now_cost: u32,

    /// Expected points over the next three gameweeks
    pub xp_next_3: f64,

    pub actual_points_last_5: f64,
    pub xp_last_5: f64,
}

impl TagInputs {
    /// Expected points over the next three gameweeks per million spent
    pub fn value_ratio(&self) -> f64 {
        let price_m = f64::from(self.now_cost) / 10.0;
        if price_m > 0.0 {
            self.xp_next_3 / price_m
        } else {
            0.0
        }
    }
}

/// Assigns tags relative to a player pool.
///
/// Differentials are judged against the top-quartile projection of the pool
/// the tagger was built from; the other tags only look at the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTagger {
    top_quartile_xp: f64,
}

impl PlayerTagger {
    pub fn new(pool: &[TagInputs]) -> Self {
        let mut projections: Vec<f64> = pool.iter().map(|p| p.xp_next_3).collect();
        projections.sort_by(|a, b| b.total_cmp(a));
        let top_quartile_xp = projections.get(projections.len() / 4).copied().unwrap_or(0.0);
        Self { top_quartile_xp }
    }

    pub fn top_quartile_xp(&self) -> f64 {
        self.top_quartile_xp
    }

    pub fn tags_for(&self, player: &TagInputs) -> Vec<PlayerTag> {
        let mut tags = Vec::new();

        if player.ownership_pct > TEMPLATE_OWNERSHIP_PCT {
            tags.push(PlayerTag::Template);
        }
        if player.ownership_pct < DIFFERENTIAL_OWNERSHIP_PCT && player.xp_next_3 > self.top_quartile_xp {
            tags.push(PlayerTag::Differential);
        }
        if player.ownership_pct < ULTRA_DIFFERENTIAL_OWNERSHIP_PCT {
            tags.push(PlayerTag::UltraDifferential);
        }
        if player.xp_last_5 > 0.0 && player.actual_points_last_5 > player.xp_last_5 * TRAP_OVERPERFORMANCE {
            tags.push(PlayerTag::Trap);
        }
        if player.value_ratio() > VALUE_BEAST_RATIO {
            tags.push(PlayerTag::ValueBeast);
        }

        tags
    }
}
