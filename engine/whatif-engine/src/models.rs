use crate::captaincy::TRIPLE_CAPTAIN_MULTIPLIER;
use crate::error::{Result, WhatIfError};
use crate::tags::PlayerTag;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Upstream player identifier
pub type PlayerId = u32;

/// Number of picks in a gameweek squad
pub const SQUAD_SIZE: usize = 15;

/// Squad positions 1..=STARTING_XI start; the rest sit on the bench
pub const STARTING_XI: u8 = 11;

/// Per-player live scores for one gameweek, keyed by player id (may be sparse)
pub type LiveScores = HashMap<PlayerId, LiveScore>;

/// Player metadata keyed by player id
pub type PlayerMetaMap = HashMap<PlayerId, PlayerMeta>;

/// One slot in a manager's gameweek squad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pick {
    pub player_id: PlayerId,

    /// 1-11 starting eleven, 12-15 bench in substitution order
    pub squad_position: u8,

    /// Scoring weight: 0 not scoring, 1 normal, 2 captain, 3 triple captain
    pub multiplier: u8,

    pub is_captain: bool,
    pub is_vice_captain: bool,
}

impl Pick {
    /// Whether the slot belongs to the starting eleven
    pub fn is_starter(&self) -> bool {
        (1..=STARTING_XI).contains(&self.squad_position)
    }

    /// Whether the slot belongs to the bench
    pub fn is_bench(&self) -> bool {
        self.squad_position > STARTING_XI && self.squad_position as usize <= SQUAD_SIZE
    }
}

/// Live per-player record for a gameweek
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveScore {
    pub player_id: PlayerId,

    /// Raw gameweek points (can be negative)
    pub points: i32,

    pub minutes_played: u32,
}

/// Playing position of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PositionCategory {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl PositionCategory {
    /// Map the upstream element type (1=GKP, 2=DEF, 3=MID, 4=FWD)
    pub fn from_element_type(element_type: u8) -> Option<Self> {
        match element_type {
            1 => Some(PositionCategory::Goalkeeper),
            2 => Some(PositionCategory::Defender),
            3 => Some(PositionCategory::Midfielder),
            4 => Some(PositionCategory::Forward),
            _ => None,
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            PositionCategory::Goalkeeper => "GKP",
            PositionCategory::Defender => "DEF",
            PositionCategory::Midfielder => "MID",
            PositionCategory::Forward => "FWD",
        }
    }
}

impl fmt::Display for PositionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Static player attributes used for validation and display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMeta {
    pub player_id: PlayerId,
    pub position: PositionCategory,
    pub display_name: String,

    /// Strategic tags, when the boundary could derive them
    #[serde(default)]
    pub tags: Vec<PlayerTag>,
}

/// Display-ready reference to a player inside a simulation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRef {
    pub player_id: PlayerId,
    pub display_name: String,
    pub position: PositionCategory,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<PlayerTag>,
}

impl From<&PlayerMeta> for PlayerRef {
    fn from(meta: &PlayerMeta) -> Self {
        Self {
            player_id: meta.player_id,
            display_name: meta.display_name.clone(),
            position: meta.position,
            tags: meta.tags.clone(),
        }
    }
}

/// A validated 15-pick squad for one manager in one gameweek.
///
/// Picks are held in squad-position order. Exactly one pick is captain and a
/// different pick is vice-captain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Squad {
    picks: Vec<Pick>,
    #[serde(skip)]
    captain_idx: usize,
    #[serde(skip)]
    vice_captain_idx: usize,
}

impl Squad {
    /// Validate picks and build a squad
    pub fn new(mut picks: Vec<Pick>) -> Result<Self> {
        if picks.len() != SQUAD_SIZE {
            return Err(WhatIfError::MalformedSquad(format!(
                "expected {} picks, got {}",
                SQUAD_SIZE,
                picks.len()
            )));
        }

        picks.sort_by_key(|p| p.squad_position);
        for (idx, pick) in picks.iter().enumerate() {
            if pick.squad_position as usize != idx + 1 {
                return Err(WhatIfError::MalformedSquad(format!(
                    "squad positions must cover 1-{} exactly once (found {} at slot {})",
                    SQUAD_SIZE,
                    pick.squad_position,
                    idx + 1
                )));
            }
        }

        let mut seen = HashSet::with_capacity(SQUAD_SIZE);
        if let Some(dup) = picks.iter().find(|p| !seen.insert(p.player_id)) {
            return Err(WhatIfError::MalformedSquad(format!(
                "player {} appears more than once",
                dup.player_id
            )));
        }

        let captains: Vec<usize> =
            picks.iter().enumerate().filter(|(_, p)| p.is_captain).map(|(i, _)| i).collect();
        let vices: Vec<usize> =
            picks.iter().enumerate().filter(|(_, p)| p.is_vice_captain).map(|(i, _)| i).collect();

        let (captain_idx, vice_captain_idx) = match (captains.as_slice(), vices.as_slice()) {
            ([c], [v]) if c != v => (*c, *v),
            ([c], [v]) if c == v => {
                return Err(WhatIfError::MalformedSquad(format!(
                    "player {} cannot be both captain and vice-captain",
                    picks[*c].player_id
                )))
            }
            _ => {
                return Err(WhatIfError::MalformedSquad(format!(
                    "expected one captain and one vice-captain, got {} and {}",
                    captains.len(),
                    vices.len()
                )))
            }
        };

        if let Some(pick) = picks.iter().find(|p| p.multiplier > TRIPLE_CAPTAIN_MULTIPLIER) {
            return Err(WhatIfError::MalformedSquad(format!(
                "player {} carries multiplier {} (max {})",
                pick.player_id, pick.multiplier, TRIPLE_CAPTAIN_MULTIPLIER
            )));
        }

        let boosted = picks.iter().filter(|p| p.multiplier >= 2).count();
        if boosted > 1 {
            return Err(WhatIfError::MalformedSquad(format!(
                "{boosted} picks carry a captain multiplier"
            )));
        }

        Ok(Self { picks, captain_idx, vice_captain_idx })
    }

    /// Picks in squad-position order
    pub fn picks(&self) -> &[Pick] {
        &self.picks
    }

    pub fn find(&self, player_id: PlayerId) -> Option<&Pick> {
        self.picks.iter().find(|p| p.player_id == player_id)
    }

    pub fn captain(&self) -> &Pick {
        &self.picks[self.captain_idx]
    }

    pub fn vice_captain(&self) -> &Pick {
        &self.picks[self.vice_captain_idx]
    }

    /// Derive a squad with the armband moved to `new_captain_id`.
    ///
    /// The new captain takes `nominal_multiplier`. The former captain drops to
    /// 1 if they start and 0 if benched. Captaining the vice-captain hands the
    /// vice role to the former captain.
    pub fn with_captain(&self, new_captain_id: PlayerId, nominal_multiplier: u8) -> Result<Squad> {
        if self.find(new_captain_id).is_none() {
            return Err(WhatIfError::invalid_selection(new_captain_id, "not in squad"));
        }
        let former = *self.captain();
        if former.player_id == new_captain_id {
            return Ok(self.clone());
        }
        let takes_vice_role = self.vice_captain().player_id == new_captain_id;

        let picks = self
            .picks
            .iter()
            .map(|pick| {
                let mut pick = *pick;
                if pick.player_id == former.player_id {
                    pick.is_captain = false;
                    pick.is_vice_captain = takes_vice_role;
                    pick.multiplier = if pick.is_starter() { 1 } else { 0 };
                } else if pick.player_id == new_captain_id {
                    pick.is_captain = true;
                    pick.is_vice_captain = false;
                    pick.multiplier = nominal_multiplier;
                }
                pick
            })
            .collect();

        Squad::new(picks)
    }

    /// Derive a squad where `bench_id` comes on for `starter_id`.
    ///
    /// The two players trade squad positions and captaincy roles. The
    /// substitute takes over the starter's multiplier and the starter scores
    /// nothing from the bench, whatever the bench slot was worth before.
    pub fn with_substitution(&self, starter_id: PlayerId, bench_id: PlayerId) -> Result<Squad> {
        let starter = *self
            .find(starter_id)
            .ok_or_else(|| WhatIfError::invalid_selection(starter_id, "not in squad"))?;
        let substitute = *self
            .find(bench_id)
            .ok_or_else(|| WhatIfError::invalid_selection(bench_id, "not in squad"))?;

        let picks = self
            .picks
            .iter()
            .map(|pick| {
                if pick.player_id == starter_id {
                    Pick { player_id: bench_id, ..starter }
                } else if pick.player_id == bench_id {
                    Pick { player_id: starter_id, multiplier: 0, ..substitute }
                } else {
                    *pick
                }
            })
            .collect();

        Squad::new(picks)
    }
}

/// Outcome of a single what-if simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub original_points: i64,
    pub simulated_points: i64,

    /// simulated - original
    pub points_delta: i64,

    pub scenario: Scenario,
}

impl SimulationResult {
    pub fn new(original_points: i64, simulated_points: i64, scenario: Scenario) -> Self {
        Self {
            original_points,
            simulated_points,
            points_delta: simulated_points - original_points,
            scenario,
        }
    }
}

/// Descriptive fields for each kind of simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Scenario {
    #[serde(rename_all = "camelCase")]
    CaptainChange {
        original_captain: PlayerRef,
        new_captain: PlayerRef,
        /// Whether the vice-captain takes the armband in the simulated squad
        vice_captain_promoted: bool,
    },

    #[serde(rename_all = "camelCase")]
    BenchSwap { benched_starter: PlayerRef, promoted_substitute: PlayerRef },

    #[serde(rename_all = "camelCase")]
    ViceCaptain {
        captain: PlayerRef,
        vice_captain: PlayerRef,
        captain_featured: bool,
        vice_captain_featured: bool,
        promotion_triggered: bool,
    },
}
