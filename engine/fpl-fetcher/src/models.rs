use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use whatif_engine::{
    LiveScore, LiveScores, Pick, PlayerId, PlayerMeta, PlayerMetaMap, PlayerTagger,
    PositionCategory, RankConfig, Squad, TagInputs, TRIPLE_CAPTAIN_MULTIPLIER,
};

/// Chip name the upstream API uses for triple captain
pub const TRIPLE_CAPTAIN_CHIP: &str = "3xc";

/// `bootstrap-static` payload (players, gameweeks, entrant count)
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BootstrapPayload {
    #[serde(default)]
    pub elements: Vec<ElementRecord>,

    #[serde(default)]
    pub events: Vec<EventRecord>,

    #[serde(default)]
    pub total_players: Option<u64>,
}

/// Player entry in the bootstrap payload
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ElementRecord {
    pub id: PlayerId,
    pub web_name: String,

    /// 1=GKP, 2=DEF, 3=MID, 4=FWD
    pub element_type: u8,

    #[serde(default)]
    pub team: u32,

    /// Price in tenths of a million
    #[serde(default)]
    pub now_cost: u32,

    #[serde(default)]
    pub selected_by_percent: String,

    /// Upstream expected points for the next gameweek
    #[serde(default)]
    pub ep_next: Option<String>,

    #[serde(default)]
    pub points_per_game: String,
}

/// Decimal figures arrive as strings; blanks and junk read as 0
fn parse_decimal(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

impl ElementRecord {
    /// Tagging figures from the bootstrap alone. `ep_next` stands in for the
    /// per-gameweek projection and `points_per_game` for recent returns.
    pub fn tag_inputs(&self) -> TagInputs {
        let ep_next = self.ep_next.as_deref().map(parse_decimal).unwrap_or(0.0);
        let points_per_game = parse_decimal(&self.points_per_game);

        TagInputs {
            player_id: self.id,
            ownership_pct: parse_decimal(&self.selected_by_percent),
            now_cost: self.now_cost,
            xp_next_3: ep_next * 3.0,
            actual_points_last_5: points_per_game * 5.0,
            xp_last_5: ep_next * 5.0,
        }
    }
}

/// Gameweek entry in the bootstrap payload
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EventRecord {
    pub id: u32,

    #[serde(default)]
    pub average_entry_score: Option<f64>,

    #[serde(default)]
    pub is_current: bool,

    #[serde(default)]
    pub is_next: bool,

    #[serde(default)]
    pub finished: bool,
}

/// `event/{gw}/live` payload
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LivePayload {
    #[serde(default)]
    pub elements: Vec<LiveElementRecord>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LiveElementRecord {
    pub id: PlayerId,
    pub stats: LiveStatsRecord,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LiveStatsRecord {
    #[serde(default)]
    pub minutes: u32,

    #[serde(default)]
    pub total_points: i32,
}

/// `entry/{id}/event/{gw}/picks` payload
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PicksPayload {
    pub picks: Vec<PickRecord>,

    #[serde(default)]
    pub active_chip: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PickRecord {
    pub element: PlayerId,
    pub position: u8,
    pub multiplier: u8,

    #[serde(default)]
    pub is_captain: bool,

    #[serde(default)]
    pub is_vice_captain: bool,
}

/// Population figures for one gameweek
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameweekContext {
    pub gameweek: u32,
    pub average_score: f64,
    pub total_players: u64,
}

/// Everything a what-if request needs for one manager and gameweek
#[derive(Debug, Clone)]
pub struct GameweekSnapshot {
    pub entry_id: u64,
    pub context: GameweekContext,
    pub squad: Squad,
    pub live_scores: LiveScores,
    pub player_meta: PlayerMetaMap,
    pub fetched_at: DateTime<Utc>,
}

/// Pick the gameweek to analyse: the current one while it is still running,
/// otherwise the next, then the current, then the latest finished.
pub fn detect_current_gameweek(events: &[EventRecord]) -> u32 {
    let current = events.iter().find(|e| e.is_current);
    let next = events.iter().find(|e| e.is_next);

    match (current, next) {
        (Some(current), _) if !current.finished => current.id,
        (_, Some(next)) => next.id,
        (Some(current), None) => current.id,
        (None, None) => events.iter().filter(|e| e.finished).map(|e| e.id).max().unwrap_or(1),
    }
}

impl BootstrapPayload {
    /// Map player elements into strict metadata records, tagged against the whole pool
    pub fn player_meta(&self) -> Result<PlayerMetaMap> {
        let pool: Vec<TagInputs> = self.elements.iter().map(ElementRecord::tag_inputs).collect();
        let tagger = PlayerTagger::new(&pool);

        self.elements
            .iter()
            .map(|element| -> Result<(PlayerId, PlayerMeta)> {
                let position = PositionCategory::from_element_type(element.element_type)
                    .with_context(|| {
                        format!(
                            "Unknown element_type {} for player {}",
                            element.element_type, element.id
                        )
                    })?;
                let meta = PlayerMeta {
                    player_id: element.id,
                    position,
                    display_name: element.web_name.clone(),
                    tags: tagger.tags_for(&element.tag_inputs()),
                };
                Ok((element.id, meta))
            })
            .collect()
    }

    /// Average score and entrant count for `gameweek`
    pub fn gameweek_context(&self, gameweek: u32, rank: &RankConfig) -> Result<GameweekContext> {
        let event = self
            .events
            .iter()
            .find(|e| e.id == gameweek)
            .with_context(|| format!("Gameweek {gameweek} not found in bootstrap events"))?;

        let average_score = event
            .average_entry_score
            .with_context(|| format!("Gameweek {gameweek} has no average score yet"))?;

        Ok(GameweekContext {
            gameweek,
            average_score,
            total_players: rank.resolve_total_players(self.total_players),
        })
    }

    pub fn current_gameweek(&self) -> u32 {
        detect_current_gameweek(&self.events)
    }
}

impl LivePayload {
    pub fn live_scores(&self) -> LiveScores {
        self.elements
            .iter()
            .map(|element| {
                let score = LiveScore {
                    player_id: element.id,
                    points: element.stats.total_points,
                    minutes_played: element.stats.minutes,
                };
                (element.id, score)
            })
            .collect()
    }
}

impl PicksPayload {
    pub fn is_triple_captain(&self) -> bool {
        self.active_chip.as_deref() == Some(TRIPLE_CAPTAIN_CHIP)
    }

    /// Validate picks into a squad; the triple-captain chip lifts the captain to 3x
    pub fn squad(&self) -> Result<Squad> {
        let triple = self.is_triple_captain();
        let picks = self
            .picks
            .iter()
            .map(|record| {
                let mut multiplier = record.multiplier;
                if triple && record.is_captain && multiplier > 0 {
                    multiplier = multiplier.max(TRIPLE_CAPTAIN_MULTIPLIER);
                }
                Pick {
                    player_id: record.element,
                    squad_position: record.position,
                    multiplier,
                    is_captain: record.is_captain,
                    is_vice_captain: record.is_vice_captain,
                }
            })
            .collect();

        Squad::new(picks).context("Upstream picks do not form a valid squad")
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use serde_json::json;

    pub fn bootstrap() -> BootstrapPayload {
        let elements: Vec<_> = (1..=15)
            .map(|id| {
                let element_type = match id {
                    1 | 12 => 1,
                    2..=5 | 13 => 2,
                    6..=9 | 14 => 3,
                    _ => 4,
                };
                // 1 is heavily owned, 10 a rarely-owned overperformer
                let (selected, now_cost, ep_next, ppg) = match id {
                    1 => ("45.2", 130, "7.0", "6.5"),
                    10 => ("1.5", 60, "1.0", "4.0"),
                    _ => ("5.0", 50, "2.0", "2.0"),
                };
                json!({
                    "id": id,
                    "web_name": format!("Player {id}"),
                    "element_type": element_type,
                    "team": 1,
                    "now_cost": now_cost,
                    "selected_by_percent": selected,
                    "ep_next": ep_next,
                    "points_per_game": ppg
                })
            })
            .collect();

        serde_json::from_value(json!({
            "elements": elements,
            "events": [
                { "id": 6, "average_entry_score": 48.0, "is_current": false, "is_next": false, "finished": true },
                { "id": 7, "average_entry_score": 55.0, "is_current": true, "is_next": false, "finished": true },
                { "id": 8, "average_entry_score": null, "is_current": false, "is_next": true, "finished": false }
            ],
            "total_players": 8_000_000u64,
            "teams": []
        }))
        .unwrap()
    }

    /// Captain (1) did not play, vice (2) scored 8, everyone else 2
    pub fn live() -> LivePayload {
        let elements: Vec<_> = (1..=15)
            .map(|id| {
                let (minutes, points) = match id {
                    1 => (0, 0),
                    2 => (90, 8),
                    _ => (90, 2),
                };
                json!({ "id": id, "stats": { "minutes": minutes, "total_points": points }, "explain": [] })
            })
            .collect();
        serde_json::from_value(json!({ "elements": elements })).unwrap()
    }

    pub fn picks() -> PicksPayload {
        let picks: Vec<_> = (1..=15)
            .map(|position| {
                let multiplier = match position {
                    1 => 2,
                    2..=11 => 1,
                    _ => 0,
                };
                json!({
                    "element": position,
                    "position": position,
                    "multiplier": multiplier,
                    "is_captain": position == 1,
                    "is_vice_captain": position == 2
                })
            })
            .collect();
        serde_json::from_value(json!({ "picks": picks, "active_chip": null, "automatic_subs": [] }))
            .unwrap()
    }
}
