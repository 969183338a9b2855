//! Request handling: run a simulation against a fetched gameweek and rank both totals

use crate::models::{GameweekContext, GameweekSnapshot};
use serde::{Deserialize, Serialize};
use tracing::info;
use whatif_engine::{
    simulate_bench_swap, simulate_captain_change, simulate_vice_captain, PlayerId, RankConfig,
    RankEstimator, RankImpact, Result, SimulationResult,
};

/// A what-if question about one gameweek
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WhatIfRequest {
    #[serde(rename_all = "camelCase")]
    Captain { new_captain_id: PlayerId },

    #[serde(rename_all = "camelCase")]
    BenchSwap { starter_id: PlayerId, bench_id: PlayerId },

    ViceCaptain,
}

/// Response body for a what-if request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfResponse {
    pub entry_id: u64,

    #[serde(flatten)]
    pub context: GameweekContext,

    #[serde(flatten)]
    pub simulation: SimulationResult,

    #[serde(flatten)]
    pub rank: RankImpact,
}

pub struct WhatIfService {
    estimator: RankEstimator,
}

impl WhatIfService {
    pub fn new(config: &RankConfig) -> Self {
        Self { estimator: RankEstimator::new(config) }
    }

    /// Run `request` against `snapshot`
    pub fn run(&self, snapshot: &GameweekSnapshot, request: &WhatIfRequest) -> Result<WhatIfResponse> {
        let squad = &snapshot.squad;
        let live = &snapshot.live_scores;
        let meta = &snapshot.player_meta;

        let simulation = match *request {
            WhatIfRequest::Captain { new_captain_id } => {
                simulate_captain_change(squad, live, new_captain_id, meta)?
            }
            WhatIfRequest::BenchSwap { starter_id, bench_id } => {
                simulate_bench_swap(squad, live, starter_id, bench_id, meta)?
            }
            WhatIfRequest::ViceCaptain => simulate_vice_captain(squad, live, meta)?,
        };

        let context = snapshot.context;
        let rank = self.estimator.rank_impact(&simulation, context.average_score, context.total_players);

        info!(
            "Entry {} GW{} {:?}: {} -> {} pts, rank {} -> {}",
            snapshot.entry_id,
            context.gameweek,
            request,
            simulation.original_points,
            simulation.simulated_points,
            rank.original_rank,
            rank.simulated_rank
        );

        Ok(WhatIfResponse { entry_id: snapshot.entry_id, context, simulation, rank })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::build_snapshot;
    use crate::models::fixtures;
    use whatif_engine::{Scenario, WhatIfError};

    fn snapshot() -> GameweekSnapshot {
        build_snapshot(
            42,
            7,
            &fixtures::bootstrap(),
            &fixtures::live(),
            &fixtures::picks(),
            &RankConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_vice_captain_request() {
        let service = WhatIfService::new(&RankConfig::default());
        let response = service.run(&snapshot(), &WhatIfRequest::ViceCaptain).unwrap();

        // captain blanked, vice scored 8, nine other starters scored 2
        assert_eq!(response.simulation.original_points, 8 + 18);
        assert_eq!(response.simulation.simulated_points, 16 + 18);
        assert_eq!(response.simulation.points_delta, 8);
        assert!(response.rank.simulated_rank < response.rank.original_rank);
        assert!(response.rank.rank_change > 0);
        assert_eq!(response.context.total_players, 8_000_000);
    }

    #[test]
    fn test_captain_request() {
        let service = WhatIfService::new(&RankConfig::default());
        let request = WhatIfRequest::Captain { new_captain_id: 5 };
        let response = service.run(&snapshot(), &request).unwrap();

        // baseline already promotes the vice; captaining 5 instead doubles a 2-pointer
        assert_eq!(response.simulation.original_points, 16 + 18);
        assert_eq!(response.simulation.simulated_points, 8 + 4 + 16);
        match &response.simulation.scenario {
            Scenario::CaptainChange { new_captain, .. } => assert_eq!(new_captain.display_name, "Player 5"),
            other => panic!("unexpected scenario {other:?}"),
        }
    }

    #[test]
    fn test_bench_swap_request_rejects_two_starters() {
        let service = WhatIfService::new(&RankConfig::default());
        let request = WhatIfRequest::BenchSwap { starter_id: 3, bench_id: 4 };
        let err = service.run(&snapshot(), &request).unwrap_err();
        assert!(matches!(err, WhatIfError::InvalidSelection { player_id: 4, .. }));
    }

    #[test]
    fn test_request_json_shape() {
        let request: WhatIfRequest =
            serde_json::from_str(r#"{"type":"benchSwap","starterId":3,"benchId":13}"#).unwrap();
        assert_eq!(request, WhatIfRequest::BenchSwap { starter_id: 3, bench_id: 13 });

        let request: WhatIfRequest = serde_json::from_str(r#"{"type":"viceCaptain"}"#).unwrap();
        assert_eq!(request, WhatIfRequest::ViceCaptain);
    }

    #[test]
    fn test_response_json_shape() {
        let service = WhatIfService::new(&RankConfig::default());
        let response = service.run(&snapshot(), &WhatIfRequest::ViceCaptain).unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["entryId"], 42);
        assert_eq!(json["gameweek"], 7);
        assert_eq!(json["averageScore"], 55.0);
        assert_eq!(json["originalPoints"], 26);
        assert_eq!(json["simulatedPoints"], 34);
        assert_eq!(json["pointsDelta"], 8);
        assert_eq!(json["scenario"]["kind"], "viceCaptain");
        assert_eq!(json["scenario"]["promotionTriggered"], true);
        assert!(json["originalRank"].is_u64());
        assert!(json["rankChange"].is_i64());
    }
}
