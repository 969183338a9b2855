//! Counterfactual roster decisions.
//!
//! Each function scores the squad as configured and a derived copy that
//! reflects the hypothetical change. The input squad is never modified.

use crate::captaincy::CaptaincyRules;
use crate::error::{Result, WhatIfError};
use crate::models::{
    LiveScores, PlayerId, PlayerMetaMap, PlayerRef, Scenario, SimulationResult, Squad,
};
use crate::points::PointsModel;
use tracing::debug;

/// Resolve an essential pick; both its live score and metadata must exist
fn resolve_essential(
    player_id: PlayerId,
    role: &'static str,
    live: &LiveScores,
    meta: &PlayerMetaMap,
) -> Result<PlayerRef> {
    if !live.contains_key(&player_id) {
        return Err(WhatIfError::UpstreamData { player_id, role, record: "live score" });
    }
    meta.get(&player_id)
        .map(PlayerRef::from)
        .ok_or(WhatIfError::UpstreamData { player_id, role, record: "player metadata" })
}

/// Total for a squad with auto-promotion applied
fn score_with_promotion(squad: &Squad, live: &LiveScores) -> Result<(i64, bool)> {
    let promotion = CaptaincyRules::apply_auto_promotion(squad, live);
    let total = PointsModel::compute_total(&promotion.picks, live)?;
    Ok((total, promotion.triggered))
}

/// What the gameweek would have scored with a different captain
pub fn simulate_captain_change(
    squad: &Squad,
    live: &LiveScores,
    new_captain_id: PlayerId,
    meta: &PlayerMetaMap,
) -> Result<SimulationResult> {
    if squad.find(new_captain_id).is_none() {
        return Err(WhatIfError::invalid_selection(new_captain_id, "not in squad"));
    }

    let original_captain = resolve_essential(squad.captain().player_id, "captain", live, meta)?;
    let new_captain = resolve_essential(new_captain_id, "new captain", live, meta)?;
    resolve_essential(squad.vice_captain().player_id, "vice-captain", live, meta)?;

    let nominal = CaptaincyRules::nominal_multiplier(squad.captain());
    let derived = squad.with_captain(new_captain_id, nominal)?;

    let (original_points, _) = score_with_promotion(squad, live)?;
    let (simulated_points, vice_captain_promoted) = score_with_promotion(&derived, live)?;

    debug!(
        "Captain change {} -> {}: {} -> {} pts",
        original_captain.player_id, new_captain.player_id, original_points, simulated_points
    );

    Ok(SimulationResult::new(
        original_points,
        simulated_points,
        Scenario::CaptainChange { original_captain, new_captain, vice_captain_promoted },
    ))
}

/// What the gameweek would have scored with a bench player in place of a starter
pub fn simulate_bench_swap(
    squad: &Squad,
    live: &LiveScores,
    starter_id: PlayerId,
    bench_id: PlayerId,
    meta: &PlayerMetaMap,
) -> Result<SimulationResult> {
    let starter = squad
        .find(starter_id)
        .ok_or_else(|| WhatIfError::invalid_selection(starter_id, "not in squad"))?;
    if !starter.is_starter() {
        return Err(WhatIfError::invalid_selection(
            starter_id,
            format!("squad position {} is not in the starting eleven", starter.squad_position),
        ));
    }

    let substitute = squad
        .find(bench_id)
        .ok_or_else(|| WhatIfError::invalid_selection(bench_id, "not in squad"))?;
    if !substitute.is_bench() {
        return Err(WhatIfError::invalid_selection(
            bench_id,
            format!("squad position {} is not on the bench", substitute.squad_position),
        ));
    }

    let benched_starter = resolve_essential(starter_id, "starter", live, meta)?;
    let promoted_substitute = resolve_essential(bench_id, "substitute", live, meta)?;
    resolve_essential(squad.captain().player_id, "captain", live, meta)?;
    resolve_essential(squad.vice_captain().player_id, "vice-captain", live, meta)?;

    let derived = squad.with_substitution(starter_id, bench_id)?;

    let (original_points, _) = score_with_promotion(squad, live)?;
    let (simulated_points, _) = score_with_promotion(&derived, live)?;

    debug!(
        "Bench swap {} <-> {}: {} -> {} pts",
        starter_id, bench_id, original_points, simulated_points
    );

    Ok(SimulationResult::new(
        original_points,
        simulated_points,
        Scenario::BenchSwap { benched_starter, promoted_substitute },
    ))
}

/// Value of the vice-captain safety net for this gameweek.
///
/// The original total counts the nominated captain at their multiplier even
/// if they did not play; the simulated total applies auto-promotion.
pub fn simulate_vice_captain(
    squad: &Squad,
    live: &LiveScores,
    meta: &PlayerMetaMap,
) -> Result<SimulationResult> {
    let captain = resolve_essential(squad.captain().player_id, "captain", live, meta)?;
    let vice_captain =
        resolve_essential(squad.vice_captain().player_id, "vice-captain", live, meta)?;

    let captain_featured = CaptaincyRules::did_player_feature(live.get(&captain.player_id));
    let vice_captain_featured =
        CaptaincyRules::did_player_feature(live.get(&vice_captain.player_id));

    let original_points = PointsModel::compute_total(squad.picks(), live)?;
    let (simulated_points, promotion_triggered) = score_with_promotion(squad, live)?;

    debug!(
        "Vice-captain check (captain featured: {}, promoted: {}): {} -> {} pts",
        captain_featured, promotion_triggered, original_points, simulated_points
    );

    Ok(SimulationResult::new(
        original_points,
        simulated_points,
        Scenario::ViceCaptain {
            captain,
            vice_captain,
            captain_featured,
            vice_captain_featured,
            promotion_triggered,
        },
    ))
}
