//! Captain and vice-captain scoring rules

use crate::models::{LiveScore, LiveScores, Pick, Squad};

/// Standard captain multiplier
pub const CAPTAIN_MULTIPLIER: u8 = 2;

/// Captain multiplier while the triple-captain chip is active
pub const TRIPLE_CAPTAIN_MULTIPLIER: u8 = 3;

/// Multiplier assignment after the auto-promotion rule has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoPromotion {
    pub picks: Vec<Pick>,

    /// True when the captain did not feature and the vice-captain took over
    pub triggered: bool,
}

/// Captaincy semantics.
///
/// The armband is a role. Which pick actually scores at the captain
/// multiplier is decided by auto-promotion: when the captain does not
/// feature, a featuring vice-captain is promoted to the captain's nominal
/// multiplier and the captain collapses to 0. There is no cascade past the
/// vice-captain.
pub struct CaptaincyRules;

impl CaptaincyRules {
    /// A player featured iff they accrued minutes
    pub fn did_player_feature(score: Option<&LiveScore>) -> bool {
        score.is_some_and(|s| s.minutes_played > 0)
    }

    /// Multiplier the armband is worth for this squad (2, or 3 under triple captain)
    pub fn nominal_multiplier(captain: &Pick) -> u8 {
        if captain.multiplier >= CAPTAIN_MULTIPLIER {
            captain.multiplier
        } else {
            CAPTAIN_MULTIPLIER
        }
    }

    /// Acting multiplier for `pick` within `squad` given live data.
    ///
    /// A captain who did not feature always drops to 0, even when the
    /// vice-captain did not feature either; with no minutes there are no
    /// points to lose.
    pub fn effective_multiplier(pick: &Pick, squad: &Squad, live: &LiveScores) -> u8 {
        let captain = squad.captain();
        if Self::did_player_feature(live.get(&captain.player_id)) {
            return pick.multiplier;
        }

        if pick.player_id == captain.player_id {
            0
        } else if pick.player_id == squad.vice_captain().player_id
            && Self::did_player_feature(live.get(&pick.player_id))
        {
            Self::nominal_multiplier(captain)
        } else {
            pick.multiplier
        }
    }

    /// Apply auto-promotion to every pick, leaving the squad untouched
    pub fn apply_auto_promotion(squad: &Squad, live: &LiveScores) -> AutoPromotion {
        let captain_featured = Self::did_player_feature(live.get(&squad.captain().player_id));
        let vice_featured = Self::did_player_feature(live.get(&squad.vice_captain().player_id));

        let picks = squad
            .picks()
            .iter()
            .map(|pick| Pick { multiplier: Self::effective_multiplier(pick, squad, live), ..*pick })
            .collect();

        AutoPromotion { picks, triggered: !captain_featured && vice_featured }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerId;

    fn squad_with_captain_multiplier(multiplier: u8) -> Squad {
        let picks = (1..=15u8)
            .map(|pos| Pick {
                player_id: pos as PlayerId,
                squad_position: pos,
                multiplier: match pos {
                    1 => multiplier,
                    2..=11 => 1,
                    _ => 0,
                },
                is_captain: pos == 1,
                is_vice_captain: pos == 2,
            })
            .collect();
        Squad::new(picks).unwrap()
    }

    fn live(entries: &[(PlayerId, i32, u32)]) -> LiveScores {
        entries
            .iter()
            .map(|&(player_id, points, minutes_played)| {
                (player_id, LiveScore { player_id, points, minutes_played })
            })
            .collect()
    }

    #[test]
    fn test_did_player_feature() {
        let played = LiveScore { player_id: 1, points: 2, minutes_played: 1 };
        let unused = LiveScore { player_id: 1, points: 0, minutes_played: 0 };
        assert!(CaptaincyRules::did_player_feature(Some(&played)));
        assert!(!CaptaincyRules::did_player_feature(Some(&unused)));
        assert!(!CaptaincyRules::did_player_feature(None));
    }

    #[test]
    fn test_nominal_multiplier() {
        let squad = squad_with_captain_multiplier(3);
        assert_eq!(CaptaincyRules::nominal_multiplier(squad.captain()), 3);
        let squad = squad_with_captain_multiplier(2);
        assert_eq!(CaptaincyRules::nominal_multiplier(squad.captain()), 2);
        // armband on a pick whose multiplier was already collapsed
        let squad = squad_with_captain_multiplier(0);
        assert_eq!(CaptaincyRules::nominal_multiplier(squad.captain()), 2);
    }

    #[test]
    fn test_no_promotion_when_captain_features() {
        let squad = squad_with_captain_multiplier(2);
        let scores = live(&[(1, 6, 90), (2, 8, 90)]);

        let promotion = CaptaincyRules::apply_auto_promotion(&squad, &scores);
        assert!(!promotion.triggered);
        assert_eq!(promotion.picks, squad.picks());
    }

    #[test]
    fn test_vice_promoted_when_captain_absent() {
        let squad = squad_with_captain_multiplier(2);
        let scores = live(&[(1, 0, 0), (2, 8, 90)]);

        let promotion = CaptaincyRules::apply_auto_promotion(&squad, &scores);
        assert!(promotion.triggered);
        assert_eq!(promotion.picks[0].multiplier, 0);
        assert_eq!(promotion.picks[1].multiplier, 2);
    }

    #[test]
    fn test_triple_captain_promotes_at_three() {
        let squad = squad_with_captain_multiplier(3);
        let scores = live(&[(2, 5, 60)]);

        assert_eq!(CaptaincyRules::effective_multiplier(squad.vice_captain(), &squad, &scores), 3);
        assert_eq!(CaptaincyRules::effective_multiplier(squad.captain(), &squad, &scores), 0);
    }

    #[test]
    fn test_no_cascade_past_vice_captain() {
        let squad = squad_with_captain_multiplier(2);
        let scores = live(&[(1, 0, 0), (2, 0, 0), (3, 10, 90)]);

        let promotion = CaptaincyRules::apply_auto_promotion(&squad, &scores);
        assert!(!promotion.triggered);
        assert_eq!(promotion.picks[0].multiplier, 0);
        assert_eq!(promotion.picks[1].multiplier, 1);
        assert_eq!(promotion.picks[2].multiplier, 1);
    }
}
