//! What-If Simulation Engine
//!
//! Computes how a manager's gameweek total would have changed under a
//! different captain, a bench swap, or without the vice-captain safety net,
//! and estimates where a points total would rank among all entrants.
//!
//! Every operation is a pure function over its inputs. Squads are never
//! mutated; each simulation derives a new multiplier assignment.

pub mod captaincy;
pub mod config;
pub mod error;
pub mod models;
pub mod points;
pub mod rank;
pub mod simulation;
pub mod tags;


pub use captaincy::{AutoPromotion, CaptaincyRules, CAPTAIN_MULTIPLIER, TRIPLE_CAPTAIN_MULTIPLIER};
pub use config::RankConfig;
pub use error::{Result, WhatIfError};
pub use models::*;
pub use points::PointsModel;
pub use rank::{RankEstimator, RankImpact};
pub use simulation::{simulate_bench_swap, simulate_captain_change, simulate_vice_captain};
pub use tags::{PlayerTag, PlayerTagger, TagInputs};
