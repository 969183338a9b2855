//! Error types for the what-if engine

use crate::models::PlayerId;
use thiserror::Error;

/// Result type for what-if engine operations
pub type Result<T> = std::result::Result<T, WhatIfError>;

/// Errors that can occur while simulating a gameweek decision
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WhatIfError {
    /// The caller picked a player or role that the operation cannot accept
    #[error("Invalid selection for player {player_id}: {reason}")]
    InvalidSelection { player_id: PlayerId, reason: String },

    /// A record needed for an essential pick is missing from upstream data
    #[error("Upstream data missing {record} for {role} (player {player_id})")]
    UpstreamData { player_id: PlayerId, role: &'static str, record: &'static str },

    /// The squad does not satisfy its structural invariants
    #[error("Malformed squad: {0}")]
    MalformedSquad(String),
}

impl WhatIfError {
    pub(crate) fn invalid_selection(player_id: PlayerId, reason: impl Into<String>) -> Self {
        WhatIfError::InvalidSelection { player_id, reason: reason.into() }
    }
}
