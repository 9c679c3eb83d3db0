use thiserror::Error;

use crate::models::{TeamId, Tier};

#[derive(Error, Debug)]
pub enum PostseasonError {
    #[error("tier {} has no teams", .tier.label())]
    EmptyTier { tier: Tier },

    #[error("tier {} needs at least {needed} teams, found {found}", .tier.label())]
    InsufficientTeams {
        tier: Tier,
        needed: usize,
        found: usize,
    },

    #[error("game outcome winner {winner:?} is neither home {home:?} nor away {away:?}")]
    InvalidGameOutcome {
        home: TeamId,
        away: TeamId,
        winner: TeamId,
    },

    #[error("best-of-{best_of} series exhausted without a winner")]
    UnresolvedSeries { best_of: u8 },

    #[error("unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PostseasonError>;
