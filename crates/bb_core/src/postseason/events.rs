//! Structured postseason event log.
//!
//! Every notable decision the engine makes is appended here and returned with
//! the results, so callers can render or persist the narrative however they
//! like. The engine itself never prints.

use serde::{Deserialize, Serialize};

use crate::models::{TeamId, Tier};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PostseasonEvent {
    SeriesCompleted {
        tier: Tier,
        round: String,
        winner: TeamId,
        loser: TeamId,
        games: u8,
    },
    /// Odd field: the top seed advances without playing.
    ByeAwarded {
        tier: Tier,
        round: String,
        team: TeamId,
    },
    /// A stage with too few opponents resolved without games.
    AutoAdvanced {
        tier: Tier,
        stage: String,
        team: TeamId,
    },
    ExcludedFromField {
        tier: Tier,
        stage: String,
        team: TeamId,
        reason: String,
    },
    MetroChampion {
        division: String,
        team: TeamId,
    },
    TierChampion {
        tier: Tier,
        team: TeamId,
    },
    AutoRelegated {
        tier: Tier,
        team: TeamId,
    },
    Relegated {
        tier: Tier,
        team: TeamId,
    },
    Survived {
        tier: Tier,
        team: TeamId,
    },
    Promoted {
        to_tier: Tier,
        team: TeamId,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EventLog(Vec<PostseasonEvent>);

impl EventLog {
    pub fn push(&mut self, event: PostseasonEvent) {
        self.0.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &PostseasonEvent> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
