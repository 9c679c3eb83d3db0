//! Game-outcome provider seam.
//!
//! The bracket engine never decides a game itself. Every game in every series
//! is delegated to a [`GameOutcomeProvider`], which receives the home and away
//! teams and returns a final score plus the winner. The engine holds no RNG of
//! its own; determinism is entirely the provider's property.

pub mod rating;

use serde::{Deserialize, Serialize};

use crate::models::{Team, TeamId};

pub use rating::RatingSim;

/// Final score of a single playoff game. Ties are not a legal outcome; a
/// provider must keep playing overtime until one side leads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameOutcome {
    pub home_score: u16,
    pub away_score: u16,
    pub winner: TeamId,
}

/// Produces one playoff game outcome at a time. Implementations may be
/// pseudo-random, scripted, or replayed; the engine only requires that the
/// winner is one of the two participants.
pub trait GameOutcomeProvider {
    fn playoff_game(&mut self, home: &Team, away: &Team) -> GameOutcome;
}
