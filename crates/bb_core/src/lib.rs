//! # bb_core - Basketball League Postseason Engine
//!
//! This library computes the complete postseason for a three-tier basketball
//! league with promotion and relegation: conference and national playoff
//! brackets, best-of-N series on fixed home-court patterns, relegation
//! mini-brackets, and the promotion selections between tiers.
//!
//! ## Features
//! - Deterministic given a seeded outcome provider (same seed = same bracket)
//! - Structured event log returned with the results, no console output
//! - JSON API for easy integration with the game shell

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod postseason;
pub mod sim;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export the main API surface
pub use api::{run_postseason_json, run_postseason_request, PostseasonRequest};
pub use config::{PostseasonConfig, TieBreakPolicy};
pub use error::{PostseasonError, Result};
pub use models::{Conference, Team, TeamId, Tier};
pub use postseason::events::{EventLog, PostseasonEvent};
pub use postseason::relegation::RelegationBracket;
pub use postseason::series::{BestOf, GameResult, SeriesResult, SeriesTeam};
pub use postseason::tier1::Tier1Bracket;
pub use postseason::tier2::{DivisionBracket, NationalBracket, Tier2Bracket};
pub use postseason::tier3::Tier3Bracket;
pub use postseason::{run_postseason, PostseasonResults};
pub use sim::{GameOutcome, GameOutcomeProvider, RatingSim};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_basic_postseason() {
        let request = json!({
            "schema_version": 1,
            "seed": 42,
            "teams": test_util::league_fixture(),
        });
        let response = run_postseason_json(&request.to_string()).unwrap();
        let results: PostseasonResults = serde_json::from_str(&response).unwrap();
        assert!(results.tier1.champion.is_some());
        assert!(results.tier2.national.champion.is_some());
        assert!(results.tier3.champion.is_some());
    }
}
