//! JSON entry point for host integrations.
//!
//! Mirrors the rest of the game's engine APIs: a versioned JSON request in,
//! a JSON result out, with the default seeded provider supplying game
//! outcomes so the same request always yields the same postseason.

use serde::Deserialize;
use tracing::info;

use crate::config::PostseasonConfig;
use crate::error::{PostseasonError, Result};
use crate::models::Team;
use crate::postseason::{run_postseason, PostseasonResults};
use crate::sim::RatingSim;
use crate::SCHEMA_VERSION;

#[derive(Debug, Deserialize)]
pub struct PostseasonRequest {
    pub schema_version: u8,
    /// Seed for the default rating provider.
    pub seed: u64,
    /// League-wide team list with finalized regular-season records.
    pub teams: Vec<Team>,
    #[serde(default)]
    pub config: PostseasonConfig,
}

/// Typed variant of [`run_postseason_json`] for in-process callers.
pub fn run_postseason_request(request: &PostseasonRequest) -> Result<PostseasonResults> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(PostseasonError::SchemaVersion {
            found: request.schema_version,
            expected: SCHEMA_VERSION,
        });
    }
    if request.teams.is_empty() {
        return Err(PostseasonError::InvalidRequest(
            "teams must not be empty".to_string(),
        ));
    }
    info!(teams = request.teams.len(), seed = request.seed, "postseason request");
    let mut provider = RatingSim::new(request.seed);
    run_postseason(&request.teams, &request.config, &mut provider)
}

pub fn run_postseason_json(request_json: &str) -> Result<String> {
    let request: PostseasonRequest = serde_json::from_str(request_json)?;
    let results = run_postseason_request(&request)?;
    Ok(serde_json::to_string(&results)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::league_fixture;
    use serde_json::json;

    fn request_json(seed: u64, schema_version: u8) -> String {
        json!({
            "schema_version": schema_version,
            "seed": seed,
            "teams": league_fixture(),
        })
        .to_string()
    }

    #[test]
    fn test_json_round_trip_and_determinism() {
        let request = request_json(42, crate::SCHEMA_VERSION);
        let first = run_postseason_json(&request).unwrap();
        let second = run_postseason_json(&request).unwrap();
        assert_eq!(first, second);

        let results: PostseasonResults = serde_json::from_str(&first).unwrap();
        assert_eq!(results.promoted_to_t1.len(), 3);
        assert_eq!(results.relegated_from_t2.len(), 3);
    }

    #[test]
    fn test_unknown_schema_version_is_rejected() {
        let request = request_json(42, 99);
        let err = run_postseason_json(&request).unwrap_err();
        assert!(matches!(
            err,
            PostseasonError::SchemaVersion { found: 99, .. }
        ));
    }

    #[test]
    fn test_empty_team_list_is_rejected() {
        let request = json!({
            "schema_version": crate::SCHEMA_VERSION,
            "seed": 1,
            "teams": [],
        })
        .to_string();
        let err = run_postseason_json(&request).unwrap_err();
        assert!(matches!(err, PostseasonError::InvalidRequest(_)));
    }
}
