//! Postseason orchestration.
//!
//! One call computes the entire postseason from finalized regular-season
//! standings: Tier 1/2/3 playoffs, Tier 1/2 relegation, and the promotion
//! selections in both directions. The computation is synchronous and
//! allocation-local; the only external dependency is the injected
//! [`GameOutcomeProvider`], resolved one game at a time in bracket order.

pub mod bracket;
pub mod events;
pub mod promotion;
pub mod relegation;
pub mod series;
pub mod tier1;
pub mod tier2;
pub mod tier3;

use serde::{Deserialize, Serialize};

use crate::config::{PostseasonConfig, TieBreakPolicy};
use crate::error::{PostseasonError, Result};
use crate::models::{Team, TeamId, Tier};
use crate::sim::GameOutcomeProvider;

use bracket::Seeded;
use events::{EventLog, PostseasonEvent};
use relegation::RelegationBracket;
use series::{BestOf, SeriesResult};
use tier1::Tier1Bracket;
use tier2::Tier2Bracket;
use tier3::Tier3Bracket;

/// Shared state threaded through a postseason run: the outcome provider, the
/// event log under construction, and the configured tie-break policy.
pub(crate) struct RunCtx<'p> {
    pub provider: &'p mut dyn GameOutcomeProvider,
    pub events: EventLog,
    pub tie_break: TieBreakPolicy,
}

impl RunCtx<'_> {
    /// Simulate one series and record it in the event log.
    pub fn series(
        &mut self,
        tier: Tier,
        round: &str,
        higher: Seeded<'_>,
        lower: Seeded<'_>,
        best_of: BestOf,
    ) -> Result<SeriesResult> {
        let result = series::simulate_series(self.provider, higher, lower, best_of)?;
        self.events.push(PostseasonEvent::SeriesCompleted {
            tier,
            round: round.to_string(),
            winner: result.winner,
            loser: result.loser,
            games: result.games_played() as u8,
        });
        Ok(result)
    }
}

/// Everything a completed postseason produced. Built fresh each season and
/// handed to the save/UI layers; teams are referenced by id throughout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostseasonResults {
    pub tier1: Tier1Bracket,
    pub tier2: Tier2Bracket,
    pub tier3: Tier3Bracket,
    pub tier1_relegation: RelegationBracket,
    pub tier2_relegation: RelegationBracket,
    pub promoted_to_t1: Vec<TeamId>,
    pub promoted_to_t2: Vec<TeamId>,
    pub relegated_from_t1: Vec<TeamId>,
    pub relegated_from_t2: Vec<TeamId>,
    pub events: EventLog,
}

/// Run the full postseason for all three tiers.
///
/// `teams` is the league-wide list with finalized records; it is partitioned
/// by tier here. Every tier must be populated, and tiers 1 and 2 need at
/// least four teams for their relegation brackets.
pub fn run_postseason(
    teams: &[Team],
    config: &PostseasonConfig,
    provider: &mut dyn GameOutcomeProvider,
) -> Result<PostseasonResults> {
    let by_tier = |tier: Tier| -> Vec<&Team> { teams.iter().filter(|t| t.tier == tier).collect() };
    let t1 = by_tier(Tier::One);
    let t2 = by_tier(Tier::Two);
    let t3 = by_tier(Tier::Three);
    for (tier, list) in [(Tier::One, &t1), (Tier::Two, &t2), (Tier::Three, &t3)] {
        if list.is_empty() {
            return Err(PostseasonError::EmptyTier { tier });
        }
    }

    tracing::info!(
        t1 = t1.len(),
        t2 = t2.len(),
        t3 = t3.len(),
        "running postseason"
    );

    let mut ctx = RunCtx {
        provider,
        events: EventLog::default(),
        tie_break: config.tie_break,
    };

    let tier1 = tier1::run_tier1(&mut ctx, &t1)?;
    let tier2 = tier2::run_tier2(&mut ctx, &t2)?;
    let tier3 = tier3::run_tier3(&mut ctx, &t3)?;

    let tier1_relegation = relegation::run_relegation(&mut ctx, Tier::One, &t1)?;
    let tier2_relegation = relegation::run_relegation(&mut ctx, Tier::Two, &t2)?;

    let promoted_to_t1 = promotion::select_tier2_promotions(&mut ctx, &t2, &tier2)?;
    let promoted_to_t2 = promotion::select_tier3_promotions(&mut ctx, &t3, &tier3)?;

    Ok(PostseasonResults {
        tier1,
        tier2,
        tier3,
        relegated_from_t1: tier1_relegation.relegated.clone(),
        relegated_from_t2: tier2_relegation.relegated.clone(),
        tier1_relegation,
        tier2_relegation,
        promoted_to_t1,
        promoted_to_t2,
        events: ctx.events,
    })
}
