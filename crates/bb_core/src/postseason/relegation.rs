//! Relegation mini-bracket: the worst team drops automatically, the next
//! three play two best-of-5 knockout rounds for the last two relegation spots.

use serde::{Deserialize, Serialize};

use crate::error::{PostseasonError, Result};
use crate::models::{Team, TeamId, Tier};

use super::bracket::{rank_teams, Seeded};
use super::events::PostseasonEvent;
use super::series::{BestOf, SeriesResult, SeriesTeam};
use super::RunCtx;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelegationBracket {
    pub tier: Tier,
    /// Worst regular-season record; relegated without playing.
    pub auto_relegated: SeriesTeam,
    /// 3rd-to-last (hosts as higher seed) against 2nd-to-last. Loser drops.
    pub round1: SeriesResult,
    /// 4th-to-last, who sat out round 1 on the better record, against the
    /// round 1 winner. Loser drops, winner survives.
    pub round2: SeriesResult,
    pub survivor: TeamId,
    /// Exactly three teams: auto plus the two round losers.
    pub relegated: Vec<TeamId>,
}

pub(crate) fn run_relegation<'a>(
    ctx: &mut RunCtx<'_>,
    tier: Tier,
    teams: &[&'a Team],
) -> Result<RelegationBracket> {
    if teams.len() < 4 {
        return Err(PostseasonError::InsufficientTeams {
            tier,
            needed: 4,
            found: teams.len(),
        });
    }

    let standings = rank_teams(teams, ctx.tie_break);
    let n = standings.len();
    // Seeds are standings positions, so the bottom four read n-3..=n.
    let at = |index: usize| Seeded {
        team: standings[index],
        seed: index as u8 + 1,
    };
    let auto = at(n - 1);
    let second_last = at(n - 2);
    let third_last = at(n - 3);
    let bye = at(n - 4);

    ctx.events.push(PostseasonEvent::AutoRelegated {
        tier,
        team: auto.team.id,
    });

    let round1 = ctx.series(tier, "relegation_round1", third_last, second_last, BestOf::Five)?;
    ctx.events.push(PostseasonEvent::Relegated {
        tier,
        team: round1.loser,
    });
    let round1_winner = if round1.winner == third_last.team.id {
        third_last
    } else {
        second_last
    };

    let round2 = ctx.series(tier, "relegation_round2", bye, round1_winner, BestOf::Five)?;
    ctx.events.push(PostseasonEvent::Relegated {
        tier,
        team: round2.loser,
    });
    ctx.events.push(PostseasonEvent::Survived {
        tier,
        team: round2.winner,
    });

    let survivor = round2.winner;
    let relegated = vec![auto.team.id, round1.loser, round2.loser];

    Ok(RelegationBracket {
        tier,
        auto_relegated: auto.series_team(),
        round1,
        round2,
        survivor,
        relegated,
    })
}
