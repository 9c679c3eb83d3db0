//! Tier 1 playoffs: two 8-team conference brackets feeding a final.
//!
//! Conference rounds re-order survivors by their *original* conference seed
//! before pairing. The final's home court goes to the champion with the
//! numerically better original seed position, regardless of win totals.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Conference, Team, TeamId, Tier};

use super::bracket::{
    rank_teams, run_pairing_round, seed_field, sort_by_seed, split_conferences, Seeded,
};
use super::events::PostseasonEvent;
use super::series::{BestOf, SeriesResult, SeriesTeam};
use super::RunCtx;

const CONFERENCE_FIELD: usize = 8;

fn round_name(index: usize) -> String {
    match index {
        0 => "first_round".to_string(),
        1 => "conference_semifinals".to_string(),
        2 => "conference_finals".to_string(),
        n => format!("round_{}", n + 1),
    }
}

/// One series within a round, tagged with the conference it belongs to.
/// The finals carry no conference tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConferenceSeries {
    pub conference: Conference,
    pub result: SeriesResult,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tier1Bracket {
    pub east_seeds: Vec<SeriesTeam>,
    pub west_seeds: Vec<SeriesTeam>,
    /// Conference rounds in order: first round, semifinals, conference finals.
    pub rounds: Vec<Vec<ConferenceSeries>>,
    pub finals: Option<SeriesResult>,
    pub champion: Option<TeamId>,
    pub complete: bool,
}

/// Run one conference to its champion. Returns the per-round series and the
/// champion still carrying its original conference seed.
fn run_conference<'a>(
    ctx: &mut RunCtx<'_>,
    conference: Conference,
    field: Vec<Seeded<'a>>,
) -> Result<(Vec<Vec<ConferenceSeries>>, Option<Seeded<'a>>)> {
    let mut rounds = Vec::new();
    let mut survivors = field;
    let mut round_index = 0;

    while survivors.len() > 1 {
        sort_by_seed(&mut survivors);
        let (results, next) = run_pairing_round(
            ctx,
            Tier::One,
            &round_name(round_index),
            &survivors,
            BestOf::Seven,
        )?;
        rounds.push(
            results
                .into_iter()
                .map(|result| ConferenceSeries { conference, result })
                .collect(),
        );
        survivors = next;
        round_index += 1;
    }

    Ok((rounds, survivors.into_iter().next()))
}

pub(crate) fn run_tier1<'a>(ctx: &mut RunCtx<'_>, teams: &[&'a Team]) -> Result<Tier1Bracket> {
    let (east, west) = split_conferences(ctx, teams);

    let mut east_field = seed_field(&rank_teams(&east, ctx.tie_break));
    east_field.truncate(CONFERENCE_FIELD);
    let mut west_field = seed_field(&rank_teams(&west, ctx.tie_break));
    west_field.truncate(CONFERENCE_FIELD);

    let east_seeds: Vec<_> = east_field.iter().map(Seeded::series_team).collect();
    let west_seeds: Vec<_> = west_field.iter().map(Seeded::series_team).collect();

    let (east_rounds, east_champion) = run_conference(ctx, Conference::East, east_field)?;
    let (west_rounds, west_champion) = run_conference(ctx, Conference::West, west_field)?;

    // Interleave the two conferences round by round; a short conference just
    // stops contributing.
    let round_count = east_rounds.len().max(west_rounds.len());
    let mut east_rounds = east_rounds.into_iter();
    let mut west_rounds = west_rounds.into_iter();
    let mut rounds = Vec::with_capacity(round_count);
    for _ in 0..round_count {
        let mut round = Vec::new();
        round.extend(east_rounds.next().unwrap_or_default());
        round.extend(west_rounds.next().unwrap_or_default());
        rounds.push(round);
    }

    let (finals, champion) = match (east_champion, west_champion) {
        (Some(east), Some(west)) => {
            // Cross-conference home court: better original seed position.
            // Equal positions fall back to the record comparator.
            let east_is_higher = match east.seed.cmp(&west.seed) {
                std::cmp::Ordering::Less => true,
                std::cmp::Ordering::Greater => false,
                std::cmp::Ordering::Equal => {
                    super::bracket::cmp_record(east.team, west.team, ctx.tie_break).is_le()
                }
            };
            let (higher, lower) = if east_is_higher { (east, west) } else { (west, east) };
            let result = ctx.series(Tier::One, "finals", higher, lower, BestOf::Seven)?;
            let champion = result.winner;
            (Some(result), champion)
        }
        (Some(only), None) | (None, Some(only)) => {
            ctx.events.push(PostseasonEvent::AutoAdvanced {
                tier: Tier::One,
                stage: "finals".to_string(),
                team: only.team.id,
            });
            (None, only.team.id)
        }
        (None, None) => {
            return Err(crate::error::PostseasonError::InsufficientTeams {
                tier: Tier::One,
                needed: 2,
                found: 0,
            })
        }
    };

    ctx.events.push(PostseasonEvent::TierChampion {
        tier: Tier::One,
        team: champion,
    });

    Ok(Tier1Bracket {
        east_seeds,
        west_seeds,
        rounds,
        finals,
        champion: Some(champion),
        complete: true,
    })
}
