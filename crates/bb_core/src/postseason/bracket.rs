//! Bracket construction: ranking, seeding, grouping, and round pairing.
//!
//! All ordering in the postseason goes through [`cmp_record`]: wins
//! descending, then point differential descending, then the configured
//! tie-break policy. Seeds are assigned once when a field is built and carried
//! on each [`Seeded`] entry; rounds that re-rank by record assign fresh seeds
//! for that round instead of searching the original seed list.

use std::cmp::Ordering;

use crate::config::TieBreakPolicy;
use crate::error::Result;
use crate::models::{Conference, Team, Tier};

use super::events::PostseasonEvent;
use super::series::{BestOf, SeriesResult, SeriesTeam};
use super::RunCtx;

/// A team inside a bracket, with the seed it carries for the current stage.
#[derive(Debug, Clone, Copy)]
pub struct Seeded<'a> {
    pub team: &'a Team,
    pub seed: u8,
}

impl Seeded<'_> {
    pub fn series_team(&self) -> SeriesTeam {
        SeriesTeam {
            id: self.team.id,
            name: self.team.name.clone(),
            seed: self.seed,
        }
    }
}

/// Best team first. Equal (wins, point_diff) falls through to the policy:
/// `StandingsOrder` reports `Equal` and relies on stable sorting.
pub fn cmp_record(a: &Team, b: &Team, policy: TieBreakPolicy) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then(b.point_diff.cmp(&a.point_diff))
        .then(match policy {
            TieBreakPolicy::StandingsOrder => Ordering::Equal,
            TieBreakPolicy::LowerTeamId => a.id.cmp(&b.id),
        })
}

/// Sort a borrowed team list best-first. Stable, so `StandingsOrder` keeps
/// the caller's order on exact ties.
pub fn rank_teams<'a>(teams: &[&'a Team], policy: TieBreakPolicy) -> Vec<&'a Team> {
    let mut ranked = teams.to_vec();
    ranked.sort_by(|a, b| cmp_record(a, b, policy));
    ranked
}

/// Assign seeds 1..=n to an already-ranked list.
pub fn seed_field<'a>(ranked: &[&'a Team]) -> Vec<Seeded<'a>> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, team)| Seeded {
            team,
            seed: i as u8 + 1,
        })
        .collect()
}

/// Re-rank a surviving field by record and hand out fresh seeds for the
/// upcoming round.
pub fn reseed_by_record(field: &mut Vec<Seeded<'_>>, policy: TieBreakPolicy) {
    field.sort_by(|a, b| cmp_record(a.team, b.team, policy));
    for (i, entry) in field.iter_mut().enumerate() {
        entry.seed = i as u8 + 1;
    }
}

/// Restore a surviving field to its original seed order (Tier 1 rule).
pub fn sort_by_seed(field: &mut [Seeded<'_>]) {
    field.sort_by_key(|entry| entry.seed);
}

/// Group a tier's teams by division, preserving first-appearance order so the
/// output is deterministic for a given standings order.
pub fn group_by_division<'a>(teams: &[&'a Team]) -> Vec<(String, Vec<&'a Team>)> {
    let mut groups: Vec<(String, Vec<&'a Team>)> = Vec::new();
    for team in teams {
        match groups.iter_mut().find(|(name, _)| *name == team.division) {
            Some((_, members)) => members.push(team),
            None => groups.push((team.division.clone(), vec![team])),
        }
    }
    groups
}

/// Partition Tier 1 teams into conferences via the fixed division table.
/// Teams in unmapped divisions are excluded from the field and logged.
pub(crate) fn split_conferences<'a>(
    ctx: &mut RunCtx<'_>,
    teams: &[&'a Team],
) -> (Vec<&'a Team>, Vec<&'a Team>) {
    let mut east = Vec::new();
    let mut west = Vec::new();
    for team in teams {
        match team.conference() {
            Some(Conference::East) => east.push(*team),
            Some(Conference::West) => west.push(*team),
            None => {
                tracing::warn!(team = %team.name, division = %team.division,
                    "division not in conference table, excluded from tier 1 field");
                ctx.events.push(PostseasonEvent::ExcludedFromField {
                    tier: Tier::One,
                    stage: "conference_split".to_string(),
                    team: team.id,
                    reason: format!("division {} has no conference", team.division),
                });
            }
        }
    }
    (east, west)
}

/// Play one knockout round over a best-first field: seed `i` meets seed
/// `n-1-i`. An odd field gives the top seed a bye, which keeps every
/// multi-stage bracket well-formed regardless of entrant count.
pub(crate) fn run_pairing_round<'a>(
    ctx: &mut RunCtx<'_>,
    tier: Tier,
    round: &str,
    field: &[Seeded<'a>],
    best_of: BestOf,
) -> Result<(Vec<SeriesResult>, Vec<Seeded<'a>>)> {
    let mut results = Vec::new();
    let mut survivors = Vec::new();

    let mut start = 0;
    if field.len() % 2 == 1 {
        survivors.push(field[0]);
        ctx.events.push(PostseasonEvent::ByeAwarded {
            tier,
            round: round.to_string(),
            team: field[0].team.id,
        });
        start = 1;
    }

    let pairs = (field.len() - start) / 2;
    for i in 0..pairs {
        let higher = field[start + i];
        let lower = field[field.len() - 1 - i];
        let result = ctx.series(tier, round, higher, lower, best_of)?;
        let winner = if result.winner == higher.team.id {
            higher
        } else {
            lower
        };
        survivors.push(winner);
        results.push(result);
    }

    Ok((results, survivors))
}

/// Play reseeded knockout rounds until at most `stop_len` teams remain.
/// Before each round the field is re-ranked by record and given fresh seeds.
/// Returns the per-round series, the survivors, and the losers of the last
/// round that was played (the semifinal losers when the bracket is regular).
pub(crate) fn run_reseeded_knockout<'a>(
    ctx: &mut RunCtx<'_>,
    tier: Tier,
    round_label: impl Fn(usize) -> String,
    mut field: Vec<Seeded<'a>>,
    best_of: BestOf,
    stop_len: usize,
) -> Result<(Vec<Vec<SeriesResult>>, Vec<Seeded<'a>>, Vec<Seeded<'a>>)> {
    let mut rounds = Vec::new();
    let mut last_losers: Vec<Seeded<'a>> = Vec::new();
    let mut round_index = 0;

    while field.len() > stop_len {
        reseed_by_record(&mut field, ctx.tie_break);
        let (results, survivors) =
            run_pairing_round(ctx, tier, &round_label(round_index), &field, best_of)?;
        let survivor_ids: Vec<_> = survivors.iter().map(|s| s.team.id).collect();
        last_losers = field
            .iter()
            .copied()
            .filter(|entry| !survivor_ids.contains(&entry.team.id))
            .collect();
        rounds.push(results);
        field = survivors;
        round_index += 1;
    }

    Ok((rounds, field, last_losers))
}
