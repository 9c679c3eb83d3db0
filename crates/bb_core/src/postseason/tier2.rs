//! Tier 2 playoffs: best-of-3 division brackets feeding a 16-team national
//! tournament (best-of-5 rounds, best-of-3 bronze game).

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Team, TeamId, Tier};

use super::bracket::{
    cmp_record, group_by_division, rank_teams, reseed_by_record, run_reseeded_knockout,
    seed_field, Seeded,
};
use super::events::PostseasonEvent;
use super::series::{BestOf, SeriesResult, SeriesTeam};
use super::RunCtx;

const NATIONAL_FIELD: usize = 16;
const RUNNER_UP_SLOTS: usize = 5;

/// One division's mini-bracket. A division with fewer than two teams crowns
/// its top seed without playing; with exactly three, seeds 2 and 3 play the
/// only semifinal and the winner meets seed 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DivisionBracket {
    pub division: String,
    pub seeds: Vec<SeriesTeam>,
    /// Seed 1 v seed 4. Absent unless the division has four teams.
    pub semifinal1: Option<SeriesResult>,
    /// Seed 2 v seed 3. Absent when the division has fewer than three teams.
    pub semifinal2: Option<SeriesResult>,
    pub final_result: Option<SeriesResult>,
    pub champion: TeamId,
    pub runner_up: Option<TeamId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NationalBracket {
    /// The seeded 16-team field (champions, best runners-up, league pad).
    pub field: Vec<SeriesTeam>,
    /// Best-of-5 knockout rounds down to the last two.
    pub rounds: Vec<Vec<SeriesResult>>,
    /// Best-of-3 consolation between the semifinal losers.
    pub bronze: Option<SeriesResult>,
    pub championship: Option<SeriesResult>,
    pub champion: Option<TeamId>,
    pub runner_up: Option<TeamId>,
}

impl NationalBracket {
    /// Tournament finish order used by promotion: champion, runner-up,
    /// bronze winner, bronze loser.
    pub fn finish_order(&self) -> Vec<TeamId> {
        let mut order = Vec::new();
        order.extend(self.champion);
        order.extend(self.runner_up);
        if let Some(bronze) = &self.bronze {
            order.push(bronze.winner);
            order.push(bronze.loser);
        }
        order
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tier2Bracket {
    pub divisions: Vec<DivisionBracket>,
    pub national: NationalBracket,
    pub complete: bool,
}

struct DivisionOutcome<'a> {
    bracket: DivisionBracket,
    champion: &'a Team,
    runner_up: Option<&'a Team>,
}

fn run_division<'a>(
    ctx: &mut RunCtx<'_>,
    division: String,
    members: &[&'a Team],
) -> Result<DivisionOutcome<'a>> {
    let ranked = rank_teams(members, ctx.tie_break);
    let mut field = seed_field(&ranked);
    field.truncate(4);
    let seeds: Vec<_> = field.iter().map(Seeded::series_team).collect();

    let (semifinal1, semifinal2, final_result, champion, runner_up) = match field.len() {
        0 => unreachable!("empty divisions are not grouped"),
        1 => {
            ctx.events.push(PostseasonEvent::AutoAdvanced {
                tier: Tier::Two,
                stage: format!("{division} division"),
                team: field[0].team.id,
            });
            (None, None, None, field[0], None)
        }
        2 => {
            let final_result = ctx.series(Tier::Two, "division_final", field[0], field[1], BestOf::Three)?;
            let (champ, runner) = pick(field[0], field[1], final_result.winner);
            (None, None, Some(final_result), champ, Some(runner))
        }
        3 => {
            let semi2 = ctx.series(Tier::Two, "division_semifinal", field[1], field[2], BestOf::Three)?;
            let (semi_winner, _) = pick(field[1], field[2], semi2.winner);
            let final_result =
                ctx.series(Tier::Two, "division_final", field[0], semi_winner, BestOf::Three)?;
            let (champ, runner) = pick(field[0], semi_winner, final_result.winner);
            (None, Some(semi2), Some(final_result), champ, Some(runner))
        }
        _ => {
            let semi1 = ctx.series(Tier::Two, "division_semifinal", field[0], field[3], BestOf::Three)?;
            let semi2 = ctx.series(Tier::Two, "division_semifinal", field[1], field[2], BestOf::Three)?;
            let (winner1, _) = pick(field[0], field[3], semi1.winner);
            let (winner2, _) = pick(field[1], field[2], semi2.winner);
            // Better original seed hosts the final.
            let (higher, lower) = if winner1.seed <= winner2.seed {
                (winner1, winner2)
            } else {
                (winner2, winner1)
            };
            let final_result = ctx.series(Tier::Two, "division_final", higher, lower, BestOf::Three)?;
            let (champ, runner) = pick(higher, lower, final_result.winner);
            (Some(semi1), Some(semi2), Some(final_result), champ, Some(runner))
        }
    };

    Ok(DivisionOutcome {
        bracket: DivisionBracket {
            division,
            seeds,
            semifinal1,
            semifinal2,
            final_result,
            champion: champion.team.id,
            runner_up: runner_up.map(|r| r.team.id),
        },
        champion: champion.team,
        runner_up: runner_up.map(|r| r.team),
    })
}

/// Order the two participants of a decided series as (winner, loser).
fn pick<'a>(a: Seeded<'a>, b: Seeded<'a>, winner: TeamId) -> (Seeded<'a>, Seeded<'a>) {
    if a.team.id == winner {
        (a, b)
    } else {
        (b, a)
    }
}

fn national_round_label(index: usize) -> String {
    match index {
        0 => "national_first_round".to_string(),
        1 => "national_second_round".to_string(),
        2 => "national_semifinals".to_string(),
        n => format!("national_round_{}", n + 1),
    }
}

/// Assemble the national field: every division champion, the best five
/// runners-up by record, then the best remaining teams league-wide until the
/// field reaches sixteen or the tier runs out of teams.
fn national_field<'a>(
    ctx: &RunCtx<'_>,
    standings: &[&'a Team],
    champions: &[&'a Team],
    runners_up: &[&'a Team],
) -> Vec<&'a Team> {
    let mut field: Vec<&Team> = champions.to_vec();

    let mut ranked_runners = runners_up.to_vec();
    ranked_runners.sort_by(|a, b| cmp_record(a, b, ctx.tie_break));
    field.extend(ranked_runners.into_iter().take(RUNNER_UP_SLOTS));

    if field.len() < NATIONAL_FIELD {
        for team in standings {
            if field.len() >= NATIONAL_FIELD {
                break;
            }
            if !field.iter().any(|t| t.id == team.id) {
                field.push(team);
            }
        }
    }
    field
}

pub(crate) fn run_tier2<'a>(ctx: &mut RunCtx<'_>, teams: &[&'a Team]) -> Result<Tier2Bracket> {
    let standings = rank_teams(teams, ctx.tie_break);

    let mut divisions = Vec::new();
    let mut champions = Vec::new();
    let mut runners_up = Vec::new();
    for (division, members) in group_by_division(teams) {
        let outcome = run_division(ctx, division, &members)?;
        champions.push(outcome.champion);
        runners_up.extend(outcome.runner_up);
        divisions.push(outcome.bracket);
    }

    let field_teams = national_field(ctx, &standings, &champions, &runners_up);
    let field = seed_field(&rank_teams(&field_teams, ctx.tie_break));
    let field_seeds: Vec<_> = field.iter().map(Seeded::series_team).collect();

    let (rounds, mut finalists, semi_losers) = run_reseeded_knockout(
        ctx,
        Tier::Two,
        national_round_label,
        field,
        BestOf::Five,
        2,
    )?;

    let bronze = match semi_losers.len() {
        2 => {
            let mut losers = semi_losers;
            losers.sort_by(|a, b| cmp_record(a.team, b.team, ctx.tie_break));
            Some(ctx.series(Tier::Two, "national_bronze", losers[0], losers[1], BestOf::Three)?)
        }
        _ => None,
    };

    let (championship, champion, runner_up) = match finalists.len() {
        2 => {
            reseed_by_record(&mut finalists, ctx.tie_break);
            let result = ctx.series(
                Tier::Two,
                "national_championship",
                finalists[0],
                finalists[1],
                BestOf::Five,
            )?;
            (Some(result.clone()), Some(result.winner), Some(result.loser))
        }
        1 => {
            ctx.events.push(PostseasonEvent::AutoAdvanced {
                tier: Tier::Two,
                stage: "national_championship".to_string(),
                team: finalists[0].team.id,
            });
            (None, Some(finalists[0].team.id), None)
        }
        _ => (None, None, None),
    };

    if let Some(champion) = champion {
        ctx.events.push(PostseasonEvent::TierChampion {
            tier: Tier::Two,
            team: champion,
        });
    }

    Ok(Tier2Bracket {
        divisions,
        national: NationalBracket {
            field: field_seeds,
            rounds,
            bronze,
            championship,
            champion,
            runner_up,
        },
        complete: true,
    })
}
