//! Tier 3 playoffs: metro finals, a regional play-in, then a reseeded
//! knockout to the championship.
//!
//! Stage order: every metro's top two play a best-of-3 final; the best eight
//! metro champions bypass the regional round; the rest play best-of-3
//! play-ins. Byes plus play-in winners form the sweet-16 field, which is
//! re-seeded fresh and played down in best-of-5 rounds, with a best-of-3
//! bronze game between the semifinal losers.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Team, TeamId, Tier};

use super::bracket::{
    cmp_record, group_by_division, rank_teams, reseed_by_record, run_pairing_round,
    run_reseeded_knockout, seed_field, Seeded,
};
use super::events::PostseasonEvent;
use super::series::{BestOf, SeriesResult, SeriesTeam};
use super::RunCtx;

/// Metro champions that skip the regional play-in.
const REGIONAL_BYES: usize = 8;

fn knockout_label(index: usize) -> String {
    match index {
        0 => "sweet_16".to_string(),
        1 => "quarterfinals".to_string(),
        2 => "semifinals".to_string(),
        n => format!("knockout_round_{}", n + 1),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetroFinal {
    pub division: String,
    pub result: SeriesResult,
    pub champion: TeamId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tier3Bracket {
    pub metro_finals: Vec<MetroFinal>,
    /// Metro champions seeded straight into the sweet 16.
    pub regional_byes: Vec<SeriesTeam>,
    /// Best-of-3 play-in series among the remaining champions.
    pub regional: Vec<SeriesResult>,
    /// Fresh 1..=n seeding of byes plus play-in winners.
    pub sweet16_field: Vec<SeriesTeam>,
    /// Best-of-5 rounds: sweet 16, quarterfinals, semifinals.
    pub rounds: Vec<Vec<SeriesResult>>,
    pub bronze: Option<SeriesResult>,
    pub championship: Option<SeriesResult>,
    pub champion: Option<TeamId>,
    pub runner_up: Option<TeamId>,
    pub third_place: Option<TeamId>,
    pub complete: bool,
}

pub(crate) fn run_tier3<'a>(ctx: &mut RunCtx<'_>, teams: &[&'a Team]) -> Result<Tier3Bracket> {
    // Stage 1: metro finals. Only metros with at least two teams produce a
    // champion; a lone team has nobody to beat and stays out of the field.
    let mut metro_finals = Vec::new();
    let mut champions: Vec<Seeded<'a>> = Vec::new();
    for (division, members) in group_by_division(teams) {
        if members.len() < 2 {
            tracing::warn!(division = %division, "metro has a single team, no metro final");
            ctx.events.push(PostseasonEvent::ExcludedFromField {
                tier: Tier::Three,
                stage: "metro_finals".to_string(),
                team: members[0].id,
                reason: format!("metro {division} has fewer than two teams"),
            });
            continue;
        }
        let seeds = seed_field(&rank_teams(&members, ctx.tie_break));
        let result = ctx.series(Tier::Three, "metro_final", seeds[0], seeds[1], BestOf::Three)?;
        let champion = if result.winner == seeds[0].team.id {
            seeds[0]
        } else {
            seeds[1]
        };
        ctx.events.push(PostseasonEvent::MetroChampion {
            division: division.clone(),
            team: champion.team.id,
        });
        metro_finals.push(MetroFinal {
            division,
            result,
            champion: champion.team.id,
        });
        champions.push(champion);
    }

    // Stage 2: split champions into byes and the regional play-in pool.
    reseed_by_record(&mut champions, ctx.tie_break);
    let bye_count = champions.len().min(REGIONAL_BYES);
    let byes: Vec<Seeded<'a>> = champions[..bye_count].to_vec();
    let mut play_in_pool: Vec<Seeded<'a>> = champions[bye_count..].to_vec();

    let regional_byes: Vec<_> = byes.iter().map(Seeded::series_team).collect();
    let (regional, play_in_winners) = if play_in_pool.is_empty() {
        (Vec::new(), Vec::new())
    } else {
        reseed_by_record(&mut play_in_pool, ctx.tie_break);
        run_pairing_round(ctx, Tier::Three, "regional_play_in", &play_in_pool, BestOf::Three)?
    };

    // Stage 3: the sweet-16 field gets a fresh seeding and plays down to two.
    let mut field: Vec<Seeded<'a>> = byes;
    field.extend(play_in_winners);
    reseed_by_record(&mut field, ctx.tie_break);
    let sweet16_field: Vec<_> = field.iter().map(Seeded::series_team).collect();

    let (rounds, mut finalists, semi_losers) =
        run_reseeded_knockout(ctx, Tier::Three, knockout_label, field, BestOf::Five, 2)?;

    let bronze = match semi_losers.len() {
        2 => {
            let mut losers = semi_losers;
            losers.sort_by(|a, b| cmp_record(a.team, b.team, ctx.tie_break));
            Some(ctx.series(Tier::Three, "bronze", losers[0], losers[1], BestOf::Three)?)
        }
        _ => None,
    };
    let third_place = bronze.as_ref().map(|b| b.winner);

    let (championship, champion, runner_up) = match finalists.len() {
        2 => {
            reseed_by_record(&mut finalists, ctx.tie_break);
            let result = ctx.series(
                Tier::Three,
                "championship",
                finalists[0],
                finalists[1],
                BestOf::Five,
            )?;
            (Some(result.clone()), Some(result.winner), Some(result.loser))
        }
        1 => {
            ctx.events.push(PostseasonEvent::AutoAdvanced {
                tier: Tier::Three,
                stage: "championship".to_string(),
                team: finalists[0].team.id,
            });
            (None, Some(finalists[0].team.id), None)
        }
        _ => (None, None, None),
    };

    if let Some(champion) = champion {
        ctx.events.push(PostseasonEvent::TierChampion {
            tier: Tier::Three,
            team: champion,
        });
    }

    Ok(Tier3Bracket {
        metro_finals,
        regional_byes,
        regional,
        sweet16_field,
        rounds,
        bronze,
        championship,
        champion,
        runner_up,
        third_place,
        complete: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TieBreakPolicy;
    use crate::test_util::{ctx_with, team, HomeCourtSim};

    /// `metros` two-team metros with records strictly descending by metro index.
    fn tier3_league(metros: u32) -> Vec<Team> {
        let mut teams = Vec::new();
        for m in 0..metros {
            for slot in 0..2u32 {
                teams.push(team(
                    300 + m * 10 + slot,
                    &format!("Metro {m} Team {}", slot + 1),
                    &format!("Metro {m}"),
                    60u16.saturating_sub(m as u16 + slot as u16 * 5),
                    500 - m as i32 * 15 - slot as i32 * 40,
                ));
            }
        }
        teams
    }

    #[test]
    fn test_full_24_metro_bracket() {
        let teams = tier3_league(24);
        let refs: Vec<&Team> = teams.iter().collect();
        let mut sim = HomeCourtSim::default();
        let mut ctx = ctx_with(&mut sim, TieBreakPolicy::StandingsOrder);

        let bracket = run_tier3(&mut ctx, &refs).unwrap();
        assert_eq!(bracket.metro_finals.len(), 24);
        assert_eq!(bracket.regional_byes.len(), 8);
        assert_eq!(bracket.regional.len(), 8);
        assert_eq!(bracket.sweet16_field.len(), 16);
        assert_eq!(bracket.rounds.len(), 3);
        assert_eq!(bracket.rounds[0].len(), 8);
        assert_eq!(bracket.rounds[1].len(), 4);
        assert_eq!(bracket.rounds[2].len(), 2);
        assert!(bracket.bronze.is_some());
        assert!(bracket.championship.is_some());
        assert!(bracket.complete);
        assert_eq!(bracket.third_place, bracket.bronze.as_ref().map(|b| b.winner));
    }

    #[test]
    fn test_20_metro_champions_leave_a_14_team_field() {
        let teams = tier3_league(20);
        let refs: Vec<&Team> = teams.iter().collect();
        let mut sim = HomeCourtSim::default();
        let mut ctx = ctx_with(&mut sim, TieBreakPolicy::StandingsOrder);

        let bracket = run_tier3(&mut ctx, &refs).unwrap();
        // Top 8 champions skip the regional round entirely; the other 12 play
        // 6 play-in series, so 14 teams reach the first knockout round.
        assert_eq!(bracket.regional_byes.len(), 8);
        assert_eq!(bracket.regional.len(), 6);
        assert_eq!(bracket.sweet16_field.len(), 14);
        // 14 -> 7 -> (bye + 3 series) 4 -> 2.
        assert_eq!(bracket.rounds[0].len(), 7);
        assert_eq!(bracket.rounds[1].len(), 3);
        assert_eq!(bracket.rounds[2].len(), 2);
        assert!(bracket.championship.is_some());
    }

    #[test]
    fn test_single_team_metro_is_excluded() {
        let mut teams = tier3_league(9);
        teams.push(team(999, "Lone Wolves", "Metro Solo", 61, 600));
        let refs: Vec<&Team> = teams.iter().collect();
        let mut sim = HomeCourtSim::default();
        let mut ctx = ctx_with(&mut sim, TieBreakPolicy::StandingsOrder);

        let bracket = run_tier3(&mut ctx, &refs).unwrap();
        assert_eq!(bracket.metro_finals.len(), 9);
        assert!(bracket
            .metro_finals
            .iter()
            .all(|f| f.division != "Metro Solo"));
        // Best record or not, the lone team never enters the field.
        assert!(bracket.sweet16_field.iter().all(|s| s.id != TeamId(999)));
    }

    #[test]
    fn test_regional_pairs_best_against_worst() {
        let teams = tier3_league(12);
        let refs: Vec<&Team> = teams.iter().collect();
        let mut sim = HomeCourtSim::default();
        let mut ctx = ctx_with(&mut sim, TieBreakPolicy::StandingsOrder);

        let bracket = run_tier3(&mut ctx, &refs).unwrap();
        // 12 champions: 8 byes, 4 in the play-in pool paired 1v4 and 2v3.
        assert_eq!(bracket.regional.len(), 2);
        let pairings: Vec<(u8, u8)> = bracket
            .regional
            .iter()
            .map(|s| (s.higher_seed.seed, s.lower_seed.seed))
            .collect();
        assert_eq!(pairings, vec![(1, 4), (2, 3)]);
    }
}
