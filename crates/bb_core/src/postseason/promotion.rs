//! Promotion selection. Chooses exactly three teams per boundary, never
//! mutating them; applying the tier change is the season-transition layer's
//! job.

use crate::error::{PostseasonError, Result};
use crate::models::{Team, TeamId, Tier};

use super::bracket::rank_teams;
use super::events::PostseasonEvent;
use super::tier2::Tier2Bracket;
use super::tier3::Tier3Bracket;
use super::RunCtx;

const PROMOTION_SLOTS: usize = 3;

fn push_unique(selected: &mut Vec<TeamId>, candidate: TeamId) {
    if selected.len() < PROMOTION_SLOTS && !selected.contains(&candidate) {
        selected.push(candidate);
    }
}

/// Fill any remaining slots from the regular-season ranking. This is the
/// safety net that keeps the cardinality invariant when the bracket produced
/// fewer distinct finishers than slots.
fn fill_from_standings(selected: &mut Vec<TeamId>, standings: &[&Team]) {
    for team in standings {
        if selected.len() >= PROMOTION_SLOTS {
            break;
        }
        push_unique(selected, team.id);
    }
}

fn emit_promotions(ctx: &mut RunCtx<'_>, to_tier: Tier, selected: &[TeamId]) {
    for &team in selected {
        ctx.events.push(PostseasonEvent::Promoted { to_tier, team });
    }
}

/// Tier 2 → Tier 1. The best regular-season record always goes up, then the
/// playoff champion if different, then the national finish order, then the
/// standings fallback.
pub(crate) fn select_tier2_promotions(
    ctx: &mut RunCtx<'_>,
    teams: &[&Team],
    bracket: &Tier2Bracket,
) -> Result<Vec<TeamId>> {
    if teams.len() < PROMOTION_SLOTS {
        return Err(PostseasonError::InsufficientTeams {
            tier: Tier::Two,
            needed: PROMOTION_SLOTS,
            found: teams.len(),
        });
    }
    let standings = rank_teams(teams, ctx.tie_break);

    let mut selected = Vec::with_capacity(PROMOTION_SLOTS);
    push_unique(&mut selected, standings[0].id);
    if let Some(champion) = bracket.national.champion {
        push_unique(&mut selected, champion);
    }
    for finisher in bracket.national.finish_order() {
        push_unique(&mut selected, finisher);
    }
    fill_from_standings(&mut selected, &standings);

    emit_promotions(ctx, Tier::One, &selected);
    Ok(selected)
}

/// Tier 3 → Tier 2: champion, runner-up, bronze winner, in that order. No
/// regular-season override, but the standings fallback still guarantees
/// three names when the bracket was degenerate.
pub(crate) fn select_tier3_promotions(
    ctx: &mut RunCtx<'_>,
    teams: &[&Team],
    bracket: &Tier3Bracket,
) -> Result<Vec<TeamId>> {
    if teams.len() < PROMOTION_SLOTS {
        return Err(PostseasonError::InsufficientTeams {
            tier: Tier::Three,
            needed: PROMOTION_SLOTS,
            found: teams.len(),
        });
    }
    let standings = rank_teams(teams, ctx.tie_break);

    let mut selected = Vec::with_capacity(PROMOTION_SLOTS);
    for finisher in [bracket.champion, bracket.runner_up, bracket.third_place]
        .into_iter()
        .flatten()
    {
        push_unique(&mut selected, finisher);
    }
    fill_from_standings(&mut selected, &standings);

    emit_promotions(ctx, Tier::Two, &selected);
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TieBreakPolicy;
    use crate::postseason::series::{BestOf, SeriesResult, SeriesTeam};
    use crate::postseason::tier2::NationalBracket;
    use crate::test_util::{ctx_with, team, HomeCourtSim};

    fn series_stub(winner: u32, loser: u32) -> SeriesResult {
        let side = |id: u32, seed: u8| SeriesTeam {
            id: TeamId(id),
            name: format!("Team {id}"),
            seed,
        };
        SeriesResult {
            higher_seed: side(winner, 1),
            lower_seed: side(loser, 2),
            winner: TeamId(winner),
            loser: TeamId(loser),
            higher_wins: 2,
            lower_wins: 0,
            best_of: BestOf::Three,
            games: Vec::new(),
        }
    }

    fn national(
        champion: Option<u32>,
        runner_up: Option<u32>,
        bronze: Option<(u32, u32)>,
    ) -> Tier2Bracket {
        Tier2Bracket {
            divisions: Vec::new(),
            national: NationalBracket {
                field: Vec::new(),
                rounds: Vec::new(),
                bronze: bronze.map(|(w, l)| series_stub(w, l)),
                championship: None,
                champion: champion.map(TeamId),
                runner_up: runner_up.map(TeamId),
            },
            complete: true,
        }
    }

    /// Teams ranked by id: 1 best.
    fn tier_teams(n: u32) -> Vec<Team> {
        (1..=n)
            .map(|i| team(i, &format!("Team {i}"), "Lakes", 60 - i as u16, -(i as i32)))
            .collect()
    }

    #[test]
    fn test_t2_best_record_always_promoted_over_playoff_result() {
        let teams = tier_teams(10);
        let refs: Vec<&Team> = teams.iter().collect();
        let mut sim = HomeCourtSim::default();
        let mut ctx = ctx_with(&mut sim, TieBreakPolicy::StandingsOrder);

        // Team 1 (best record) lost early; champion is 4, runner-up 6.
        let bracket = national(Some(4), Some(6), Some((2, 9)));
        let selected = select_tier2_promotions(&mut ctx, &refs, &bracket).unwrap();
        assert_eq!(selected, vec![TeamId(1), TeamId(4), TeamId(6)]);
    }

    #[test]
    fn test_t2_champion_equals_best_record_walks_finish_order() {
        let teams = tier_teams(10);
        let refs: Vec<&Team> = teams.iter().collect();
        let mut sim = HomeCourtSim::default();
        let mut ctx = ctx_with(&mut sim, TieBreakPolicy::StandingsOrder);

        let bracket = national(Some(1), Some(5), Some((3, 8)));
        let selected = select_tier2_promotions(&mut ctx, &refs, &bracket).unwrap();
        // Champion already in via best record: runner-up and bronze winner fill.
        assert_eq!(selected, vec![TeamId(1), TeamId(5), TeamId(3)]);
    }

    #[test]
    fn test_t2_fallback_fills_from_standings() {
        let teams = tier_teams(10);
        let refs: Vec<&Team> = teams.iter().collect();
        let mut sim = HomeCourtSim::default();
        let mut ctx = ctx_with(&mut sim, TieBreakPolicy::StandingsOrder);

        // Degenerate bracket: only a champion, and it is the best record.
        let bracket = national(Some(1), None, None);
        let selected = select_tier2_promotions(&mut ctx, &refs, &bracket).unwrap();
        assert_eq!(selected, vec![TeamId(1), TeamId(2), TeamId(3)]);
    }

    #[test]
    fn test_t3_podium_order() {
        let teams = tier_teams(10);
        let refs: Vec<&Team> = teams.iter().collect();
        let mut sim = HomeCourtSim::default();
        let mut ctx = ctx_with(&mut sim, TieBreakPolicy::StandingsOrder);

        let bracket = Tier3Bracket {
            metro_finals: Vec::new(),
            regional_byes: Vec::new(),
            regional: Vec::new(),
            sweet16_field: Vec::new(),
            rounds: Vec::new(),
            bronze: None,
            championship: None,
            champion: Some(TeamId(7)),
            runner_up: Some(TeamId(2)),
            third_place: Some(TeamId(9)),
            complete: true,
        };
        let selected = select_tier3_promotions(&mut ctx, &refs, &bracket).unwrap();
        // Playoff podium, no regular-season override.
        assert_eq!(selected, vec![TeamId(7), TeamId(2), TeamId(9)]);
    }

    #[test]
    fn test_too_small_tier_is_an_error() {
        let teams = tier_teams(2);
        let refs: Vec<&Team> = teams.iter().collect();
        let mut sim = HomeCourtSim::default();
        let mut ctx = ctx_with(&mut sim, TieBreakPolicy::StandingsOrder);

        let bracket = national(None, None, None);
        let err = select_tier2_promotions(&mut ctx, &refs, &bracket).unwrap_err();
        assert!(matches!(err, PostseasonError::InsufficientTeams { .. }));
    }
}
