//! Test-only fixtures: team builders, scripted outcome providers, and a
//! three-tier league fixture for orchestrator tests.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::TieBreakPolicy;
use crate::models::{Team, TeamId, Tier};
use crate::postseason::events::EventLog;
use crate::postseason::RunCtx;
use crate::sim::{GameOutcome, GameOutcomeProvider};

pub fn team(id: u32, name: &str, division: &str, wins: u16, point_diff: i32) -> Team {
    Team {
        id: TeamId(id),
        name: name.to_string(),
        division: division.to_string(),
        tier: Tier::One,
        wins,
        losses: 82u16.saturating_sub(wins),
        point_diff,
    }
}

pub fn ctx_with<'p>(
    provider: &'p mut dyn GameOutcomeProvider,
    tie_break: TieBreakPolicy,
) -> RunCtx<'p> {
    RunCtx {
        provider,
        events: EventLog::default(),
        tie_break,
    }
}

/// The home team wins every game 101-94.
#[derive(Debug, Default)]
pub struct HomeCourtSim;

impl GameOutcomeProvider for HomeCourtSim {
    fn playoff_game(&mut self, home: &Team, _away: &Team) -> GameOutcome {
        GameOutcome {
            home_score: 101,
            away_score: 94,
            winner: home.id,
        }
    }
}

/// Teams in the favored set win every game they play; games without exactly
/// one favored side go to the home team.
#[derive(Debug)]
pub struct FavoredSim {
    favored: HashSet<TeamId>,
}

impl FavoredSim {
    pub fn favoring(ids: impl IntoIterator<Item = u32>) -> Self {
        Self {
            favored: ids.into_iter().map(TeamId).collect(),
        }
    }
}

impl GameOutcomeProvider for FavoredSim {
    fn playoff_game(&mut self, home: &Team, away: &Team) -> GameOutcome {
        let home_favored = self.favored.contains(&home.id);
        let away_favored = self.favored.contains(&away.id);
        let home_wins = home_favored || !away_favored;
        if home_wins {
            GameOutcome {
                home_score: 108,
                away_score: 99,
                winner: home.id,
            }
        } else {
            GameOutcome {
                home_score: 99,
                away_score: 108,
                winner: away.id,
            }
        }
    }
}

/// Seeded coin-flip provider for property tests.
#[derive(Debug)]
pub struct RandomSim {
    rng: ChaCha8Rng,
}

impl RandomSim {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl GameOutcomeProvider for RandomSim {
    fn playoff_game(&mut self, home: &Team, away: &Team) -> GameOutcome {
        let winner_score = self.rng.gen_range(95..=130);
        let loser_score = self.rng.gen_range(70..winner_score);
        if self.rng.gen_bool(0.5) {
            GameOutcome {
                home_score: winner_score,
                away_score: loser_score,
                winner: home.id,
            }
        } else {
            GameOutcome {
                home_score: loser_score,
                away_score: winner_score,
                winner: away.id,
            }
        }
    }
}

/// A plausible three-tier league: 20 Tier 1 teams across the six mapped
/// divisions, 24 Tier 2 teams in six divisions, 40 Tier 3 teams in twenty
/// two-team metros.
pub fn league_fixture() -> Vec<Team> {
    let mut teams = Vec::new();

    let t1_divisions = [
        "Atlantic",
        "Central",
        "Southeast",
        "Northwest",
        "Pacific",
        "Southwest",
    ];
    for i in 0..20u32 {
        let mut t = team(
            i + 1,
            &format!("T1 Club {}", i + 1),
            t1_divisions[(i % 6) as usize],
            58u16.saturating_sub(i as u16 * 2),
            480 - i as i32 * 45,
        );
        t.tier = Tier::One;
        teams.push(t);
    }

    let t2_divisions = ["Lakes", "Plains", "Gulf", "Valley", "Summit", "Coast"];
    for i in 0..24u32 {
        let mut t = team(
            200 + i + 1,
            &format!("T2 Club {}", i + 1),
            t2_divisions[(i % 6) as usize],
            55u16.saturating_sub(i as u16 * 2),
            400 - i as i32 * 30,
        );
        t.tier = Tier::Two;
        teams.push(t);
    }

    for i in 0..40u32 {
        let mut t = team(
            300 + i + 1,
            &format!("T3 Club {}", i + 1),
            &format!("Metro {}", i / 2 + 1),
            52u16.saturating_sub(i as u16),
            350 - i as i32 * 15,
        );
        t.tier = Tier::Three;
        teams.push(t);
    }

    teams
}
