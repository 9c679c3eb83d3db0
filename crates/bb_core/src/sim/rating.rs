use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::models::Team;

use super::{GameOutcome, GameOutcomeProvider};

/// League scoring baseline per side.
const BASE_SCORE: f64 = 104.0;
/// Standard deviation of a side's nightly output.
const SCORE_SPREAD: f64 = 9.0;
/// Flat home-court bump in expected points.
const HOME_EDGE: f64 = 2.5;
/// How many expected points a full season of winning is worth.
const WIN_PCT_WEIGHT: f64 = 12.0;
/// Expected points per unit of per-game point differential.
const POINT_DIFF_WEIGHT: f64 = 0.35;

/// Default game-outcome provider: a seeded rating model. The same seed and
/// the same call sequence always produce the same postseason.
#[derive(Debug, Clone)]
pub struct RatingSim {
    rng: ChaCha8Rng,
}

impl RatingSim {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Expected scoring level derived from the regular-season record.
    fn strength(team: &Team) -> f64 {
        let games = f64::from(team.games_played()).max(1.0);
        let win_pct = f64::from(team.wins) / games;
        let diff_per_game = f64::from(team.point_diff) / games;
        (win_pct - 0.5) * WIN_PCT_WEIGHT + diff_per_game * POINT_DIFF_WEIGHT
    }

    fn roll_score(&mut self, expected: f64) -> u16 {
        // Normal::new only fails on a non-finite std dev.
        let dist = Normal::new(expected, SCORE_SPREAD).unwrap_or_else(|_| {
            Normal::new(BASE_SCORE, SCORE_SPREAD).unwrap()
        });
        dist.sample(&mut self.rng).round().clamp(60.0, 170.0) as u16
    }
}

impl GameOutcomeProvider for RatingSim {
    fn playoff_game(&mut self, home: &Team, away: &Team) -> GameOutcome {
        let home_expected = BASE_SCORE + HOME_EDGE + Self::strength(home);
        let away_expected = BASE_SCORE + Self::strength(away);

        let mut home_score = self.roll_score(home_expected);
        let mut away_score = self.roll_score(away_expected);
        // Overtime: no ties in the playoffs.
        while home_score == away_score {
            home_score += self.rng.gen_range(0..=14);
            away_score += self.rng.gen_range(0..=14);
        }

        let winner = if home_score > away_score {
            home.id
        } else {
            away.id
        };
        GameOutcome {
            home_score,
            away_score,
            winner,
        }
    }
}
