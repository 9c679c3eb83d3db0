//! Best-of-N series simulation.
//!
//! A series is played between a higher seed and a lower seed on a fixed
//! home-court pattern. The first side to ceil(N/2) wins takes the series;
//! the pattern length equals N, so a series that runs out of games without a
//! winner is an invariant violation and surfaces as an error.

use serde::{Deserialize, Serialize};

use crate::error::{PostseasonError, Result};
use crate::models::TeamId;
use crate::sim::GameOutcomeProvider;

use super::bracket::Seeded;

/// Series length. Only these three formats exist in the league.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum BestOf {
    Three,
    Five,
    Seven,
}

/// Which side hosts a given game of the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    Higher,
    Lower,
}

use Host::{Higher, Lower};

const PATTERN_3: [Host; 3] = [Higher, Lower, Higher];
const PATTERN_5: [Host; 5] = [Higher, Higher, Lower, Lower, Higher];
const PATTERN_7: [Host; 7] = [Higher, Higher, Lower, Lower, Higher, Lower, Higher];

impl BestOf {
    pub fn games(self) -> u8 {
        match self {
            BestOf::Three => 3,
            BestOf::Five => 5,
            BestOf::Seven => 7,
        }
    }

    pub fn wins_needed(self) -> u8 {
        self.games() / 2 + 1
    }

    /// Home-court assignment by 0-based game index.
    pub fn home_pattern(self) -> &'static [Host] {
        match self {
            BestOf::Three => &PATTERN_3,
            BestOf::Five => &PATTERN_5,
            BestOf::Seven => &PATTERN_7,
        }
    }
}

/// A team as it entered the series, with the seed it carried at the time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesTeam {
    pub id: TeamId,
    pub name: String,
    pub seed: u8,
}

/// One finished game inside a series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameResult {
    /// 1-based game number within the series.
    pub game: u8,
    pub home: TeamId,
    pub away: TeamId,
    pub home_score: u16,
    pub away_score: u16,
    pub winner: TeamId,
}

/// A decided best-of-N series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesResult {
    pub higher_seed: SeriesTeam,
    pub lower_seed: SeriesTeam,
    pub winner: TeamId,
    pub loser: TeamId,
    pub higher_wins: u8,
    pub lower_wins: u8,
    pub best_of: BestOf,
    pub games: Vec<GameResult>,
}

impl SeriesResult {
    pub fn games_played(&self) -> usize {
        self.games.len()
    }

    pub fn winner_seed(&self) -> u8 {
        if self.winner == self.higher_seed.id {
            self.higher_seed.seed
        } else {
            self.lower_seed.seed
        }
    }
}

/// Play a series to completion. Pure in (teams, length, provider): all
/// non-determinism comes from the provider, and nothing is mutated besides it.
pub fn simulate_series(
    provider: &mut dyn GameOutcomeProvider,
    higher: Seeded<'_>,
    lower: Seeded<'_>,
    best_of: BestOf,
) -> Result<SeriesResult> {
    let needed = best_of.wins_needed();
    let mut higher_wins = 0u8;
    let mut lower_wins = 0u8;
    let mut games = Vec::with_capacity(best_of.games() as usize);

    for (idx, host) in best_of.home_pattern().iter().enumerate() {
        let (home, away) = match host {
            Higher => (higher.team, lower.team),
            Lower => (lower.team, higher.team),
        };
        let outcome = provider.playoff_game(home, away);
        if outcome.winner != home.id && outcome.winner != away.id {
            return Err(PostseasonError::InvalidGameOutcome {
                home: home.id,
                away: away.id,
                winner: outcome.winner,
            });
        }

        games.push(GameResult {
            game: idx as u8 + 1,
            home: home.id,
            away: away.id,
            home_score: outcome.home_score,
            away_score: outcome.away_score,
            winner: outcome.winner,
        });
        if outcome.winner == higher.team.id {
            higher_wins += 1;
        } else {
            lower_wins += 1;
        }
        if higher_wins == needed || lower_wins == needed {
            break;
        }
    }

    let (winner, loser) = if higher_wins >= needed {
        (higher.team.id, lower.team.id)
    } else if lower_wins >= needed {
        (lower.team.id, higher.team.id)
    } else {
        return Err(PostseasonError::UnresolvedSeries {
            best_of: best_of.games(),
        });
    };

    tracing::debug!(
        winner = ?winner,
        higher = %higher.team.name,
        lower = %lower.team.name,
        games = games.len(),
        "series decided"
    );

    Ok(SeriesResult {
        higher_seed: higher.series_team(),
        lower_seed: lower.series_team(),
        winner,
        loser,
        higher_wins,
        lower_wins,
        best_of,
        games,
    })
}
