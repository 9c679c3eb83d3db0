use serde::{Deserialize, Serialize};

/// League-wide unique team identifier, assigned by the roster subsystem.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamId(pub u32);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    One,
    Two,
    Three,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::One => "T1",
            Tier::Two => "T2",
            Tier::Three => "T3",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Conference {
    East,
    West,
}

const EAST_DIVISIONS: [&str; 3] = ["Atlantic", "Central", "Southeast"];
const WEST_DIVISIONS: [&str; 3] = ["Northwest", "Pacific", "Southwest"];

impl Conference {
    /// Fixed division → conference mapping used by the Tier 1 bracket.
    /// Divisions outside the table have no conference.
    pub fn of_division(division: &str) -> Option<Conference> {
        if EAST_DIVISIONS.contains(&division) {
            Some(Conference::East)
        } else if WEST_DIVISIONS.contains(&division) {
            Some(Conference::West)
        } else {
            None
        }
    }
}

/// Regular-season snapshot of one franchise, as supplied by the
/// season/standings subsystem. The postseason engine never mutates these;
/// tier changes are applied downstream from the selection lists it returns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub division: String,
    pub tier: Tier,
    pub wins: u16,
    pub losses: u16,
    /// Season point differential. Sign is independent of the win column.
    pub point_diff: i32,
}

impl Team {
    pub fn games_played(&self) -> u16 {
        self.wins + self.losses
    }

    pub fn conference(&self) -> Option<Conference> {
        Conference::of_division(&self.division)
    }
}
