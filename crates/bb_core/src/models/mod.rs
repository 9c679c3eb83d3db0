pub mod team;

pub use team::{Conference, Team, TeamId, Tier};
