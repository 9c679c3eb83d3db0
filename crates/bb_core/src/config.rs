use serde::{Deserialize, Serialize};

/// Tertiary ordering applied when two teams have equal wins and equal point
/// differential. The league has no sanctioned tie-break beyond the first two
/// keys, so the policy is configurable instead of hard-coded.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakPolicy {
    /// Keep the caller-supplied standings order (stable sort).
    #[default]
    StandingsOrder,
    /// Lower team id ranks first. Deterministic regardless of input order.
    LowerTeamId,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostseasonConfig {
    #[serde(default)]
    pub tie_break: TieBreakPolicy,
}
