//! Match outcomes and set-by-set scores.

use serde::{Deserialize, Serialize};

/// Sets needed to win a best-of-5 match.
pub const SETS_TO_WIN: u32 = 3;

/// One of the two slots of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }

    /// Side fed by the child at `index` (0 or 1) of a parent match.
    pub fn from_child_index(index: usize) -> Self {
        if index == 0 {
            Side::Player1
        } else {
            Side::Player2
        }
    }

    pub fn child_index(self) -> usize {
        match self {
            Side::Player1 => 0,
            Side::Player2 => 1,
        }
    }
}

/// Per-set points and set tallies for both slots of a played match.
///
/// The two point sequences always have the same length, equal to the sum
/// of the set tallies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scoreline {
    pub player1_points: Vec<u32>,
    pub player2_points: Vec<u32>,
    pub player1_sets: u32,
    pub player2_sets: u32,
}

impl Scoreline {
    pub fn sets_played(&self) -> usize {
        self.player1_points.len()
    }

    pub fn sets(&self, side: Side) -> u32 {
        match side {
            Side::Player1 => self.player1_sets,
            Side::Player2 => self.player2_sets,
        }
    }

    /// Side that reached [`SETS_TO_WIN`], if any.
    pub fn winning_side(&self) -> Option<Side> {
        if self.player1_sets >= SETS_TO_WIN {
            Some(Side::Player1)
        } else if self.player2_sets >= SETS_TO_WIN {
            Some(Side::Player2)
        } else {
            None
        }
    }

    /// Same match seen from the other slot.
    pub fn swapped(self) -> Self {
        Self {
            player1_points: self.player2_points,
            player2_points: self.player1_points,
            player1_sets: self.player2_sets,
            player2_sets: self.player1_sets,
        }
    }

    /// Final set tally, e.g. "3-1".
    pub fn summary(&self) -> String {
        format!("{}-{}", self.player1_sets, self.player2_sets)
    }
}

/// Result of resolving a single match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// No result yet (a slot is undetermined, both slots are byes, or the
    /// simulator leaves the match for manual play)
    Pending,
    /// The opponent was a bye; no scores, no loss recorded
    Walkover { winner: String },
    /// A played match, scores oriented player1/player2
    Played {
        winner: String,
        loser: String,
        scoreline: Scoreline,
    },
}

impl MatchOutcome {
    pub fn winner(&self) -> Option<&str> {
        match self {
            MatchOutcome::Pending => None,
            MatchOutcome::Walkover { winner } | MatchOutcome::Played { winner, .. } => {
                Some(winner)
            }
        }
    }

    pub fn loser(&self) -> Option<&str> {
        match self {
            MatchOutcome::Played { loser, .. } => Some(loser),
            _ => None,
        }
    }

    pub fn scoreline(&self) -> Option<&Scoreline> {
        match self {
            MatchOutcome::Played { scoreline, .. } => Some(scoreline),
            _ => None,
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, MatchOutcome::Pending)
    }
}
