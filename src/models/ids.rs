//! Stable match identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Id of the third-place match, which sits outside the main tree.
pub const THIRD_PLACE_ID: &str = "3rd-place";

/// An opaque match key, unique within a bracket.
///
/// Main-tree ids are derived from round and position when the bracket is
/// built, but nothing ever parses them back: round and position live in
/// typed fields on [`MatchNode`](super::MatchNode).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    /// Create a new MatchId from an arbitrary key.
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Id for the match at `position` (1-based) within `round`.
    pub fn for_slot(round: u32, position: u32) -> Self {
        Self(format!("r{}-m{}", round, position))
    }

    /// Id of the third-place match.
    pub fn third_place() -> Self {
        Self(THIRD_PLACE_ID.to_string())
    }

    pub fn is_third_place(&self) -> bool {
        self.0 == THIRD_PLACE_ID
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatchId({})", self.0)
    }
}

impl From<String> for MatchId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MatchId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
