//! A single match in the bracket.

use super::{Entrant, MatchId, MatchOutcome, Scoreline, Side};

/// Position of a match in a bracket's arena.
pub(crate) type NodeIndex = usize;

/// A single tournament match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchNode {
    /// Unique identifier within the bracket
    pub id: MatchId,

    /// Display label, e.g. "R1 M3"
    pub name: String,

    /// Round number, 1 = first round
    pub round: u32,

    /// 1-based position within the round
    pub match_in_round: u32,

    /// First slot; None until determined
    pub player1: Option<Entrant>,

    /// Second slot; None until determined
    pub player2: Option<Entrant>,

    pub winner: Option<String>,

    /// Never set for a bye walkover
    pub loser: Option<String>,

    /// Set scores, present only for a played match
    pub scoreline: Option<Scoreline>,

    /// The two matches feeding this one; None for round-1 leaves
    pub(crate) children: Option<[NodeIndex; 2]>,

    /// Third-place match only: the semifinals feeding its slots
    pub source_matches: Option<[MatchId; 2]>,
}

impl MatchNode {
    /// Create an undecided main-tree match.
    pub fn new(
        round: u32,
        match_in_round: u32,
        player1: Option<Entrant>,
        player2: Option<Entrant>,
    ) -> Self {
        Self {
            id: MatchId::for_slot(round, match_in_round),
            name: format!("R{} M{}", round, match_in_round),
            round,
            match_in_round,
            player1,
            player2,
            winner: None,
            loser: None,
            scoreline: None,
            children: None,
            source_matches: None,
        }
    }

    /// Create the undecided third-place match fed by two semifinals.
    pub fn third_place(
        round: u32,
        semifinals: [MatchId; 2],
        player1: Option<Entrant>,
        player2: Option<Entrant>,
    ) -> Self {
        Self {
            id: MatchId::third_place(),
            name: "3rd Place Match".to_string(),
            round,
            match_in_round: 2,
            player1,
            player2,
            winner: None,
            loser: None,
            scoreline: None,
            children: None,
            source_matches: Some(semifinals),
        }
    }

    pub fn slot(&self, side: Side) -> Option<&Entrant> {
        match side {
            Side::Player1 => self.player1.as_ref(),
            Side::Player2 => self.player2.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, side: Side) -> &mut Option<Entrant> {
        match side {
            Side::Player1 => &mut self.player1,
            Side::Player2 => &mut self.player2,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    pub fn has_both_slots(&self) -> bool {
        self.player1.is_some() && self.player2.is_some()
    }

    /// Slot holding the player named `name`.
    pub fn side_of(&self, name: &str) -> Option<Side> {
        if self.player1.as_ref().is_some_and(|e| e.is_player(name)) {
            Some(Side::Player1)
        } else if self.player2.as_ref().is_some_and(|e| e.is_player(name)) {
            Some(Side::Player2)
        } else {
            None
        }
    }

    pub fn has_player(&self, name: &str) -> bool {
        self.side_of(name).is_some()
    }

    /// True if either slot holds a player whose name contains `needle`
    /// (already lowercased).
    pub(crate) fn matches_query(&self, needle: &str) -> bool {
        self.player1.as_ref().is_some_and(|e| e.name_contains(needle))
            || self.player2.as_ref().is_some_and(|e| e.name_contains(needle))
    }

    /// Record an outcome. A pending outcome leaves the match untouched.
    pub fn apply(&mut self, outcome: MatchOutcome) {
        match outcome {
            MatchOutcome::Pending => {}
            MatchOutcome::Walkover { winner } => {
                self.winner = Some(winner);
                self.loser = None;
                self.scoreline = None;
            }
            MatchOutcome::Played {
                winner,
                loser,
                scoreline,
            } => {
                self.winner = Some(winner);
                self.loser = Some(loser);
                self.scoreline = Some(scoreline);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_node_creation() {
        let node = MatchNode::new(1, 3, Some(Entrant::player("A")), Some(Entrant::Bye));

        assert_eq!(node.id.as_str(), "r1-m3");
        assert_eq!(node.name, "R1 M3");
        assert!(node.is_leaf());
        assert!(!node.is_decided());
        assert!(node.has_both_slots());
    }

    #[test]
    fn test_side_of() {
        let node = MatchNode::new(2, 1, Some(Entrant::player("A")), Some(Entrant::player("B")));

        assert_eq!(node.side_of("A"), Some(Side::Player1));
        assert_eq!(node.side_of("B"), Some(Side::Player2));
        assert_eq!(node.side_of("C"), None);
    }

    #[test]
    fn test_side_of_ignores_bye() {
        let node = MatchNode::new(1, 1, Some(Entrant::Bye), Some(Entrant::player("B")));
        assert_eq!(node.side_of("BYE"), None);
    }

    #[test]
    fn test_apply_walkover_clears_loser() {
        let mut node = MatchNode::new(1, 1, Some(Entrant::player("A")), Some(Entrant::Bye));
        node.apply(MatchOutcome::Walkover {
            winner: "A".to_string(),
        });

        assert_eq!(node.winner.as_deref(), Some("A"));
        assert!(node.loser.is_none());
        assert!(node.scoreline.is_none());
    }

    #[test]
    fn test_apply_pending_is_noop() {
        let mut node = MatchNode::new(1, 1, None, None);
        let before = node.clone();
        node.apply(MatchOutcome::Pending);
        assert_eq!(node, before);
    }

    #[test]
    fn test_third_place_node() {
        let node = MatchNode::third_place(
            5,
            [MatchId::for_slot(4, 1), MatchId::for_slot(4, 2)],
            Some(Entrant::player("C")),
            None,
        );

        assert!(node.id.is_third_place());
        assert_eq!(node.name, "3rd Place Match");
        assert_eq!(node.match_in_round, 2);
        assert!(!node.has_both_slots());
    }
}
