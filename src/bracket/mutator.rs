//! Manual winner declarations.
//!
//! Declarations are functional updates: the bracket they are applied to is
//! cloned, the clone is patched, and both versions stay valid. A request
//! that cannot be applied returns a copy of the input together with the
//! reason it was rejected.

use serde::Serialize;

use super::Bracket;
use crate::models::{Entrant, MatchId, MatchNode, NodeIndex, Scoreline, Side, SETS_TO_WIN};

/// Why a declaration left the bracket unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// No match with that id
    UnknownMatch,
    /// A slot is still undetermined
    EmptySlot,
    /// The match already has a winner
    AlreadyDecided,
    /// The named winner is not a player in either slot
    NotAParticipant,
    /// The scores do not describe a finished best-of-5 match
    InvalidScoreline,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::UnknownMatch => write!(f, "unknown match"),
            Rejection::EmptySlot => write!(f, "a player slot is still empty"),
            Rejection::AlreadyDecided => write!(f, "match already has a winner"),
            Rejection::NotAParticipant => write!(f, "winner is not a player in this match"),
            Rejection::InvalidScoreline => write!(f, "scores do not describe a finished match"),
        }
    }
}

/// Whether a declaration changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclareStatus {
    Applied,
    Unchanged(Rejection),
}

/// The bracket version produced by a declaration.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub bracket: Bracket,
    pub status: DeclareStatus,
}

impl Declaration {
    pub fn is_applied(&self) -> bool {
        self.status == DeclareStatus::Applied
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self.status {
            DeclareStatus::Applied => None,
            DeclareStatus::Unchanged(reason) => Some(reason),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Main(NodeIndex),
    ThirdPlace,
}

impl Bracket {
    /// Declare `winner` the winner of `match_id`.
    ///
    /// On success the winner also fills the parent's slot for this match,
    /// the sibling's winner backfills the parent's other slot if it is
    /// still open, and the third-place slots are re-derived from the
    /// semifinal losers.
    pub fn declare_winner(&self, match_id: &MatchId, winner: &str) -> Declaration {
        self.declare(match_id, winner, None)
    }

    /// Record a played result. The winner is the side that reached three
    /// sets; the scores are oriented player1/player2.
    pub fn record_result(&self, match_id: &MatchId, scoreline: Scoreline) -> Declaration {
        let winner = match (self.get(match_id), validate_scoreline(&scoreline)) {
            (None, _) => return self.unchanged(match_id, Rejection::UnknownMatch),
            (Some(_), Err(reason)) => return self.unchanged(match_id, reason),
            (Some(node), Ok(side)) => node.slot(side).and_then(|e| e.name()).map(str::to_string),
        };

        match winner {
            Some(winner) => self.declare(match_id, &winner, Some(scoreline)),
            None => {
                let node = self.get(match_id);
                let reason = if node.is_some_and(|n| n.has_both_slots()) {
                    Rejection::NotAParticipant
                } else {
                    Rejection::EmptySlot
                };
                self.unchanged(match_id, reason)
            }
        }
    }

    fn declare(&self, match_id: &MatchId, winner: &str, scoreline: Option<Scoreline>) -> Declaration {
        let target = match self.index.get(match_id) {
            Some(&i) => Target::Main(i),
            None if *match_id == self.third_place.id => Target::ThirdPlace,
            None => return self.unchanged(match_id, Rejection::UnknownMatch),
        };

        let side = match check_declarable(self.node(target), winner) {
            Ok(side) => side,
            Err(reason) => return self.unchanged(match_id, reason),
        };

        let mut next = self.clone();
        let node = next.node_mut(target);
        node.winner = Some(winner.to_string());
        node.loser = node
            .slot(side.other())
            .and_then(|e| e.name())
            .map(str::to_string);
        node.scoreline = scoreline;

        if let Target::Main(i) = target {
            next.advance(i, winner);
        }
        next.sync_third_place();

        tracing::info!("{}: {} declared winner", match_id, winner);
        Declaration {
            bracket: next,
            status: DeclareStatus::Applied,
        }
    }

    fn unchanged(&self, match_id: &MatchId, reason: Rejection) -> Declaration {
        tracing::warn!("Declaration on {} ignored: {}", match_id, reason);
        Declaration {
            bracket: self.clone(),
            status: DeclareStatus::Unchanged(reason),
        }
    }

    fn node(&self, target: Target) -> &MatchNode {
        match target {
            Target::Main(i) => &self.nodes[i],
            Target::ThirdPlace => &self.third_place,
        }
    }

    fn node_mut(&mut self, target: Target) -> &mut MatchNode {
        match target {
            Target::Main(i) => &mut self.nodes[i],
            Target::ThirdPlace => &mut self.third_place,
        }
    }

    /// Move the winner of node `i` into its parent, then backfill the
    /// parent's other slot from an already decided sibling.
    fn advance(&mut self, i: NodeIndex, winner: &str) {
        let Some(parent) = self.parents[i] else {
            return;
        };
        let Some(children) = self.nodes[parent].children else {
            return;
        };

        let position = if children[0] == i { 0 } else { 1 };
        let side = Side::from_child_index(position);
        *self.nodes[parent].slot_mut(side) = Some(Entrant::player(winner));

        let sibling_winner = self.nodes[children[1 - position]].winner.clone();
        if let Some(sibling_winner) = sibling_winner {
            let slot = self.nodes[parent].slot_mut(side.other());
            if slot.is_none() {
                *slot = Some(Entrant::Player(sibling_winner));
            }
        }
    }

    /// Copy each known semifinal loser into its third-place slot.
    fn sync_third_place(&mut self) {
        let Some([first, second]) = self.nodes[self.root].children else {
            return;
        };

        if let Some(loser) = self.nodes[first].loser.clone() {
            self.third_place.player1 = Some(Entrant::Player(loser));
        }
        if let Some(loser) = self.nodes[second].loser.clone() {
            self.third_place.player2 = Some(Entrant::Player(loser));
        }
    }
}

fn check_declarable(node: &MatchNode, winner: &str) -> Result<Side, Rejection> {
    if !node.has_both_slots() {
        return Err(Rejection::EmptySlot);
    }
    if node.is_decided() {
        return Err(Rejection::AlreadyDecided);
    }
    node.side_of(winner).ok_or(Rejection::NotAParticipant)
}

/// The side that won a finished best-of-5 scoreline.
fn validate_scoreline(line: &Scoreline) -> Result<Side, Rejection> {
    if line.player1_points.len() != line.player2_points.len() {
        return Err(Rejection::InvalidScoreline);
    }

    let mut sets = [0u32; 2];
    let mut last_set = None;
    for (a, b) in line.player1_points.iter().zip(&line.player2_points) {
        // The match ends the moment one side reaches three sets
        if a == b || sets.contains(&SETS_TO_WIN) {
            return Err(Rejection::InvalidScoreline);
        }
        let set_winner = if b > a { Side::Player2 } else { Side::Player1 };
        sets[set_winner.child_index()] += 1;
        last_set = Some(set_winner);
    }
    if sets != [line.player1_sets, line.player2_sets] {
        return Err(Rejection::InvalidScoreline);
    }

    match line.winning_side() {
        Some(side)
            if line.sets(side) == SETS_TO_WIN
                && line.sets(side.other()) < SETS_TO_WIN
                && last_set == Some(side) =>
        {
            Ok(side)
        }
        _ => Err(Rejection::InvalidScoreline),
    }
}
