//! The knockout bracket.
//!
//! A [`Bracket`] is an arena of [`MatchNode`]s rooted at the final, plus a
//! third-place match that sits outside the tree but mirrors the semifinal
//! losers. Brackets are values: [`Bracket::declare_winner`] returns a new
//! version and never touches the one it was called on.
//!
//! - **builder**: constructs a bracket from an entrant list
//! - **mutator**: manual winner declarations
//! - **query**: read-only traversal, search and highlight paths
//! - **view**: the nested JSON shape consumed by the renderer

mod builder;
mod mutator;
mod query;
mod view;

pub use builder::*;
pub use mutator::*;
pub use query::*;
pub use view::*;

use std::collections::HashMap;

use thiserror::Error;

use crate::models::{MatchId, MatchNode, NodeIndex};

/// Smallest bracket that still has two semifinals to feed a third-place match.
pub const MIN_ENTRANTS: usize = 4;

/// Errors raised while constructing a bracket.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketError {
    #[error("Entrant count must be a power of two and at least 4, got {0}")]
    InvalidEntrantCount(usize),

    #[error("Entrant at position {0} has a blank name")]
    BlankEntrant(usize),

    #[error("Entrant {0:?} appears more than once")]
    DuplicateEntrant(String),

    /// The final has no children. Only reachable through a builder bug.
    #[error("Final match {0} has no semifinals")]
    MissingSemifinals(MatchId),
}

/// A full tournament: the main tree and the third-place match.
#[derive(Debug, Clone)]
pub struct Bracket {
    nodes: Vec<MatchNode>,
    root: NodeIndex,
    /// Parent of each node, derived from `children`
    parents: Vec<Option<NodeIndex>>,
    /// Main-tree id lookup, derived from `nodes`
    index: HashMap<MatchId, NodeIndex>,
    third_place: MatchNode,
}

impl PartialEq for Bracket {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
            && self.nodes == other.nodes
            && self.third_place == other.third_place
    }
}

impl Eq for Bracket {}

impl Bracket {
    /// Assemble a bracket and derive its parent links and id index.
    fn from_parts(nodes: Vec<MatchNode>, root: NodeIndex, third_place: MatchNode) -> Self {
        let mut parents = vec![None; nodes.len()];
        let mut index = HashMap::with_capacity(nodes.len());

        for (i, node) in nodes.iter().enumerate() {
            index.insert(node.id.clone(), i);
            if let Some(children) = node.children {
                for child in children {
                    parents[child] = Some(i);
                }
            }
        }

        Self {
            nodes,
            root,
            parents,
            index,
            third_place,
        }
    }

    /// The final (root of the main tree).
    pub fn final_match(&self) -> &MatchNode {
        &self.nodes[self.root]
    }

    pub fn third_place(&self) -> &MatchNode {
        &self.third_place
    }

    /// Number of rounds in the main tree; the final's round.
    pub fn rounds(&self) -> u32 {
        self.final_match().round
    }

    /// Number of matches in the main tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Entrant slots in round 1.
    pub fn entrant_count(&self) -> usize {
        self.round(1).len() * 2
    }

    /// Look up a match by id: main tree first, then the third-place match.
    pub fn get(&self, id: &MatchId) -> Option<&MatchNode> {
        match self.index.get(id) {
            Some(&i) => Some(&self.nodes[i]),
            None if *id == self.third_place.id => Some(&self.third_place),
            None => None,
        }
    }

    /// Parent of a main-tree match. The final and the third-place match
    /// have none.
    pub fn parent_of(&self, id: &MatchId) -> Option<&MatchNode> {
        let i = *self.index.get(id)?;
        self.parents[i].map(|p| &self.nodes[p])
    }

    /// The two matches feeding `id`, or None for a leaf.
    pub fn children_of(&self, id: &MatchId) -> Option<[&MatchNode; 2]> {
        let i = *self.index.get(id)?;
        self.children_at(i)
    }

    /// The final's two children.
    pub fn semifinals(&self) -> Option<[&MatchNode; 2]> {
        self.children_at(self.root)
    }

    /// Matches of one round, in position order.
    pub fn round(&self, round: u32) -> Vec<&MatchNode> {
        let mut matches: Vec<&MatchNode> =
            self.nodes.iter().filter(|n| n.round == round).collect();
        matches.sort_by_key(|n| n.match_in_round);
        matches
    }

    /// Round-1 matches.
    pub fn leaves(&self) -> Vec<&MatchNode> {
        self.round(1)
    }

    /// Every main-tree match, depth-first pre-order from the final.
    pub fn matches(&self) -> DepthFirst<'_> {
        DepthFirst {
            bracket: self,
            stack: vec![self.root],
        }
    }

    /// Main-tree matches followed by the third-place match.
    pub fn all_matches(&self) -> impl Iterator<Item = &MatchNode> + '_ {
        self.matches().chain(std::iter::once(&self.third_place))
    }

    fn children_at(&self, i: NodeIndex) -> Option<[&MatchNode; 2]> {
        self.nodes[i]
            .children
            .map(|[a, b]| [&self.nodes[a], &self.nodes[b]])
    }
}

/// Depth-first pre-order walk over the main tree.
pub struct DepthFirst<'a> {
    bracket: &'a Bracket,
    stack: Vec<NodeIndex>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a MatchNode;

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.stack.pop()?;
        let node = &self.bracket.nodes[i];
        if let Some([first, second]) = node.children {
            self.stack.push(second);
            self.stack.push(first);
        }
        Some(node)
    }
}
