//! Nested JSON shape consumed by the renderer.
//!
//! The arena is flattened back into a tree: the final carries its two
//! children, they carry theirs, down to the round-1 leaves. Score fields
//! are split into the four nullable columns the renderer reads.

use serde::Serialize;

use super::Bracket;
use crate::models::{Entrant, MatchId, MatchNode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub id: MatchId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MatchView>>,
    pub player1: Option<Entrant>,
    pub player2: Option<Entrant>,
    pub winner: Option<String>,
    pub loser: Option<String>,
    pub round: u32,
    pub match_in_round: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_match1_id: Option<MatchId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_match2_id: Option<MatchId>,
    pub player1_score: Option<Vec<u32>>,
    pub player2_score: Option<Vec<u32>>,
    pub player1_sets_won: Option<u32>,
    pub player2_sets_won: Option<u32>,
}

impl MatchView {
    fn leaf(node: &MatchNode) -> Self {
        let score = node.scoreline.as_ref();
        let [source1, source2] = match &node.source_matches {
            Some([a, b]) => [Some(a.clone()), Some(b.clone())],
            None => [None, None],
        };

        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            children: None,
            player1: node.player1.clone(),
            player2: node.player2.clone(),
            winner: node.winner.clone(),
            loser: node.loser.clone(),
            round: node.round,
            match_in_round: node.match_in_round,
            source_match1_id: source1,
            source_match2_id: source2,
            player1_score: score.map(|s| s.player1_points.clone()),
            player2_score: score.map(|s| s.player2_points.clone()),
            player1_sets_won: score.map(|s| s.player1_sets),
            player2_sets_won: score.map(|s| s.player2_sets),
        }
    }
}

/// The whole bracket as the renderer expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketView {
    pub main: MatchView,
    pub third_place: MatchView,
}

impl Bracket {
    pub fn to_view(&self) -> BracketView {
        BracketView {
            main: self.view_at(self.root),
            third_place: MatchView::leaf(&self.third_place),
        }
    }

    fn view_at(&self, i: usize) -> MatchView {
        let node = &self.nodes[i];
        let mut view = MatchView::leaf(node);
        view.children = node
            .children
            .map(|[a, b]| vec![self.view_at(a), self.view_at(b)]);
        view
    }
}
