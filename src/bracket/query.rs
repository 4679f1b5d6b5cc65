//! Read-only queries used by the renderer: search paths, click highlights
//! and final standings.

use std::collections::BTreeSet;

use serde::Serialize;

use super::Bracket;
use crate::models::{MatchId, MatchNode};

/// An edge of the main tree, from a match to the match feeding it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Link {
    pub parent: MatchId,
    pub child: MatchId,
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.parent, self.child)
    }
}

/// Matches and links to emphasise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathHighlight {
    pub node_ids: BTreeSet<MatchId>,
    pub links: BTreeSet<Link>,
}

impl PathHighlight {
    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    pub fn contains(&self, id: &MatchId) -> bool {
        self.node_ids.contains(id)
    }
}

/// Final placings; each is None until decided.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Standings {
    pub champion: Option<String>,
    pub runner_up: Option<String>,
    pub third: Option<String>,
    pub fourth: Option<String>,
}

fn normalize_query(query: &str) -> Option<String> {
    let query = query.trim().to_lowercase();
    (!query.is_empty()).then_some(query)
}

impl Bracket {
    /// Walk from `id` up to the final, starting with `id` itself.
    pub fn ancestors<'a>(&'a self, id: &MatchId) -> impl Iterator<Item = &'a MatchNode> + 'a {
        let mut current = self.index.get(id).copied();
        std::iter::from_fn(move || {
            let i = current?;
            current = self.parents[i];
            Some(&self.nodes[i])
        })
    }

    /// Round-1 matches with a player whose name contains `query`
    /// (trimmed, case-insensitive). An empty query matches nothing.
    pub fn search_leaves(&self, query: &str) -> Vec<&MatchNode> {
        let Some(needle) = normalize_query(query) else {
            return Vec::new();
        };
        self.leaves()
            .into_iter()
            .filter(|m| m.matches_query(&needle))
            .collect()
    }

    /// Every match and link on the way from a matching leaf to the final,
    /// plus the third-place match when one of its players matches.
    pub fn search_path(&self, query: &str) -> PathHighlight {
        let mut path = PathHighlight::default();
        let Some(needle) = normalize_query(query) else {
            return path;
        };

        for leaf in self.search_leaves(query) {
            let mut child: Option<&MatchNode> = None;
            for node in self.ancestors(&leaf.id) {
                path.node_ids.insert(node.id.clone());
                if let Some(child) = child {
                    path.links.insert(Link {
                        parent: node.id.clone(),
                        child: child.id.clone(),
                    });
                }
                child = Some(node);
            }
        }

        if self.third_place.matches_query(&needle) {
            path.node_ids.insert(self.third_place.id.clone());
        }

        path
    }

    /// The route of one player: from their round-1 match upward until the
    /// match they lost (inclusive). Undecided matches do not stop the walk.
    /// The third-place match is included when they play in it.
    pub fn highlight_path(&self, player: &str) -> PathHighlight {
        let mut path = PathHighlight::default();

        if let Some(start) = self.leaves().into_iter().find(|m| m.has_player(player)) {
            let mut child: Option<&MatchNode> = None;
            for node in self.ancestors(&start.id) {
                if let Some(child) = child {
                    path.links.insert(Link {
                        parent: node.id.clone(),
                        child: child.id.clone(),
                    });
                }
                path.node_ids.insert(node.id.clone());
                if node.winner.as_deref().is_some_and(|w| w != player) {
                    break;
                }
                child = Some(node);
            }
        }

        if self.third_place.has_player(player) {
            path.node_ids.insert(self.third_place.id.clone());
        }

        path
    }

    /// Champion and runner-up from the final, third and fourth from the
    /// third-place match.
    pub fn standings(&self) -> Standings {
        let final_match = self.final_match();
        Standings {
            champion: final_match.winner.clone(),
            runner_up: final_match.loser.clone(),
            third: self.third_place.winner.clone(),
            fourth: self.third_place.loser.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::build;
    use crate::models::{entrants_from_names, reference_field};
    use crate::simulate::{ManualPlay, RandomSimulator};
    use pretty_assertions::assert_eq;

    fn reference() -> Bracket {
        build(
            &entrants_from_names(&reference_field()),
            &mut RandomSimulator::seeded(17),
        )
        .unwrap()
    }

    fn ids(path: &PathHighlight) -> Vec<&str> {
        path.node_ids.iter().map(|id| id.as_str()).collect()
    }

    /// Recursive parent search over `children`, independent of the index.
    fn parent_dfs<'a>(bracket: &'a Bracket, node: &'a MatchNode, id: &MatchId) -> Option<&'a MatchNode> {
        let [first, second] = bracket.children_of(&node.id)?;
        if first.id == *id || second.id == *id {
            return Some(node);
        }
        parent_dfs(bracket, first, id).or_else(|| parent_dfs(bracket, second, id))
    }

    #[test]
    fn test_search_leaves_case_insensitive() {
        let bracket = reference();

        let hits = bracket.search_leaves("  ALCARAZ ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, MatchId::for_slot(1, 1));

        assert!(bracket.search_leaves("").is_empty());
        assert!(bracket.search_leaves("nobody").is_empty());
        // Byes are not searchable
        assert!(bracket.search_leaves("bye").is_empty());
    }

    #[test]
    fn test_search_path_reaches_root() {
        let bracket = reference();
        let path = bracket.search_path("shelton");

        assert_eq!(ids(&path), vec!["r1-m15", "r2-m8", "r3-m4", "r4-m2", "r5-m1"]);
        assert_eq!(path.links.len(), 4);
        assert!(path.links.contains(&Link {
            parent: MatchId::for_slot(5, 1),
            child: MatchId::for_slot(4, 2),
        }));
    }

    #[test]
    fn test_search_path_matches_independent_parent_walk() {
        let bracket = reference();
        let query = "a";

        let mut walked_nodes = BTreeSet::new();
        let mut walked_links = BTreeSet::new();
        for leaf in bracket.search_leaves(query) {
            walked_nodes.insert(leaf.id.clone());
            let mut current = leaf;
            while let Some(parent) = parent_dfs(&bracket, bracket.final_match(), &current.id) {
                assert_eq!(bracket.parent_of(&current.id), Some(parent));
                walked_nodes.insert(parent.id.clone());
                walked_links.insert(Link {
                    parent: parent.id.clone(),
                    child: current.id.clone(),
                });
                current = parent;
            }
        }

        let path = bracket.search_path(query);
        let main_nodes: BTreeSet<MatchId> = path
            .node_ids
            .iter()
            .filter(|id| !id.is_third_place())
            .cloned()
            .collect();

        assert!(!walked_nodes.is_empty());
        assert_eq!(main_nodes, walked_nodes);
        assert_eq!(path.links, walked_links);
    }

    #[test]
    fn test_search_path_includes_third_place() {
        let bracket = reference();
        let third = bracket.third_place();
        let player = third.player1.as_ref().unwrap().to_string();

        let path = bracket.search_path(&player);
        assert!(path.contains(&third.id));
    }

    #[test]
    fn test_highlight_stops_at_loss() {
        let bracket = reference();
        // Carlos Alcaraz is second-listed in r1-m1 and loses immediately
        let path = bracket.highlight_path("Carlos Alcaraz");

        assert_eq!(ids(&path), vec!["r1-m1"]);
        assert!(path.links.is_empty());
    }

    #[test]
    fn test_highlight_champion_reaches_final() {
        let bracket = reference();
        let path = bracket.highlight_path("Novak Djokovic");

        assert_eq!(ids(&path), vec!["r1-m1", "r2-m1", "r3-m1", "r4-m1", "r5-m1"]);
        assert_eq!(path.links.len(), 4);
    }

    #[test]
    fn test_highlight_includes_loss_and_third_place() {
        let bracket = reference();
        // Ruud wins three rounds, loses the semifinal to Djokovic
        let path = bracket.highlight_path("Casper Ruud");

        assert_eq!(
            ids(&path),
            vec!["3rd-place", "r1-m5", "r2-m3", "r3-m2", "r4-m1"]
        );
        assert!(!path.contains(&MatchId::for_slot(5, 1)));
    }

    #[test]
    fn test_highlight_unknown_player_is_empty() {
        let bracket = reference();
        assert!(bracket.highlight_path("Roger Federer").is_empty());
    }

    #[test]
    fn test_highlight_walks_through_undecided_matches() {
        let bracket = build(&entrants_from_names(&["A", "B", "C", "D"]), &mut ManualPlay).unwrap();
        let path = bracket.highlight_path("B");
        assert_eq!(ids(&path), vec!["r1-m1", "r2-m1"]);
    }

    #[test]
    fn test_standings() {
        let bracket = reference();
        let standings = bracket.standings();

        assert_eq!(standings.champion.as_deref(), Some("Novak Djokovic"));
        assert_eq!(standings.runner_up.as_deref(), Some("Lorenzo Musetti"));
        assert_eq!(standings.third.as_deref(), Some("Casper Ruud"));
        assert_eq!(standings.fourth.as_deref(), Some("Sebastian Korda"));
    }

    #[test]
    fn test_standings_undecided() {
        let bracket = build(&entrants_from_names(&["A", "B", "C", "D"]), &mut ManualPlay).unwrap();
        assert_eq!(bracket.standings(), Standings::default());
    }

    #[test]
    fn test_link_display() {
        let link = Link {
            parent: MatchId::for_slot(2, 1),
            child: MatchId::for_slot(1, 2),
        };
        assert_eq!(link.to_string(), "r2-m1-r1-m2");
    }
}
