//! Bottom-up bracket construction.

use std::collections::HashSet;

use super::{Bracket, BracketError, MIN_ENTRANTS};
use crate::models::{Entrant, MatchNode, NodeIndex};
use crate::simulate::{simulate_match, MatchSimulator, RandomSimulator};

/// Check an entrant list before any tree is built.
///
/// The count must be a power of two of at least [`MIN_ENTRANTS`]; player
/// names must be non-blank and unique. Byes may repeat.
pub fn validate_entrants(entrants: &[Entrant]) -> Result<(), BracketError> {
    let count = entrants.len();
    if count < MIN_ENTRANTS || !count.is_power_of_two() {
        return Err(BracketError::InvalidEntrantCount(count));
    }

    let mut seen = HashSet::with_capacity(count);
    for (position, entrant) in entrants.iter().enumerate() {
        let Some(name) = entrant.name() else {
            continue;
        };
        if name.trim().is_empty() {
            return Err(BracketError::BlankEntrant(position + 1));
        }
        if !seen.insert(name) {
            return Err(BracketError::DuplicateEntrant(name.to_string()));
        }
    }

    Ok(())
}

/// Build a bracket from an ordered entrant list, resolving every match the
/// simulator is willing to decide.
///
/// Round 1 pairs entrants in input order; each later round pairs the
/// previous round's matches in order and seeds its slots with their
/// winners. The third-place match is fed by the final's two children.
pub fn build<S: MatchSimulator + ?Sized>(
    entrants: &[Entrant],
    simulator: &mut S,
) -> Result<Bracket, BracketError> {
    validate_entrants(entrants)?;

    let mut nodes: Vec<MatchNode> = Vec::with_capacity(entrants.len() - 1);
    let mut current: Vec<NodeIndex> = Vec::with_capacity(entrants.len() / 2);

    for (i, pair) in entrants.chunks(2).enumerate() {
        let mut node = MatchNode::new(
            1,
            i as u32 + 1,
            Some(pair[0].clone()),
            Some(pair[1].clone()),
        );
        resolve(&mut node, simulator);
        current.push(nodes.len());
        nodes.push(node);
    }

    let mut round = 2;
    while current.len() > 1 {
        let mut next = Vec::with_capacity(current.len() / 2);
        for (i, pair) in current.chunks(2).enumerate() {
            let (first, second) = (pair[0], pair[1]);
            let mut node = MatchNode::new(
                round,
                i as u32 + 1,
                advancing(&nodes[first]),
                advancing(&nodes[second]),
            );
            node.children = Some([first, second]);
            resolve(&mut node, simulator);
            next.push(nodes.len());
            nodes.push(node);
        }
        current = next;
        round += 1;
    }

    let root = current[0];
    let third_place = third_place_match(&nodes, root, simulator)?;

    let bracket = Bracket::from_parts(nodes, root, third_place);
    tracing::info!(
        "Built bracket: {} entrants, {} rounds, simulator={}, champion={}",
        entrants.len(),
        bracket.rounds(),
        simulator.name(),
        bracket.final_match().winner.as_deref().unwrap_or("undecided"),
    );
    Ok(bracket)
}

/// Build a fully simulated bracket with a freshly seeded random simulator.
pub fn generate(entrants: &[Entrant]) -> Result<Bracket, BracketError> {
    build(entrants, &mut RandomSimulator::from_entropy())
}

/// The slot a decided match hands to its parent.
fn advancing(node: &MatchNode) -> Option<Entrant> {
    node.winner.clone().map(Entrant::Player)
}

fn resolve<S: MatchSimulator + ?Sized>(node: &mut MatchNode, simulator: &mut S) {
    let outcome = simulate_match(simulator, node.player1.as_ref(), node.player2.as_ref());
    if let Some(winner) = outcome.winner() {
        tracing::debug!(
            "{}: {} advances ({})",
            node.id,
            winner,
            outcome
                .scoreline()
                .map(|s| s.summary())
                .unwrap_or_else(|| "walkover".to_string()),
        );
    }
    node.apply(outcome);
}

fn third_place_match<S: MatchSimulator + ?Sized>(
    nodes: &[MatchNode],
    root: NodeIndex,
    simulator: &mut S,
) -> Result<MatchNode, BracketError> {
    let final_match = &nodes[root];
    let [first, second] = final_match
        .children
        .ok_or_else(|| BracketError::MissingSemifinals(final_match.id.clone()))?;
    let (first, second) = (&nodes[first], &nodes[second]);

    let mut node = MatchNode::third_place(
        final_match.round,
        [first.id.clone(), second.id.clone()],
        first.loser.clone().map(Entrant::Player),
        second.loser.clone().map(Entrant::Player),
    );
    resolve(&mut node, simulator);
    Ok(node)
}
