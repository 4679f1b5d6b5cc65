use std::collections::BTreeSet;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::bracket::Link;
use crate::models::MatchId;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    /// Round-1 matches with a matching player
    pub leaf_match_ids: Vec<MatchId>,
    pub node_ids: BTreeSet<MatchId>,
    pub links: BTreeSet<Link>,
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let session = state.session.read().await;
    let bracket = &session.bracket;

    let leaf_match_ids = bracket
        .search_leaves(&params.q)
        .into_iter()
        .map(|m| m.id.clone())
        .collect();
    let path = bracket.search_path(&params.q);

    Json(SearchResponse {
        query: params.q,
        leaf_match_ids,
        node_ids: path.node_ids,
        links: path.links,
    })
}

#[derive(Debug, Deserialize)]
pub struct HighlightParams {
    pub player: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightResponse {
    pub player: String,
    pub node_ids: BTreeSet<MatchId>,
    pub links: BTreeSet<Link>,
}

pub async fn highlight(
    State(state): State<AppState>,
    Query(params): Query<HighlightParams>,
) -> Json<HighlightResponse> {
    let session = state.session.read().await;
    let path = session.bracket.highlight_path(&params.player);

    Json(HighlightResponse {
        player: params.player,
        node_ids: path.node_ids,
        links: path.links,
    })
}
