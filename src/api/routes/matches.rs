use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::bracket::{BracketView, Rejection};
use crate::models::MatchId;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetail {
    pub id: MatchId,
    pub name: String,
    pub round: u32,
    pub match_in_round: u32,
    pub player1: Option<String>,
    pub player2: Option<String>,
    pub winner: Option<String>,
    pub loser: Option<String>,
    /// Final set tally, e.g. "3-1"
    pub result: Option<String>,
    pub parent_id: Option<MatchId>,
    pub child_ids: Option<Vec<MatchId>>,
}

pub async fn get_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MatchDetail>, ApiError> {
    let session = state.session.read().await;
    let bracket = &session.bracket;
    let id = MatchId::from(id);

    let node = bracket
        .get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("match {}", id)))?;

    Ok(Json(MatchDetail {
        id: node.id.clone(),
        name: node.name.clone(),
        round: node.round,
        match_in_round: node.match_in_round,
        player1: node.player1.as_ref().map(|e| e.to_string()),
        player2: node.player2.as_ref().map(|e| e.to_string()),
        winner: node.winner.clone(),
        loser: node.loser.clone(),
        result: node.scoreline.as_ref().map(|s| s.summary()),
        parent_id: bracket.parent_of(&id).map(|p| p.id.clone()),
        child_ids: bracket
            .children_of(&id)
            .map(|[first, second]| vec![first.id.clone(), second.id.clone()]),
    }))
}

#[derive(Debug, Deserialize)]
pub struct DeclareRequest {
    pub winner: String,
}

#[derive(Debug, Serialize)]
pub struct DeclareResponse {
    pub applied: bool,
    pub reason: Option<Rejection>,
    pub bracket: BracketView,
}

/// Declare a winner. Requests that cannot be applied are not errors: the
/// response reports `applied: false` with the reason and the unchanged
/// bracket.
pub async fn declare_winner(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<DeclareRequest>,
) -> Json<DeclareResponse> {
    let mut session = state.session.write().await;
    let declaration = session
        .bracket
        .declare_winner(&MatchId::from(id), req.winner.trim());

    let response = DeclareResponse {
        applied: declaration.is_applied(),
        reason: declaration.rejection(),
        bracket: declaration.bracket.to_view(),
    };
    if declaration.is_applied() {
        session.bracket = declaration.bracket;
    }
    Json(response)
}
