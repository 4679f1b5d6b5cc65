use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::{AppState, Session};
use crate::api::ApiError;
use crate::bracket::{BracketView, Standings};
use crate::models::entrants_from_names;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    pub generated_at: String,
    pub bracket: BracketView,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id.to_string(),
            generated_at: session.generated_at.to_rfc3339(),
            bracket: session.bracket.to_view(),
        }
    }
}

/// Regeneration request; omitted fields fall back to the configured
/// tournament.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    pub entrants: Option<Vec<String>>,
    pub seed: Option<u64>,
    pub manual: Option<bool>,
}

pub async fn get_bracket(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.session.read().await;
    Json(SessionResponse::from(&*session))
}

pub async fn regenerate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let names = req
        .entrants
        .unwrap_or_else(|| state.tournament.entrants.clone());
    let seed = req.seed.or(state.tournament.seed);
    let manual = req.manual.unwrap_or(state.tournament.manual);

    let session = Session::generate(&entrants_from_names(&names), seed, manual)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    tracing::info!(
        "New session {} with {} entrants",
        session.id,
        names.len()
    );

    let response = SessionResponse::from(&session);
    *state.session.write().await = session;
    Ok(Json(response))
}

pub async fn get_standings(State(state): State<AppState>) -> Json<Standings> {
    let session = state.session.read().await;
    Json(session.bracket.standings())
}
