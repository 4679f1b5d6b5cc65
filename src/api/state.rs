use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::bracket::{build, Bracket, BracketError};
use crate::config::TournamentConfig;
use crate::models::Entrant;
use crate::simulate::select_simulator;

/// The one bracket a running server holds. Replaced wholesale on
/// regeneration; replaced by the next version on each declaration.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub bracket: Bracket,
}

impl Session {
    pub fn generate(
        entrants: &[Entrant],
        seed: Option<u64>,
        manual: bool,
    ) -> Result<Self, BracketError> {
        let mut simulator = select_simulator(seed, manual);
        let bracket = build(entrants, simulator.as_mut())?;
        Ok(Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            bracket,
        })
    }

    pub fn from_config(config: &TournamentConfig) -> Result<Self, BracketError> {
        Self::generate(&config.entrants(), config.seed, config.manual)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<tokio::sync::RwLock<Session>>,
    /// Defaults for regeneration requests that omit fields
    pub tournament: Arc<TournamentConfig>,
}

impl AppState {
    pub fn new(session: Session, tournament: TournamentConfig) -> Self {
        Self {
            session: Arc::new(tokio::sync::RwLock::new(session)),
            tournament: Arc::new(tournament),
        }
    }
}
