//! # Knockout Bracket
//!
//! Single-elimination tournament brackets with a third-place match.
//!
//! ## Architecture
//!
//! - **models**: Match ids, entrants, match nodes and outcomes
//! - **bracket**: Building, mutating and querying a bracket
//! - **simulate**: Pluggable match simulation (random, seeded, manual)
//! - **api**: REST API endpoints serving the current session
//! - **config**: Configuration loading and validation

pub mod api;
pub mod bracket;
pub mod config;
pub mod models;
pub mod simulate;

pub use models::*;
