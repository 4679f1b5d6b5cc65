//! Core data models for the bracket.

mod entrant;
mod ids;
mod match_node;
mod outcome;

pub use entrant::*;
pub use ids::*;
pub use match_node::*;
pub use outcome::*;
