//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Turn-driven only, no wall-clock reads after seeding
//! - Seeded RNG only
//! - Single owner per field, no shared mutable state
//! - No rendering or platform dependencies

pub mod error;
pub mod field;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod turn;

pub use error::SimError;
pub use field::{Cell, Field};
pub use rng::FieldRng;
pub use state::{GamePhase, GameState, Intent, TurnOutcome};
pub use turn::{apply_intent, tick};
