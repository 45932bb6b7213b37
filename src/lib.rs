//! Robo Grid - a turn-based grid-chase simulation engine
//!
//! The hero occupies one cell of a 16x12 field; every turn each robot takes
//! one greedy step toward the hero. Robots that collide destroy each other,
//! a robot reaching the hero ends the run.
//!
//! This crate is the simulation core only:
//! - `sim`: deterministic state, turn resolution, placement, level scaling
//!
//! Rendering, input mapping, audio and timers are host concerns. The host
//! feeds validated [`sim::Intent`]s and idle ticks in, and reads cell states
//! and counters back out through the accessors on [`sim::GameState`].

pub mod sim;

pub use sim::{Cell, GamePhase, GameState, Intent, SimError, TurnOutcome};

/// Game configuration constants
pub mod consts {
    /// Field width in cells
    pub const FIELD_W: usize = 16;
    /// Field height in cells
    pub const FIELD_H: usize = 12;

    /// Robots placed on level 1
    pub const START_ROBOT_COUNT: usize = 10;
    /// Safe teleports granted on a fresh run
    pub const START_SAFE_TELEPORTS: u32 = 4;
    /// Extra safe teleports granted per completed level
    pub const SAFE_TELEPORTS_PER_LEVEL: u32 = 2;

    /// Robot count scaling per level, as an exact rational (x1.2 with
    /// integer truncation)
    pub const LEVEL_GROWTH_NUM: usize = 6;
    pub const LEVEL_GROWTH_DEN: usize = 5;
    /// Reduction applied when the scaled robot count would fill the field
    pub const OVERFLOW_REDUCTION: usize = 8;

    /// Retry bound for rejection-sampled placement and teleports
    pub const MAX_PLACEMENT_ATTEMPTS: usize = 4096;
}
