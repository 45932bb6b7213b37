//! Simulation fault taxonomy
//!
//! Hero death and level completion are normal outcomes and travel through
//! [`crate::sim::TurnOutcome`]; these errors are programming-level faults.

use thiserror::Error;

/// Faults the simulation can surface to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    /// Placement was asked for more robots than the field has empty cells.
    #[error("cannot place {requested} robots with only {available} empty cells")]
    Capacity { requested: usize, available: usize },

    /// A robot survived both resolution phases unmoved. The scan order makes
    /// this unreachable; seeing it means a logic bug. The offending cell is
    /// recovered before the error is returned, so the game stays playable.
    #[error("unmoved robot survived turn resolution at ({x}, {y})")]
    InvariantViolation { x: usize, y: usize },
}
