//! Turn resolution
//!
//! One turn = one hero action, then one step for every robot, then one corpse
//! decay stage. Robot movement uses the two-phase raster scan anchored at the
//! hero's cell: phase 1 walks from the hero toward the far corner, phase 2
//! walks back toward the opposite corner, and robots that have stepped are
//! tagged [`Cell::MovedRobot`] so a single in-place pass can never move the
//! same robot twice.

use super::error::SimError;
use super::field::{Cell, Field};
use super::state::{GamePhase, GameState, Intent, TurnOutcome};
use crate::consts::{FIELD_H, FIELD_W, MAX_PLACEMENT_ATTEMPTS};

/// How the hero's part of the turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeroMove {
    /// Hero acted; the robots take their step next.
    Stepped,
    /// Hero walked into an occupied cell.
    Died,
    /// Budgeted teleport: the robots forfeit their step this turn.
    FreeTeleport,
}

/// How a full robot pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RobotPass {
    Completed,
    HeroKilled,
}

/// Result of one robot's step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RobotStep {
    Stepped,
    HeroKilled,
}

/// Run one full turn for a player action.
///
/// Outside the [`GamePhase::Playing`] phase this is a silent no-op. On
/// [`TurnOutcome::HeroKilled`] the phase flips to GameOver and the field
/// keeps the death marker for the host to display.
pub fn apply_intent(state: &mut GameState, intent: Intent) -> Result<TurnOutcome, SimError> {
    if state.phase != GamePhase::Playing {
        return Ok(TurnOutcome::Continue);
    }
    let Some(hero) = state.field.hero() else {
        log::error!("playing field has no hero; intent dropped");
        return Ok(TurnOutcome::Continue);
    };

    let outcome = match move_hero(state, hero, intent) {
        HeroMove::Died => {
            state.phase = GamePhase::GameOver;
            return Ok(TurnOutcome::HeroKilled);
        }
        HeroMove::FreeTeleport => TurnOutcome::TurnSkippedByTeleport,
        HeroMove::Stepped => {
            if resolve_robots(state)? == RobotPass::HeroKilled {
                state.phase = GamePhase::GameOver;
                return Ok(TurnOutcome::HeroKilled);
            }
            TurnOutcome::Continue
        }
    };

    state.field.decay_corpses();
    if state.field.robots_remaining() == 0 {
        return Ok(TurnOutcome::LevelCleared);
    }
    Ok(outcome)
}

/// Decay-only advance for idle frames (the host's ~1 second cadence).
pub fn tick(state: &mut GameState) {
    state.field.decay_corpses();
}

/// Apply a hero intent: step one clamped cell, wait in place, or teleport to
/// a random empty cell.
fn move_hero(state: &mut GameState, (hx, hy): (usize, usize), intent: Intent) -> HeroMove {
    let dest = match intent.delta() {
        Some((dx, dy)) => Some(Field::clamp(hx as isize + dx, hy as isize + dy)),
        None => teleport_destination(state, hx, hy),
    };
    let Some((nx, ny)) = dest else {
        // Teleport with no empty cell to land on: the hero stays put and the
        // turn proceeds.
        state.hero_moved = false;
        return HeroMove::Stepped;
    };

    state.field.set(hx, hy, Cell::Empty);
    state.hero_moved = (nx, ny) != (hx, hy);
    if !state.field.get(nx, ny).is_empty() {
        // Walked into a robot or a corpse.
        state.field.set(nx, ny, Cell::HeroExplosion);
        state.field.clear_hero();
        return HeroMove::Died;
    }
    state.field.set_hero(nx, ny);

    if intent == Intent::Teleport && state.safe_teleports > 0 {
        state.safe_teleports -= 1;
        return HeroMove::FreeTeleport;
    }
    HeroMove::Stepped
}

/// Pick a uniformly random empty cell distinct from the hero's. Bounded
/// sampling with a linear-scan fallback so a near-full field still
/// terminates; `None` only when no such cell exists at all.
fn teleport_destination(state: &mut GameState, hx: usize, hy: usize) -> Option<(usize, usize)> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let x = state.rng.next_inclusive(FIELD_W - 1);
        let y = state.rng.next_inclusive(FIELD_H - 1);
        if (x, y) != (hx, hy) && state.field.get(x, y).is_empty() {
            return Some((x, y));
        }
    }
    for y in 0..FIELD_H {
        for x in 0..FIELD_W {
            if (x, y) != (hx, hy) && state.field.get(x, y).is_empty() {
                return Some((x, y));
            }
        }
    }
    None
}

/// Advance every robot one step toward the hero.
///
/// Phase 1 rasters from the hero's cell to the bottom-right corner (the
/// hero's own row starts at the hero's column), phase 2 rasters from the
/// hero's cell back to the top-left corner. A robot reaching the hero ends
/// the pass immediately; the robots not yet scanned forfeit their step.
fn resolve_robots(state: &mut GameState) -> Result<RobotPass, SimError> {
    let Some((hx, hy)) = state.field.hero() else {
        return Ok(RobotPass::Completed);
    };

    let mut row_start = hx;
    for y in hy..FIELD_H {
        for x in row_start..FIELD_W {
            if state.field.get(x, y) == Cell::Robot
                && step_robot(&mut state.field, &mut state.kills, x, y, hx, hy)
                    == RobotStep::HeroKilled
            {
                state.field.release_moved_markers();
                return Ok(RobotPass::HeroKilled);
            }
        }
        row_start = 0;
    }

    let mut row_end = hx;
    for y in (0..=hy).rev() {
        for x in (0..=row_end).rev() {
            if state.field.get(x, y) == Cell::Robot
                && step_robot(&mut state.field, &mut state.kills, x, y, hx, hy)
                    == RobotStep::HeroKilled
            {
                state.field.release_moved_markers();
                return Ok(RobotPass::HeroKilled);
            }
        }
        row_end = FIELD_W - 1;
    }

    state.field.normalize_after_resolution()?;
    Ok(RobotPass::Completed)
}

/// Move the robot at (x, y) one step toward the hero and resolve what it
/// lands on. Each axis closes independently, so the approach is Chebyshev:
/// diagonal when both axes differ, straight when one matches.
fn step_robot(
    field: &mut Field,
    kills: &mut u64,
    x: usize,
    y: usize,
    hx: usize,
    hy: usize,
) -> RobotStep {
    field.set(x, y, Cell::Empty);
    let nx = if x < hx {
        x + 1
    } else if x > hx {
        x - 1
    } else {
        x
    };
    let ny = if y < hy {
        y + 1
    } else if y > hy {
        y - 1
    } else {
        y
    };

    match field.get(nx, ny) {
        Cell::Hero => {
            field.set(nx, ny, Cell::HeroExplosion);
            field.clear_hero();
            RobotStep::HeroKilled
        }
        Cell::Empty => {
            field.set(nx, ny, Cell::MovedRobot);
            RobotStep::Stepped
        }
        // Two robots arriving at the same cell this turn: both die.
        Cell::MovedRobot => {
            *kills += 2;
            field.set(nx, ny, Cell::Explosion);
            RobotStep::Stepped
        }
        // Unmoved robot, trash or a corpse: the mover (and whatever robot
        // stood there) is destroyed.
        _ => {
            *kills += 1;
            field.set(nx, ny, Cell::Explosion);
            RobotStep::Stepped
        }
    }
}
