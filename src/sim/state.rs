//! Game state and level bookkeeping
//!
//! [`GameState`] is the engine object: it owns the field, the RNG and every
//! counter. Hosts construct one per session and drive it through
//! [`crate::sim::apply_intent`] / [`crate::sim::tick`] plus the level
//! transitions below.

use serde::{Deserialize, Serialize};

use super::error::SimError;
use super::field::{Cell, Field};
use super::rng::FieldRng;
use super::spawn;
use crate::consts::{
    FIELD_H, FIELD_W, LEVEL_GROWTH_DEN, LEVEL_GROWTH_NUM, OVERFLOW_REDUCTION, START_ROBOT_COUNT,
    START_SAFE_TELEPORTS, SAFE_TELEPORTS_PER_LEVEL,
};

/// Current phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen; a placed field already waits behind it.
    Menu,
    /// "Entering level n" card; the host advances with [`GameState::start_level`].
    LevelIntro,
    /// Turns are being accepted.
    Playing,
    /// The hero is dead. The host returns to the menu after its own delay.
    GameOver,
}

/// A validated player action for one turn.
///
/// Raw key events map to these on the host side; anything unrecognized is
/// dropped there without consuming a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    MoveN,
    MoveNE,
    MoveE,
    MoveSE,
    MoveS,
    MoveSW,
    MoveW,
    MoveNW,
    Wait,
    Teleport,
}

impl Intent {
    /// Grid delta for directional intents (north is decreasing y).
    /// `Wait` is a zero delta; `Teleport` has none.
    pub fn delta(self) -> Option<(isize, isize)> {
        match self {
            Intent::MoveN => Some((0, -1)),
            Intent::MoveNE => Some((1, -1)),
            Intent::MoveE => Some((1, 0)),
            Intent::MoveSE => Some((1, 1)),
            Intent::MoveS => Some((0, 1)),
            Intent::MoveSW => Some((-1, 1)),
            Intent::MoveW => Some((-1, 0)),
            Intent::MoveNW => Some((-1, -1)),
            Intent::Wait => Some((0, 0)),
            Intent::Teleport => None,
        }
    }
}

/// What one call to [`crate::sim::apply_intent`] resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The turn ran; the game goes on.
    Continue,
    /// A robot reached the hero (or the hero walked into something).
    HeroKilled,
    /// Every robot is gone; call [`GameState::advance_level`] next.
    LevelCleared,
    /// A budgeted teleport ended the turn before the robots could move.
    TurnSkippedByTeleport,
}

/// Complete simulation state (deterministic, serializable).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) rng: FieldRng,
    pub(crate) field: Field,
    pub(crate) phase: GamePhase,
    /// 0-based level index.
    pub(crate) level: u32,
    /// Robots placed at the start of the current level.
    pub(crate) robot_target: usize,
    pub(crate) safe_teleports: u32,
    /// Cumulative robots destroyed this run.
    pub(crate) kills: u64,
    /// Whether the hero changed cell on the most recent turn (pose hint for
    /// presentation; the sim itself only stores it).
    pub(crate) hero_moved: bool,
}

impl GameState {
    /// A fresh session from a fixed seed. The level-1 field is already
    /// placed; phase starts at the menu.
    pub fn new(seed: u64) -> Result<Self, SimError> {
        let mut state = Self {
            rng: FieldRng::new(seed),
            field: Field::new(),
            phase: GamePhase::Menu,
            level: 0,
            robot_target: START_ROBOT_COUNT,
            safe_teleports: START_SAFE_TELEPORTS,
            kills: 0,
            hero_moved: false,
        };
        state.reset()?;
        state.phase = GamePhase::Menu;
        Ok(state)
    }

    /// A fresh session seeded from the wall clock.
    pub fn from_entropy() -> Result<Self, SimError> {
        Self::new(FieldRng::from_entropy().seed())
    }

    /// Start a new run: level 0, starting counters, freshly placed field.
    pub fn reset(&mut self) -> Result<(), SimError> {
        self.level = 0;
        self.robot_target = START_ROBOT_COUNT;
        self.safe_teleports = START_SAFE_TELEPORTS;
        self.kills = 0;
        self.hero_moved = false;
        spawn::place_entities(&mut self.field, &mut self.rng, self.robot_target)?;
        self.phase = GamePhase::LevelIntro;
        Ok(())
    }

    /// Move to the next level once the field is clear of robots: scale the
    /// robot count by x1.2 (truncated, reduced by 8 if it would fill the
    /// field), grant 2 safe teleports, re-place.
    pub fn advance_level(&mut self) -> Result<(), SimError> {
        let mut next = self.robot_target * LEVEL_GROWTH_NUM / LEVEL_GROWTH_DEN;
        if next >= FIELD_W * FIELD_H {
            next -= OVERFLOW_REDUCTION;
        }
        spawn::place_entities(&mut self.field, &mut self.rng, next)?;
        self.robot_target = next;
        self.safe_teleports += SAFE_TELEPORTS_PER_LEVEL;
        self.level += 1;
        self.hero_moved = false;
        self.phase = GamePhase::LevelIntro;
        log::info!(
            "entering level {}: {} robots, {} safe teleports",
            self.display_level(),
            self.robot_target,
            self.safe_teleports
        );
        Ok(())
    }

    /// Leave the menu or the level-intro card and start accepting turns.
    pub fn start_level(&mut self) {
        if matches!(self.phase, GamePhase::Menu | GamePhase::LevelIntro) {
            self.phase = GamePhase::Playing;
        }
    }

    /// Return to the title screen after a game over (host drives the delay).
    pub fn to_menu(&mut self) {
        if self.phase == GamePhase::GameOver {
            self.phase = GamePhase::Menu;
        }
    }

    // --- read accessors -----------------------------------------------------

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Cell state at (x, y); out-of-range coordinates clamp to the edge.
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.field.get(x, y)
    }

    /// Hero position, `None` once the hero is dead.
    pub fn hero_pos(&self) -> Option<(usize, usize)> {
        self.field.hero()
    }

    /// 0-based level index.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// 1-based level number, as shown to players.
    pub fn display_level(&self) -> u32 {
        self.level + 1
    }

    pub fn kills(&self) -> u64 {
        self.kills
    }

    pub fn safe_teleports(&self) -> u32 {
        self.safe_teleports
    }

    /// Robots placed at the start of the current level.
    pub fn robot_target(&self) -> usize {
        self.robot_target
    }

    /// Robots still alive on the field.
    pub fn robots_remaining(&self) -> usize {
        self.field.robots_remaining()
    }

    /// Whether the hero changed cell on the most recent turn.
    pub fn hero_moved(&self) -> bool {
        self.hero_moved
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// The whole field as rows of characters (see [`Cell::as_char`]).
    pub fn render_ascii(&self) -> String {
        self.field.render_ascii()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let state = GameState::new(5).unwrap();
        assert_eq!(state.phase(), GamePhase::Menu);
        assert_eq!(state.level(), 0);
        assert_eq!(state.display_level(), 1);
        assert_eq!(state.kills(), 0);
        assert_eq!(state.safe_teleports(), START_SAFE_TELEPORTS);
        assert_eq!(state.robot_target(), START_ROBOT_COUNT);
        assert_eq!(state.robots_remaining(), START_ROBOT_COUNT);
        assert!(state.hero_pos().is_some());
    }

    #[test]
    fn test_advance_level_scales_difficulty() {
        let mut state = GameState::new(5).unwrap();
        state.advance_level().unwrap();
        // 10 x 1.2 truncates to 12
        assert_eq!(state.robot_target(), 12);
        assert_eq!(state.robots_remaining(), 12);
        assert_eq!(state.safe_teleports(), START_SAFE_TELEPORTS + 2);
        assert_eq!(state.level(), 1);
        assert_eq!(state.phase(), GamePhase::LevelIntro);
    }

    #[test]
    fn test_overflow_reduction_near_field_capacity() {
        let mut state = GameState::new(5).unwrap();
        state.robot_target = 160;
        state.advance_level().unwrap();
        // 160 x 1.2 = 192 would fill the field; reduced by 8
        assert_eq!(state.robot_target(), 184);
        assert_eq!(state.robots_remaining(), 184);
    }

    #[test]
    fn test_reset_restores_starting_counters() {
        let mut state = GameState::new(5).unwrap();
        state.advance_level().unwrap();
        state.advance_level().unwrap();
        state.kills = 37;
        state.reset().unwrap();
        assert_eq!(state.level(), 0);
        assert_eq!(state.kills(), 0);
        assert_eq!(state.robot_target(), START_ROBOT_COUNT);
        assert_eq!(state.safe_teleports(), START_SAFE_TELEPORTS);
        assert_eq!(state.phase(), GamePhase::LevelIntro);
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = GameState::new(5).unwrap();
        assert_eq!(state.phase(), GamePhase::Menu);
        state.start_level();
        assert_eq!(state.phase(), GamePhase::Playing);

        state.phase = GamePhase::GameOver;
        state.start_level(); // ignored: not a menu or intro phase
        assert_eq!(state.phase(), GamePhase::GameOver);
        state.to_menu();
        assert_eq!(state.phase(), GamePhase::Menu);
    }
}
