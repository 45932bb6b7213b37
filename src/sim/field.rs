//! Playfield grid and cell lifecycle
//!
//! The field owns every cell. The resolver, hero controller and placement
//! command it through these methods; nothing else mutates cells.

use serde::{Deserialize, Serialize};

use super::error::SimError;
use crate::consts::{FIELD_H, FIELD_W};

/// One cell of the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    /// Adversary that has not taken its step this turn.
    Robot,
    /// Transient marker: a robot that already stepped this turn. Exists only
    /// inside an in-progress resolution pass, never after it.
    MovedRobot,
    /// The player. Exactly one while the game is active.
    Hero,
    /// Fresh corpse; ages to Trash.
    Explosion,
    /// The hero's death marker; ages to Explosion, then Trash.
    HeroExplosion,
    /// Fully decayed corpse. Inert, but still blocks the cell.
    Trash,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Plain-character projection for hosts and test output.
    pub fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Robot | Cell::MovedRobot => 'R',
            Cell::Hero => '@',
            Cell::Explosion => '*',
            Cell::HeroExplosion => 'X',
            Cell::Trash => '#',
        }
    }
}

/// The rectangular grid plus the tracked hero position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    cells: Vec<Cell>,
    hero: Option<(usize, usize)>,
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

impl Field {
    /// An all-empty field with no hero.
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::Empty; FIELD_W * FIELD_H],
            hero: None,
        }
    }

    pub fn width(&self) -> usize {
        FIELD_W
    }

    pub fn height(&self) -> usize {
        FIELD_H
    }

    fn idx(x: usize, y: usize) -> usize {
        y * FIELD_W + x
    }

    /// Clamp signed coordinates to the field rectangle (moves never wrap or
    /// reject; they pin to the nearest edge).
    pub(crate) fn clamp(x: isize, y: isize) -> (usize, usize) {
        let cx = x.clamp(0, FIELD_W as isize - 1) as usize;
        let cy = y.clamp(0, FIELD_H as isize - 1) as usize;
        (cx, cy)
    }

    /// Cell state at (x, y). Out-of-range coordinates clamp to the edge.
    pub fn get(&self, x: usize, y: usize) -> Cell {
        let (x, y) = Self::clamp(x as isize, y as isize);
        self.cells[Self::idx(x, y)]
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, cell: Cell) {
        let (x, y) = Self::clamp(x as isize, y as isize);
        self.cells[Self::idx(x, y)] = cell;
    }

    /// Reset every cell to Empty and forget the hero.
    pub(crate) fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
        self.hero = None;
    }

    /// Hero position, `None` after the hero has died.
    pub fn hero(&self) -> Option<(usize, usize)> {
        self.hero
    }

    /// Put the hero on (x, y).
    pub(crate) fn set_hero(&mut self, x: usize, y: usize) {
        self.set(x, y, Cell::Hero);
        self.hero = Some((x, y));
    }

    /// Forget the hero position (the death marker stays in its cell).
    pub(crate) fn clear_hero(&mut self) {
        self.hero = None;
    }

    /// Live robots on the field. Counts the transient marker too, so the
    /// tally is stable even if sampled mid-resolution.
    pub fn robots_remaining(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == Cell::Robot || c == Cell::MovedRobot)
            .count()
    }

    pub(crate) fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    /// Age corpses one stage: HeroExplosion -> Explosion -> Trash.
    ///
    /// Each cell advances at most one stage per call; a corpse is visible in
    /// every stage for at least one host frame.
    pub(crate) fn decay_corpses(&mut self) {
        for cell in &mut self.cells {
            *cell = match *cell {
                Cell::HeroExplosion => Cell::Explosion,
                Cell::Explosion => Cell::Trash,
                other => other,
            };
        }
    }

    /// Convert MovedRobot markers back to Robot without the stray-robot
    /// audit. Used when a hero kill aborts resolution mid-scan: the robots
    /// not yet visited legitimately still hold plain Robot.
    pub(crate) fn release_moved_markers(&mut self) {
        for cell in &mut self.cells {
            if *cell == Cell::MovedRobot {
                *cell = Cell::Robot;
            }
        }
    }

    /// Phase 3 of turn resolution: convert every MovedRobot back to Robot.
    ///
    /// A plain Robot surviving both scan phases means the scan order skipped
    /// it. The cell is left as a live robot (equivalent to having held its
    /// step) and the defect is reported for the first such cell found.
    pub(crate) fn normalize_after_resolution(&mut self) -> Result<(), SimError> {
        let mut stray = None;
        for y in 0..FIELD_H {
            for x in 0..FIELD_W {
                match self.cells[Self::idx(x, y)] {
                    Cell::MovedRobot => self.cells[Self::idx(x, y)] = Cell::Robot,
                    Cell::Robot => {
                        log::error!("unmoved robot survived resolution at ({x}, {y})");
                        stray.get_or_insert((x, y));
                    }
                    _ => {}
                }
            }
        }
        match stray {
            Some((x, y)) => Err(SimError::InvariantViolation { x, y }),
            None => Ok(()),
        }
    }

    /// The whole grid as rows of [`Cell::as_char`] characters.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((FIELD_W + 1) * FIELD_H);
        for y in 0..FIELD_H {
            for x in 0..FIELD_W {
                out.push(self.cells[Self::idx(x, y)].as_char());
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_pins_to_edges() {
        assert_eq!(Field::clamp(-1, -1), (0, 0));
        assert_eq!(Field::clamp(3, 5), (3, 5));
        assert_eq!(Field::clamp(FIELD_W as isize, FIELD_H as isize), (15, 11));
    }

    #[test]
    fn test_decay_advances_one_stage_per_call() {
        let mut field = Field::new();
        field.set(0, 0, Cell::HeroExplosion);
        field.set(1, 0, Cell::Explosion);
        field.set(2, 0, Cell::Trash);

        field.decay_corpses();
        assert_eq!(field.get(0, 0), Cell::Explosion);
        assert_eq!(field.get(1, 0), Cell::Trash);
        assert_eq!(field.get(2, 0), Cell::Trash);

        field.decay_corpses();
        assert_eq!(field.get(0, 0), Cell::Trash);
    }

    #[test]
    fn test_decay_keeps_occupied_set() {
        let mut field = Field::new();
        field.set(4, 4, Cell::Explosion);
        field.set(5, 5, Cell::HeroExplosion);
        field.decay_corpses();
        field.decay_corpses();
        field.decay_corpses();
        assert_eq!(field.get(4, 4), Cell::Trash);
        assert_eq!(field.get(5, 5), Cell::Trash);
        assert_eq!(field.empty_cells(), FIELD_W * FIELD_H - 2);
    }

    #[test]
    fn test_normalize_converts_markers() {
        let mut field = Field::new();
        field.set(2, 3, Cell::MovedRobot);
        field.set(7, 9, Cell::MovedRobot);
        assert!(field.normalize_after_resolution().is_ok());
        assert_eq!(field.get(2, 3), Cell::Robot);
        assert_eq!(field.get(7, 9), Cell::Robot);
    }

    #[test]
    fn test_normalize_reports_and_recovers_stray_robot() {
        let mut field = Field::new();
        field.set(6, 1, Cell::MovedRobot);
        field.set(8, 2, Cell::Robot); // never visited by any phase
        let err = field.normalize_after_resolution();
        assert_eq!(err, Err(SimError::InvariantViolation { x: 8, y: 2 }));
        // both cells end up as live robots; the game remains playable
        assert_eq!(field.get(6, 1), Cell::Robot);
        assert_eq!(field.get(8, 2), Cell::Robot);
        assert_eq!(field.robots_remaining(), 2);
    }

    #[test]
    fn test_render_ascii_shape() {
        let mut field = Field::new();
        field.set_hero(0, 0);
        field.set(15, 11, Cell::Robot);
        let text = field.render_ascii();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), FIELD_H);
        assert!(rows.iter().all(|r| r.len() == FIELD_W));
        assert!(rows[0].starts_with('@'));
        assert!(rows[11].ends_with('R'));
    }
}
