//! Level-start placement
//!
//! Scatters the hero and the level's robots onto distinct empty cells.
//! Rejection sampling is bounded; a field too full to place into surfaces
//! [`SimError::Capacity`] instead of spinning.

use super::error::SimError;
use super::field::{Cell, Field};
use super::rng::FieldRng;
use crate::consts::{FIELD_H, FIELD_W, MAX_PLACEMENT_ATTEMPTS};

/// Clear the field and place the hero plus `robot_count` robots at uniform
/// random cells. On error the field is left untouched.
pub(crate) fn place_entities(
    field: &mut Field,
    rng: &mut FieldRng,
    robot_count: usize,
) -> Result<(), SimError> {
    // One cell is the hero's.
    let capacity = FIELD_W * FIELD_H - 1;
    if robot_count > capacity {
        return Err(SimError::Capacity {
            requested: robot_count,
            available: capacity,
        });
    }

    field.clear();
    let hx = rng.next_inclusive(FIELD_W - 1);
    let hy = rng.next_inclusive(FIELD_H - 1);
    field.set_hero(hx, hy);

    for _ in 0..robot_count {
        let mut placed = false;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let x = rng.next_inclusive(FIELD_W - 1);
            let y = rng.next_inclusive(FIELD_H - 1);
            if field.get(x, y).is_empty() {
                field.set(x, y, Cell::Robot);
                placed = true;
                break;
            }
        }
        if !placed {
            // Statistically unreachable given the capacity check, but the
            // retry loop must terminate either way.
            return Err(SimError::Capacity {
                requested: robot_count,
                available: field.empty_cells(),
            });
        }
    }
    Ok(())
}
