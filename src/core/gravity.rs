//! Column gravity: inactive cells pull the nearest resting element down.
//!
//! A pass scans bottom-to-top, left-to-right. Each inactive cell looks up
//! its column for the first spawned, non-moving element, swaps slots with
//! it immediately, and starts that element's fall animation. Because the
//! slot swap happens inside the scan, later rows of the same pass see the
//! updated layout, so one pass compacts an entire column of gaps.

use crate::config::Tunables;
use crate::types::GridPos;

use super::grid::GridModel;

/// Starts fall animations for elements with empty cells beneath them.
#[derive(Debug, Clone, Copy)]
pub struct GravityResolver {
    move_duration: f32,
    gravity_multiplier: f32,
    snap_threshold: f32,
    check_interval: f32,
}

impl GravityResolver {
    pub fn new(tunables: &Tunables) -> Self {
        let tunables = tunables.clamped();
        Self {
            move_duration: tunables.element_move_duration,
            gravity_multiplier: tunables.gravity_multiplier,
            snap_threshold: tunables.position_update_threshold,
            check_interval: tunables.movement_check_interval,
        }
    }

    /// Seconds a single fall animation takes.
    pub fn fall_duration(&self) -> f32 {
        self.move_duration / self.gravity_multiplier
    }

    /// Seconds between settle polls while elements are airborne.
    pub fn check_interval(&self) -> f32 {
        self.check_interval
    }

    /// Runs one gravity pass. Returns true when any element started moving.
    pub fn move_pass(&self, grid: &mut GridModel) -> bool {
        let rows = grid.rows() as i32;
        let columns = grid.columns() as i32;
        let mut moved = false;

        for y in 0..rows {
            for x in 0..columns {
                let Some(slot) = grid.index(x, y) else {
                    continue;
                };
                if grid.elements()[slot].is_spawned() {
                    continue;
                }

                for y_above in (y + 1)..rows {
                    let Some(above) = grid.index(x, y_above) else {
                        break;
                    };
                    let candidate = &grid.elements()[above];
                    if !candidate.is_spawned() || candidate.is_moving() {
                        continue;
                    }

                    let vacated = grid.grid_to_world(GridPos::new(x, y_above));
                    let target = grid.grid_to_world(GridPos::new(x, y));
                    if grid.swap(GridPos::new(x, y), GridPos::new(x, y_above)) {
                        if let Some(placeholder) = grid.element_mut(above) {
                            placeholder.teleport(vacated);
                        }
                        if let Some(faller) = grid.element_mut(slot) {
                            faller.begin_move(target, self.fall_duration(), self.snap_threshold);
                        }
                        moved = true;
                    }
                    break;
                }
            }
        }
        moved
    }
}

/// True when a resting element still has an empty cell directly beneath it.
///
/// Used after a settle to decide whether another gravity pass is needed;
/// the bottom row can never fall further, so the scan starts at row 1.
pub fn has_falling_elements(grid: &GridModel) -> bool {
    let rows = grid.rows() as i32;
    let columns = grid.columns() as i32;

    for y in 1..rows {
        for x in 0..columns {
            let Some(element) = grid.get(x, y) else {
                continue;
            };
            if !element.is_spawned() || element.is_moving() {
                continue;
            }
            if let Some(below) = grid.get(x, y - 1) {
                if !below.is_spawned() {
                    return true;
                }
            }
        }
    }
    false
}
