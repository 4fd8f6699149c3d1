//! Element lifecycle: scale-out on despawn, recolor and scale-in on respawn.
//!
//! Despawned elements are never removed from the grid. They shrink out,
//! go inactive when the scale-out completes, ride gravity swaps as
//! placeholders, and come back as new elements the next time the grid
//! refills.

use crate::config::Tunables;
use crate::types::Vec2;

use super::grid::GridModel;
use super::rng::SimpleRng;

/// What a despawn request actually touched.
///
/// Slots that were inactive or listed twice are dropped, so `slots.len()`
/// is the valid count the caller should report once the scale-out ends.
#[derive(Debug, Clone, PartialEq)]
pub struct DespawnReceipt {
    /// Slots whose scale-out started, in request order.
    pub slots: Vec<usize>,
    /// World positions of those elements when the scale-out started.
    pub positions: Vec<Vec2>,
}

impl DespawnReceipt {
    pub fn count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Runs spawn and despawn animations with construction-time settings.
#[derive(Debug, Clone, Copy)]
pub struct SpawnController {
    spawn_start_scale: f32,
    spawn_duration: f32,
    despawn_end_scale: f32,
    despawn_duration: f32,
}

impl SpawnController {
    pub fn new(tunables: &Tunables) -> Self {
        let tunables = tunables.clamped();
        Self {
            spawn_start_scale: tunables.spawn_start_scale,
            spawn_duration: tunables.spawn_duration,
            despawn_end_scale: tunables.despawn_end_scale,
            despawn_duration: tunables.despawn_duration,
        }
    }

    /// Seconds a scale-in runs.
    pub fn spawn_duration(&self) -> f32 {
        self.spawn_duration
    }

    /// Seconds a scale-out runs before the element goes inactive.
    pub fn despawn_duration(&self) -> f32 {
        self.despawn_duration
    }

    /// Starts scale-outs for the spawned elements among `slots`.
    ///
    /// Duplicates and inactive slots are filtered out. The elements stay
    /// active while they shrink; they go inactive when the animation
    /// completes.
    pub fn begin_despawn(&self, grid: &mut GridModel, slots: &[usize]) -> DespawnReceipt {
        let mut receipt = DespawnReceipt {
            slots: Vec::new(),
            positions: Vec::new(),
        };
        for &slot in slots {
            if receipt.slots.contains(&slot) {
                continue;
            }
            let Some(element) = grid.element_mut(slot) else {
                continue;
            };
            if !element.is_spawned() {
                continue;
            }
            let position = element.position();
            element.begin_despawn(self.despawn_end_scale, self.despawn_duration);
            receipt.slots.push(slot);
            receipt.positions.push(position);
        }
        receipt
    }

    /// Refills every inactive cell with a freshly colored element.
    ///
    /// Each refilled element snaps to its cell and scales in from the
    /// spawn start scale. Colors are drawn in row-major slot order, so a
    /// given rng state always produces the same refill. Returns true when
    /// at least one cell was refilled.
    pub fn respawn(&self, grid: &mut GridModel, rng: &mut SimpleRng) -> bool {
        let mut refilled = false;
        for slot in 0..grid.elements().len() {
            if grid.elements()[slot].is_spawned() {
                continue;
            }
            let Some(pos) = grid.index_to_grid(slot) else {
                continue;
            };
            let home = grid.grid_to_world(pos);
            let color = rng.next_color();
            if let Some(element) = grid.element_mut(slot) {
                element.set_color(color);
                element.teleport(home);
                element.begin_spawn(self.spawn_start_scale, self.spawn_duration);
            }
            refilled = true;
        }
        refilled
    }
}
