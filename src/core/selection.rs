//! Drag-to-select chain building with single-step backtracking.
//!
//! A chain starts on the first element touched while the pointer is held;
//! that element's color anchors the rest of the chain. Further elements
//! join when they match the anchor color and sit within reach of the chain
//! head. Dragging back onto the second-to-last element pops the head, so a
//! player can undo one step at a time without lifting the pointer.

use crate::events::{EventBus, GameEvent};
use crate::types::{ElementColor, GridPos, Pointer, Vec2, BACKTRACK_STEP, SELECTION_REACH_FACTOR};

use super::grid::GridModel;

/// What a pointer frame did to the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// No release this frame; the chain (possibly empty) is still open.
    Pending,
    /// Released with enough elements for a match. Slots are in selection order.
    Committed(Vec<usize>),
    /// Released below the match minimum; the chain was discarded.
    Cancelled,
}

/// Tracks the chain of element slots the player is dragging over.
#[derive(Debug, Default)]
pub struct SelectionController {
    selected: Vec<usize>,
    anchor: Option<ElementColor>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slots currently in the chain, in the order they were selected.
    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    /// Color the chain is locked to, set by its first element.
    pub fn anchor(&self) -> Option<ElementColor> {
        self.anchor
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Feeds one pointer frame into the chain.
    ///
    /// Held pointers try to extend or backtrack the chain at the touched
    /// cell; a release closes the chain and reports whether it met the
    /// grid's match minimum. Touches outside the grid, on empty space, or
    /// on inactive cells leave the chain untouched.
    pub fn handle_pointer(
        &mut self,
        pointer: Pointer,
        grid: &GridModel,
        events: &mut EventBus,
    ) -> SelectionOutcome {
        match pointer {
            Pointer::Down(world) => {
                self.try_select(world, grid, events);
                SelectionOutcome::Pending
            }
            Pointer::Up => self.end_selection(grid, events),
        }
    }

    /// Drops the chain without committing it.
    pub fn clear(&mut self, events: &mut EventBus) {
        if self.selected.is_empty() && self.anchor.is_none() {
            return;
        }
        self.selected.clear();
        self.anchor = None;
        events.publish(GameEvent::SelectionChanged { count: 0 });
    }

    fn try_select(&mut self, world: Vec2, grid: &GridModel, events: &mut EventBus) {
        let Some(pos) = grid.world_to_grid(world) else {
            return;
        };
        let Some(slot) = grid.grid_to_index(pos) else {
            return;
        };
        let Some(element) = grid.element(slot) else {
            return;
        };
        if !element.is_spawned() {
            return;
        }

        if self.selected.contains(&slot) {
            // Re-touching the second-to-last element undoes the last step.
            if self.selected.len() >= BACKTRACK_STEP
                && self.selected[self.selected.len() - BACKTRACK_STEP] == slot
            {
                self.selected.pop();
                events.publish(GameEvent::SelectionChanged {
                    count: self.selected.len(),
                });
            }
            return;
        }

        let Some(&last) = self.selected.last() else {
            self.selected.push(slot);
            self.anchor = Some(element.color());
            events.publish(GameEvent::SelectionChanged { count: 1 });
            return;
        };

        if self.anchor != Some(element.color()) {
            return;
        }
        let Some(head) = grid.element(last) else {
            return;
        };
        let reach = SELECTION_REACH_FACTOR * grid.cell_size();
        if element.position().distance(head.position()) >= reach {
            return;
        }

        self.selected.push(slot);
        events.publish(GameEvent::SelectionChanged {
            count: self.selected.len(),
        });
    }

    fn end_selection(&mut self, grid: &GridModel, events: &mut EventBus) -> SelectionOutcome {
        if self.selected.is_empty() {
            return SelectionOutcome::Pending;
        }
        if self.selected.len() >= grid.match_minimum() {
            let chain = std::mem::take(&mut self.selected);
            self.anchor = None;
            events.publish(GameEvent::SelectionChanged { count: 0 });
            return SelectionOutcome::Committed(chain);
        }
        self.clear(events);
        SelectionOutcome::Cancelled
    }
}

/// World positions of the given element slots, skipping out-of-range slots.
pub fn selection_positions(grid: &GridModel, slots: &[usize]) -> Vec<Vec2> {
    slots
        .iter()
        .filter_map(|&slot| grid.element(slot).map(|e| e.position()))
        .collect()
}

/// World-space centroid of the given element slots. None when empty.
pub fn selection_center(grid: &GridModel, slots: &[usize]) -> Option<Vec2> {
    let positions = selection_positions(grid, slots);
    if positions.is_empty() {
        return None;
    }
    let sum = positions
        .iter()
        .fold(Vec2::ZERO, |acc, &p| Vec2::new(acc.x + p.x, acc.y + p.y));
    let n = positions.len() as f32;
    Some(Vec2::new(sum.x / n, sum.y / n))
}

/// Grid position of the chain's first element, used as a power-up origin.
pub fn selection_origin(grid: &GridModel, slots: &[usize]) -> Option<GridPos> {
    slots.first().and_then(|&slot| grid.index_to_grid(slot))
}
