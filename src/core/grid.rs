//! Grid module - element storage and coordinate transforms
//!
//! The grid is a runtime-sized rows x columns field of elements stored in a
//! flat vector, row-major (index = row * columns + column), row 0 at the
//! bottom. The vector is always fully populated: removals flip elements to
//! inactive placeholders, they are never deleted. Pure storage and lookup;
//! falling, spawning and matching live in their own modules.

use crate::core::element::GridElement;
use crate::core::rng::SimpleRng;
use crate::types::{
    ElementColor, GridPos, Vec2, DEFAULT_CELL_SIZE, DEFAULT_COLUMN_COUNT, DEFAULT_MATCH_MINIMUM,
    DEFAULT_ROW_COUNT,
};

/// Grid geometry and matching parameters, fixed at construction
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub rows: usize,
    pub columns: usize,
    pub cell_size: f32,
    /// Smallest chain length that commits as a match
    pub match_minimum: usize,
    /// World position of the grid center
    pub center: Vec2,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROW_COUNT,
            columns: DEFAULT_COLUMN_COUNT,
            cell_size: DEFAULT_CELL_SIZE,
            match_minimum: DEFAULT_MATCH_MINIMUM,
            center: Vec2::ZERO,
        }
    }
}

/// The element grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridModel {
    rows: usize,
    columns: usize,
    cell_size: f32,
    match_minimum: usize,
    center: Vec2,
    /// Flat element storage, row-major (y * columns + x)
    elements: Vec<GridElement>,
}

impl GridModel {
    /// Create a grid with every cell filled by a random palette color
    pub fn generate(config: &GridConfig, rng: &mut SimpleRng) -> Self {
        let mut grid = Self {
            rows: config.rows,
            columns: config.columns,
            cell_size: config.cell_size,
            match_minimum: config.match_minimum,
            center: config.center,
            elements: Vec::with_capacity(config.rows * config.columns),
        };
        for y in 0..grid.rows {
            for x in 0..grid.columns {
                let position = grid.grid_to_world(GridPos::new(x as i32, y as i32));
                grid.elements.push(GridElement::new(rng.next_color(), position));
            }
        }
        grid
    }

    /// Create a grid from an explicit color layout (row-major, bottom row
    /// first). Returns None when the layout does not match the dimensions.
    pub fn with_colors(config: &GridConfig, colors: &[ElementColor]) -> Option<Self> {
        if colors.len() != config.rows * config.columns {
            return None;
        }
        let mut grid = Self {
            rows: config.rows,
            columns: config.columns,
            cell_size: config.cell_size,
            match_minimum: config.match_minimum,
            center: config.center,
            elements: Vec::with_capacity(colors.len()),
        };
        for (i, &color) in colors.iter().enumerate() {
            let pos = GridPos::new((i % grid.columns) as i32, (i / grid.columns) as i32);
            let position = grid.grid_to_world(pos);
            grid.elements.push(GridElement::new(color, position));
        }
        Some(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn match_minimum(&self) -> usize {
        self.match_minimum
    }

    /// All elements in index order
    pub fn elements(&self) -> &[GridElement] {
        &self.elements
    }

    /// Calculate flat index from grid coordinates
    /// Returns None if out of bounds
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.columns as i32 || y < 0 || y >= self.rows as i32 {
            return None;
        }
        Some((y as usize) * self.columns + (x as usize))
    }

    /// Get the element at grid coordinates
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<&GridElement> {
        self.index(x, y).map(|idx| &self.elements[idx])
    }

    /// Get the element at a flat index
    pub fn element(&self, index: usize) -> Option<&GridElement> {
        self.elements.get(index)
    }

    pub(crate) fn element_mut(&mut self, index: usize) -> Option<&mut GridElement> {
        self.elements.get_mut(index)
    }

    /// Whether the cell at `pos` holds an active element
    pub fn is_active(&self, pos: GridPos) -> bool {
        self.get(pos.x, pos.y).map(|e| e.is_spawned()).unwrap_or(false)
    }

    /// Grid coordinates for a flat index
    pub fn index_to_grid(&self, index: usize) -> Option<GridPos> {
        if index >= self.elements.len() {
            return None;
        }
        Some(GridPos::new(
            (index % self.columns) as i32,
            (index / self.columns) as i32,
        ))
    }

    /// Flat index for grid coordinates (same bounds policy as `index`)
    pub fn grid_to_index(&self, pos: GridPos) -> Option<usize> {
        self.index(pos.x, pos.y)
    }

    /// World position of the bottom-left cell center
    pub fn start_cell_position(&self) -> Vec2 {
        self.center
            - Vec2::new(
                self.cell_size * (self.columns as f32 - 1.0) / 2.0,
                self.cell_size * (self.rows as f32 - 1.0) / 2.0,
            )
    }

    /// World position of a cell center
    pub fn grid_to_world(&self, pos: GridPos) -> Vec2 {
        self.start_cell_position() + Vec2::new(pos.x as f32, pos.y as f32) * self.cell_size
    }

    /// Map a world position to the cell whose bounds contain it
    /// Returns None outside the grid
    pub fn world_to_grid(&self, world: Vec2) -> Option<GridPos> {
        let start = self.start_cell_position();
        let x = ((world.x - start.x) / self.cell_size).round() as i32;
        let y = ((world.y - start.y) / self.cell_size).round() as i32;
        self.index(x, y)?;

        // Inside the cell's half-size box; touches in the gaps outside the
        // grid never hit
        let pos = GridPos::new(x, y);
        let center = self.grid_to_world(pos);
        let half = self.cell_size / 2.0;
        if (world.x - center.x).abs() <= half && (world.y - center.y).abs() <= half {
            Some(pos)
        } else {
            None
        }
    }

    /// Exchange two slots in O(1) without animating
    /// Returns false (no-op) if either coordinate is out of bounds
    pub(crate) fn swap(&mut self, a: GridPos, b: GridPos) -> bool {
        let (Some(ia), Some(ib)) = (self.grid_to_index(a), self.grid_to_index(b)) else {
            return false;
        };
        self.elements.swap(ia, ib);
        debug_assert_eq!(self.elements.len(), self.rows * self.columns);
        true
    }

    /// Advance all element animations by `dt` seconds.
    /// The turn engine drives this once per frame.
    pub fn advance_animations(&mut self, dt: f32) {
        for element in &mut self.elements {
            element.advance(dt);
        }
    }

    /// Stabilized predicate: no element is both spawned and mid-fall
    pub fn is_settled(&self) -> bool {
        !self
            .elements
            .iter()
            .any(|e| e.is_spawned() && e.is_moving())
    }
}
