//! Core types shared across the engine
//! This module contains pure data types with no external dependencies

/// Grid dimensions (rows x columns)
pub const DEFAULT_ROW_COUNT: usize = 8;
pub const DEFAULT_COLUMN_COUNT: usize = 8;

/// World-space edge length of a single cell
pub const DEFAULT_CELL_SIZE: f32 = 1.0;

/// Smallest chain length that commits as a match
pub const DEFAULT_MATCH_MINIMUM: usize = 3;

/// Move budget for a fresh game
pub const DEFAULT_MOVES_AVAILABLE: u32 = 20;

/// Chain reach: a new element must lie within this factor times the cell
/// size of the last selected element (Euclidean, so diagonals are in reach)
pub const SELECTION_REACH_FACTOR: f32 = 1.5;

/// Re-touching the element this many steps back in the chain pops the last
/// selection entry (the backtrack gesture)
pub const BACKTRACK_STEP: usize = 2;

/// Fixed timestep used by the demo driver (seconds)
pub const TICK_SECONDS: f32 = 0.016;

/// Element colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementColor {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
}

impl ElementColor {
    /// The full palette, in draw order
    pub const ALL: [ElementColor; 5] = [
        ElementColor::Red,
        ElementColor::Green,
        ElementColor::Blue,
        ElementColor::Yellow,
        ElementColor::Purple,
    ];

    /// Parse color from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(ElementColor::Red),
            "green" => Some(ElementColor::Green),
            "blue" => Some(ElementColor::Blue),
            "yellow" => Some(ElementColor::Yellow),
            "purple" => Some(ElementColor::Purple),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementColor::Red => "red",
            ElementColor::Green => "green",
            ElementColor::Blue => "blue",
            ElementColor::Yellow => "yellow",
            ElementColor::Purple => "purple",
        }
    }
}

/// Grid coordinate (x = column, y = row; row 0 is the bottom row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// World-space position or offset
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation between two points, t clamped to [0, 1]
    pub fn lerp(from: Vec2, to: Vec2, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        Vec2 {
            x: from.x + (to.x - from.x) * t,
            y: from.y + (to.y - from.y) * t,
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Per-tick pointer sample fed to the selection machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pointer {
    /// No contact this tick
    Up,
    /// Contact at a world position
    Down(Vec2),
}

/// Turn phases driven by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Gathering pointer input until a chain commits
    WaitingForInput,
    /// Despawning the committed chain or executing a power-up
    Resolving,
    /// Gravity and refill until the grid is stable again
    Cascading,
    /// Move budget spent; input is ignored
    MovesExhausted,
}

impl GamePhase {
    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::WaitingForInput => "waitingForInput",
            GamePhase::Resolving => "resolving",
            GamePhase::Cascading => "cascading",
            GamePhase::MovesExhausted => "movesExhausted",
        }
    }
}

/// Power-up effect kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Clear the origin's full row plus its full column
    RowColumnSweep,
    /// Clear the 3x3 neighborhood around the origin
    AreaClear,
}

impl EffectKind {
    /// Parse effect kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rowcolumnsweep" => Some(EffectKind::RowColumnSweep),
            "areaclear" => Some(EffectKind::AreaClear),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::RowColumnSweep => "rowColumnSweep",
            EffectKind::AreaClear => "areaClear",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_string_roundtrip() {
        for color in ElementColor::ALL {
            assert_eq!(ElementColor::from_str(color.as_str()), Some(color));
        }
        assert_eq!(ElementColor::from_str("magenta"), None);
    }

    #[test]
    fn test_vec2_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn test_vec2_lerp_clamps() {
        let from = Vec2::new(0.0, 0.0);
        let to = Vec2::new(2.0, 0.0);
        assert_eq!(Vec2::lerp(from, to, 0.5), Vec2::new(1.0, 0.0));
        assert_eq!(Vec2::lerp(from, to, -1.0), from);
        assert_eq!(Vec2::lerp(from, to, 7.0), to);
    }

    #[test]
    fn test_effect_kind_string_roundtrip() {
        assert_eq!(
            EffectKind::from_str("rowColumnSweep"),
            Some(EffectKind::RowColumnSweep)
        );
        assert_eq!(EffectKind::from_str("areaclear"), Some(EffectKind::AreaClear));
        assert_eq!(EffectKind::from_str("nuke"), None);
    }
}
