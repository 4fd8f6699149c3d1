//! Core module - grid resolution logic with no I/O dependencies
//!
//! Everything needed to run a session lives here: the grid model, the
//! selection machine, gravity, the spawn lifecycle, power-ups, scoring
//! and the turn engine that drives them.

pub mod element;
pub mod gravity;
pub mod grid;
pub mod powerup;
pub mod rng;
pub mod scoring;
pub mod selection;
pub mod spawning;
pub mod turn;

// Re-export commonly used types
pub use element::GridElement;
pub use gravity::{has_falling_elements, GravityResolver};
pub use grid::{GridConfig, GridModel};
pub use powerup::{
    default_rules, AreaClearEffect, EffectRegistry, PowerUpEffect, PowerUpResolver, PowerUpRule,
    SweepEffect,
};
pub use rng::SimpleRng;
pub use scoring::match_score;
pub use selection::{
    selection_center, selection_origin, selection_positions, SelectionController, SelectionOutcome,
};
pub use spawning::{DespawnReceipt, SpawnController};
pub use turn::{TurnEngine, TurnState};
