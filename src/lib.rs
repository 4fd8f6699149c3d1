//! Deterministic match-chain puzzle engine.
//!
//! An 8x8 grid of colored elements, a drag-to-select chain mechanic with
//! backtracking, gravity-driven cascades, refills and rule-based power-ups,
//! resolved turn by turn until the move budget runs out. The engine is
//! frame-stepped and fully deterministic for a given seed and input
//! sequence, so whole sessions can be replayed in tests.
//!
//! The usual entry point is [`core::TurnEngine`]: feed it one pointer
//! sample per frame and watch the outbound [`events::GameEvent`] channel.

pub mod config;
pub mod core;
pub mod events;
pub mod highscore;
pub mod types;

pub use config::{ConfigError, GameConfig, Tunables};
pub use core::{GridConfig, GridModel, PowerUpResolver, SimpleRng, TurnEngine};
pub use events::{EventBus, GameEvent};
pub use types::{ElementColor, GamePhase, GridPos, Pointer, Vec2};
