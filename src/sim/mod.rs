//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The host drives it by filling a [`TickInput`] snapshot from event handlers
//! and calling [`tick`] once per fixed step.

pub mod collision;
pub mod physics;
pub mod rect;
pub mod state;
pub mod tick;

pub use rect::Rect;
pub use state::{
    Camera, Coin, GameEvent, GamePhase, GameState, GameStats, Goal, MovePath, MovingPlatform,
    Particle, Platform, Player,
};
pub use tick::{TickInput, tick};
