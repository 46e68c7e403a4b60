//! Sky Hopper - a vertical platformer for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state machine)
//! - `levels`: Built-in level fixtures
//! - `besttimes`: Per-level and overall best times (LocalStorage)
//! - `settings`: Player preferences
//! - `renderer`: Canvas-2D drawing (wasm only)
//! - `audio`: Web Audio synthesized sound effects (wasm only)

pub mod besttimes;
pub mod levels;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod renderer;

pub use besttimes::BestTimes;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (physics constants are tuned for 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// World/canvas dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Jump impulse (negative = upward)
    pub const JUMP_POWER: f32 = -14.0;
    pub const STARTING_LIVES: i32 = 3;

    /// Physics tuning
    pub const GRAVITY: f32 = 0.5;
    /// Horizontal velocity multiplier when no direction is held
    pub const FRICTION: f32 = 0.8;

    /// The ground plane sits this far above the bottom of the level
    pub const GROUND_THICKNESS: f32 = 50.0;
    /// Falling this far below the level bottom kills the player
    pub const DEATH_MARGIN: f32 = 100.0;

    /// Scoring
    pub const COIN_SCORE: u32 = 100;
    pub const LEVEL_BONUS: u32 = 1000;
    pub const LIFE_BONUS: u32 = 500;
    /// Time bonus = max(0, TIME_BONUS_CUTOFF - floor(timer)) * TIME_BONUS_RATE
    pub const TIME_BONUS_CUTOFF: u32 = 120;
    pub const TIME_BONUS_RATE: u32 = 10;

    /// Countdowns (2 seconds at 60 Hz)
    pub const RESPAWN_DELAY_TICKS: u32 = 120;
    pub const LEVEL_COMPLETE_DELAY_TICKS: u32 = 120;

    /// Camera follow
    pub const CAMERA_SMOOTHING: f32 = 0.1;
    pub const CAMERA_DEADZONE: f32 = 100.0;

    /// Coin spin/pulse advance per tick
    pub const COIN_ANIMATION_RATE: f32 = 0.1;

    /// Best time reported for a level that was never finished
    pub const BEST_TIME_SENTINEL: f32 = 999.0;
}
