//! Game state and core simulation types
//!
//! Everything the simulation mutates lives here; `tick` drives it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::besttimes::BestTimes;
use crate::consts::*;
use crate::levels::{self, LevelData};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player died, waiting out the respawn countdown
    Dead,
    /// No lives left
    GameOver,
    /// Goal reached, waiting out the countdown before the next level
    LevelComplete,
    /// Final level cleared
    Won,
}

/// Discrete events the core emits for audio/persistence collaborators.
/// Fire-and-forget: the sim never waits on a consumer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Jump,
    CoinCollected,
    Death,
    GoalReached,
    LevelComplete,
    /// A per-level best time was beaten
    LevelRecord { level: usize, time: f32 },
    /// The overall best time was beaten
    GlobalRecord { time: f32 },
}

/// The player-controlled actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub vel: Vec2,
    /// Horizontal movement speed while a direction is held
    pub speed: f32,
    /// Jump impulse (negative = upward)
    pub jump_power: f32,
    /// True iff the previous resolution placed the actor atop a surface
    pub grounded: bool,
    pub lives: i32,
    /// Where the player reappears after death
    pub respawn: Vec2,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, PLAYER_SIZE, PLAYER_SIZE),
            vel: Vec2::ZERO,
            speed: PLAYER_SPEED,
            jump_power: JUMP_POWER,
            grounded: false,
            lives: STARTING_LIVES,
            respawn: Vec2::new(x, y),
        }
    }

    /// Move to a point and zero all motion (level load, respawn)
    pub fn place_at(&mut self, pos: Vec2) {
        self.rect.x = pos.x;
        self.rect.y = pos.y;
        self.vel = Vec2::ZERO;
        self.grounded = false;
    }
}

/// A static platform - immutable after level load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    /// 0xRRGGBB fill color for the renderer
    pub color: u32,
}

/// Oscillation axis and range for a moving platform
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum MovePath {
    Horizontal { start: f32, end: f32 },
    Vertical { start: f32, end: f32 },
}

/// A platform that oscillates linearly between two endpoints along one axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingPlatform {
    pub rect: Rect,
    pub color: u32,
    pub path: MovePath,
    /// Distance moved per tick
    pub speed: f32,
    /// +1 or -1, flips exactly at a range endpoint
    pub direction: f32,
}

impl MovingPlatform {
    /// Advance one tick along the path. Position is clamped to the endpoint
    /// on flip, never overshoots. A zero-length range stays pinned while the
    /// direction keeps flipping.
    pub fn advance(&mut self) {
        match self.path {
            MovePath::Horizontal { start, end } => {
                self.rect.x += self.speed * self.direction;
                if self.rect.x <= start {
                    self.rect.x = start;
                    self.direction = 1.0;
                } else if self.rect.x >= end {
                    self.rect.x = end;
                    self.direction = -1.0;
                }
            }
            MovePath::Vertical { start, end } => {
                self.rect.y += self.speed * self.direction;
                if self.rect.y <= start {
                    self.rect.y = start;
                    self.direction = 1.0;
                } else if self.rect.y >= end {
                    self.rect.y = end;
                    self.direction = -1.0;
                }
            }
        }
    }

    /// Per-tick displacement imparted to a rider along the movement axis
    pub fn frame_displacement(&self) -> Vec2 {
        let d = self.speed * self.direction;
        match self.path {
            MovePath::Horizontal { .. } => Vec2::new(d, 0.0),
            MovePath::Vertical { .. } => Vec2::new(0.0, d),
        }
    }
}

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub rect: Rect,
    /// Monotonic false -> true, never reverts within a level
    pub collected: bool,
    /// Spin/pulse phase, wraps implicitly via trig in the renderer
    pub animation: f32,
}

/// The level exit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub rect: Rect,
    pub color: u32,
}

/// Vertical scroll camera with exponential smoothing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub y: f32,
    pub target_y: f32,
    /// Smoothing factor in (0, 1]
    pub smoothing: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            y: 0.0,
            target_y: 0.0,
            smoothing: CAMERA_SMOOTHING,
        }
    }

    /// Retarget when the player leaves the vertical dead zone, then converge.
    /// Never teleports.
    pub fn follow(&mut self, player_y: f32, level_height: f32) {
        let middle = VIEW_HEIGHT / 2.0;
        let screen_y = player_y - self.y;

        if screen_y < middle - CAMERA_DEADZONE {
            self.target_y = player_y - (middle - CAMERA_DEADZONE);
        } else if screen_y > middle + CAMERA_DEADZONE {
            self.target_y = player_y - (middle + CAMERA_DEADZONE);
        }

        let max_scroll = (level_height - VIEW_HEIGHT).max(0.0);
        self.target_y = self.target_y.max(0.0).min(max_scroll);
        self.y += (self.target_y - self.y) * self.smoothing;
    }

    pub fn reset(&mut self) {
        self.y = 0.0;
        self.target_y = 0.0;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Session bookkeeping across levels
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStats {
    /// Run timer in seconds; frozen once the run is fully completed
    pub timer: f32,
    pub score: u32,
    /// Coins collected in the current level
    pub coins_collected: u32,
    pub deaths: u32,
    pub current_level: usize,
    pub levels_completed: u32,
}

/// A particle for visual effects (not gameplay-affecting)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0xRRGGBB
    pub color: u32,
    /// 1.0 at spawn, dead at 0
    pub life: f32,
    pub size: f32,
}

const JUMP_PARTICLE_COLOR: u32 = 0xAED6F1;
const COIN_PARTICLE_COLOR: u32 = 0xF1C40F;
const DEATH_PARTICLE_COLOR: u32 = 0xE74C3C;

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducible particle scatter
    pub seed: u64,
    pub phase: GamePhase,
    pub current_level: usize,
    pub level_name: String,
    pub level_height: f32,
    /// Top of the ground plane for the current level
    pub ground_y: f32,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub moving_platforms: Vec<MovingPlatform>,
    pub coins: Vec<Coin>,
    pub goal: Goal,
    pub camera: Camera,
    pub stats: GameStats,
    /// Best times for this browser/profile; host loads and persists these
    pub best_times: BestTimes,
    /// True from goal touch until the next run starts (drives overlays)
    pub has_won: bool,
    /// Timer freeze flag, set when the final goal is reached
    pub game_completed: bool,
    /// Respawn countdown, armed on death
    pub death_timer: u32,
    /// Next-level countdown, armed on goal touch
    pub level_complete_timer: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Visual particles
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Events emitted since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Create a fresh session and load the first level
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            phase: GamePhase::Playing,
            current_level: 0,
            level_name: String::new(),
            level_height: VIEW_HEIGHT,
            ground_y: VIEW_HEIGHT - GROUND_THICKNESS,
            player: Player::new(0.0, 0.0),
            platforms: Vec::new(),
            moving_platforms: Vec::new(),
            coins: Vec::new(),
            goal: Goal {
                rect: Rect::new(0.0, 0.0, 0.0, 0.0),
                color: 0,
            },
            camera: Camera::new(),
            stats: GameStats::default(),
            best_times: BestTimes::new(levels::level_count()),
            has_won: false,
            game_completed: false,
            death_timer: 0,
            level_complete_timer: 0,
            time_ticks: 0,
            particles: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.load_level(0);
        state
    }

    /// Load a level by index. An out-of-range index means "no more levels"
    /// and enters `Won` rather than failing.
    pub fn load_level(&mut self, index: usize) {
        let Some(level) = levels::load(index) else {
            self.phase = GamePhase::Won;
            self.has_won = true;
            self.game_completed = true;
            return;
        };
        self.load_level_data(index, level);
    }

    /// Copy an immutable level template into live mutable state
    pub fn load_level_data(&mut self, index: usize, level: LevelData) {
        self.current_level = index;
        self.stats.current_level = index;

        self.platforms = level.platforms;
        self.moving_platforms = level.moving_platforms;
        self.coins = level.coins;
        self.goal = level.goal;
        self.level_name = level.name.to_string();
        self.level_height = level.level_height;
        self.ground_y = level.level_height - GROUND_THICKNESS;

        self.player.place_at(level.player_start);
        self.player.respawn = level.player_start;

        self.camera.reset();
        self.particles.clear();

        // Per-level stats
        self.stats.coins_collected = 0;
        self.stats.timer = 0.0;
        self.phase = GamePhase::Playing;

        log::info!("Loaded level {}: {}", index + 1, self.level_name);
    }

    /// Full session reset (lives, stats, level 0). Best times survive.
    pub fn reset(&mut self) {
        self.player.lives = STARTING_LIVES;
        self.has_won = false;
        self.game_completed = false;
        self.death_timer = 0;
        self.level_complete_timer = 0;
        self.stats = GameStats::default();
        self.load_level(0);
    }

    /// Return the player to the recorded respawn anchor
    pub fn respawn_player(&mut self) {
        self.player.place_at(self.player.respawn);
        self.camera.reset();
        self.phase = GamePhase::Playing;
    }

    /// Advance past the current level after the completion countdown
    pub fn next_level(&mut self) {
        self.stats.levels_completed += 1;
        self.stats.score += LEVEL_BONUS;

        if self.current_level + 1 >= levels::level_count() {
            self.phase = GamePhase::Won;
            self.has_won = true;
            self.game_completed = true;
        } else {
            self.has_won = false;
            self.load_level(self.current_level + 1);
        }
    }

    /// Drain events accumulated since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Particle bursts ===

    pub fn spawn_jump_particles(&mut self, pos: Vec2) {
        for _ in 0..8 {
            let vel = Vec2::new(
                self.rng.random_range(-2.0..2.0),
                self.rng.random_range(-2.0..0.0),
            );
            self.particles.push(Particle {
                pos,
                vel,
                color: JUMP_PARTICLE_COLOR,
                life: 1.0,
                size: self.rng.random_range(2.0..6.0),
            });
        }
    }

    pub fn spawn_coin_particles(&mut self, pos: Vec2) {
        for _ in 0..6 {
            let vel = Vec2::new(
                self.rng.random_range(-3.0..3.0),
                self.rng.random_range(-3.0..3.0),
            );
            self.particles.push(Particle {
                pos,
                vel,
                color: COIN_PARTICLE_COLOR,
                life: 1.0,
                size: self.rng.random_range(2.0..5.0),
            });
        }
    }

    pub fn spawn_death_particles(&mut self, pos: Vec2) {
        for _ in 0..12 {
            let vel = Vec2::new(
                self.rng.random_range(-4.0..4.0),
                self.rng.random_range(-4.0..4.0),
            );
            self.particles.push(Particle {
                pos,
                vel,
                color: DEATH_PARTICLE_COLOR,
                life: 1.0,
                size: self.rng.random_range(3.0..8.0),
            });
        }
    }

    /// Integrate and cull particles (gravity, drag, fade)
    pub fn update_particles(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.y += 0.2;
            p.vel.x *= 0.98;
            p.life -= 0.02;
            p.size *= 0.98;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}
