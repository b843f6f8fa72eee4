//! Rect Arcade - small rectangle-based arcade games on one simulation core
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (entities, collisions, world state)
//! - `game`: The loop driving a world through the platform collaborators
//! - `platform`: Display/Media/Clock traits plus headless implementations
//! - `renderer`: Layered draw pass over the Display
//! - `audio`: Event-to-sound mapping over the Media collaborator
//! - `settings`: User preferences (JSON)

pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, PlatformError};
pub use game::{Game, SessionSummary};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Target tick rate shared by every variant
    pub const SIM_FPS: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_FPS as f32;

    /// Brick-breaker and tennis play field
    pub const PADDLE_FIELD_WIDTH: f32 = 800.0;
    pub const PADDLE_FIELD_HEIGHT: f32 = 640.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 10.0;

    /// Ball defaults (per-tick velocities)
    pub const BALL_SIZE: f32 = 20.0;
    pub const BALL_START_SPEED: f32 = 5.0;
    /// Horizontal speed imparted by a moving paddle
    pub const BALL_ENGLISH_SPEED: f32 = 2.0;

    /// Brick defaults
    pub const BRICK_WIDTH: f32 = 80.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    /// Horizontal pitch between bricks in a row (2px mortar)
    pub const BRICK_PITCH: f32 = 82.0;

    /// Side-scroller play field
    pub const SCROLLER_FIELD_WIDTH: f32 = 600.0;
    pub const SCROLLER_FIELD_HEIGHT: f32 = 640.0;

    /// Bird (gravity ball) defaults
    pub const BIRD_WIDTH: f32 = 54.0;
    pub const BIRD_HEIGHT: f32 = 44.0;
    pub const GRAVITY_STEP: f32 = 0.5;
    pub const FALL_SPEED_LIMIT: f32 = 30.0;
    pub const JUMP_VELOCITY: f32 = -10.0;

    /// Obstacles scroll left at this many units per tick
    pub const SCROLL_SPEED: f32 = 2.0;
    pub const PIPE_WIDTH: f32 = 52.0;
    pub const PIPE_HEIGHT: f32 = 320.0;
    /// Distance used to place pipes relative to the field edges
    pub const PIPE_BACKSPACE: f32 = 350.0;
    pub const FLOOR_WIDTH: f32 = 336.0;
    pub const FLOOR_HEIGHT: f32 = 112.0;

    /// Highest score the single-digit counter shows
    pub const SCORE_WRAP: u32 = 9;
}
