//! Frog Rage - a platformer that gets angrier every time you fall
//!
//! Core modules:
//! - `sim`: Simulation core (physics, collisions, progression, ghosts, game state)
//! - `platform`: Browser/native platform abstraction (input, storage, time)
//! - `persistence`: High score and unlocked skins across sessions
//! - `settings`: Audio preferences, stored separately from progression
//! - `audio`: Sound cue playback
//! - `session`: Host-facing owner of one running game

pub mod audio;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{Session, Snapshot, UiCommand};
pub use settings::{Settings, SettingsCommand};

/// Game configuration constants
///
/// Units are pixels and ticks; one tick is one display refresh.
pub mod consts {
    /// Frog bounding box
    pub const FROG_WIDTH: f32 = 30.0;
    pub const FROG_HEIGHT: f32 = 40.0;
    /// Where the frog appears at the start of every attempt
    pub const FROG_SPAWN_X: f32 = 100.0;
    pub const FROG_SPAWN_Y: f32 = 400.0;

    /// Downward acceleration applied every tick
    pub const GRAVITY: f32 = 0.5;
    /// Horizontal acceleration per held direction
    pub const MOVE_ACCEL: f32 = 0.8;
    pub const RAGE_MOVE_ACCEL: f32 = 1.5;
    /// Horizontal damping factors
    pub const FRICTION: f32 = 0.95;
    pub const RAIN_FRICTION: f32 = 0.97;
    /// Gusts: sin(now_ms / period) * amplitude
    pub const WIND_PERIOD_MS: f64 = 1000.0;
    pub const WIND_AMPLITUDE: f32 = 0.3;
    pub const STORM_PERIOD_MS: f64 = 500.0;
    pub const STORM_AMPLITUDE: f32 = 0.7;

    /// Vertical velocity after touching a bouncy platform
    pub const BOUNCE_VELOCITY: f32 = -15.0;
    /// Jump impulse
    pub const JUMP_VELOCITY: f32 = -12.0;
    pub const RAGE_JUMP_VELOCITY: f32 = -15.0;
    /// Random horizontal nudge on jump, drawn from [-n, n)
    pub const JUMP_NUDGE: f32 = 2.0;
    pub const RAGE_JUMP_NUDGE: f32 = 5.0;

    /// Falling below this line ends the attempt
    pub const DEATH_LINE_Y: f32 = 600.0;
    /// Frog bottom may sit this far below the goal surface and still count
    pub const GOAL_LANDING_TOLERANCE: f32 = 10.0;

    /// Platform layout
    pub const START_PLATFORM_X: f32 = 50.0;
    pub const START_PLATFORM_WIDTH: f32 = 150.0;
    pub const GOAL_PLATFORM_WIDTH: f32 = 150.0;
    pub const GOAL_EXTRA_DISTANCE: f32 = 200.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const PLATFORM_BASE_WIDTH: f32 = 100.0;
    pub const PLATFORM_WIDTH_SHRINK_PER_LEVEL: f32 = 2.0;
    pub const PLATFORM_MIN_WIDTH: f32 = 30.0;
    /// Vertical corridor every platform stays inside
    pub const PLATFORM_MIN_Y: f32 = 100.0;
    pub const PLATFORM_MAX_Y: f32 = 450.0;
    /// Random walk step applied to y, drawn from [-n, n)
    pub const PLATFORM_Y_STEP: f32 = 100.0;
    /// Intermediate platforms per level: BASE + level
    pub const BASE_INTERMEDIATE_PLATFORMS: u32 = 5;
    /// Chance that an intermediate platform is a plain one
    pub const NORMAL_PLATFORM_CHANCE: f32 = 0.7;

    /// Fake platform collapse -> level regeneration delay
    pub const FAKE_COLLAPSE_DELAY_MS: f64 = 1000.0;

    /// Rage counter
    pub const MAX_RAGE: u8 = 10;
    pub const RAGE_MODE_THRESHOLD: u8 = 8;

    pub const STARTING_LIVES: u8 = 3;
    pub const LEVEL_COMPLETE_SCORE: u64 = 1000;

    /// Ghost recording and replay
    pub const GHOST_MAX_SAMPLES: usize = 300;
    pub const MAX_GHOSTS: usize = 3;
    pub const GHOST_FRAME_MS: f64 = 50.0;
    pub const GHOST_FADE_MS: f64 = 30_000.0;
    pub const GHOST_BASE_OPACITY: f32 = 0.8;
    pub const GHOST_MIN_OPACITY: f32 = 0.2;
}
