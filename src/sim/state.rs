//! Game state and core simulation types
//!
//! Everything the presentation layer reads each frame lives in [`GameState`].
//! The simulation tick is its only writer, always through [`super::Command`].

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Platform behaviour when the frog lands on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformKind {
    /// Solid ground
    #[default]
    Normal,
    /// Collapses under the frog and restarts the level shortly after
    Fake,
    /// Launches the frog upward
    Bouncy,
}

/// A rectangular platform; `y` is the top surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Stable within one generated layout
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: PlatformKind,
    pub visible: bool,
}

impl Platform {
    pub fn new(id: u32, x: f32, y: f32, width: f32, kind: PlatformKind) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height: PLATFORM_HEIGHT,
            kind,
            visible: true,
        }
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Derived motion tag of the frog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionState {
    #[default]
    Idle,
    Jumping,
    Falling,
}

impl MotionState {
    /// Motion tag for a vertical velocity after contact resolution
    pub fn derive(vel_y: f32, landed: bool) -> Self {
        if vel_y < 0.0 {
            MotionState::Jumping
        } else if vel_y > 0.0 && !landed {
            MotionState::Falling
        } else {
            MotionState::Idle
        }
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frog {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub vel: Vec2,
    pub motion: MotionState,
}

impl Default for Frog {
    fn default() -> Self {
        Self {
            pos: Vec2::new(FROG_SPAWN_X, FROG_SPAWN_Y),
            vel: Vec2::ZERO,
            motion: MotionState::Idle,
        }
    }
}

impl Frog {
    /// Bottom edge of the bounding box
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + FROG_HEIGHT
    }
}

/// Weather for the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Wind,
    Storm,
}

impl Weather {
    pub const ALL: [Weather; 4] = [Weather::Clear, Weather::Rain, Weather::Wind, Weather::Storm];

    /// Horizontal gust added to velocity at wall-clock time `now_ms`
    pub fn gust(&self, now_ms: f64) -> f32 {
        match self {
            Weather::Clear | Weather::Rain => 0.0,
            Weather::Wind => (now_ms / WIND_PERIOD_MS).sin() as f32 * WIND_AMPLITUDE,
            Weather::Storm => (now_ms / STORM_PERIOD_MS).sin() as f32 * STORM_AMPLITUDE,
        }
    }

    /// Horizontal damping factor
    pub fn friction(&self) -> f32 {
        match self {
            Weather::Rain => RAIN_FRICTION,
            _ => FRICTION,
        }
    }
}

/// Cosmetic frog skins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skin {
    #[default]
    Default,
    Ninja,
    Wizard,
    Alien,
}

impl Skin {
    pub const ALL: [Skin; 4] = [Skin::Default, Skin::Ninja, Skin::Wizard, Skin::Alien];

    /// Level whose arrival unlocks this skin
    pub fn unlock_level(&self) -> Option<u32> {
        match self {
            Skin::Default => None,
            Skin::Ninja => Some(3),
            Skin::Wizard => Some(5),
            Skin::Alien => Some(8),
        }
    }

    /// Skin unlocked by arriving at `level`, if any
    pub fn unlocked_at(level: u32) -> Option<Skin> {
        Skin::ALL
            .into_iter()
            .find(|skin| skin.unlock_level() == Some(level))
    }
}

/// A recorded trajectory of a failed attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ghost {
    pub id: u32,
    /// Oldest sample first
    pub positions: Vec<Vec2>,
    /// Wall-clock time the attempt ended (ms)
    pub recorded_at_ms: f64,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub frog: Frog,
    /// Current level layout, start platform first and goal platform last
    pub platforms: Vec<Platform>,
    /// Current level (1-based)
    pub level: u32,
    /// Failure counter in [0, MAX_RAGE]
    pub rage: u8,
    pub score: u64,
    /// Best score ever seen, survives restarts
    pub high_score: u64,
    pub lives: u8,
    pub current_skin: Skin,
    /// Unlock order, always contains `Skin::Default`
    pub unlocked_skins: Vec<Skin>,
    pub weather: Weather,
    /// Oldest first, at most MAX_GHOSTS
    pub ghosts: VecDeque<Ghost>,
    pub game_over: bool,
    /// Bumped whenever the layout is replaced; tags deferred actions
    pub level_epoch: u64,
    next_ghost_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            frog: Frog::default(),
            platforms: Vec::new(),
            level: 1,
            rage: 0,
            score: 0,
            high_score: 0,
            lives: STARTING_LIVES,
            current_skin: Skin::Default,
            unlocked_skins: vec![Skin::Default],
            weather: Weather::Clear,
            ghosts: VecDeque::with_capacity(MAX_GHOSTS),
            game_over: false,
            level_epoch: 0,
            next_ghost_id: 1,
        }
    }
}

impl GameState {
    /// Fresh state for level 1 with the given layout
    pub fn new(platforms: Vec<Platform>) -> Self {
        Self {
            platforms,
            ..Self::default()
        }
    }

    /// Rage mode is a pure function of the rage counter
    #[inline]
    pub fn rage_mode(&self) -> bool {
        self.rage >= RAGE_MODE_THRESHOLD
    }

    pub fn is_unlocked(&self, skin: Skin) -> bool {
        self.unlocked_skins.contains(&skin)
    }

    /// Jumping is only possible from solid ground in a live game
    pub fn can_jump(&self) -> bool {
        self.frog.motion == MotionState::Idle && !self.game_over
    }

    /// The goal platform (always the last one)
    pub fn goal(&self) -> Option<&Platform> {
        self.platforms.last()
    }

    /// Fresh run that keeps progression (high score, skins) across restarts
    pub(super) fn restarted(&self, platforms: Vec<Platform>) -> Self {
        Self {
            platforms,
            high_score: self.high_score,
            unlocked_skins: self.unlocked_skins.clone(),
            current_skin: self.current_skin,
            level_epoch: self.level_epoch + 1,
            next_ghost_id: self.next_ghost_id,
            ..Self::default()
        }
    }

    /// Allocate an id for the next committed ghost
    pub fn next_ghost_id(&mut self) -> u32 {
        let id = self.next_ghost_id;
        self.next_ghost_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rage_mode_tracks_counter() {
        let mut state = GameState::default();
        for rage in 0..=MAX_RAGE {
            state.rage = rage;
            assert_eq!(state.rage_mode(), rage >= 8, "rage {}", rage);
        }
    }

    #[test]
    fn test_motion_derivation() {
        assert_eq!(MotionState::derive(-3.0, false), MotionState::Jumping);
        assert_eq!(MotionState::derive(2.0, false), MotionState::Falling);
        assert_eq!(MotionState::derive(2.0, true), MotionState::Idle);
        assert_eq!(MotionState::derive(0.0, true), MotionState::Idle);
    }

    #[test]
    fn test_weather_gusts() {
        assert_eq!(Weather::Clear.gust(1234.0), 0.0);
        assert_eq!(Weather::Rain.gust(1234.0), 0.0);
        let wind = Weather::Wind.gust(1000.0 * std::f64::consts::FRAC_PI_2);
        assert!((wind - 0.3).abs() < 1e-5);
        let storm = Weather::Storm.gust(500.0 * std::f64::consts::FRAC_PI_2);
        assert!((storm - 0.7).abs() < 1e-5);
        assert_eq!(Weather::Rain.friction(), 0.97);
        assert_eq!(Weather::Storm.friction(), 0.95);
    }

    #[test]
    fn test_skin_thresholds() {
        assert_eq!(Skin::unlocked_at(3), Some(Skin::Ninja));
        assert_eq!(Skin::unlocked_at(5), Some(Skin::Wizard));
        assert_eq!(Skin::unlocked_at(8), Some(Skin::Alien));
        assert_eq!(Skin::unlocked_at(4), None);
        assert_eq!(Skin::unlocked_at(1), None);
    }

    #[test]
    fn test_can_jump_only_when_idle_and_alive() {
        let mut state = GameState::default();
        assert!(state.can_jump());
        state.frog.motion = MotionState::Falling;
        assert!(!state.can_jump());
        state.frog.motion = MotionState::Idle;
        state.game_over = true;
        assert!(!state.can_jump());
    }
}
