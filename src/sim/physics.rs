//! Frog physics and platform collision
//!
//! One call to [`step`] advances the frog by one tick with explicit Euler
//! integration and classifies what it touched. The resolver is pure: it never
//! mutates platforms or schedules anything; the tick turns contacts into
//! commands and deferred actions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Frog, MotionState, Platform, PlatformKind, Weather};
use crate::consts::*;

/// Held directional intents for this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub left: bool,
    pub right: bool,
}

/// Everything outside the frog that one step depends on
#[derive(Debug, Clone, Copy)]
pub struct Environment<'a> {
    pub weather: Weather,
    pub rage_mode: bool,
    pub platforms: &'a [Platform],
    /// Wall-clock time in ms, drives weather gusts
    pub now_ms: f64,
}

/// Classification of a tick's collision test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactOutcome {
    #[default]
    None,
    LandedNormal,
    LandedBouncy,
    FellThroughFake,
    FellOffWorld,
}

impl From<PlatformKind> for ContactOutcome {
    fn from(kind: PlatformKind) -> Self {
        match kind {
            PlatformKind::Normal => ContactOutcome::LandedNormal,
            PlatformKind::Bouncy => ContactOutcome::LandedBouncy,
            PlatformKind::Fake => ContactOutcome::FellThroughFake,
        }
    }
}

/// A platform the frog crossed from above this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub platform_id: u32,
    pub kind: PlatformKind,
}

/// Result of one physics step
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub pos: Vec2,
    pub vel: Vec2,
    pub motion: MotionState,
    /// In platform iteration order
    pub contacts: Vec<Contact>,
    pub outcome: ContactOutcome,
    /// Frog is standing on the goal platform
    pub reached_goal: bool,
}

impl Step {
    pub fn fell_off_world(&self) -> bool {
        self.outcome == ContactOutcome::FellOffWorld
    }
}

/// Advance the frog by one tick
pub fn step(frog: &Frog, intents: Intents, env: &Environment<'_>) -> Step {
    // --- Horizontal: input, gusts, friction ---
    let accel = if env.rage_mode { RAGE_MOVE_ACCEL } else { MOVE_ACCEL };
    let mut vel_x = frog.vel.x;
    if intents.left {
        vel_x -= accel;
    }
    if intents.right {
        vel_x += accel;
    }
    vel_x += env.weather.gust(env.now_ms);
    vel_x *= env.weather.friction();

    // --- Vertical: gravity always applies ---
    let mut vel_y = frog.vel.y + GRAVITY;

    let mut pos = frog.pos + Vec2::new(vel_x, vel_y);

    // --- Platform contacts (from above only) ---
    let prev_bottom = frog.bottom();
    let mut contacts = Vec::new();
    let mut landed = false;

    for platform in env.platforms.iter().filter(|p| p.visible) {
        // Earlier clamps move `pos`, so later platforms test the clamped box
        let new_bottom = pos.y + FROG_HEIGHT;
        let crosses_top = new_bottom >= platform.y && prev_bottom <= platform.y;
        let overlaps_x = pos.x + FROG_WIDTH > platform.x && pos.x < platform.right();
        if !(crosses_top && overlaps_x) {
            continue;
        }

        match platform.kind {
            PlatformKind::Normal => {
                pos.y = platform.y - FROG_HEIGHT;
                vel_y = 0.0;
                landed = true;
            }
            PlatformKind::Bouncy => {
                vel_y = BOUNCE_VELOCITY;
            }
            PlatformKind::Fake => {}
        }
        contacts.push(Contact {
            platform_id: platform.id,
            kind: platform.kind,
        });
    }

    let vel = Vec2::new(vel_x, vel_y);
    let motion = MotionState::derive(vel_y, landed);

    if pos.y > DEATH_LINE_Y {
        return Step {
            pos,
            vel,
            motion,
            contacts: Vec::new(),
            outcome: ContactOutcome::FellOffWorld,
            reached_goal: false,
        };
    }

    let outcome = contacts
        .last()
        .map(|c| ContactOutcome::from(c.kind))
        .unwrap_or_default();
    let reached_goal = env
        .platforms
        .last()
        .is_some_and(|goal| on_goal(pos, goal));

    Step {
        pos,
        vel,
        motion,
        contacts,
        outcome,
        reached_goal,
    }
}

/// Frog feet resting on the goal surface, inside its horizontal span
fn on_goal(pos: Vec2, goal: &Platform) -> bool {
    let bottom = pos.y + FROG_HEIGHT;
    pos.x > goal.x
        && pos.x < goal.right()
        && bottom >= goal.y
        && bottom <= goal.y + GOAL_LANDING_TOLERANCE
}
