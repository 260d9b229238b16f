//! State transition commands
//!
//! The closed set of ways [`GameState`] can change. Applying a command is
//! deterministic and touches nothing but the state; payloads that make no
//! sense for the current state are ignored rather than reported.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameState, Ghost, MotionState, Platform, Skin, Weather};
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Move { x: f32, y: f32 },
    SetVelocity { x: f32, y: f32 },
    /// `nudge_roll` is a uniform draw in [0, 1) for the horizontal nudge
    Jump { nudge_roll: f32 },
    IncreaseRage,
    ResetRage,
    UpdateScore { score: u64 },
    SetWeather { weather: Weather },
    UnlockSkin { skin: Skin },
    SelectSkin { skin: Skin },
    AddGhost { ghost: Ghost },
    SetMotionState { motion: MotionState },
    HidePlatform { platform_id: u32 },
    LoseLife,
    GameOver,
    Restart { platforms: Vec<Platform> },
    RegenerateLevel { level: u32, platforms: Vec<Platform> },
}

impl Command {
    /// Apply to `state`; returns false when the command was a no-op
    pub fn apply(self, state: &mut GameState) -> bool {
        match self {
            Command::Move { x, y } => {
                if state.game_over || !x.is_finite() || !y.is_finite() {
                    return false;
                }
                state.frog.pos = Vec2::new(x, y);
                true
            }

            Command::SetVelocity { x, y } => {
                if state.game_over || !x.is_finite() || !y.is_finite() {
                    return false;
                }
                state.frog.vel = Vec2::new(x, y);
                true
            }

            Command::Jump { nudge_roll } => {
                if !state.can_jump() {
                    return false;
                }
                let (impulse, nudge) = if state.rage_mode() {
                    (RAGE_JUMP_VELOCITY, RAGE_JUMP_NUDGE)
                } else {
                    (JUMP_VELOCITY, JUMP_NUDGE)
                };
                let roll = if nudge_roll.is_finite() {
                    nudge_roll.clamp(0.0, 1.0)
                } else {
                    0.5
                };
                state.frog.vel.x += roll * 2.0 * nudge - nudge;
                state.frog.vel.y = impulse;
                state.frog.motion = MotionState::Jumping;
                true
            }

            Command::IncreaseRage => {
                if state.rage >= MAX_RAGE {
                    return false;
                }
                state.rage += 1;
                true
            }

            Command::ResetRage => {
                let changed = state.rage != 0;
                state.rage = 0;
                changed
            }

            Command::UpdateScore { score } => {
                state.score = score;
                state.high_score = state.high_score.max(score);
                true
            }

            Command::SetWeather { weather } => {
                state.weather = weather;
                true
            }

            Command::UnlockSkin { skin } => {
                if state.is_unlocked(skin) {
                    return false;
                }
                state.unlocked_skins.push(skin);
                true
            }

            Command::SelectSkin { skin } => {
                if !state.is_unlocked(skin) {
                    return false;
                }
                state.current_skin = skin;
                true
            }

            Command::AddGhost { ghost } => {
                state.ghosts.push_back(ghost);
                while state.ghosts.len() > MAX_GHOSTS {
                    state.ghosts.pop_front();
                }
                true
            }

            Command::SetMotionState { motion } => {
                if state.game_over {
                    return false;
                }
                state.frog.motion = motion;
                true
            }

            Command::HidePlatform { platform_id } => {
                if state.game_over {
                    return false;
                }
                match state
                    .platforms
                    .iter_mut()
                    .find(|p| p.id == platform_id && p.visible)
                {
                    Some(platform) => {
                        platform.visible = false;
                        true
                    }
                    None => false,
                }
            }

            Command::LoseLife => {
                if state.lives == 0 {
                    return false;
                }
                state.lives -= 1;
                true
            }

            Command::GameOver => {
                let changed = !state.game_over;
                state.game_over = true;
                changed
            }

            Command::Restart { platforms } => {
                *state = state.restarted(platforms);
                true
            }

            Command::RegenerateLevel { level, platforms } => {
                if state.game_over {
                    return false;
                }
                state.level = level.max(1);
                state.platforms = platforms;
                state.frog = Default::default();
                state.level_epoch += 1;
                true
            }
        }
    }
}
