//! Outward event channel
//!
//! The simulation never calls into audio or rendering. It queues events and the
//! host drains them after each frame.

use serde::{Deserialize, Serialize};

use super::state::{Skin, Weather};

/// Sound cues the presentation layer maps to playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Jump,
    Land,
    Splash,
    Explosion,
    Unlock,
    RageModeEnter,
    /// Angry croak, tier 1..=3
    Angry(u8),
}

impl SoundCue {
    /// Croak tier for a rage value, read before the rage increment
    pub fn angry_for_rage(rage: u8) -> Self {
        let tier = if rage > 6 {
            3
        } else if rage > 3 {
            2
        } else {
            1
        };
        SoundCue::Angry(tier)
    }
}

/// Discrete things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Sound { cue: SoundCue },
    ScoreChanged { score: u64, high_score: u64 },
    LevelCompleted { level: u32 },
    LevelStarted { level: u32 },
    SkinUnlocked { skin: Skin },
    WeatherChanged { weather: Weather },
    PlatformCollapsed { platform_id: u32 },
    LifeLost { lives: u8 },
    GameOver { score: u64 },
}

impl From<SoundCue> for GameEvent {
    fn from(cue: SoundCue) -> Self {
        GameEvent::Sound { cue }
    }
}
