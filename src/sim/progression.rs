//! Rage and progression rules
//!
//! Decides what an attempt's end means: a fall feeds rage and costs a life, a
//! completed level pays out, unlocks skins and rolls new weather. Both return
//! the commands to apply instead of touching state directly.

use rand::Rng;

use super::command::Command;
use super::events::{GameEvent, SoundCue};
use super::generator::generate_level;
use super::state::{GameState, Ghost, Skin, Weather};
use crate::consts::*;

/// The frog dropped below the death line
pub fn on_fell_off_world<R: Rng + ?Sized>(
    state: &GameState,
    ghost: Ghost,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Vec<Command> {
    events.push(SoundCue::Splash.into());
    events.push(SoundCue::angry_for_rage(state.rage).into());
    if state.rage + 1 == RAGE_MODE_THRESHOLD {
        events.push(SoundCue::RageModeEnter.into());
    }

    let lives = state.lives.saturating_sub(1);
    events.push(GameEvent::LifeLost { lives });

    let mut commands = vec![
        Command::AddGhost { ghost },
        Command::IncreaseRage,
        Command::LoseLife,
    ];

    if lives == 0 {
        log::info!("Game over at level {} with score {}", state.level, state.score);
        events.push(SoundCue::Explosion.into());
        events.push(GameEvent::GameOver { score: state.score });
        commands.push(Command::GameOver);
    } else {
        log::info!("Fell off level {}, {} lives left", state.level, lives);
        events.push(GameEvent::LevelStarted { level: state.level });
        commands.push(Command::RegenerateLevel {
            level: state.level,
            platforms: generate_level(state.level, rng),
        });
    }

    commands
}

/// The frog is standing on the goal platform
pub fn on_level_completed<R: Rng + ?Sized>(
    state: &GameState,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Vec<Command> {
    let next_level = state.level + 1;
    let score = state.score + LEVEL_COMPLETE_SCORE;
    log::info!("Level {} complete, score {}", state.level, score);

    events.push(GameEvent::LevelCompleted { level: state.level });
    events.push(GameEvent::ScoreChanged {
        score,
        high_score: state.high_score.max(score),
    });

    let mut commands = vec![Command::UpdateScore { score }];

    if let Some(skin) = Skin::unlocked_at(next_level) {
        if !state.is_unlocked(skin) {
            log::info!("Unlocked {:?} skin", skin);
            events.push(GameEvent::SkinUnlocked { skin });
            events.push(SoundCue::Unlock.into());
            commands.push(Command::UnlockSkin { skin });
        }
    }

    events.push(GameEvent::LevelStarted { level: next_level });
    commands.push(Command::RegenerateLevel {
        level: next_level,
        platforms: generate_level(next_level, rng),
    });

    let weather = Weather::ALL[rng.random_range(0..Weather::ALL.len())];
    events.push(GameEvent::WeatherChanged { weather });
    commands.push(Command::SetWeather { weather });

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn apply_all(state: &mut GameState, commands: Vec<Command>) {
        for command in commands {
            command.apply(state);
        }
    }

    fn empty_ghost(id: u32) -> Ghost {
        Ghost {
            id,
            positions: Vec::new(),
            recorded_at_ms: 0.0,
        }
    }

    #[test]
    fn test_fall_costs_life_and_retries_level() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = GameState::new(generate_level(2, &mut rng));
        state.level = 2;
        let mut events = Vec::new();

        let commands = on_fell_off_world(&state, empty_ghost(1), &mut rng, &mut events);
        apply_all(&mut state, commands);

        assert_eq!(state.rage, 1);
        assert_eq!(state.lives, 2);
        assert_eq!(state.level, 2);
        assert_eq!(state.ghosts.len(), 1);
        assert!(!state.game_over);
        assert_eq!(state.platforms.len(), 9);
        assert!(events.contains(&SoundCue::Splash.into()));
        assert!(events.contains(&SoundCue::Angry(1).into()));
        assert!(!events.contains(&SoundCue::Explosion.into()));
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = GameState::new(generate_level(1, &mut rng));
        state.lives = 1;
        let epoch = state.level_epoch;
        let mut events = Vec::new();

        let commands = on_fell_off_world(&state, empty_ghost(1), &mut rng, &mut events);
        apply_all(&mut state, commands);

        assert!(state.game_over);
        assert_eq!(state.lives, 0);
        assert_eq!(state.level_epoch, epoch);
        assert!(events.contains(&SoundCue::Explosion.into()));
        assert!(events.contains(&GameEvent::GameOver { score: 0 }));
    }

    #[test]
    fn test_rage_mode_entry_cue() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = GameState::new(generate_level(1, &mut rng));
        state.rage = 7;
        state.lives = 3;
        let mut events = Vec::new();
        on_fell_off_world(&state, empty_ghost(1), &mut rng, &mut events);
        assert!(events.contains(&SoundCue::RageModeEnter.into()));
        assert!(events.contains(&SoundCue::Angry(3).into()));

        state.rage = 8;
        let mut events = Vec::new();
        on_fell_off_world(&state, empty_ghost(2), &mut rng, &mut events);
        assert!(!events.contains(&SoundCue::RageModeEnter.into()));
    }

    #[test]
    fn test_rage_never_exceeds_cap() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut state = GameState::new(generate_level(1, &mut rng));
        state.lives = 200;
        for id in 0..30 {
            let mut events = Vec::new();
            let commands = on_fell_off_world(&state, empty_ghost(id), &mut rng, &mut events);
            apply_all(&mut state, commands);
            assert!(state.rage <= 10);
            assert_eq!(state.rage_mode(), state.rage >= 8);
        }
        assert_eq!(state.rage, 10);
    }

    #[test]
    fn test_level_completion_pays_and_advances() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut state = GameState::new(generate_level(1, &mut rng));
        let mut events = Vec::new();

        let commands = on_level_completed(&state, &mut rng, &mut events);
        apply_all(&mut state, commands);

        assert_eq!(state.level, 2);
        assert_eq!(state.score, 1000);
        assert_eq!(state.high_score, 1000);
        assert_eq!(state.platforms.len(), 9);
        assert_eq!(state.unlocked_skins, vec![Skin::Default]);
        assert!(events.contains(&GameEvent::LevelCompleted { level: 1 }));
        assert!(events.iter().any(|e| matches!(e, GameEvent::WeatherChanged { .. })));
    }

    #[test]
    fn test_reaching_level_three_unlocks_ninja_once() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut state = GameState::new(generate_level(2, &mut rng));
        state.level = 2;

        let mut events = Vec::new();
        let commands = on_level_completed(&state, &mut rng, &mut events);
        apply_all(&mut state, commands);
        assert_eq!(state.unlocked_skins, vec![Skin::Default, Skin::Ninja]);
        assert!(events.contains(&SoundCue::Unlock.into()));

        // Replaying the same threshold does nothing
        state.level = 2;
        let mut events = Vec::new();
        let commands = on_level_completed(&state, &mut rng, &mut events);
        apply_all(&mut state, commands);
        assert_eq!(state.unlocked_skins, vec![Skin::Default, Skin::Ninja]);
        assert!(!events.contains(&SoundCue::Unlock.into()));
    }

    #[test]
    fn test_weather_draws_cover_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(77);
        let state = GameState::new(generate_level(1, &mut rng));
        let mut seen = Vec::new();
        for _ in 0..64 {
            let mut events = Vec::new();
            for command in on_level_completed(&state, &mut rng, &mut events) {
                if let Command::SetWeather { weather } = command {
                    if !seen.contains(&weather) {
                        seen.push(weather);
                    }
                }
            }
        }
        assert_eq!(seen.len(), 4);
    }
}
