//! Per-frame simulation tick
//!
//! Each tick reads the current state, fires due deferred actions, records the
//! ghost sample, handles the jump edge, runs physics, and turns the outcome
//! into a batch of commands applied in order.

use rand::Rng;

use super::command::Command;
use super::deferred::{DeferredKind, DeferredQueue};
use super::events::{GameEvent, SoundCue};
use super::generator::generate_level;
use super::ghost::GhostRecorder;
use super::physics::{self, Environment, Intents};
use super::progression;
use super::state::{GameState, MotionState, PlatformKind};
use crate::consts::*;

/// Input sampled once per tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held directions
    pub left: bool,
    pub right: bool,
    /// A fresh jump press since the last tick
    pub jump: bool,
    /// Wall-clock time (ms)
    pub now_ms: f64,
}

/// The canonical game state plus the per-attempt bookkeeping that drives it
#[derive(Debug, Clone)]
pub struct Simulation {
    state: GameState,
    recorder: GhostRecorder,
    deferred: DeferredQueue,
    events: Vec<GameEvent>,
}

impl Simulation {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            recorder: GhostRecorder::new(),
            deferred: DeferredQueue::new(),
            events: Vec::new(),
        }
    }

    /// Read-only view for presentation
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn recorder(&self) -> &GhostRecorder {
        &self.recorder
    }

    pub fn deferred(&self) -> &DeferredQueue {
        &self.deferred
    }

    /// Take every event queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply a command from outside the tick (skin picker, rage reset)
    pub fn dispatch(&mut self, command: Command) -> bool {
        let applied = command.clone().apply(&mut self.state);
        if !applied {
            log::debug!("Ignored command {:?}", command);
        }
        applied
    }

    /// Start over at level 1, keeping high score and skins
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.recorder.clear();
        self.deferred.cancel_all();
        Command::Restart {
            platforms: generate_level(1, rng),
        }
        .apply(&mut self.state);
        self.events.push(GameEvent::LevelStarted { level: 1 });
        log::info!("Game restarted");
    }

    /// Advance the game by one frame
    pub fn tick<R: Rng + ?Sized>(&mut self, input: &TickInput, rng: &mut R) {
        if self.state.game_over {
            return;
        }

        self.fire_deferred(input.now_ms, rng);

        self.recorder.record(self.state.frog.pos);

        if input.jump
            && self.state.can_jump()
            && (Command::Jump {
                nudge_roll: rng.random(),
            })
            .apply(&mut self.state)
        {
            self.events.push(SoundCue::Jump.into());
        }

        let intents = Intents {
            left: input.left,
            right: input.right,
        };
        let step = physics::step(
            &self.state.frog,
            intents,
            &Environment {
                weather: self.state.weather,
                rage_mode: self.state.rage_mode(),
                platforms: &self.state.platforms,
                now_ms: input.now_ms,
            },
        );

        let commands = if step.fell_off_world() {
            let id = self.state.next_ghost_id();
            let ghost = self.recorder.commit(id, input.now_ms);
            progression::on_fell_off_world(&self.state, ghost, rng, &mut self.events)
        } else {
            let was_falling = self.state.frog.motion == MotionState::Falling;
            let mut commands = vec![
                Command::Move {
                    x: step.pos.x,
                    y: step.pos.y,
                },
                Command::SetVelocity {
                    x: step.vel.x,
                    y: step.vel.y,
                },
                Command::SetMotionState {
                    motion: step.motion,
                },
            ];

            let mut land_cue = false;
            for contact in &step.contacts {
                match contact.kind {
                    PlatformKind::Normal => land_cue |= was_falling,
                    PlatformKind::Bouncy => self.events.push(SoundCue::Jump.into()),
                    PlatformKind::Fake => {
                        self.events.push(SoundCue::Splash.into());
                        self.events.push(GameEvent::PlatformCollapsed {
                            platform_id: contact.platform_id,
                        });
                        commands.push(Command::HidePlatform {
                            platform_id: contact.platform_id,
                        });
                        self.deferred.schedule(
                            DeferredKind::RegenerateLevel {
                                level: self.state.level,
                            },
                            input.now_ms + FAKE_COLLAPSE_DELAY_MS,
                            self.state.level_epoch,
                        );
                    }
                }
            }
            if land_cue {
                self.events.push(SoundCue::Land.into());
            }

            if step.reached_goal {
                commands.extend(progression::on_level_completed(
                    &self.state,
                    rng,
                    &mut self.events,
                ));
            }
            commands
        };

        for command in commands {
            command.apply(&mut self.state);
        }
    }

    /// Run due deferred actions that still belong to the live layout
    fn fire_deferred<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) {
        for action in self.deferred.take_due(now_ms) {
            if !action.is_current(self.state.level_epoch) {
                log::debug!(
                    "Dropping stale {:?} (epoch {} != {})",
                    action.kind,
                    action.epoch,
                    self.state.level_epoch
                );
                continue;
            }
            match action.kind {
                DeferredKind::RegenerateLevel { level } => {
                    log::info!("Fake platform collapsed, rebuilding level {}", level);
                    self.events.push(GameEvent::LevelStarted { level });
                    Command::RegenerateLevel {
                        level,
                        platforms: generate_level(level, rng),
                    }
                    .apply(&mut self.state);
                }
            }
        }
    }
}
