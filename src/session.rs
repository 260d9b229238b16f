//! Host-facing game session
//!
//! Owns one running game and everything around the simulation that the
//! browser shell would otherwise juggle: input, the camera, ghost playback,
//! persistence, audio preferences and the RNG.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::persistence::Progress;
use crate::platform::{InputState, KeyValueStore};
use crate::settings::{Settings, SettingsCommand};
use crate::sim::{
    Command, GameEvent, GameState, GhostFrame, GhostPlayback, Simulation, Skin, generate_level,
};

/// Horizontal camera
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Viewport {
    /// Visible width in pixels, 0 until the host reports it
    pub width: f32,
    pub camera_offset: f32,
}

impl Viewport {
    pub fn resize(&mut self, width: f32) {
        self.width = if width.is_finite() { width.max(0.0) } else { 0.0 };
    }

    /// Keep the frog a third of the way into the view
    pub fn follow(&mut self, frog_x: f32) {
        self.camera_offset = if self.width > 0.0 {
            (frog_x - self.width / 3.0).max(0.0)
        } else {
            0.0
        };
    }
}

/// Requests from the UI overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiCommand {
    Restart,
    SelectSkin { skin: Skin },
    ResetRage,
}

/// Everything the renderer and HUD need for one frame
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub state: &'a GameState,
    pub rage_mode: bool,
    pub ghosts: Vec<GhostFrame>,
    pub camera_offset: f32,
    pub settings: &'a Settings,
}

pub struct Session<S: KeyValueStore> {
    sim: Simulation,
    input: InputState,
    playback: GhostPlayback,
    viewport: Viewport,
    rng: Pcg32,
    store: S,
    settings: Settings,
    /// Last progression written to the store
    saved: Progress,
}

impl<S: KeyValueStore> Session<S> {
    /// Start at level 1 with progression and settings loaded from `store`
    pub fn new(seed: u64, store: S) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let saved = Progress::load(&store);
        let settings = Settings::load(&store);

        let mut state = GameState::new(generate_level(1, &mut rng));
        saved.restore(&mut state);
        log::info!(
            "Session started (seed {}, high score {})",
            seed,
            state.high_score
        );

        Self {
            sim: Simulation::new(state),
            input: InputState::new(),
            playback: GhostPlayback::new(),
            viewport: Viewport::default(),
            rng,
            store,
            settings,
            saved,
        }
    }

    pub fn state(&self) -> &GameState {
        self.sim.state()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key_down(&mut self, key: &str, repeat: bool) -> bool {
        self.input.key_down(key, repeat)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.input.key_up(key)
    }

    /// Window lost focus: release held keys
    pub fn blur(&mut self) {
        self.input.clear();
    }

    pub fn resize(&mut self, width: f32) {
        self.viewport.resize(width);
        self.viewport.follow(self.sim.state().frog.pos.x);
    }

    /// Run one display frame; returns the events it produced
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let input = self.input.sample(now_ms);
        self.sim.tick(&input, &mut self.rng);

        let state = self.sim.state();
        self.viewport.follow(state.frog.pos.x);
        self.playback.sync(&state.ghosts);
        self.playback.advance(&state.ghosts, now_ms);

        self.persist();
        self.sim.drain_events()
    }

    pub fn handle(&mut self, command: UiCommand) -> bool {
        let applied = match command {
            UiCommand::Restart => {
                self.sim.restart(&mut self.rng);
                self.playback.clear();
                self.input.clear();
                self.viewport.follow(self.sim.state().frog.pos.x);
                true
            }
            UiCommand::SelectSkin { skin } => self.sim.dispatch(Command::SelectSkin { skin }),
            UiCommand::ResetRage => self.sim.dispatch(Command::ResetRage),
        };
        self.persist();
        applied
    }

    pub fn handle_settings(&mut self, command: SettingsCommand) -> bool {
        if !self.settings.apply(command) {
            return false;
        }
        if let Err(e) = self.settings.save(&mut self.store) {
            log::warn!("Failed to save settings: {}", e);
        }
        true
    }

    /// Route a JSON-encoded UI or settings command. Unknown commands are
    /// ignored.
    pub fn dispatch_json(&mut self, json: &str) -> bool {
        if let Ok(command) = serde_json::from_str::<UiCommand>(json) {
            return self.handle(command);
        }
        if let Ok(command) = serde_json::from_str::<SettingsCommand>(json) {
            return self.handle_settings(command);
        }
        log::debug!("Ignoring unknown command {}", json);
        false
    }

    pub fn snapshot(&self, now_ms: f64) -> Snapshot<'_> {
        let state = self.sim.state();
        Snapshot {
            state,
            rage_mode: state.rage_mode(),
            ghosts: self.playback.frames(&state.ghosts, now_ms),
            camera_offset: self.viewport.camera_offset,
            settings: &self.settings,
        }
    }

    pub fn snapshot_json(&self, now_ms: f64) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.snapshot(now_ms))
    }

    /// Write high score and skins whenever they change
    fn persist(&mut self) {
        let progress = Progress::from_state(self.sim.state());
        if progress == self.saved {
            return;
        }
        if let Err(e) = progress.save(&mut self.store) {
            log::warn!("Failed to save progress: {}", e);
        }
        self.saved = progress;
    }
}

/// Frames needed to cover `duration_ms` at a fixed cadence
pub fn frames_for(duration_ms: f64, frame_ms: f64) -> usize {
    if frame_ms <= 0.0 || !duration_ms.is_finite() {
        return 0;
    }
    (duration_ms.max(0.0) / frame_ms).ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{HIGH_SCORE_KEY, UNLOCKED_SKINS_KEY};
    use crate::platform::MemoryStore;
    use crate::sim::{MotionState, SoundCue};
    use glam::Vec2;

    const FRAME_MS: f64 = 16.0;

    fn session() -> Session<MemoryStore> {
        Session::new(42, MemoryStore::new())
    }

    /// Drop the frog just above the goal so the next frame completes the level
    fn stage_goal_landing(session: &mut Session<MemoryStore>) {
        let state = session.sim.state_mut();
        let goal = state.goal().cloned().unwrap();
        state.frog.pos = Vec2::new(goal.x + 10.0, goal.y - 45.0);
        state.frog.vel = Vec2::new(0.0, 7.0);
        state.frog.motion = MotionState::Falling;
    }

    #[test]
    fn test_loads_saved_progress() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "5000").unwrap();
        store.set(UNLOCKED_SKINS_KEY, r#"["ninja"]"#).unwrap();

        let session = Session::new(1, store);
        assert_eq!(session.state().high_score, 5000);
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().unlocked_skins, vec![Skin::Default, Skin::Ninja]);
        assert_eq!(session.state().level, 1);
        assert_eq!(session.state().platforms.len(), 8);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = session();
        let mut b = session();
        assert_eq!(a.state().platforms, b.state().platforms);
        for frame in 0..120 {
            let now = frame as f64 * FRAME_MS;
            if frame == 30 {
                a.key_down(" ", false);
                b.key_down(" ", false);
            }
            assert_eq!(a.frame(now), b.frame(now));
        }
        assert_eq!(a.state().frog, b.state().frog);
    }

    #[test]
    fn test_space_jumps_from_ground() {
        let mut session = session();
        session.key_down(" ", false);
        let events = session.frame(0.0);
        assert!(events.contains(&SoundCue::Jump.into()));
        assert_eq!(session.state().frog.motion, MotionState::Jumping);
    }

    #[test]
    fn test_level_completion_is_persisted() {
        let mut session = session();
        stage_goal_landing(&mut session);

        let events = session.frame(0.0);
        assert!(events.contains(&GameEvent::LevelCompleted { level: 1 }));
        assert_eq!(session.state().level, 2);
        assert_eq!(session.store().get(HIGH_SCORE_KEY).as_deref(), Some("1000"));
        assert_eq!(
            session.store().get(UNLOCKED_SKINS_KEY).as_deref(),
            Some(r#"["default"]"#)
        );
    }

    #[test]
    fn test_restart_keeps_progression() {
        let mut session = session();
        stage_goal_landing(&mut session);
        session.frame(0.0);
        session.sim.state_mut().rage = 9;

        assert!(session.dispatch_json(r#"{"type":"restart"}"#));
        let state = session.state();
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.rage, 0);
        assert_eq!(state.high_score, 1000);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_skin_selection_requires_unlock() {
        let mut session = session();
        assert!(!session.handle(UiCommand::SelectSkin { skin: Skin::Wizard }));
        assert_eq!(session.state().current_skin, Skin::Default);

        session.sim.state_mut().unlocked_skins.push(Skin::Wizard);
        assert!(session.dispatch_json(r#"{"type":"select_skin","skin":"wizard"}"#));
        assert_eq!(session.state().current_skin, Skin::Wizard);
    }

    #[test]
    fn test_reset_rage_from_ui() {
        let mut session = session();
        session.sim.state_mut().rage = 8;
        assert!(session.snapshot(0.0).rage_mode);
        assert!(session.handle(UiCommand::ResetRage));
        assert!(!session.snapshot(0.0).rage_mode);
    }

    #[test]
    fn test_unknown_commands_ignored() {
        let mut session = session();
        let before = session.state().clone();
        assert!(!session.dispatch_json(r#"{"type":"teleport","x":9000}"#));
        assert!(!session.dispatch_json("not json"));
        assert_eq!(session.state().frog, before.frog);
        assert_eq!(session.state().platforms, before.platforms);
    }

    #[test]
    fn test_settings_commands_saved() {
        let mut session = session();
        assert!(session.dispatch_json(r#"{"type":"toggle_sound"}"#));
        assert!(!session.settings().sound_on);
        assert!(session.store().get(Settings::STORAGE_KEY).is_some());

        let reopened = Session::new(7, session.store().clone());
        assert!(!reopened.settings().sound_on);
    }

    #[test]
    fn test_camera_follows_frog() {
        let mut viewport = Viewport::default();
        viewport.follow(500.0);
        assert_eq!(viewport.camera_offset, 0.0);

        viewport.resize(900.0);
        viewport.follow(100.0);
        assert_eq!(viewport.camera_offset, 0.0);
        viewport.follow(1300.0);
        assert_eq!(viewport.camera_offset, 1000.0);
    }

    #[test]
    fn test_fall_produces_ghost_frame() {
        let mut session = session();
        {
            let state = session.sim.state_mut();
            state.frog.pos = Vec2::new(100.0, 590.0);
            state.frog.vel = Vec2::new(0.0, 20.0);
            state.frog.motion = MotionState::Falling;
        }
        session.frame(1000.0);
        assert_eq!(session.state().ghosts.len(), 1);
        assert_eq!(session.state().lives, 2);

        let snapshot = session.snapshot(1000.0);
        assert_eq!(snapshot.ghosts.len(), 1);
        assert_eq!(snapshot.ghosts[0].pos, Vec2::new(100.0, 590.0));
        assert!((snapshot.ghosts[0].opacity - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut session = session();
        session.resize(900.0);
        session.frame(0.0);
        let json = session.snapshot_json(0.0).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rage_mode"], false);
        assert_eq!(value["camera_offset"], 0.0);
        assert_eq!(value["state"]["level"], 1);
        assert!(value["ghosts"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_frames_for() {
        assert_eq!(frames_for(1000.0, 16.0), 63);
        assert_eq!(frames_for(1000.0, 0.0), 0);
        assert_eq!(frames_for(-5.0, 16.0), 0);
    }
}
