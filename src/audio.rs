//! Audio system using Web Audio API
//!
//! Every sound cue is a handful of procedurally generated oscillator voices,
//! so no audio files are needed. The voice tables are plain data and live
//! outside the wasm-only playback code.

use crate::sim::{GameEvent, SoundCue};

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator with a decaying gain envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub wave: Wave,
    /// Start frequency (Hz)
    pub freq: f32,
    /// Exponential sweep target over the voice length
    pub sweep_to: Option<f32>,
    /// Peak gain before the effective volume is applied
    pub gain: f32,
    /// Offset from the cue start (s)
    pub delay: f64,
    /// Envelope length (s)
    pub length: f64,
}

impl Voice {
    fn tone(wave: Wave, freq: f32, gain: f32, length: f64) -> Self {
        Self {
            wave,
            freq,
            sweep_to: None,
            gain,
            delay: 0.0,
            length,
        }
    }

    fn sweep(mut self, to: f32) -> Self {
        self.sweep_to = Some(to);
        self
    }

    fn after(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }
}

/// Voices that make up a cue
pub fn voices(cue: SoundCue) -> Vec<Voice> {
    use Wave::*;
    match cue {
        // Springy hop
        SoundCue::Jump => vec![Voice::tone(Triangle, 200.0, 0.3, 0.2).sweep(600.0)],
        // Soft thump
        SoundCue::Land => vec![Voice::tone(Sine, 150.0, 0.5, 0.1).sweep(60.0)],
        SoundCue::Splash => vec![
            Voice::tone(Sawtooth, 900.0, 0.2, 0.25).sweep(120.0),
            Voice::tone(Sine, 120.0, 0.3, 0.2),
        ],
        SoundCue::Explosion => vec![
            Voice::tone(Sawtooth, 100.0, 0.5, 0.4).sweep(30.0),
            Voice::tone(Square, 1500.0, 0.2, 0.1),
        ],
        SoundCue::Unlock => [500.0, 600.0, 700.0, 800.0, 1000.0]
            .into_iter()
            .enumerate()
            .map(|(i, freq)| Voice::tone(Triangle, freq, 0.25, 0.25).after(i as f64 * 0.08))
            .collect(),
        SoundCue::RageModeEnter => vec![
            Voice::tone(Square, 80.0, 0.35, 0.5).sweep(400.0),
            Voice::tone(Sawtooth, 160.0, 0.25, 0.5).sweep(800.0),
        ],
        // Croaks: angrier means more, lower and louder
        SoundCue::Angry(tier) => {
            let tier = tier.clamp(1, 3);
            let freq = 220.0 - 30.0 * tier as f32;
            let gain = 0.2 + 0.05 * tier as f32;
            (0..tier)
                .map(|i| {
                    Voice::tone(Square, freq, gain, 0.1)
                        .sweep(freq * 0.6)
                        .after(i as f64 * 0.12)
                })
                .collect()
        }
    }
}

/// Sound cues among a batch of game events, in order
pub fn cues(events: &[GameEvent]) -> impl Iterator<Item = SoundCue> + '_ {
    events.iter().filter_map(|event| match event {
        GameEvent::Sound { cue } => Some(*cue),
        _ => None,
    })
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{Voice, Wave, voices};
    use crate::settings::Settings;
    use crate::sim::SoundCue;

    impl From<Wave> for OscillatorType {
        fn from(wave: Wave) -> Self {
            match wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Square => OscillatorType::Square,
                Wave::Sawtooth => OscillatorType::Sawtooth,
                Wave::Triangle => OscillatorType::Triangle,
            }
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a cue at the volume the settings allow
        pub fn play(&self, cue: SoundCue, settings: &Settings) {
            let vol = settings.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for voice in voices(cue) {
                self.play_voice(ctx, &voice, vol);
            }
        }

        /// Create an oscillator routed through a gain node
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_voice(&self, ctx: &AudioContext, voice: &Voice, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, voice.freq, voice.wave.into()) else {
                return;
            };
            let t = ctx.current_time() + voice.delay;
            let end = t + voice.length;

            gain.gain().set_value_at_time(vol * voice.gain, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
            if let Some(to) = voice.sweep_to {
                osc.frequency().set_value_at_time(voice.freq, t).ok();
                osc.frequency().exponential_ramp_to_value_at_time(to, end).ok();
            }

            osc.start_with_when(t).ok();
            osc.stop_with_when(end + 0.05).ok();
        }
    }
}
