//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same state, input, wall-clock
//! time and RNG draws, a tick always produces the same result:
//! - State only changes through [`Command`]
//! - Randomness comes from the caller's RNG, never a global one
//! - Platforms are resolved in layout order
//! - No rendering, audio or storage dependencies

pub mod command;
pub mod deferred;
pub mod events;
pub mod generator;
pub mod ghost;
pub mod physics;
pub mod progression;
pub mod state;
pub mod tick;

pub use command::Command;
pub use deferred::{Deferred, DeferredKind, DeferredQueue};
pub use events::{GameEvent, SoundCue};
pub use generator::generate_level;
pub use ghost::{GhostFrame, GhostPlayback, GhostRecorder};
pub use physics::{Contact, ContactOutcome, Environment, Intents, Step};
pub use state::{
    Frog, GameState, Ghost, MotionState, Platform, PlatformKind, Skin, Weather,
};
pub use tick::{Simulation, TickInput};
