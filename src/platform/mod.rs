//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Keyboard input (held keys and the jump edge)
//! - Storage (LocalStorage on web, in-memory natively)
//! - Wall-clock time

pub mod input;
pub mod storage;
pub mod time;

pub use input::{InputState, Key};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
pub use time::now_ms;
