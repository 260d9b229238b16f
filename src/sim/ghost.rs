//! Ghost recording and replay
//!
//! The recorder keeps a sliding window of the current attempt's positions and
//! turns it into a [`Ghost`] when the attempt ends. Playback runs on wall-clock
//! time, one sample every GHOST_FRAME_MS, independent of the tick rate.

use std::collections::VecDeque;

use glam::Vec2;
use serde::Serialize;

use super::state::Ghost;
use crate::consts::*;

/// Per-attempt position buffer
#[derive(Debug, Clone, Default)]
pub struct GhostRecorder {
    samples: VecDeque<Vec2>,
}

impl GhostRecorder {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(GHOST_MAX_SAMPLES),
        }
    }

    /// Append a sample, dropping the oldest once the window is full
    pub fn record(&mut self, pos: Vec2) {
        if self.samples.len() == GHOST_MAX_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back(pos);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Turn the buffer into a ghost and start a fresh attempt
    pub fn commit(&mut self, id: u32, now_ms: f64) -> Ghost {
        Ghost {
            id,
            positions: self.samples.drain(..).collect(),
            recorded_at_ms: now_ms,
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Ghost {
    /// Opacity fades linearly with age from base to floor over GHOST_FADE_MS
    pub fn opacity(&self, now_ms: f64) -> f32 {
        let age = (now_ms - self.recorded_at_ms).clamp(0.0, GHOST_FADE_MS);
        let fade = (age / GHOST_FADE_MS) as f32;
        GHOST_BASE_OPACITY - fade * (GHOST_BASE_OPACITY - GHOST_MIN_OPACITY)
    }
}

/// Replay position of one ghost
#[derive(Debug, Clone, PartialEq)]
struct Cursor {
    ghost_id: u32,
    index: usize,
    last_advance_ms: Option<f64>,
}

/// What the renderer needs to draw one ghost this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GhostFrame {
    pub ghost_id: u32,
    pub pos: Vec2,
    pub opacity: f32,
}

/// Independent looping replay for every stored ghost
#[derive(Debug, Clone, Default)]
pub struct GhostPlayback {
    cursors: Vec<Cursor>,
}

impl GhostPlayback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match cursors to the stored ghosts: drop evicted, start new ones at 0
    pub fn sync<'a>(&mut self, ghosts: impl IntoIterator<Item = &'a Ghost>) {
        let ids: Vec<u32> = ghosts.into_iter().map(|g| g.id).collect();
        self.cursors.retain(|c| ids.contains(&c.ghost_id));
        for id in ids {
            if !self.cursors.iter().any(|c| c.ghost_id == id) {
                self.cursors.push(Cursor {
                    ghost_id: id,
                    index: 0,
                    last_advance_ms: None,
                });
            }
        }
    }

    /// Step every cursor whose interval has elapsed, looping at the end
    pub fn advance<'a>(&mut self, ghosts: impl IntoIterator<Item = &'a Ghost>, now_ms: f64) {
        for ghost in ghosts {
            let Some(cursor) = self.cursors.iter_mut().find(|c| c.ghost_id == ghost.id) else {
                continue;
            };
            if ghost.positions.is_empty() {
                continue;
            }
            match cursor.last_advance_ms {
                None => cursor.last_advance_ms = Some(now_ms),
                Some(last) if now_ms - last > GHOST_FRAME_MS => {
                    cursor.last_advance_ms = Some(now_ms);
                    cursor.index = (cursor.index + 1) % ghost.positions.len();
                }
                Some(_) => {}
            }
        }
    }

    /// Current replay sample index for a ghost
    pub fn index_of(&self, ghost_id: u32) -> Option<usize> {
        self.cursors
            .iter()
            .find(|c| c.ghost_id == ghost_id)
            .map(|c| c.index)
    }

    /// Drawable frames; ghosts without samples are skipped
    pub fn frames<'a>(
        &self,
        ghosts: impl IntoIterator<Item = &'a Ghost>,
        now_ms: f64,
    ) -> Vec<GhostFrame> {
        ghosts
            .into_iter()
            .filter_map(|ghost| {
                let index = self.index_of(ghost.id)?;
                let pos = *ghost.positions.get(index)?;
                Some(GhostFrame {
                    ghost_id: ghost.id,
                    pos,
                    opacity: ghost.opacity(now_ms),
                })
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.cursors.clear();
    }
}
