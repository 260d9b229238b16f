//! Level layout generation
//!
//! A level is a start platform, `5 + level` random platforms marching to the
//! right, and a goal platform. Gaps widen and platforms narrow as the level
//! number grows.

use rand::Rng;

use super::state::{Platform, PlatformKind};
use crate::consts::*;

/// Number of platforms `generate_level` emits for `level`
pub fn platform_count(level: u32) -> usize {
    (BASE_INTERMEDIATE_PLATFORMS + level.max(1)) as usize + 2
}

/// Range of horizontal gaps between consecutive platforms
pub fn gap_range(level: u32) -> (f32, f32) {
    let level = level as f32;
    (100.0 + level * 10.0, 200.0 + level * 15.0)
}

/// Width of intermediate platforms, never below PLATFORM_MIN_WIDTH
pub fn platform_width(level: u32) -> f32 {
    (PLATFORM_BASE_WIDTH - level as f32 * PLATFORM_WIDTH_SHRINK_PER_LEVEL).max(PLATFORM_MIN_WIDTH)
}

/// Generate the platform layout for a level
///
/// Levels below 1 are treated as level 1.
pub fn generate_level<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Vec<Platform> {
    let level = level.max(1);
    let count = platform_count(level);
    let (min_gap, max_gap) = gap_range(level);
    let width = platform_width(level);

    let mut platforms = Vec::with_capacity(count);
    platforms.push(Platform::new(
        0,
        START_PLATFORM_X,
        PLATFORM_MAX_Y,
        START_PLATFORM_WIDTH,
        PlatformKind::Normal,
    ));

    let mut last_x = START_PLATFORM_X;
    let mut last_y = PLATFORM_MAX_Y;
    for id in 1..(count - 1) as u32 {
        let kind = roll_kind(rng);
        let gap = rng.random::<f32>() * (max_gap - min_gap) + min_gap;
        let step = rng.random::<f32>() * 2.0 * PLATFORM_Y_STEP - PLATFORM_Y_STEP;

        last_x += gap;
        last_y = (last_y + step).clamp(PLATFORM_MIN_Y, PLATFORM_MAX_Y);
        platforms.push(Platform::new(id, last_x, last_y, width, kind));
    }

    platforms.push(Platform::new(
        (count - 1) as u32,
        last_x + GOAL_EXTRA_DISTANCE,
        PLATFORM_MAX_Y,
        GOAL_PLATFORM_WIDTH,
        PlatformKind::Normal,
    ));

    log::info!(
        "Level {}: {} platforms, gaps {:.0}-{:.0}, width {:.0}",
        level,
        platforms.len(),
        min_gap,
        max_gap,
        width
    );

    platforms
}

/// 70% normal, the rest split evenly between fake and bouncy
fn roll_kind<R: Rng + ?Sized>(rng: &mut R) -> PlatformKind {
    if rng.random::<f32>() < NORMAL_PLATFORM_CHANCE {
        PlatformKind::Normal
    } else if rng.random::<f32>() < 0.5 {
        PlatformKind::Fake
    } else {
        PlatformKind::Bouncy
    }
}
