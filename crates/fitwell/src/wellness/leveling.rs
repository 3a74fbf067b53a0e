use serde::{Deserialize, Serialize};

/// XP needed per squared level: level `L` is reached at `100 * L^2` XP.
pub const XP_PER_LEVEL_UNIT: u64 = 100;

/// Per-user gamification counters.
///
/// `xp` and `level` only ever grow; `health_score` mirrors the latest composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub xp: u64,
    pub level: u32,
    pub health_score: u8,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            health_score: 0,
        }
    }
}

/// Applies XP awards and recomputes level along the square-root curve.
///
/// Awards are unsigned, so XP can never be taken away through this engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelingEngine;

impl LevelingEngine {
    pub fn new() -> Self {
        Self
    }

    /// `max(1, floor(sqrt(xp / 100)))`
    pub fn level_for_xp(xp: u64) -> u32 {
        let level = (xp / XP_PER_LEVEL_UNIT).isqrt().max(1);
        u32::try_from(level).unwrap_or(u32::MAX)
    }

    /// Minimum XP at which `level` is reached.
    pub fn xp_for_level(level: u32) -> u64 {
        let level = u64::from(level);
        level.saturating_mul(level).saturating_mul(XP_PER_LEVEL_UNIT)
    }

    /// Add `delta` XP. Level is recomputed from scratch but never lowered.
    pub fn apply_xp(&self, progress: ProgressRecord, delta: u32) -> ProgressRecord {
        let xp = progress.xp.saturating_add(u64::from(delta));
        let level = progress.level.max(Self::level_for_xp(xp));

        ProgressRecord {
            xp,
            level,
            ..progress
        }
    }
}

/// Progress snapshot with distance to the next level, as shown on the member profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressView {
    pub xp: u64,
    pub level: u32,
    pub health_score: u8,
    pub next_level_xp: u64,
    pub xp_to_next_level: u64,
}

impl From<ProgressRecord> for ProgressView {
    fn from(progress: ProgressRecord) -> Self {
        let next_level_xp = LevelingEngine::xp_for_level(progress.level.saturating_add(1));
        Self {
            xp: progress.xp,
            level: progress.level,
            health_score: progress.health_score,
            next_level_xp,
            xp_to_next_level: next_level_xp.saturating_sub(progress.xp),
        }
    }
}
