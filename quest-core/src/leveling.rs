//! XP and level arithmetic.
//!
//! Levels grow with the square root of total XP: level `n` starts at
//! `(n - 1)^2 * 100` XP, capped at level 1000.

use chrono::NaiveDate;
use thiserror::Error;

pub const MAX_LEVEL: u32 = 1000;
pub const MAX_STREAK_MULTIPLIER: f64 = 3.0;
/// Largest XP amount the store can hold (SQLite integers are signed 64-bit).
pub const MAX_XP: u64 = i64::MAX as u64;

#[derive(Debug, Error, PartialEq)]
pub enum RewardError {
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidInput { field: &'static str, value: f64 },

    #[error("reward exceeds the maximum of {MAX_XP} XP")]
    TooLarge,
}

/// Map accumulated XP to a level in `1..=MAX_LEVEL`.
pub fn level_from_total_xp(total_xp: u64) -> u32 {
    let level = integer_sqrt(total_xp / 100).saturating_add(1);
    level.clamp(1, MAX_LEVEL as u64) as u32
}

// Float sqrt corrected to the exact floor; plain `as u64` drifts near perfect squares.
fn integer_sqrt(n: u64) -> u64 {
    let mut root = (n as f64).sqrt() as u64;
    while root > 0 && root.saturating_mul(root) > n {
        root -= 1;
    }
    while (root + 1).saturating_mul(root + 1) <= n {
        root += 1;
    }
    root
}

/// Total XP at which the level after `level` begins; 0 once capped.
pub fn xp_for_next_level(level: u32) -> u64 {
    if level >= MAX_LEVEL {
        return 0;
    }
    let level = level as u64;
    level * level * 100
}

/// Streak multiplier applied to task rewards: +10% per streak day, at most 3x.
pub fn streak_multiplier(streak: u32) -> f64 {
    (1.0 + streak as f64 * 0.1).min(MAX_STREAK_MULTIPLIER)
}

/// XP granted for a task, fixed when the task is created.
pub fn compute_task_reward(
    difficulty: f64,
    estimated_minutes: f64,
    streak: u32,
) -> Result<u64, RewardError> {
    check_input("difficulty", difficulty)?;
    check_input("estimated_minutes", estimated_minutes)?;

    let base = difficulty * 20.0 + estimated_minutes * 2.0;
    let reward = (base * streak_multiplier(streak)).floor();
    // `MAX_XP as f64` rounds up to 2^63, so anything below it fits.
    if reward >= MAX_XP as f64 {
        return Err(RewardError::TooLarge);
    }
    Ok(reward as u64)
}

/// Add `reward` to `total_xp` without leaving the storable range.
pub fn add_xp(total_xp: u64, reward: u64) -> u64 {
    total_xp.saturating_add(reward).min(MAX_XP)
}

fn check_input(field: &'static str, value: f64) -> Result<(), RewardError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RewardError::InvalidInput { field, value })
    }
}

/// Daily streak after a completion on `today`.
///
/// Completing again on the same day keeps the streak, completing on the
/// following day extends it, and any longer gap restarts it at 1.
pub fn advance_streak(last_completion_on: Option<NaiveDate>, today: NaiveDate, current: u32) -> u32 {
    match last_completion_on {
        Some(last) if last == today => current.max(1),
        Some(last) if last.succ_opt() == Some(today) => current.saturating_add(1),
        _ => 1,
    }
}

/// Streak still alive on `today`: one that last grew today or yesterday.
/// A lapsed streak counts as zero when pricing new tasks.
pub fn active_streak(last_completion_on: Option<NaiveDate>, today: NaiveDate, current: u32) -> u32 {
    match last_completion_on {
        Some(last) if last == today || last.succ_opt() == Some(today) => current,
        _ => 0,
    }
}
