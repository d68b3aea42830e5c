//! Session-gap hour estimation.
//!
//! Consecutive commits closer than the session gap are treated as continuous
//! work. A longer gap starts a new session, which is credited with a fixed
//! bonus for the unobserved work before its first commit.

use crate::model::{Commit, IdentityContribution, SessionEstimate};
use crate::util::day_key;
use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_MAX_SESSION_GAP_MINUTES: u32 = 180;
pub const DEFAULT_FIRST_COMMIT_BONUS_MINUTES: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionParams {
    pub max_session_gap_minutes: u32,
    pub first_commit_bonus_minutes: u32,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            max_session_gap_minutes: DEFAULT_MAX_SESSION_GAP_MINUTES,
            first_commit_bonus_minutes: DEFAULT_FIRST_COMMIT_BONUS_MINUTES,
        }
    }
}

impl SessionParams {
    fn bonus_hours(&self) -> f64 {
        self.first_commit_bonus_minutes as f64 / 60.0
    }
}

/// Estimate hours worked from unordered commit timestamps.
pub fn estimate_hours<Tz: TimeZone>(timestamps: &[DateTime<Tz>], params: &SessionParams) -> f64 {
    match timestamps.len() {
        0 => return 0.0,
        1 => return params.bonus_hours(),
        _ => {}
    }

    let mut sorted = timestamps.to_vec();
    sorted.sort();

    let max_gap = params.max_session_gap_minutes as f64;
    sorted
        .windows(2)
        .map(|pair| {
            let gap_minutes = (pair[1].clone() - pair[0].clone()).num_seconds() as f64 / 60.0;
            if gap_minutes <= max_gap {
                gap_minutes / 60.0
            } else {
                params.bonus_hours()
            }
        })
        .sum()
}

pub fn estimate_bucket<Tz: TimeZone>(
    timestamps: &[DateTime<Tz>],
    params: &SessionParams,
) -> SessionEstimate {
    SessionEstimate {
        hours: estimate_hours(timestamps, params),
        commits: timestamps.len() as u32,
    }
}

/// Estimate one identity's commits per repository and calendar day.
///
/// Each `(repository, day)` partition is estimated on its own. Days are the
/// author's local calendar days, taken from each commit's own offset.
pub fn estimate_identity(commits: &[Commit], params: &SessionParams) -> IdentityContribution {
    let mut partitions: BTreeMap<(String, String), Vec<DateTime<FixedOffset>>> = BTreeMap::new();
    for commit in commits {
        partitions
            .entry((commit.repository.clone(), day_key(&commit.timestamp)))
            .or_default()
            .push(commit.timestamp);
    }

    let mut contribution = IdentityContribution::new();
    for ((repository, day), timestamps) in partitions {
        contribution
            .entry(repository)
            .or_default()
            .insert(day, estimate_bucket(&timestamps, params));
    }
    contribution
}
