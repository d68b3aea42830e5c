use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Add, AddAssign};

pub const SCHEMA_VERSION: u32 = 1;

/// Identity assigned to commits without an author email.
pub const UNKNOWN_IDENTITY: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    /// Commit time in the author's recorded UTC offset.
    pub timestamp: DateTime<FixedOffset>,
    pub message: String,
    pub author: Author,
    pub repository: String,
}

impl Commit {
    pub fn is_merge(&self) -> bool {
        self.message.starts_with("Merge ")
    }
}

/// Hours and commit count estimated for one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionEstimate {
    pub hours: f64,
    pub commits: u32,
}

impl Add for SessionEstimate {
    type Output = SessionEstimate;

    fn add(self, rhs: Self) -> Self::Output {
        SessionEstimate {
            hours: self.hours + rhs.hours,
            commits: self.commits + rhs.commits,
        }
    }
}

impl AddAssign for SessionEstimate {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// `day -> estimate` for one identity in one repository.
pub type DailyContribution = BTreeMap<String, SessionEstimate>;

/// `repository -> day -> estimate` for one identity.
pub type IdentityContribution = BTreeMap<String, DailyContribution>;

/// `repository -> identity -> day -> estimate`.
pub type ContributionSummary = BTreeMap<String, BTreeMap<String, DailyContribution>>;

/// One flattened line of a [`ContributionSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub author: String,
    pub date: String,
    pub repository: String,
    pub hours: f64,
    pub commits: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub repositories: Vec<String>,
    pub summary: ContributionSummary,
    pub total: Option<SessionEstimate>,
}

/// Half-open time window: `since` is inclusive, `until` exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        if let Some(since) = self.since {
            if timestamp < &since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if timestamp >= &until {
                return false;
            }
        }
        true
    }
}
