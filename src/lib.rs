//! Estimate hours spent on git repositories from commit timestamps.
//!
//! Commits from every local branch of each repository are deduplicated,
//! grouped by author identity and split per repository and day. Each bucket
//! is turned into hours with the session-gap heuristic in [`estimate`].

pub mod cli;
pub mod config;
pub mod error;
pub mod estimate;
pub mod git;
pub mod identity;
pub mod model;
pub mod report;
pub mod summary;
pub mod util;

pub use config::EstimateConfig;
pub use error::{Result, TimesheetError};
pub use model::{Commit, ContributionSummary, SessionEstimate};
pub use summary::compute_summary;
