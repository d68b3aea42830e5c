mod repo;

pub use repo::GitRepo;

use crate::error::Result;
use crate::model::{Commit, DateRange};
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::PathBuf;

/// Collect commits from every local branch of every repository.
///
/// Repositories are read in parallel; any repository that cannot be opened
/// or is a shallow clone fails the whole batch.
pub fn list_commits(
    paths: &[PathBuf],
    include_merges: bool,
    range: &DateRange,
    pb: &ProgressBar,
) -> Result<Vec<Commit>> {
    let per_repo: Vec<Vec<Commit>> = paths
        .par_iter()
        .map(|path| {
            let repo = GitRepo::open(path)?;
            repo.collect_commits(range, include_merges, pb)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(dedup_commits(per_repo.into_iter().flatten()))
}

/// Keep the first commit seen for each sha.
pub fn dedup_commits<I: IntoIterator<Item = Commit>>(commits: I) -> Vec<Commit> {
    let mut seen: HashSet<String> = HashSet::new();
    commits
        .into_iter()
        .filter(|c| seen.insert(c.sha.clone()))
        .collect()
}
