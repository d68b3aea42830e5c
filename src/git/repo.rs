use crate::error::{Result, TimesheetError};
use crate::model::{Author, Commit, DateRange};
use chrono::{DateTime, FixedOffset, Utc};
use gix::{ObjectId, Repository};
use indicatif::ProgressBar;
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository at `path`, refusing shallow clones.
    ///
    /// `path` must be the repository itself; parent directories are not searched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let requested = path.as_ref();
        let invalid = |reason: String| TimesheetError::InvalidRepository {
            path: requested.to_path_buf(),
            reason,
        };

        let absolute = std::fs::canonicalize(requested).map_err(|e| invalid(e.to_string()))?;
        let repo = gix::open(&absolute).map_err(|e| invalid(e.to_string()))?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        if repo.is_shallow() {
            return Err(TimesheetError::IncompleteHistory { path });
        }

        Ok(Self { repo, path })
    }

    /// Name used for this repository in summaries.
    pub fn label(&self) -> String {
        self.path.display().to_string()
    }

    fn local_branch_tips(&self) -> Result<Vec<ObjectId>> {
        let references = self.repo.references()?;
        let mut tips = Vec::new();
        for reference in references.local_branches()? {
            let mut reference = reference.map_err(|e| TimesheetError::GitRepo(e.to_string()))?;
            let id = reference.peel_to_id_in_place()?;
            tracing::debug!(branch = %reference.name().as_bstr(), tip = %id, "found local branch");
            tips.push(id.detach());
        }
        Ok(tips)
    }

    /// Walk the history of every local branch, yielding each commit once.
    pub fn collect_commits(
        &self,
        range: &DateRange,
        include_merges: bool,
        pb: &ProgressBar,
    ) -> Result<Vec<Commit>> {
        let tips = self.local_branch_tips()?;
        if tips.is_empty() {
            tracing::warn!(repository = %self.label(), "repository has no local branches");
            return Ok(Vec::new());
        }

        let label = self.label();
        let mut commits = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from(tips);

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let time = commit.time()?;
            let timestamp = commit_timestamp(time.seconds, time.offset)?;

            for pid in commit.parent_ids() {
                stack.push_back(pid.into());
            }

            if !range.contains(&timestamp.with_timezone(&Utc)) {
                continue;
            }

            let author = commit.author()?;
            let message = commit.message()?;
            let info = Commit {
                sha: commit_id.to_string(),
                timestamp,
                message: message.title.to_string(),
                author: Author {
                    name: author.name.to_string(),
                    email: author.email.to_string(),
                },
                repository: label.clone(),
            };

            if !include_merges && info.is_merge() {
                continue;
            }

            commits.push(info);
            pb.inc(1);
        }

        tracing::debug!(
            repository = %label,
            visited = seen.len(),
            kept = commits.len(),
            "collected commits"
        );
        Ok(commits)
    }
}

/// Commit instant in the author's own offset, so days follow their wall clock.
fn commit_timestamp(seconds: i64, offset: i32) -> Result<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(offset)
        .ok_or_else(|| TimesheetError::InvalidDate(format!("Invalid UTC offset: {offset}s")))?;
    DateTime::from_timestamp(seconds, 0)
        .map(|utc| utc.with_timezone(&offset))
        .ok_or_else(|| TimesheetError::InvalidDate(format!("Invalid timestamp: {seconds}")))
}
