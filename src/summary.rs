use crate::config::EstimateConfig;
use crate::estimate::estimate_identity;
use crate::identity::group_by_identity;
use crate::model::{Commit, ContributionSummary, IdentityContribution, SessionEstimate, SummaryRow};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Group, estimate and nest a commit set into a [`ContributionSummary`].
pub fn compute_summary(commits: &[Commit], config: &EstimateConfig) -> ContributionSummary {
    let groups = group_by_identity(commits, &config.email_aliases, &config.authors);
    tracing::debug!(identities = groups.len(), commits = commits.len(), "grouped commits");

    let per_identity: BTreeMap<String, IdentityContribution> = groups
        .into_par_iter()
        .map(|(identity, commits)| {
            let contribution = estimate_identity(&commits, &config.session);
            (identity, contribution)
        })
        .collect();

    build(per_identity)
}

/// Re-key `identity -> repository -> day` into `repository -> identity -> day`.
pub fn build(per_identity: BTreeMap<String, IdentityContribution>) -> ContributionSummary {
    let mut summary = ContributionSummary::new();
    for (identity, repositories) in per_identity {
        for (repository, days) in repositories {
            summary.entry(repository).or_default().insert(identity.clone(), days);
        }
    }
    summary
}

pub fn identities(summary: &ContributionSummary) -> Vec<&str> {
    let mut ids: Vec<&str> = summary
        .values()
        .flat_map(|authors| authors.keys().map(String::as_str))
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Sum over every bucket, or `None` when at most one identity is present.
pub fn total(summary: &ContributionSummary) -> Option<SessionEstimate> {
    if identities(summary).len() <= 1 {
        return None;
    }
    Some(
        summary
            .values()
            .flat_map(|authors| authors.values())
            .flat_map(|days| days.values())
            .fold(SessionEstimate::default(), |acc, est| acc + *est),
    )
}

/// Flatten into rows ordered by author, then date, then repository.
pub fn rows(summary: &ContributionSummary) -> Vec<SummaryRow> {
    let mut rows: Vec<SummaryRow> = summary
        .iter()
        .flat_map(|(repository, authors)| {
            authors.iter().flat_map(move |(author, days)| {
                days.iter().map(move |(date, est)| SummaryRow {
                    author: author.clone(),
                    date: date.clone(),
                    repository: repository.clone(),
                    hours: est.hours,
                    commits: est.commits,
                })
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        a.author
            .cmp(&b.author)
            .then_with(|| a.date.cmp(&b.date))
            .then_with(|| a.repository.cmp(&b.repository))
    });
    rows
}
