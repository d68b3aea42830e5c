//! Author identity resolution and per-identity grouping.

use crate::error::{Result, TimesheetError};
use crate::model::{Commit, UNKNOWN_IDENTITY};
use std::collections::{BTreeMap, HashMap};

/// Map a raw author email to its canonical identity.
///
/// Aliasing is a single exact, case-sensitive lookup.
pub fn resolve(email: &str, aliases: &HashMap<String, String>) -> String {
    if email.is_empty() {
        return UNKNOWN_IDENTITY.to_string();
    }
    aliases
        .get(email)
        .cloned()
        .unwrap_or_else(|| email.to_string())
}

/// Bucket commits by resolved identity, keeping input order inside a bucket.
///
/// A non-empty `authors` list drops every identity not in it.
pub fn group_by_identity(
    commits: &[Commit],
    aliases: &HashMap<String, String>,
    authors: &[String],
) -> BTreeMap<String, Vec<Commit>> {
    let mut groups: BTreeMap<String, Vec<Commit>> = BTreeMap::new();
    for commit in commits {
        let identity = resolve(&commit.author.email, aliases);
        if !authors.is_empty() && !authors.contains(&identity) {
            continue;
        }
        groups.entry(identity).or_default().push(commit.clone());
    }
    groups
}

/// Parse `other=main` pairs separated by commas.
pub fn parse_aliases(input: &str) -> Result<HashMap<String, String>> {
    let mut aliases = HashMap::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (from, to) = part
            .split_once('=')
            .ok_or_else(|| TimesheetError::InvalidAlias(format!("'{part}' is missing a '='")))?;
        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() {
            return Err(TimesheetError::InvalidAlias(format!(
                "'{part}' must look like other@example.com=main@example.com"
            )));
        }
        aliases.insert(from.to_string(), to.to_string());
    }
    Ok(aliases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Author;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn commit(sha: &str, email: &str) -> Commit {
        Commit {
            sha: sha.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap().fixed_offset(),
            message: format!("commit {sha}"),
            author: Author { name: "Dev".into(), email: email.to_string() },
            repository: "repo".into(),
        }
    }

    fn aliases() -> HashMap<String, String> {
        HashMap::from([("old@home.org".to_string(), "me@work.com".to_string())])
    }

    #[test]
    fn empty_email_is_unknown() {
        assert_eq!(resolve("", &aliases()), "unknown");
    }

    #[test]
    fn aliases_are_one_hop_and_case_sensitive() {
        let mut table = aliases();
        table.insert("me@work.com".into(), "boss@work.com".into());
        assert_eq!(resolve("old@home.org", &table), "me@work.com");
        assert_eq!(resolve("OLD@home.org", &table), "OLD@home.org");
    }

    #[test]
    fn resolution_is_deterministic() {
        let table = aliases();
        assert_eq!(resolve("old@home.org", &table), resolve("old@home.org", &table));
    }

    #[test]
    fn grouping_keeps_order_and_every_commit_once() {
        let commits = vec![
            commit("1", "me@work.com"),
            commit("2", "old@home.org"),
            commit("3", ""),
            commit("4", "me@work.com"),
        ];
        let groups = group_by_identity(&commits, &aliases(), &[]);

        let mine: Vec<_> = groups["me@work.com"].iter().map(|c| c.sha.as_str()).collect();
        assert_eq!(mine, vec!["1", "2", "4"]);
        assert_eq!(groups["unknown"].len(), 1);
        assert_eq!(groups.values().map(Vec::len).sum::<usize>(), commits.len());
    }

    #[test]
    fn author_filter_only_keeps_listed_identities() {
        let commits = vec![
            commit("1", "me@work.com"),
            commit("2", "other@work.com"),
            commit("3", "old@home.org"),
        ];
        let filter = vec!["me@work.com".to_string(), "ghost@nowhere".to_string()];
        let groups = group_by_identity(&commits, &aliases(), &filter);

        assert_eq!(groups.keys().cloned().collect::<Vec<_>>(), vec!["me@work.com"]);
        assert!(groups.keys().all(|k| filter.contains(k)));
        assert_eq!(groups["me@work.com"].len(), 2);
    }

    #[test]
    fn alias_parser_accepts_pairs_and_rejects_garbage() {
        let parsed = parse_aliases(" a@x = b@x ,c@x=d@x").unwrap();
        assert_eq!(parsed["a@x"], "b@x");
        assert_eq!(parsed["c@x"], "d@x");

        assert!(matches!(parse_aliases("a@x"), Err(TimesheetError::InvalidAlias(_))));
        assert!(matches!(parse_aliases("a@x="), Err(TimesheetError::InvalidAlias(_))));
    }
}
