use crate::config::PartialSettings;
use crate::error::Result;
use crate::identity::parse_aliases;
use clap::{Args, Parser, ValueEnum};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "git-timesheet")]
#[command(about = "Estimate hours spent on git repositories from commit timestamps")]
#[command(version)]
#[command(after_help = "Examples:
  git-timesheet -a me@example.com            hours by one author
  git-timesheet --max-commit-diff 240        developers who commit seldom
  git-timesheet --first-commit-add 300       long warm-up before first commit
  git-timesheet --since thismonth --json     this month as JSON")]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Clone, Default)]
pub struct CommonArgs {
    #[arg(short, long, value_delimiter = ',', help = "Only count commits from these identities")]
    pub authors: Option<Vec<String>>,

    #[arg(short = 'd', long, value_name = "MINUTES", help = "Max minutes between commits counted as one session [default: 180]")]
    pub max_commit_diff: Option<u32>,

    #[arg(short = 'f', long, value_name = "MINUTES", help = "Minutes added for the first commit of a session [default: 60]")]
    pub first_commit_add: Option<u32>,

    #[arg(short, long, help = "Analyze commits since date, inclusive (always, today, yesterday, thisweek, lastweek, thismonth, lastmonth, YYYY-MM-DD, RFC3339, or '3 days ago')")]
    pub since: Option<String>,

    #[arg(short, long, help = "Analyze commits until date, exclusive (same formats as --since)")]
    pub until: Option<String>,

    #[arg(short, long, value_delimiter = ',', help = "Git repositories to analyze [default: .]")]
    pub repositories: Option<Vec<String>>,

    #[arg(short, long, value_name = "OTHER=MAIN", help = "Group an email under another identity; repeatable or comma separated")]
    pub email: Vec<String>,

    #[arg(short = 'm', long, value_name = "BOOL", help = "Include merge commits [default: true]")]
    pub merge_request: Option<bool>,

    #[arg(short = 'i', long, help = "Ignore ~/.timesheetrc")]
    pub ignore_timesheetrc: bool,

    #[arg(long, help = "Additional JSON config file, merged after ~/.timesheetrc")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Csv,
    Json,
    Table,
}

#[derive(Args, Clone, Default)]
pub struct OutputArgs {
    #[arg(long, value_enum, help = "Output format [default: csv]")]
    pub format: Option<Format>,

    #[arg(short, long, help = "Output as JSON, same as --format json")]
    pub json: bool,

    #[arg(short, long, help = "Print total hours after the report")]
    pub verbose: bool,

    #[arg(short = 'D', long, help = "Print debug information")]
    pub debug: bool,

    #[arg(short, long, help = "Hide the progress spinner")]
    pub quiet: bool,
}

impl OutputArgs {
    pub fn format(&self) -> Format {
        if self.json {
            Format::Json
        } else {
            self.format.unwrap_or_default()
        }
    }
}

impl CommonArgs {
    /// Settings given explicitly on the command line.
    pub fn overrides(&self) -> Result<PartialSettings> {
        let email_aliases = if self.email.is_empty() {
            None
        } else {
            let mut aliases = HashMap::new();
            for spec in &self.email {
                aliases.extend(parse_aliases(spec)?);
            }
            Some(aliases)
        };

        Ok(PartialSettings {
            max_commit_diff_in_minutes: self.max_commit_diff,
            first_commit_addition_in_minutes: self.first_commit_add,
            since: self.since.clone(),
            until: self.until.clone(),
            count_merges: self.merge_request,
            repositories: self.repositories.clone(),
            email_aliases,
            authors: self.authors.clone(),
        })
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> anyhow::Result<()> {
        crate::report::exec(self.common, self.output)
    }
}
