use crate::cli::{CommonArgs, Format, OutputArgs};
use crate::config::{config_files, Settings};
use crate::git::list_commits;
use crate::model::{ContributionSummary, DateRange, ReportOutput, SCHEMA_VERSION};
use crate::summary::{compute_summary, identities, rows, total};
use anyhow::Context;
use chrono::{Local, Utc};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

const CSV_SEPARATOR: &str = ";";

pub fn exec(common: CommonArgs, output: OutputArgs) -> anyhow::Result<()> {
    let files = config_files(common.ignore_timesheetrc, common.config.as_deref());
    let overrides = common.overrides().context("Invalid command line arguments")?;
    let settings = Settings::load(&files, overrides).context("Failed to load configuration")?;
    tracing::debug!(?settings, "resolved settings");

    let range = settings
        .date_range(&Local::now())
        .context("Failed to resolve date range")?;

    let pb = spinner(output.quiet);
    let commits = list_commits(&settings.repository_paths(), settings.count_merges, &range, &pb)
        .context("Failed to collect commits from repositories")?;
    pb.finish_and_clear();
    tracing::debug!(commits = commits.len(), "collected commits from all repositories");

    let summary = compute_summary(&commits, &settings.estimate_config());

    match output.format() {
        Format::Csv => print!("{}", render_csv(&summary)),
        Format::Json => output_json(&summary, &range)?,
        Format::Table => output_table(&summary),
    }

    if output.verbose && output.format() != Format::Json {
        let hours: f64 = rows(&summary).iter().map(|r| r.hours).sum();
        eprintln!("\nTotal hours: {hours:.1}");
    }

    Ok(())
}

fn spinner(quiet: bool) -> ProgressBar {
    if quiet || !console::Term::stderr().is_term() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {pos}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Collecting commits...");
    pb
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Column {
    Author,
    Date,
    Repository,
    Hours,
}

impl Column {
    fn header(self) -> &'static str {
        match self {
            Column::Author => "author",
            Column::Date => "date",
            Column::Repository => "repository",
            Column::Hours => "hours",
        }
    }
}

/// CSV with `author;date;repository;hours`, dropping single-valued columns.
pub fn render_csv(summary: &ContributionSummary) -> String {
    let mut columns = vec![Column::Author, Column::Date, Column::Repository, Column::Hours];
    if summary.len() == 1 {
        columns.retain(|c| *c != Column::Repository);
    }
    if identities(summary).len() == 1 {
        columns.retain(|c| *c != Column::Author);
    }

    let mut out = columns
        .iter()
        .map(|c| c.header())
        .collect::<Vec<_>>()
        .join(CSV_SEPARATOR);
    out.push('\n');

    for row in rows(summary) {
        let line = columns
            .iter()
            .map(|c| match c {
                Column::Author => row.author.clone(),
                Column::Date => row.date.clone(),
                Column::Repository => row.repository.clone(),
                Column::Hours => format!("{:.1}", row.hours),
            })
            .collect::<Vec<_>>()
            .join(CSV_SEPARATOR);
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn output_json(summary: &ContributionSummary, range: &DateRange) -> anyhow::Result<()> {
    let output = ReportOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        since: range.since,
        until: range.until,
        repositories: summary.keys().cloned().collect(),
        summary: summary.clone(),
        total: total(summary),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_table(summary: &ContributionSummary) {
    let rows = rows(summary);
    if rows.is_empty() {
        println!("No commits to report");
        return;
    }

    println!(
        "{:<32} {:<10} {:<40} {:>7} {:>7}",
        style("Author").bold(),
        style("Date").bold(),
        style("Repository").bold(),
        style("Hours").bold(),
        style("Commits").bold()
    );
    println!("{}", "─".repeat(100));
    for r in &rows {
        println!(
            "{:<32} {:<10} {:<40} {:>7.1} {:>7}",
            r.author, r.date, r.repository, r.hours, r.commits
        );
    }

    if let Some(t) = total(summary) {
        println!("{}", "─".repeat(100));
        println!(
            "{:<32} {:<10} {:<40} {:>7.1} {:>7}",
            style("total").bold(),
            "",
            "",
            t.hours,
            t.commits
        );
    }
}
