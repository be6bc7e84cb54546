//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! User-facing results go to stdout and respect the quiet flag. Diagnostics
//! are `tracing` events and go to stderr through the subscriber the CLI
//! installs.

use std::fmt::Display;

use crate::core::journal::Journal;
use crate::core::plan::ReleasePlan;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    /// Default `tracing` filter directive for this verbosity.
    pub fn filter_directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "warn",
            Verbosity::Normal => "info",
            Verbosity::Debug => "debug",
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the outcome of a run from its journal.
pub fn format_journal(journal: &Journal) -> String {
    if journal.is_empty() {
        return format!("No changes made for {}.", journal.release);
    }

    let effects: Vec<String> = journal.effects().map(ToString::to_string).collect();
    format!(
        "Changes made for {}:\n{}",
        journal.release,
        format_list(&effects, "  ")
    )
}

/// Print the plan computed by a dry run.
pub fn print_plan(plan: &ReleasePlan, verbosity: Verbosity) {
    print(plan.describe().trim_end(), verbosity);
}

/// Print the summary of a finished run.
pub fn print_summary(journal: &Journal, verbosity: Verbosity) {
    print(format_journal(journal), verbosity);

    let prs = journal.pull_requests();
    if !prs.is_empty() {
        print(
            format!("\nPull requests to review:\n{}", format_list(&prs, "  ")),
            verbosity,
        );
    }
}

/// Print what a failed run left behind (always shown).
pub fn print_partial(journal: &Journal) {
    if !journal.is_empty() {
        eprintln!("{}", format_journal(journal));
    }
}
