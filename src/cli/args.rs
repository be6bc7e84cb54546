//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this configuration file
//! - `--dry-run`: Fetch and plan only
//! - `--journal <path>`: Write the journal of side effects as JSON
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::Parser;
use std::path::PathBuf;

/// Cut source branches and update release metadata for a new ROS 2
/// distribution.
#[derive(Parser, Debug)]
#[command(name = "ros2-release-branches")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Name of the new distribution (e.g. "kilted")
    pub release: String,

    /// Configuration file (defaults to the standard search path)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Download and plan, but do not create branches or pull requests
    #[arg(long)]
    pub dry_run: bool,

    /// Write the journal of completed side effects to this file
    #[arg(long, value_name = "PATH")]
    pub journal: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,
}
