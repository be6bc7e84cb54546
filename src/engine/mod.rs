//! engine
//!
//! Orchestrates a release run: Fetch -> Plan -> Execute.
//!
//! # Architecture
//!
//! - [`runner`]: preparation (fetch, cross-reference, plan), sequencing and
//!   the journal
//! - [`steps`]: one function per remote side effect (branch, tracks PR,
//!   manifest PR, distribution PR)
//!
//! # Invariants
//!
//! - No side effect happens before the plan is complete
//! - Every completed push and pull request is journaled before the next
//!   step starts
//! - Nothing is retried or rolled back

pub mod runner;
pub mod steps;

pub use runner::{prepare, Prepared, Runner};
pub use steps::BranchOutcome;
