//! core
//!
//! Domain types, documents and pure transformations.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ReleaseName, UtcTimestamp
//! - [`urls`] - GitHub web/raw URL conversion
//! - [`documents`] - Manifest, distribution and tracks YAML documents
//! - [`xref`] - Manifest → distribution cross-reference
//! - [`plan`] - The release plan computed before any side effect
//! - [`journal`] - Record of completed remote side effects
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Nothing in `core` performs network or git I/O
//! - Document edits return new documents instead of mutating shared state

pub mod config;
pub mod documents;
pub mod journal;
pub mod plan;
pub mod types;
pub mod urls;
pub mod xref;
