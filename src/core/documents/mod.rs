//! core::documents
//!
//! The three YAML documents the tool reads and rewrites.
//!
//! # Documents
//!
//! - [`ReposFile`] - the repository manifest (`ros2.repos`)
//! - [`DistributionFile`] - the distribution descriptor
//!   (`<release>/distribution.yaml` in rosdistro)
//! - [`TracksFile`] - the release-track file (`tracks.yaml`) of a
//!   release-metadata repository
//!
//! # Design
//!
//! Each document is modeled with the fields the tool reads or writes, plus a
//! flattened map that carries every other key through a round-trip
//! untouched. Mappings are `IndexMap`s, so keys keep their file order both
//! when scanned and when written back.
//!
//! Mutations are pure: `with_*` methods take `&self` and return a new
//! document, so the orchestrator threads state explicitly.

mod distribution;
mod repos;
mod tracks;

pub use distribution::{
    DistributionFile, DistributionRepository, ReleaseEntry, SourceEntry, HEADER as DISTRIBUTION_HEADER,
};
pub use repos::{RepoEntry, ReposFile};
pub use tracks::{Track, TracksFile};

use indexmap::IndexMap;
use thiserror::Error;

/// Keys not modeled explicitly, preserved verbatim.
pub type Extra = IndexMap<String, serde_yaml::Value>;

/// Errors from parsing, rendering or editing a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document is not valid YAML for its schema.
    #[error("failed to parse {document}: {message}")]
    Parse {
        /// Which document was being parsed
        document: &'static str,
        /// Parser message
        message: String,
    },

    /// The document could not be rendered back to YAML.
    #[error("failed to render {document}: {message}")]
    Render {
        /// Which document was being rendered
        document: &'static str,
        /// Serializer message
        message: String,
    },

    /// The manifest has no repository with this name.
    #[error("repository '{0}' not found in manifest")]
    UnknownRepository(String),

    /// The distribution has no package with this name.
    #[error("package '{0}' not found in distribution")]
    UnknownPackage(String),

    /// The tracks file has no track with this name.
    #[error("track '{0}' not found in tracks file")]
    UnknownTrack(String),
}

pub(crate) fn parse_yaml<T: serde::de::DeserializeOwned>(
    document: &'static str,
    text: &str,
) -> Result<T, DocumentError> {
    serde_yaml::from_str(text).map_err(|e| DocumentError::Parse {
        document,
        message: e.to_string(),
    })
}

pub(crate) fn render_yaml<T: serde::Serialize>(
    document: &'static str,
    value: &T,
) -> Result<String, DocumentError> {
    serde_yaml::to_string(value).map_err(|e| DocumentError::Render {
        document,
        message: e.to_string(),
    })
}
