//! core::documents::tracks
//!
//! The bloom release-track file (`tracks.yaml`) of a release-metadata
//! repository. Only `tracks.<name>.devel_branch` is ever edited.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{parse_yaml, render_yaml, DocumentError, Extra};

const DOCUMENT: &str = "tracks file";

/// One release track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Upstream branch the track releases from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devel_branch: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// The tracks file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracksFile {
    pub tracks: IndexMap<String, Track>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl TracksFile {
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        parse_yaml(DOCUMENT, text)
    }

    pub fn to_yaml(&self) -> Result<String, DocumentError> {
        render_yaml(DOCUMENT, self)
    }

    /// Return a copy with `tracks[track].devel_branch = branch`.
    pub fn with_devel_branch(&self, track: &str, branch: &str) -> Result<Self, DocumentError> {
        let mut next = self.clone();
        let entry = next
            .tracks
            .get_mut(track)
            .ok_or_else(|| DocumentError::UnknownTrack(track.to_string()))?;
        entry.devel_branch = Some(branch.to_string());
        Ok(next)
    }
}
