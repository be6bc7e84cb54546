//! core::xref
//!
//! Cross-reference between manifest repositories and distribution packages.
//!
//! # Matching
//!
//! A manifest entry and a distribution package refer to the same repository
//! when the package's `doc.url` or `source.url` equals the entry's `url`,
//! ignoring a trailing `.git` on either side.
//!
//! Packages are scanned in file order and the first match wins. A package
//! whose `doc` and `source` URLs disagree (again ignoring `.git`) is
//! inconsistent: it is logged and passed over, and scanning continues with
//! the next package.
//!
//! Manifest entries with no matching package are simply absent from the
//! table; referencing one later is a lookup error.

use indexmap::IndexMap;
use tracing::warn;

use super::documents::{DistributionFile, DistributionRepository, ReposFile};
use super::urls::strip_git_suffix;

/// The distribution side of a cross-reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossRefEntry {
    /// Package name in the distribution descriptor
    pub package: String,
    /// Release-metadata repository URL, if the package has a release entry
    pub release_url: Option<String>,
}

/// Manifest repository name → distribution package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossReference {
    entries: IndexMap<String, CrossRefEntry>,
}

impl CrossReference {
    /// Build the table for every manifest entry.
    pub fn build(repos: &ReposFile, distribution: &DistributionFile) -> Self {
        let entries = repos
            .repositories
            .iter()
            .filter_map(|(name, entry)| {
                find_package(name, &entry.url, distribution).map(|found| (name.clone(), found))
            })
            .collect();
        Self { entries }
    }

    /// Look up a manifest repository.
    pub fn get(&self, repo: &str) -> Option<&CrossRefEntry> {
        self.entries.get(repo)
    }

    /// Number of matched manifest entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing matched.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(manifest name, entry)` pairs in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CrossRefEntry)> {
        self.entries.iter()
    }
}

fn find_package(
    repo_name: &str,
    repo_url: &str,
    distribution: &DistributionFile,
) -> Option<CrossRefEntry> {
    let wanted = strip_git_suffix(repo_url);

    for (package, info) in &distribution.repositories {
        let doc_url = info.doc.as_ref().map(|d| strip_git_suffix(&d.url));
        let source_url = info.source.as_ref().map(|s| strip_git_suffix(&s.url));

        if doc_url != Some(wanted) && source_url != Some(wanted) {
            continue;
        }

        if let (Some(doc), Some(source)) = (doc_url, source_url) {
            if doc != source {
                warn!(
                    "Package {} doc URL {} does not match source URL {}, skipping",
                    repo_name, doc, source
                );
                continue;
            }
        }

        return Some(entry_for(package, info));
    }

    None
}

fn entry_for(package: &str, info: &DistributionRepository) -> CrossRefEntry {
    CrossRefEntry {
        package: package.to_string(),
        release_url: info.release_url().map(str::to_string),
    }
}
