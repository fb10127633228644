//! The ordered source manifest and its mutation operations.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glob::glob;

use crate::util::paths::InvalidPathError;

/// An ordered list of source files slated for compilation.
///
/// Insertion order is build order and reporting order. Uniqueness is not
/// enforced anywhere: the same path added twice is built twice, and
/// overlapping glob patterns keep their duplicate matches. Callers that
/// want one copy take the extras out with [`SourceManifest::remove`].
#[derive(Debug, Clone, Default)]
pub struct SourceManifest {
    entries: Vec<PathBuf>,
}

impl SourceManifest {
    /// Create an empty manifest.
    pub fn new() -> Self {
        SourceManifest::default()
    }

    /// Create a manifest from a static list of paths.
    pub fn from_paths<I, P>(paths: I) -> Result<Self, InvalidPathError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut manifest = SourceManifest::new();
        for path in paths {
            manifest.push(path)?;
        }
        Ok(manifest)
    }

    /// Append a single path.
    ///
    /// An empty path is a programming error and is rejected synchronously;
    /// everything else is appended as-is, existing or not.
    pub fn push(&mut self, path: impl Into<PathBuf>) -> Result<(), InvalidPathError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(InvalidPathError {
                path: String::new(),
            });
        }
        self.entries.push(path);
        Ok(())
    }

    /// Expand glob patterns and append every match.
    ///
    /// Matches are appended in pattern order, then in match order within
    /// each pattern; the flattened match list is returned. A pattern that
    /// matches nothing contributes nothing and is not an error. Duplicates
    /// across overlapping patterns are preserved.
    pub fn add_patterns(&mut self, patterns: &[String]) -> Result<Vec<PathBuf>> {
        let mut matched = Vec::new();

        for pattern in patterns {
            if pattern.is_empty() {
                bail!("empty glob pattern");
            }

            for entry in
                glob(pattern).with_context(|| format!("invalid glob pattern: {}", pattern))?
            {
                match entry {
                    Ok(path) => {
                        if path.is_file() {
                            matched.push(path);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("glob error: {}", e);
                    }
                }
            }
        }

        self.entries.extend(matched.iter().cloned());
        Ok(matched)
    }

    /// Remove at most one occurrence of each requested path.
    ///
    /// Absence is a reported outcome, not an error: each requested path
    /// comes back paired with whether a removal happened.
    pub fn remove(&mut self, paths: &[PathBuf]) -> Vec<(PathBuf, bool)> {
        paths
            .iter()
            .map(|path| {
                let removed = match self.entries.iter().position(|entry| entry == path) {
                    Some(index) => {
                        self.entries.remove(index);
                        true
                    }
                    None => false,
                };
                (path.clone(), removed)
            })
            .collect()
    }

    /// An owned, insertion-ordered copy of the entries.
    ///
    /// Orchestration iterates this snapshot, never the live manifest.
    pub fn snapshot(&self) -> Vec<PathBuf> {
        self.entries.clone()
    }

    /// Iterate the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(PathBuf::as_path)
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
