//! Icon name-to-path indexing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

use crate::util::paths;

/// Build the stem-to-path index for a set of icon files.
///
/// Input order is significant: a later file whose stem collides with an
/// earlier one overwrites it (last-write-wins). Collisions are logged
/// with the path they displace.
pub fn index_icons(files: &[PathBuf]) -> Result<BTreeMap<String, PathBuf>> {
    let mut index: BTreeMap<String, PathBuf> = BTreeMap::new();

    for file in files {
        let stem = paths::stem(file)?;
        if let Some(previous) = index.insert(stem.clone(), file.clone()) {
            tracing::warn!(
                "icon `{}` from {} shadows {}",
                stem,
                file.display(),
                previous.display()
            );
        }
    }

    Ok(index)
}

/// Collect every `.png` file under `dir`, in a deterministic walk order.
pub fn collect_icons(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
        })
        .collect()
}
