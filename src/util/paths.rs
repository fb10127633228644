//! Source path decomposition and output-path derivation.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// A path that cannot be split into directory and stem.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid source path: `{path}`")]
pub struct InvalidPathError {
    pub path: String,
}

impl InvalidPathError {
    fn new(path: &Path) -> Self {
        InvalidPathError {
            path: path.display().to_string(),
        }
    }
}

/// Split a path into its parent directory and its filename without extension.
///
/// The directory is empty for bare filenames, and the stem equals the
/// filename for paths that carry no extension. Only an empty or otherwise
/// nameless path (e.g. `..`) is rejected.
pub fn decompose(path: &Path) -> Result<(PathBuf, String), InvalidPathError> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| InvalidPathError::new(path))?;

    let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();

    Ok((directory, stem))
}

/// The file stem alone.
pub fn stem(path: &Path) -> Result<String, InvalidPathError> {
    decompose(path).map(|(_, stem)| stem)
}

/// Derive the extension-less artifact path for a source file.
///
/// The directory component is preserved: `debug/editor_debugger.cpp`
/// becomes `debug/editor_debugger`.
pub fn output_path(path: &Path) -> Result<PathBuf, InvalidPathError> {
    let (directory, stem) = decompose(path)?;
    Ok(directory.join(stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_with_directory() {
        let (dir, stem) = decompose(Path::new("debug/editor_debugger.cpp")).unwrap();
        assert_eq!(dir, PathBuf::from("debug"));
        assert_eq!(stem, "editor_debugger");
    }

    #[test]
    fn test_decompose_bare_filename() {
        let (dir, stem) = decompose(Path::new("editor_scale.cpp")).unwrap();
        assert_eq!(dir, PathBuf::new());
        assert_eq!(stem, "editor_scale");
    }

    #[test]
    fn test_decompose_no_extension() {
        let (dir, stem) = decompose(Path::new("gui/editor_log")).unwrap();
        assert_eq!(dir, PathBuf::from("gui"));
        assert_eq!(stem, "editor_log");
    }

    #[test]
    fn test_decompose_empty_path_fails() {
        assert!(decompose(Path::new("")).is_err());
    }

    #[test]
    fn test_decompose_parent_dir_fails() {
        assert!(decompose(Path::new("..")).is_err());
    }

    #[test]
    fn test_output_path_strips_extension() {
        let out = output_path(Path::new("debug/editor_debugger.cpp")).unwrap();
        assert_eq!(out, PathBuf::from("debug/editor_debugger"));
    }

    #[test]
    fn test_output_path_bare_filename() {
        let out = output_path(Path::new("editor_settings.cpp")).unwrap();
        assert_eq!(out, PathBuf::from("editor_settings"));
    }

    #[test]
    fn test_output_path_nested_directories() {
        let out = output_path(Path::new("gui/tabs/editor_scene_tabs.cpp")).unwrap();
        assert_eq!(out, PathBuf::from("gui/tabs/editor_scene_tabs"));
    }

    #[test]
    fn test_stem_of_icon() {
        assert_eq!(stem(Path::new("icons/folder.png")).unwrap(), "folder");
    }
}
