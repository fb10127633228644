//! Header file ingestion for inspection.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A header that could not be opened or read.
#[derive(Debug, Error)]
#[error("failed to read {}: {source}", path.display())]
pub struct FileReadError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// One ingested header: its path, and either its verbatim content or the
/// read failure recorded in its place.
#[derive(Debug)]
pub struct HeaderDump {
    pub path: PathBuf,
    pub content: Result<String, FileReadError>,
}

/// Read each header file fully into memory, in input order.
///
/// An unreadable file is recorded alongside its path and the batch
/// continues; the result always holds one entry per input. Content is
/// returned verbatim, with no parsing or interpretation.
pub fn dump_headers(files: &[PathBuf]) -> Vec<HeaderDump> {
    files
        .iter()
        .map(|path| {
            let content = fs::read_to_string(path).map_err(|source| FileReadError {
                path: path.clone(),
                source,
            });
            HeaderDump {
                path: path.clone(),
                content,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dump_returns_verbatim_content() {
        let tmp = TempDir::new().unwrap();
        let header = tmp.path().join("editor_node.h");
        fs::write(&header, "#pragma once\nclass EditorNode;\n").unwrap();

        let dumps = dump_headers(&[header.clone()]);

        assert_eq!(dumps.len(), 1);
        assert_eq!(dumps[0].path, header);
        assert_eq!(
            dumps[0].content.as_deref().unwrap(),
            "#pragma once\nclass EditorNode;\n"
        );
    }

    #[test]
    fn test_unreadable_file_recorded_batch_continues() {
        let tmp = TempDir::new().unwrap();
        let present = tmp.path().join("window.h");
        fs::write(&present, "struct Window;\n").unwrap();
        let missing = tmp.path().join("does_not_exist.h");

        let dumps = dump_headers(&[missing.clone(), present.clone()]);

        assert_eq!(dumps.len(), 2);
        assert!(dumps[0].content.is_err());
        assert_eq!(dumps[0].path, missing);
        assert!(dumps[1].content.is_ok());
    }

    #[test]
    fn test_dump_rereads_on_each_call() {
        let tmp = TempDir::new().unwrap();
        let header = tmp.path().join("viewport.h");
        fs::write(&header, "v1\n").unwrap();

        let first = dump_headers(&[header.clone()]);
        fs::write(&header, "v2\n").unwrap();
        let second = dump_headers(&[header.clone()]);

        assert_eq!(first[0].content.as_deref().unwrap(), "v1\n");
        assert_eq!(second[0].content.as_deref().unwrap(), "v2\n");
    }
}
