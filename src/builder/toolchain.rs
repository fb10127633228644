//! C++ compiler discovery and command construction.
//!
//! The compiler is an opaque external collaborator: one input path, one
//! output path, captured streams, exit status. Everything else about it
//! (flags, dialect, vendor) is out of scope.

use std::path::{Path, PathBuf};

use crate::util::process::{find_executable, ProcessBuilder};

/// The external C++ compiler used for per-file builds.
#[derive(Debug, Clone)]
pub struct Compiler {
    path: PathBuf,
}

impl Compiler {
    /// Use a specific compiler executable.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Compiler { path: path.into() }
    }

    /// Locate a C++ compiler.
    ///
    /// Honors the `CXX` environment variable first, then probes PATH for
    /// the usual suspects.
    pub fn detect() -> Option<Self> {
        if let Ok(cxx) = std::env::var("CXX") {
            if let Some(path) = find_executable(&cxx) {
                return Some(Compiler { path });
            }
        }

        for compiler in &["g++", "clang++", "c++"] {
            if let Some(path) = find_executable(compiler) {
                return Some(Compiler { path });
            }
        }

        None
    }

    /// Path to the compiler executable.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build the invocation for one source file.
    ///
    /// A direct argument vector, no shell: `<source> -o <output>`.
    pub fn compile_command(&self, source: &Path, output: &Path) -> ProcessBuilder {
        ProcessBuilder::new(&self.path)
            .arg(source)
            .arg("-o")
            .arg(output)
    }
}
