//! Per-file build reports.
//!
//! One report is produced for every attempted compile, never mutated after
//! creation. Reports are the only channel through which per-file failures
//! travel; a failing file never aborts the batch that contains it.
//!
//! Reports serialize to a stable line-oriented JSON shape for
//! machine-readable output (`--message-format=json`).

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Why a compile attempt did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BuildFailure {
    /// The compiler ran and exited non-zero; diagnostics are in the
    /// captured stderr.
    CompileError {
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<i32>,
    },

    /// The compiler could not be launched at all (missing or not
    /// executable). Distinct from `CompileError` so callers can tell
    /// "your code doesn't compile" from "your toolchain is broken".
    Launch { message: String },

    /// The compiler ran past the configured deadline and was killed.
    TimedOut { limit_ms: u64 },

    /// The batch was canceled before this file was attempted.
    Canceled,
}

/// The structured outcome of one compiler invocation.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    /// Source file that was compiled.
    pub source: PathBuf,
    /// Derived extension-less artifact path passed to the compiler.
    pub output: PathBuf,
    /// Captured standard output, lossily decoded.
    pub stdout: String,
    /// Captured standard error, lossily decoded.
    pub stderr: String,
    /// Whether the compiler reported exit status zero.
    pub success: bool,
    /// Failure detail when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<BuildFailure>,
}

impl BuildReport {
    /// A report for a compile that exited with status zero.
    pub fn succeeded(source: &Path, output: &Path, stdout: String, stderr: String) -> Self {
        BuildReport {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            stdout,
            stderr,
            success: true,
            failure: None,
        }
    }

    /// A report for a compile that did not succeed.
    pub fn failed(
        source: &Path,
        output: &Path,
        stdout: String,
        stderr: String,
        failure: BuildFailure,
    ) -> Self {
        BuildReport {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            stdout,
            stderr,
            success: false,
            failure: Some(failure),
        }
    }

    /// Whether the failure was a toolchain problem rather than a compile error.
    pub fn is_launch_failure(&self) -> bool {
        matches!(self.failure, Some(BuildFailure::Launch { .. }))
    }

    /// Serialize this report to a JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
