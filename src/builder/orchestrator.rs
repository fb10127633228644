//! Per-file build orchestration.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::builder::toolchain::Compiler;
use crate::core::manifest::SourceManifest;
use crate::core::report::{BuildFailure, BuildReport};
use crate::util::paths;
use crate::util::process::ExecOutcome;

/// Cooperative cancellation flag, checked before each file.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    canceled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-canceled state.
    pub fn new() -> Self {
        CancelToken::default()
    }

    /// Request cancellation. In-flight compiler invocations finish;
    /// files not yet started are reported as canceled.
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }
}

/// Drives the compiler over every manifest entry.
///
/// Sequential by default; `jobs` enables a bounded worker pool whose
/// reports are reordered back into manifest order. Either way the result
/// holds exactly one report per entry of the snapshot taken at call start.
pub struct BuildOrchestrator {
    compiler: Compiler,
    timeout: Option<Duration>,
    jobs: Option<usize>,
    cancel: CancelToken,
}

impl BuildOrchestrator {
    /// Create an orchestrator for the given compiler.
    pub fn new(compiler: Compiler) -> Self {
        BuildOrchestrator {
            compiler,
            timeout: None,
            jobs: None,
            cancel: CancelToken::new(),
        }
    }

    /// Set a per-invocation deadline. Off by default.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of parallel compiler invocations. `None` or `1`
    /// keeps builds sequential.
    pub fn jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Attach a cancellation token shared with the caller.
    pub fn cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Compile every manifest entry, in manifest order.
    ///
    /// One file's failure never aborts the rest of the batch. Only a
    /// malformed manifest entry (no derivable output path) errors the
    /// call itself, before any compiler is launched.
    pub fn build_all(&self, manifest: &SourceManifest) -> Result<Vec<BuildReport>> {
        let snapshot = manifest.snapshot();

        // Resolve all output paths up front so a malformed entry is a
        // synchronous error rather than a half-run batch.
        let units = snapshot
            .into_iter()
            .map(|source| {
                let output = paths::output_path(&source).with_context(|| {
                    format!("cannot derive output path for `{}`", source.display())
                })?;
                Ok((source, output))
            })
            .collect::<Result<Vec<(PathBuf, PathBuf)>>>()?;

        match self.jobs {
            Some(jobs) if jobs > 1 => self.build_parallel(&units, jobs),
            _ => Ok(units
                .iter()
                .map(|(source, output)| self.build_one(source, output))
                .collect()),
        }
    }

    fn build_parallel(
        &self,
        units: &[(PathBuf, PathBuf)],
        jobs: usize,
    ) -> Result<Vec<BuildReport>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to create build thread pool")?;

        // Indexed collect puts reports back into manifest order no matter
        // which worker finishes first.
        let reports = pool.install(|| {
            units
                .par_iter()
                .map(|(source, output)| self.build_one(source, output))
                .collect()
        });

        Ok(reports)
    }

    /// Run the compiler for a single source file and capture the outcome.
    fn build_one(&self, source: &Path, output: &Path) -> BuildReport {
        if self.cancel.is_canceled() {
            return BuildReport::failed(
                source,
                output,
                String::new(),
                String::new(),
                BuildFailure::Canceled,
            );
        }

        let cmd = self.compiler.compile_command(source, output);
        tracing::debug!("running `{}`", cmd.display_command());

        match cmd.exec_with_timeout(self.timeout) {
            Ok(ExecOutcome::Completed(out)) => {
                let stdout = String::from_utf8_lossy(&out.stdout).into_owned();
                let stderr = String::from_utf8_lossy(&out.stderr).into_owned();

                if out.status.success() {
                    tracing::debug!("compiled {} -> {}", source.display(), output.display());
                    BuildReport::succeeded(source, output, stdout, stderr)
                } else {
                    BuildReport::failed(
                        source,
                        output,
                        stdout,
                        stderr,
                        BuildFailure::CompileError {
                            code: out.status.code(),
                        },
                    )
                }
            }
            Ok(ExecOutcome::TimedOut { stdout, stderr }) => {
                tracing::warn!("compiler timed out on {}", source.display());
                BuildReport::failed(
                    source,
                    output,
                    String::from_utf8_lossy(&stdout).into_owned(),
                    String::from_utf8_lossy(&stderr).into_owned(),
                    BuildFailure::TimedOut {
                        limit_ms: self.timeout.map_or(0, |t| t.as_millis() as u64),
                    },
                )
            }
            Err(e) => BuildReport::failed(
                source,
                output,
                String::new(),
                String::new(),
                BuildFailure::Launch {
                    message: e.to_string(),
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::SourceManifest;
    use std::fs;
    use tempfile::TempDir;

    /// A stand-in compiler: succeeds unless the source path contains
    /// `broken`, in which case it prints a diagnostic and exits 1.
    #[cfg(unix)]
    fn stub_compiler(tmp: &TempDir) -> Compiler {
        use std::os::unix::fs::PermissionsExt;

        let path = tmp.path().join("fakecxx");
        fs::write(
            &path,
            "#!/bin/sh\n\
             case \"$1\" in\n\
             *broken*) echo \"error: bad source\" >&2; exit 1;;\n\
             esac\n\
             echo \"compiled $1\"\n\
             : > \"$3\"\n\
             exit 0\n",
        )
        .unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        Compiler::new(path)
    }

    #[cfg(unix)]
    fn source_manifest(tmp: &TempDir, names: &[&str]) -> SourceManifest {
        let mut manifest = SourceManifest::new();
        for name in names {
            let path = tmp.path().join(name);
            fs::write(&path, "\n").unwrap();
            manifest.push(path).unwrap();
        }
        manifest
    }

    #[cfg(unix)]
    #[test]
    fn test_one_report_per_entry_in_order() {
        let tmp = TempDir::new().unwrap();
        let compiler = stub_compiler(&tmp);
        let manifest = source_manifest(&tmp, &["a.cpp", "b.cpp", "c.cpp"]);

        let reports = BuildOrchestrator::new(compiler).build_all(&manifest).unwrap();

        assert_eq!(reports.len(), 3);
        assert!(reports[0].source.ends_with("a.cpp"));
        assert!(reports[1].source.ends_with("b.cpp"));
        assert!(reports[2].source.ends_with("c.cpp"));
        assert!(reports.iter().all(|r| r.success));
    }

    #[cfg(unix)]
    #[test]
    fn test_partial_failure_does_not_abort_batch() {
        let tmp = TempDir::new().unwrap();
        let compiler = stub_compiler(&tmp);
        let manifest = source_manifest(&tmp, &["good.cpp", "broken.cpp", "good2.cpp"]);

        let reports = BuildOrchestrator::new(compiler).build_all(&manifest).unwrap();

        assert_eq!(reports.len(), 3);
        assert!(reports[0].success);
        assert!(!reports[1].success);
        assert!(reports[2].success);

        assert!(!reports[1].stderr.is_empty());
        assert!(matches!(
            reports[1].failure,
            Some(BuildFailure::CompileError { code: Some(1) })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_output_path_derived_next_to_source() {
        let tmp = TempDir::new().unwrap();
        let compiler = stub_compiler(&tmp);

        fs::create_dir(tmp.path().join("debug")).unwrap();
        let manifest = source_manifest(&tmp, &["debug/editor_debugger.cpp"]);

        let reports = BuildOrchestrator::new(compiler).build_all(&manifest).unwrap();

        assert_eq!(reports[0].output, tmp.path().join("debug/editor_debugger"));
        assert!(reports[0].output.exists());
    }

    #[test]
    fn test_launch_failure_recorded_per_report() {
        let mut manifest = SourceManifest::new();
        manifest.push("a.cpp").unwrap();
        manifest.push("b.cpp").unwrap();

        let compiler = Compiler::new("/nonexistent/toolchain/g++");
        let reports = BuildOrchestrator::new(compiler).build_all(&manifest).unwrap();

        // Both entries get a report; neither aborts the other.
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.is_launch_failure()));
    }

    #[cfg(unix)]
    #[test]
    fn test_parallel_mode_restores_manifest_order() {
        let tmp = TempDir::new().unwrap();
        let compiler = stub_compiler(&tmp);
        let names = ["e.cpp", "d.cpp", "c.cpp", "b.cpp", "a.cpp"];
        let manifest = source_manifest(&tmp, &names);

        let reports = BuildOrchestrator::new(compiler)
            .jobs(Some(4))
            .build_all(&manifest)
            .unwrap();

        assert_eq!(reports.len(), names.len());
        for (report, name) in reports.iter().zip(names.iter()) {
            assert!(report.source.ends_with(name));
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_hanging_compiler() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("hangingcxx");
        fs::write(&path, "#!/bin/sh\nsleep 30\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        let manifest = source_manifest(&tmp, &["a.cpp"]);

        let reports = BuildOrchestrator::new(Compiler::new(path))
            .timeout(Some(Duration::from_millis(100)))
            .build_all(&manifest)
            .unwrap();

        assert_eq!(reports.len(), 1);
        assert!(matches!(
            reports[0].failure,
            Some(BuildFailure::TimedOut { limit_ms: 100 })
        ));
    }

    #[test]
    fn test_canceled_batch_still_reports_every_entry() {
        let mut manifest = SourceManifest::new();
        manifest.push("a.cpp").unwrap();
        manifest.push("b.cpp").unwrap();

        let cancel = CancelToken::new();
        cancel.cancel();

        let reports = BuildOrchestrator::new(Compiler::new("g++"))
            .cancel_token(cancel)
            .build_all(&manifest)
            .unwrap();

        assert_eq!(reports.len(), 2);
        assert!(reports
            .iter()
            .all(|r| r.failure == Some(BuildFailure::Canceled)));
    }

    #[test]
    fn test_empty_manifest_yields_empty_batch() {
        let manifest = SourceManifest::new();
        let reports = BuildOrchestrator::new(Compiler::new("g++"))
            .build_all(&manifest)
            .unwrap();
        assert!(reports.is_empty());
    }
}
