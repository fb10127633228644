//! Build execution with progress reporting.

use std::time::Instant;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::builder::orchestrator::BuildOrchestrator;
use crate::core::manifest::SourceManifest;
use crate::core::report::BuildReport;

/// Drives a [`BuildOrchestrator`] with terminal progress and timing.
///
/// Presentation only; all build semantics live in the orchestrator.
pub struct BuildExecutor<'a> {
    orchestrator: &'a BuildOrchestrator,
    verbose: bool,
}

impl<'a> BuildExecutor<'a> {
    /// Create a new build executor.
    pub fn new(orchestrator: &'a BuildOrchestrator) -> Self {
        BuildExecutor {
            orchestrator,
            verbose: false,
        }
    }

    /// Enable verbose output.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Build every manifest entry with a progress spinner and a timing
    /// summary, returning the orchestrator's reports untouched.
    pub fn execute(&self, manifest: &SourceManifest) -> Result<Vec<BuildReport>> {
        let start = Instant::now();
        let total = manifest.len();

        if self.verbose {
            eprintln!("   Compiling {} file(s)", total);
        }

        let pb = if !self.verbose && total > 1 {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };

        let reports = self.orchestrator.build_all(manifest)?;

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        let failed = reports.iter().filter(|r| !r.success).count();
        let elapsed = start.elapsed();
        eprintln!(
            "    Finished {} file(s), {} failed, in {:.2}s",
            reports.len(),
            failed,
            elapsed.as_secs_f64()
        );

        Ok(reports)
    }
}
