//! `drydock build` command

use std::io::IsTerminal;
use std::time::Duration;

use anyhow::{bail, Result};

use crate::cli::{BuildArgs, MessageFormat};
use drydock::builder::{BuildExecutor, BuildOrchestrator, Compiler};
use drydock::core::manifest::SourceManifest;
use drydock::core::report::BuildReport;
use drydock::util::diagnostic::{self, suggestions, Diagnostic};

pub fn execute(args: BuildArgs, verbose: bool) -> Result<()> {
    let color = std::io::stderr().is_terminal();

    let compiler = match args.compiler {
        Some(path) => Compiler::new(path),
        None => match Compiler::detect() {
            Some(compiler) => compiler,
            None => {
                bail!("no C++ compiler found\n{}", suggestions::NO_COMPILER);
            }
        },
    };
    tracing::debug!("using compiler {}", compiler.path().display());

    let mut manifest = SourceManifest::new();
    let matched = manifest.add_patterns(&args.patterns)?;
    tracing::debug!("matched {} source file(s)", matched.len());

    for (path, removed) in manifest.remove(&args.exclude) {
        if removed {
            tracing::info!("excluded {}", path.display());
        } else {
            tracing::warn!("{} is not in the source list", path.display());
        }
    }

    if manifest.is_empty() {
        diagnostic::emit(
            &Diagnostic::warning("nothing to build")
                .with_suggestion(suggestions::EMPTY_MANIFEST),
            color,
        );
        return Ok(());
    }

    let orchestrator = BuildOrchestrator::new(compiler)
        .jobs(args.jobs)
        .timeout(args.timeout.map(Duration::from_secs));

    let reports = match args.message_format {
        MessageFormat::Json => orchestrator.build_all(&manifest)?,
        MessageFormat::Human => BuildExecutor::new(&orchestrator)
            .verbose(verbose)
            .execute(&manifest)?,
    };

    match args.message_format {
        MessageFormat::Json => {
            for report in &reports {
                println!("{}", report.to_json());
            }
        }
        MessageFormat::Human => print_reports(&reports),
    }

    let failed: Vec<&BuildReport> = reports.iter().filter(|r| !r.success).collect();
    if !failed.is_empty() {
        let mut diag = Diagnostic::error(format!(
            "{} of {} files failed to build",
            failed.len(),
            reports.len()
        ))
        .with_suggestion(suggestions::BUILD_FAILED);
        if failed.iter().any(|r| r.is_launch_failure()) {
            diag = diag.with_suggestion(suggestions::NO_COMPILER);
        }
        diagnostic::emit(&diag, color);
        std::process::exit(1);
    }

    Ok(())
}

fn print_reports(reports: &[BuildReport]) {
    for report in reports {
        if !report.stdout.is_empty() {
            println!("{}", report.stdout.trim_end());
        }
        if report.success {
            println!(
                "    Compiled {} -> {}",
                report.source.display(),
                report.output.display()
            );
        } else {
            if !report.stderr.is_empty() {
                eprintln!("{}", report.stderr.trim_end());
            }
            println!("      Failed {}", report.source.display());
        }
    }
}
