//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Drydock - a minimal per-file build runner for C++ sources
#[derive(Parser)]
#[command(name = "drydock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Expand source patterns and compile each match into a sibling executable
    Build(BuildArgs),

    /// Print the contents of header files
    Headers(HeadersArgs),

    /// Print the icon name-to-path index
    Icons(IconsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format for build results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MessageFormat {
    /// Human-readable status lines and progress
    #[default]
    Human,
    /// One JSON report per line
    Json,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Glob patterns selecting the source files to build
    #[arg(required = true, value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Exact paths to drop from the source list after expansion
    #[arg(long, value_name = "PATH")]
    pub exclude: Vec<PathBuf>,

    /// Number of parallel compiler invocations (default: sequential)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Per-file compile timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Compiler executable (defaults to $CXX, then g++/clang++/c++)
    #[arg(long, value_name = "PATH", env = "CXX")]
    pub compiler: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub message_format: MessageFormat,
}

#[derive(Args)]
pub struct HeadersArgs {
    /// Header files to read
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

#[derive(Args)]
pub struct IconsArgs {
    /// Icon files to index
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Walk a directory for .png files instead of listing them
    #[arg(long, value_name = "DIR", conflicts_with = "paths")]
    pub dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
