//! Drydock - a minimal per-file build runner for C++ sources
//!
//! This crate provides the core library functionality for Drydock,
//! including the ordered source manifest, per-file compiler orchestration,
//! and the header/icon inspection maps.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

pub use crate::core::{
    manifest::SourceManifest,
    report::{BuildFailure, BuildReport},
};

pub use builder::{BuildExecutor, BuildOrchestrator, CancelToken, Compiler};
