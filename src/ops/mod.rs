//! High-level operations over file collections: header ingestion and
//! icon indexing. Both are independent of the manifest and orchestrator.

pub mod headers;
pub mod icons;
