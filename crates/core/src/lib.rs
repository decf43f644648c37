//! qtpack-core
//!
//! Core library for turning a directory tree of Qt binary artifacts (DLLs,
//! import libraries, PDB symbol files) into versioned, dependency-annotated
//! package descriptors.
//!
//! The crate is organized around four strictly ordered phases:
//! classification (one [`model::Artifact`] per file), ingestion into a
//! [`registry::PackageRegistry`], application of a fixed merge table, and
//! dependency resolution from binary import tables. [`pipeline::run`] drives
//! all four. Binary headers are read through the [`inspect::BinaryInspector`]
//! seam so the engine itself never touches a binary format directly.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (CLI, CI jobs, etc.).

pub mod classify;
pub mod emit;
pub mod inspect;
pub mod model;
pub mod pipeline;
pub mod registry;
pub mod resolve;
pub mod rules;
pub mod walk;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
