//! Phase driver: walk -> classify/ingest -> merge -> resolve.
//!
//! The phases are strictly ordered and each completes before the next starts;
//! resolution in particular requires a stable, fully merged registry. Keeping
//! the driver here (rather than in a frontend) makes that ordering a visible
//! contract.

use std::path::Path;

use thiserror::Error;

use crate::classify::{Classifier, ClassifyError};
use crate::inspect::BinaryInspector;
use crate::registry::{MergeError, PackageRegistry};
use crate::resolve::{resolve_dependencies, ResolveError};
use crate::rules::DomainRules;
use crate::walk::{find_artifact_paths, WalkError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Walk(#[from] WalkError),
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error(transparent)]
    Merge(#[from] MergeError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Run the whole engine over a directory tree and return the finished
/// registry, ready for emission.
///
/// Inspector calls are currently sequential; they are read-only and
/// artifact-independent, so they could be parallelized per phase without
/// changing any result.
pub fn run(
    root: &Path,
    rules: &DomainRules,
    inspector: &dyn BinaryInspector,
    version: &str,
) -> Result<PackageRegistry, PipelineError> {
    let paths = find_artifact_paths(root)?;

    let classifier = Classifier::new(inspector, rules);
    let mut registry = PackageRegistry::new();
    for path in &paths {
        if let Some(artifact) = classifier.classify(path)? {
            registry.ingest(artifact, version, &rules.toolchain);
        }
    }

    registry.apply_merge_table(&rules.merge_table)?;
    resolve_dependencies(&mut registry, inspector, rules)?;

    Ok(registry)
}
