//! Dependency resolution.
//!
//! Runs once, after all merges: for every package, the union of in-domain
//! imports across all of its binaries in all configuration buckets, plus the
//! fixed base dependencies, minus the package itself. Dependencies are
//! tracked per package, not per architecture or flavor; a consumer cannot
//! install an architecture-specific subset of a declared dependency anyway.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::inspect::{BinaryInspector, InspectError};
use crate::model::logical_name;
use crate::registry::PackageRegistry;
use crate::rules::DomainRules;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The inspector failed on a binary. Fatal for the whole pass: a partial
    /// dependency graph silently breaks downstream installation.
    #[error("failed to inspect imports of {binary} (package {package}): {source}")]
    Inspect { package: String, binary: String, source: InspectError },
}

/// Compute the dependency set of every package in the registry.
pub fn resolve_dependencies(
    registry: &mut PackageRegistry,
    inspector: &dyn BinaryInspector,
    rules: &DomainRules,
) -> Result<(), ResolveError> {
    for package in registry.packages_mut() {
        let mut deps: BTreeSet<String> = rules.fixed_dependencies.iter().cloned().collect();

        for config in &package.configurations {
            for binary in &config.binaries {
                let imports =
                    inspector.imports(&binary.path).map_err(|source| ResolveError::Inspect {
                        package: package.name.clone(),
                        binary: binary.file_name.clone(),
                        source,
                    })?;
                for import in imports {
                    let import = import.to_lowercase();
                    if import.starts_with(rules.import_prefix.as_str()) {
                        deps.insert(logical_name(&import, &rules.debug_suffix));
                    }
                }
            }
        }

        // A package never depends on itself, even when a debug binary imports
        // its release counterpart or a merged satellite imported the parent.
        deps.remove(&package.name);
        package.dependencies = deps;
    }
    Ok(())
}
