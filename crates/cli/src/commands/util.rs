use std::path::Path;

use anyhow::{anyhow, Context, Result};
use qtpack_core::inspect::{default_inspector_registry, InspectorRegistry};
use qtpack_core::registry::PackageRegistry;
use qtpack_core::rules::DomainRules;

/// Load domain rules from a file, or fall back to the built-in defaults.
pub fn load_rules(path: Option<&str>) -> Result<DomainRules> {
    match path {
        Some(p) => DomainRules::load(Path::new(p))
            .with_context(|| format!("Failed to load rules from {p}")),
        None => Ok(DomainRules::default()),
    }
}

/// Look up an inspector by name, with a helpful error listing what exists.
pub fn resolve_inspector<'a>(
    registry: &'a InspectorRegistry,
    name: &str,
) -> Result<&'a dyn qtpack_core::inspect::BinaryInspector> {
    registry.get(name).ok_or_else(|| {
        anyhow!("Unknown inspector '{}'; available: {}", name, registry.names().join(", "))
    })
}

/// Run the whole classification/merge/resolution pipeline for a root tree.
pub fn build_registry(
    root: &Path,
    rules: &DomainRules,
    inspector_name: &str,
    version: Option<&str>,
) -> Result<PackageRegistry> {
    let inspectors = default_inspector_registry();
    let inspector = resolve_inspector(&inspectors, inspector_name)?;
    let version = version.unwrap_or(rules.default_version.as_str());

    qtpack_core::pipeline::run(root, rules, inspector, version)
        .with_context(|| format!("Failed to build package registry for {}", root.display()))
}
