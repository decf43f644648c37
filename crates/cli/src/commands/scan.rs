use anyhow::{Context, Result};

use crate::canonicalize_or_current;
use crate::commands::{build_registry, load_rules};

/// Classify a tree of artifacts and print the package dependency summary.
pub fn scan_command(
    root: &str,
    version: Option<String>,
    rules_path: Option<String>,
    inspector: &str,
    json: bool,
) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let rules = load_rules(rules_path.as_deref())?;
    let registry = build_registry(&root_path, &rules, inspector, version.as_deref())?;

    if json {
        let serialized = serde_json::to_string_pretty(&registry)
            .context("Failed to serialize package registry to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Packages ({}):", registry.len());
    println!();
    println!("Package dependencies:");
    for line in registry.summary_lines() {
        println!("  {line}");
    }
    Ok(())
}
