use std::fs;

use anyhow::{Context, Result};

use crate::canonicalize_or_current;
use crate::commands::{build_registry, load_rules};

/// Run the pipeline and write one `.autopkg` document per package.
pub fn emit_command(
    root: &str,
    output: &str,
    version: Option<String>,
    rules_path: Option<String>,
    inspector: &str,
) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let out_dir = canonicalize_or_current(output)?;
    let rules = load_rules(rules_path.as_deref())?;
    let registry = build_registry(&root_path, &rules, inspector, version.as_deref())?;

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    for package in registry.packages() {
        let path = qtpack_core::emit::write_autopkg(package, &rules.toolchain, &out_dir)
            .with_context(|| format!("Failed to write package descriptor for {}", package.name))?;
        println!("Wrote {}", path.display());
    }

    println!();
    println!("Package dependencies:");
    for line in registry.summary_lines() {
        println!("  {line}");
    }
    Ok(())
}
