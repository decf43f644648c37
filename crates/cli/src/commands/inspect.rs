use std::path::Path;

use anyhow::{anyhow, Context, Result};
use qtpack_core::inspect::default_inspector_registry;
use qtpack_core::model::{Arch, ArtifactKind};
use serde::Serialize;

use crate::commands::resolve_inspector;
use crate::sha256_file;

#[derive(Debug, Serialize)]
struct InspectReport {
    path: String,
    architecture: Option<Arch>,
    imports: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha256: Option<String>,
}

/// Report what an inspector sees in a single artifact: architecture, imports
/// (for dynamic libraries), and a content hash.
pub fn inspect_command(path: &str, inspector: &str, skip_hash: bool, json: bool) -> Result<()> {
    let artifact = Path::new(path);
    if !artifact.is_file() {
        return Err(anyhow!("Artifact does not exist: {}", artifact.display()));
    }

    let inspectors = default_inspector_registry();
    let inspector = resolve_inspector(&inspectors, inspector)?;

    let arch = inspector
        .architecture(artifact)
        .with_context(|| format!("Failed to inspect headers of {}", artifact.display()))?;

    let ext = artifact.extension().and_then(|e| e.to_str()).unwrap_or("");
    let is_binary = ArtifactKind::from_extension(ext) == Some(ArtifactKind::Binary);
    let imports = if is_binary {
        inspector
            .imports(artifact)
            .with_context(|| format!("Failed to inspect imports of {}", artifact.display()))?
    } else {
        Vec::new()
    };

    let hash = if skip_hash { None } else { Some(sha256_file(artifact)?) };

    if json {
        let report = InspectReport {
            path: artifact.display().to_string(),
            architecture: arch,
            imports,
            sha256: hash,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Artifact: {}", artifact.display());
    println!("Architecture: {}", arch.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string()));
    if is_binary {
        println!("Imports ({}):", imports.len());
        for import in &imports {
            println!("  - {import}");
        }
    }
    if let Some(hash) = hash {
        println!("SHA-256: {hash}");
    }
    Ok(())
}
