use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::inspect::{BinaryInspector, InspectError};
use crate::model::Arch;

/// Inspector backed by `<file>.inspect.json` sidecar files.
///
/// A sidecar holds the two facts an inspector can report:
///
/// ```json
/// { "architecture": "x64", "imports": ["Qt5Core.dll", "kernel32.dll"] }
/// ```
///
/// This keeps the whole pipeline runnable on trees whose headers were dumped
/// on another machine, and gives tests a seam that needs no real binaries.
pub struct ManifestInspector;

#[derive(Debug, Deserialize)]
struct Sidecar {
    architecture: Option<Arch>,
    #[serde(default)]
    imports: Vec<String>,
}

fn load_sidecar(path: &Path) -> Result<Sidecar, InspectError> {
    if !path.is_file() {
        return Err(InspectError::MissingArtifact(path.to_path_buf()));
    }
    let sidecar_path = {
        let mut os = path.as_os_str().to_os_string();
        os.push(".inspect.json");
        std::path::PathBuf::from(os)
    };
    let body = fs::read_to_string(&sidecar_path)
        .map_err(|source| InspectError::Io { path: sidecar_path.clone(), source })?;
    serde_json::from_str(&body).map_err(|e| {
        InspectError::Tool(format!("malformed sidecar {}: {e}", sidecar_path.display()))
    })
}

impl BinaryInspector for ManifestInspector {
    fn architecture(&self, path: &Path) -> Result<Option<Arch>, InspectError> {
        Ok(load_sidecar(path)?.architecture)
    }

    fn imports(&self, path: &Path) -> Result<Vec<String>, InspectError> {
        Ok(load_sidecar(path)?.imports)
    }

    fn name(&self) -> &'static str {
        "manifest"
    }
}
