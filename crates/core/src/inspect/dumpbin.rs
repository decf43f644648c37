use std::path::{Path, PathBuf};
use std::process::Command;

use crate::inspect::{BinaryInspector, InspectError};
use crate::model::Arch;

/// Inspector that shells out to MSVC's `dumpbin.exe`.
///
/// The tool path comes from the `QTPACK_DUMPBIN` environment variable, or
/// falls back to `dumpbin` on `PATH`. Output parsing lives in free functions
/// so it can be tested against captured tool output without the tool itself.
pub struct DumpbinInspector {
    tool: PathBuf,
}

impl DumpbinInspector {
    pub fn new(tool: impl Into<PathBuf>) -> Self {
        Self { tool: tool.into() }
    }

    pub fn from_env() -> Self {
        let tool =
            std::env::var_os("QTPACK_DUMPBIN").map(PathBuf::from).unwrap_or_else(|| "dumpbin".into());
        Self { tool }
    }

    fn run(&self, flag: &str, path: &Path) -> Result<String, InspectError> {
        if !path.is_file() {
            return Err(InspectError::MissingArtifact(path.to_path_buf()));
        }
        let output = Command::new(&self.tool)
            .arg(flag)
            .arg(path)
            .output()
            .map_err(|e| InspectError::Tool(format!("failed to spawn dumpbin: {e}")))?;
        if !output.status.success() {
            return Err(InspectError::Tool(format!(
                "dumpbin {flag} exited with {} for {}",
                output.status,
                path.display()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl BinaryInspector for DumpbinInspector {
    fn architecture(&self, path: &Path) -> Result<Option<Arch>, InspectError> {
        let out = self.run("/HEADERS", path)?;
        Ok(parse_headers_output(&out))
    }

    fn imports(&self, path: &Path) -> Result<Vec<String>, InspectError> {
        let out = self.run("/DEPENDENTS", path)?;
        Ok(parse_dependents_output(&out))
    }

    fn name(&self) -> &'static str {
        "dumpbin"
    }
}

/// Extract the machine type from `dumpbin /HEADERS` output.
///
/// The relevant line looks like `            8664 machine (x64)` or
/// `             14C machine (x86)`; the leading hex value is the COFF
/// machine field.
pub fn parse_headers_output(out: &str) -> Option<Arch> {
    for line in out.lines() {
        let line = line.trim();
        if !line.contains("machine") {
            continue;
        }
        if line.starts_with("8664") {
            return Some(Arch::X64);
        }
        if line.starts_with("14C") {
            return Some(Arch::X86);
        }
    }
    None
}

/// Extract imported module names from `dumpbin /DEPENDENTS` output.
///
/// Dependents are listed, one per line, between the line containing
/// `dependencies` and the `Summary` section. Names are lower-cased.
pub fn parse_dependents_output(out: &str) -> Vec<String> {
    let mut deps = Vec::new();
    let mut in_section = false;
    for line in out.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.contains("Summary") {
            in_section = false;
        }
        if in_section {
            deps.push(line.to_lowercase());
        }
        if line.contains("dependencies") {
            in_section = true;
        }
    }
    deps
}
