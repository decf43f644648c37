//! Binary header inspectors.
//!
//! The classification and resolution phases never parse binaries themselves;
//! they ask a [`BinaryInspector`] for two facts about a file: its target
//! architecture and, for dynamic libraries, the list of imported module
//! names. Implementations:
//!
//! - [`GoblinInspector`]: in-process PE/COFF parsing via `goblin`
//!   (feature `goblin-inspector`, on by default).
//! - [`DumpbinInspector`]: shells out to MSVC's `dumpbin.exe`.
//! - [`ManifestInspector`]: reads `<file>.inspect.json` sidecars; useful for
//!   tests and for trees whose headers were dumped elsewhere.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::Arch;

mod dumpbin;
#[cfg(feature = "goblin-inspector")]
mod goblin;
mod manifest;

pub use dumpbin::{parse_dependents_output, parse_headers_output, DumpbinInspector};
#[cfg(feature = "goblin-inspector")]
pub use self::goblin::GoblinInspector;
pub use manifest::ManifestInspector;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("artifact not found at {0}")]
    MissingArtifact(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("unrecognized binary format in {0}")]
    UnrecognizedFormat(PathBuf),
    #[error("inspector tool error: {0}")]
    Tool(String),
}

/// Read-only oracle over a binary artifact's headers.
///
/// `architecture` returns `Ok(None)` when the file parses but carries no
/// machine type we map; callers decide whether that is fatal. `imports` is
/// only meaningful for dynamic libraries.
pub trait BinaryInspector: Send + Sync {
    fn architecture(&self, path: &Path) -> Result<Option<Arch>, InspectError>;
    fn imports(&self, path: &Path) -> Result<Vec<String>, InspectError>;
    fn name(&self) -> &'static str;
}

/// Registry of inspectors; callers select by name.
#[derive(Default)]
pub struct InspectorRegistry {
    inspectors: HashMap<String, Box<dyn BinaryInspector>>,
}

impl InspectorRegistry {
    pub fn new() -> Self {
        Self { inspectors: HashMap::new() }
    }

    pub fn register<I: BinaryInspector + 'static>(&mut self, inspector: I) -> &mut Self {
        self.inspectors.insert(inspector.name().to_string(), Box::new(inspector));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn BinaryInspector> {
        self.inspectors.get(name).map(|i| &**i)
    }

    /// Return a sorted list of registered inspector names for error
    /// messages/help.
    pub fn names(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inspectors.keys().cloned().collect();
        keys.sort();
        keys
    }
}

/// Registry populated with every inspector compiled into this build.
pub fn default_inspector_registry() -> InspectorRegistry {
    let mut registry = InspectorRegistry::new();
    registry.register(ManifestInspector);
    registry.register(DumpbinInspector::from_env());
    #[cfg(feature = "goblin-inspector")]
    {
        registry.register(GoblinInspector);
    }
    registry
}
