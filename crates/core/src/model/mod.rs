//! Core data model for artifacts, configuration buckets, and packages.
//!
//! Everything here is a plain value: an [`Artifact`] is fully populated when
//! classification succeeds (no lazily computed fields), and a [`Package`] is
//! only mutated by the ingestion/merge/resolve phases that own it.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Target architecture of an artifact, read from its COFF machine field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X86,
    X64,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X64 => "x64",
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build flavor of an artifact.
///
/// Symbol files are always `Debug`; for everything else the flavor comes from
/// the trailing debug marker on the file base name (`Qt5Cored.dll` vs
/// `Qt5Core.dll`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildFlavor {
    Debug,
    Release,
}

impl BuildFlavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildFlavor::Debug => "debug",
            BuildFlavor::Release => "release",
        }
    }
}

impl std::fmt::Display for BuildFlavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of artifact, derived solely from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Dynamic library (`.dll`).
    Binary,
    /// Debug symbol file (`.pdb`).
    Symbol,
    /// Static import library (`.lib`).
    StaticLib,
}

impl ArtifactKind {
    /// Map a file extension (without the dot, any case) to a kind.
    ///
    /// Returns `None` for anything unrecognized; callers treat that as a
    /// classification error rather than skipping the file silently.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "dll" => Some(ArtifactKind::Binary),
            "pdb" => Some(ArtifactKind::Symbol),
            "lib" => Some(ArtifactKind::StaticLib),
            _ => None,
        }
    }
}

/// One classified binary artifact, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Absolute location on disk.
    pub path: PathBuf,
    /// File name component of `path`.
    pub file_name: String,
    pub kind: ArtifactKind,
    pub arch: Arch,
    pub flavor: BuildFlavor,
    /// Join key grouping this artifact into a package: lower-cased base name
    /// with the trailing debug marker stripped.
    pub logical_name: String,
}

/// Compute the logical package name for a file name.
///
/// `Qt5Cored.dll` and `Qt5Core.dll` both map to `qt5core`; this is the single
/// place where the debug marker convention is interpreted, shared by
/// classification and by import-name normalization.
pub fn logical_name(file_name: &str, debug_suffix: &str) -> String {
    let base = match file_name.rsplit_once('.') {
        Some((base, _ext)) => base,
        None => file_name,
    };
    let base = base.to_lowercase();
    match base.strip_suffix(debug_suffix) {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => base,
    }
}

/// Configuration bucket: the artifacts of one package for one
/// (architecture, build flavor) pair, split by kind in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageConfig {
    pub arch: Arch,
    pub flavor: BuildFlavor,
    pub binaries: Vec<Artifact>,
    pub symbols: Vec<Artifact>,
    pub static_libs: Vec<Artifact>,
}

impl PackageConfig {
    pub fn new(arch: Arch, flavor: BuildFlavor) -> Self {
        Self { arch, flavor, binaries: Vec::new(), symbols: Vec::new(), static_libs: Vec::new() }
    }

    /// Append an artifact to the slot matching its kind.
    ///
    /// Duplicate entries are tolerated; bucket membership is an ordered
    /// list, not a set.
    pub fn push(&mut self, artifact: Artifact) {
        match artifact.kind {
            ArtifactKind::Binary => self.binaries.push(artifact),
            ArtifactKind::Symbol => self.symbols.push(artifact),
            ArtifactKind::StaticLib => self.static_libs.push(artifact),
        }
    }

    /// Iterate every artifact in the bucket, binaries first.
    pub fn all(&self) -> impl Iterator<Item = &Artifact> {
        self.binaries.iter().chain(self.symbols.iter()).chain(self.static_libs.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.binaries.is_empty() && self.symbols.is_empty() && self.static_libs.is_empty()
    }
}

/// The unit of distribution: all architecture/flavor variants of artifacts
/// sharing one logical name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Package identity: logical name plus toolchain qualifier, lower-cased
    /// (e.g. `qt5core-msvc2013`).
    pub id: String,
    /// Display name: the logical name alone.
    pub name: String,
    /// Semantic version, supplied by the caller at ingestion time.
    pub version: String,
    /// One bucket per (arch, flavor) pair actually seen.
    pub configurations: Vec<PackageConfig>,
    /// Display names of other packages this one depends on. Computed by the
    /// dependency resolver, never hand-maintained.
    pub dependencies: BTreeSet<String>,
}

impl Package {
    pub fn new(name: &str, toolchain: &str, version: &str) -> Self {
        let name = name.to_lowercase();
        Self {
            id: format!("{}-{}", name, toolchain.to_lowercase()),
            name,
            version: version.to_string(),
            configurations: Vec::new(),
            dependencies: BTreeSet::new(),
        }
    }

    /// Return the bucket for `(arch, flavor)`, creating it on first use.
    pub fn config_mut(&mut self, arch: Arch, flavor: BuildFlavor) -> &mut PackageConfig {
        if let Some(idx) =
            self.configurations.iter().position(|c| c.arch == arch && c.flavor == flavor)
        {
            return &mut self.configurations[idx];
        }
        self.configurations.push(PackageConfig::new(arch, flavor));
        self.configurations.last_mut().unwrap()
    }

    pub fn config(&self, arch: Arch, flavor: BuildFlavor) -> Option<&PackageConfig> {
        self.configurations.iter().find(|c| c.arch == arch && c.flavor == flavor)
    }
}
