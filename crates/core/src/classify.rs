//! Artifact classification.
//!
//! One file path in, one fully populated [`Artifact`] out (or a hard error).
//! An artifact that cannot be classified never vanishes silently: unknown
//! extensions and unresolvable architectures surface as [`ClassifyError`]s,
//! because an artifact without a kind or an architecture cannot be bucketed
//! correctly downstream. Only the ignore list produces `Ok(None)`.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::inspect::{BinaryInspector, InspectError};
use crate::model::{logical_name, Arch, Artifact, ArtifactKind, BuildFlavor};
use crate::rules::DomainRules;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("unknown artifact extension: {0}")]
    UnknownExtension(PathBuf),
    #[error("no binary or import library sibling found for symbol file {0}")]
    MissingSymbolSibling(PathBuf),
    #[error("no architecture evidence for {0}")]
    NoArchitectureEvidence(PathBuf),
    #[error(transparent)]
    Inspect(#[from] InspectError),
}

/// Classifies candidate artifact paths against a set of domain rules, using
/// an inspector for architecture evidence.
pub struct Classifier<'a> {
    inspector: &'a dyn BinaryInspector,
    rules: &'a DomainRules,
}

impl<'a> Classifier<'a> {
    pub fn new(inspector: &'a dyn BinaryInspector, rules: &'a DomainRules) -> Self {
        Self { inspector, rules }
    }

    /// Classify a single file. Returns `Ok(None)` for ignore-listed files.
    pub fn classify(&self, path: &Path) -> Result<Option<Artifact>, ClassifyError> {
        let file_name = path
            .file_name()
            .map(|os| os.to_string_lossy().to_string())
            .unwrap_or_default();

        if self.rules.is_ignored(&file_name) {
            return Ok(None);
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let kind = ArtifactKind::from_extension(ext)
            .ok_or_else(|| ClassifyError::UnknownExtension(path.to_path_buf()))?;

        let flavor = self.flavor_of(path, kind);
        let arch = self.architecture_of(path, kind)?;
        let logical = logical_name(&file_name, &self.rules.debug_suffix);

        Ok(Some(Artifact {
            path: path.to_path_buf(),
            file_name,
            kind,
            arch,
            flavor,
            logical_name: logical,
        }))
    }

    fn flavor_of(&self, path: &Path, kind: ArtifactKind) -> BuildFlavor {
        // Symbol files carry no flavor marker of their own.
        if kind == ArtifactKind::Symbol {
            return BuildFlavor::Debug;
        }
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
        if stem.ends_with(self.rules.debug_suffix.as_str()) {
            BuildFlavor::Debug
        } else {
            BuildFlavor::Release
        }
    }

    /// Resolve the architecture, probing a sibling for symbol files.
    ///
    /// Symbol files have no machine header, so we inspect the matching `.dll`
    /// (preferred) or `.lib` instead. When both exist the `.dll` wins; the
    /// siblings are assumed to agree, matching how the distribution is laid
    /// out.
    fn architecture_of(&self, path: &Path, kind: ArtifactKind) -> Result<Arch, ClassifyError> {
        let probe = if kind == ArtifactKind::Symbol {
            let dll = path.with_extension("dll");
            let lib = path.with_extension("lib");
            if dll.is_file() {
                dll
            } else if lib.is_file() {
                lib
            } else {
                return Err(ClassifyError::MissingSymbolSibling(path.to_path_buf()));
            }
        } else {
            path.to_path_buf()
        };

        match self.inspector.architecture(&probe)? {
            Some(arch) => Ok(arch),
            None => Err(ClassifyError::NoArchitectureEvidence(path.to_path_buf())),
        }
    }
}
