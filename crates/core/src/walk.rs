//! Discovery of candidate artifact paths.
//!
//! Only files living directly under a directory named `bin` or `lib` are
//! candidates; everything else in the tree (plugins, QML modules, headers) is
//! someone else's problem. Classification decides what the candidates are.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("failed to read directory {path}: {source}")]
    ReadDir { path: PathBuf, source: std::io::Error },
}

/// Recursively collect candidate artifact paths under `root`, sorted.
pub fn find_artifact_paths(root: &Path) -> Result<Vec<PathBuf>, WalkError> {
    let mut paths = Vec::new();
    visit(root, &mut paths)?;
    paths.sort();
    Ok(paths)
}

fn is_artifact_dir(dir: &Path) -> bool {
    matches!(dir.file_name().and_then(|n| n.to_str()), Some("bin") | Some("lib"))
}

/// Inspector sidecar files are metadata about an artifact, not artifacts.
fn is_sidecar(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".inspect.json"))
}

fn visit(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), WalkError> {
    let entries = fs::read_dir(dir)
        .map_err(|source| WalkError::ReadDir { path: dir.to_path_buf(), source })?;
    let collect_here = is_artifact_dir(dir);

    for entry in entries {
        let entry =
            entry.map_err(|source| WalkError::ReadDir { path: dir.to_path_buf(), source })?;
        let path = entry.path();
        if path.is_dir() {
            visit(&path, out)?;
        } else if collect_here && !is_sidecar(&path) {
            out.push(path);
        }
    }
    Ok(())
}
