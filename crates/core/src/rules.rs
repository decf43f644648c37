//! Static domain configuration: the knowledge about the Qt distribution that
//! is configuration, not inference (ignore list, merge table, debug marker,
//! import-name prefix).
//!
//! The defaults reproduce the shipped Qt 5.4 configuration. A rules file in
//! JSON or YAML can override any of it; see [`DomainRules::load`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Version assumed when the caller does not pin one.
pub const QT_LATEST: &str = "5.4.1";

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to read rules file {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("failed to parse rules file {path}: {message}")]
    Parse { path: String, message: String },
    #[error("unsupported rules file extension for {0} (expected .json, .yaml or .yml)")]
    UnsupportedExtension(String),
}

/// Domain rules driving classification, merging, and dependency resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainRules {
    /// Trailing marker on a file base name that means "debug build".
    pub debug_suffix: String,
    /// Files whose name contains any of these substrings are never
    /// classified.
    pub ignore_files: Vec<String>,
    /// Only imported module names starting with this prefix (compared
    /// lower-cased) count as in-domain dependencies.
    pub import_prefix: String,
    /// Dependencies every package declares unconditionally.
    pub fixed_dependencies: Vec<String>,
    /// Toolchain qualifier appended to package identities (e.g. `msvc2013`).
    pub toolchain: String,
    /// Satellite packages folded into a parent after ingestion:
    /// parent display name -> member display names.
    pub merge_table: BTreeMap<String, Vec<String>>,
    /// Version used when the caller does not supply one.
    pub default_version: String,
}

impl Default for DomainRules {
    fn default() -> Self {
        Self {
            debug_suffix: "d".to_string(),
            ignore_files: vec!["Qt5Designer".to_string(), "Qt5QmlDevTools".to_string()],
            import_prefix: "qt".to_string(),
            fixed_dependencies: vec!["qt5core".to_string()],
            toolchain: "msvc2013".to_string(),
            merge_table: default_merge_table(),
            default_version: QT_LATEST.to_string(),
        }
    }
}

impl DomainRules {
    /// Load rules from a JSON or YAML file, chosen by extension.
    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let display = path.display().to_string();
        let body = fs::read_to_string(path)
            .map_err(|source| RulesError::Io { path: display.clone(), source })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
        match ext.as_str() {
            "json" => serde_json::from_str(&body)
                .map_err(|e| RulesError::Parse { path: display, message: e.to_string() }),
            "yaml" | "yml" => serde_yaml::from_str(&body)
                .map_err(|e| RulesError::Parse { path: display, message: e.to_string() }),
            _ => Err(RulesError::UnsupportedExtension(display)),
        }
    }

    /// True if `file_name` matches the ignore list (substring match).
    pub fn is_ignored(&self, file_name: &str) -> bool {
        self.ignore_files.iter().any(|pat| file_name.contains(pat.as_str()))
    }
}

fn default_merge_table() -> BTreeMap<String, Vec<String>> {
    let entries: [(&str, &[&str]); 6] = [
        ("qt5core", &["qtmain", "qt5bootstrap", "qt5platformsupport"]),
        ("qt5multimedia", &["qt5multimediawidgets"]),
        ("qt5opengl", &["qt5openglextensions"]),
        ("qt5xml", &["qt5xmlpatterns"]),
        ("qt5quick", &["qt5quickwidgets", "qt5quicktest", "qt5multimediaquick_p", "qt5quickparticles"]),
        ("qt5webkit", &["qt5webkitwidgets"]),
    ];
    entries
        .into_iter()
        .map(|(target, members)| {
            (target.to_string(), members.iter().map(|m| m.to_string()).collect())
        })
        .collect()
}
