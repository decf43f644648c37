//! The package registry: the one place deciding whether a package already
//! exists for a logical name, and the owner of the merge operation.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::model::{Artifact, Package};

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("merge target {0} does not exist in the registry")]
    UnknownTarget(String),
    #[error("merge member {member} for target {target} does not exist in the registry")]
    UnknownMember { target: String, member: String },
}

/// Mapping from package display name to package record.
///
/// Backed by a `BTreeMap` so iteration (and therefore every emitted summary
/// and document) is deterministic.
#[derive(Debug, Default, Serialize)]
pub struct PackageRegistry {
    packages: BTreeMap<String, Package>,
}

impl PackageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one classified artifact.
    ///
    /// Creates the package on first sight of its logical name, then files the
    /// artifact into the bucket for its (arch, flavor) pair. Ingesting the
    /// same path twice never creates a second package or bucket; it only
    /// appends a duplicate entry to the bucket's list, which downstream
    /// consumers tolerate.
    pub fn ingest(&mut self, artifact: Artifact, version: &str, toolchain: &str) {
        let package = self
            .packages
            .entry(artifact.logical_name.clone())
            .or_insert_with(|| Package::new(&artifact.logical_name, toolchain, version));
        package.config_mut(artifact.arch, artifact.flavor).push(artifact);
    }

    /// Fold every member package's buckets into `target`, then drop the
    /// members from the registry.
    ///
    /// Both sides must exist: the merge table is static domain knowledge and
    /// a mismatch with the ingested tree is a configuration error, not a
    /// condition to paper over.
    pub fn merge(&mut self, target: &str, members: &[String]) -> Result<(), MergeError> {
        if !self.packages.contains_key(target) {
            return Err(MergeError::UnknownTarget(target.to_string()));
        }
        for member in members {
            let source = self.packages.remove(member).ok_or_else(|| MergeError::UnknownMember {
                target: target.to_string(),
                member: member.clone(),
            })?;
            let package = self
                .packages
                .get_mut(target)
                .ok_or_else(|| MergeError::UnknownTarget(target.to_string()))?;
            for config in source.configurations {
                let bucket = package.config_mut(config.arch, config.flavor);
                for artifact in config.binaries {
                    bucket.push(artifact);
                }
                for artifact in config.symbols {
                    bucket.push(artifact);
                }
                for artifact in config.static_libs {
                    bucket.push(artifact);
                }
            }
        }
        Ok(())
    }

    /// Apply a fixed merge table, one target at a time.
    ///
    /// The table is non-chained by construction: no member of one entry is
    /// the target of another, so entry order does not matter.
    pub fn apply_merge_table(
        &mut self,
        table: &BTreeMap<String, Vec<String>>,
    ) -> Result<(), MergeError> {
        for (target, members) in table {
            self.merge(target, members)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    pub fn packages_mut(&mut self) -> impl Iterator<Item = &mut Package> {
        self.packages.values_mut()
    }

    /// One human-readable dependency line per package:
    /// `<name> <- {dep1, dep2, ...}`. Dependency order within the braces is
    /// set order; consumers must not rely on a particular sequence.
    pub fn summary_lines(&self) -> Vec<String> {
        self.packages
            .values()
            .map(|p| {
                let deps: Vec<&str> = p.dependencies.iter().map(String::as_str).collect();
                format!("{} <- {{{}}}", p.name, deps.join(", "))
            })
            .collect()
    }
}
