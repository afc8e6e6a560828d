use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};

use crate::error::GraphError;

use super::graph::PackageGraph;
use super::parse::parse_graph_document;

/// Snapshot file names in `dir`, newest first.
///
/// A directory that does not exist simply has no snapshots.
pub fn list_data_files(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        tracing::debug!(dir = %dir.display(), "data directory does not exist");
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read data directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read an entry of {}", dir.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(".json") {
            continue;
        }

        let metadata = entry
            .metadata()
            .with_context(|| format!("failed to stat {}", entry.path().display()))?;
        if !metadata.is_file() {
            continue;
        }

        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        files.push((name, modified));
    }

    files.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    tracing::debug!(count = files.len(), dir = %dir.display(), "listed data files");

    Ok(files.into_iter().map(|(name, _)| name).collect())
}

/// Resolves `name` against `dir`, falling back to `name` as a path of its own.
pub fn resolve_data_file(dir: &Path, name: &str) -> PathBuf {
    let in_dir = dir.join(name);
    if in_dir.is_file() {
        in_dir
    } else {
        PathBuf::from(name)
    }
}

pub fn load_graph_file(path: &Path) -> Result<PackageGraph, GraphError> {
    let raw = fs::read_to_string(path).map_err(|source| GraphError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document = parse_graph_document(&raw)?;
    Ok(PackageGraph::from_document(document))
}
