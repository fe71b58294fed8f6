use crate::core::error::{Error, Result};
use crate::storage::index::{Index, MetadataIndex};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Write the full index artifact
pub fn save_index(index: &Index, path: &Path) -> Result<()> {
    write_json(index, path)?;
    info!(path = %path.display(), documents = index.documents.len(), "saved full index");
    Ok(())
}

/// Write the reduced metadata artifact
pub fn save_metadata(view: &MetadataIndex, path: &Path) -> Result<()> {
    write_json(view, path)?;
    info!(path = %path.display(), documents = view.documents.len(), "saved metadata view");
    Ok(())
}

/// Load and validate a full index artifact.
///
/// A missing file is reported as [`Error::ArtifactNotFound`]; anything that
/// fails to decode or breaks the index invariants is
/// [`Error::MalformedArtifact`].
pub fn load_index(path: &Path) -> Result<Index> {
    if !path.exists() {
        return Err(Error::ArtifactNotFound(path.to_path_buf()));
    }

    let raw = fs::read_to_string(path)?;
    let index: Index = serde_json::from_str(&raw).map_err(|e| Error::MalformedArtifact {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    index
        .check_invariants()
        .map_err(|reason| Error::MalformedArtifact {
            path: path.to_path_buf(),
            reason,
        })?;

    debug!(path = %path.display(), documents = index.documents.len(), "loaded index");
    Ok(index)
}

/// Size of a written artifact in kilobytes
pub fn artifact_size_kb(path: &Path) -> Result<f64> {
    Ok(fs::metadata(path)?.len() as f64 / 1024.0)
}

/// Serialize to a sibling temp file, then rename over the target so readers
/// never observe a partially written artifact.
fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::Serialization(format!("Failed to encode {}: {}", path.display(), e)))?;

    let tmp_path = temp_path_for(path);
    fs::write(&tmp_path, json)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(Error::Io(e));
    }

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
