use crate::core::error::{Error, Result};
use chrono::{DateTime, Local, NaiveDateTime};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Path fragments marking generated, temporary or backup files
const EXCLUDE_PATTERNS: &[&str] = &[".doc-", ".tmp", ".temp", ".backup", ".bak"];
/// The one hidden name that is still indexed
const ALLOWED_HIDDEN: &str = ".github";

/// Represents a discovered file with its metadata
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    /// Path relative to the display base, as stored in the index
    pub relative_path: PathBuf,
}

/// Raw content of one document, ready for indexing
#[derive(Debug, Clone)]
pub struct DocumentSource {
    pub path: String,
    pub content: String,
    pub size: u64,
    pub modified: NaiveDateTime,
}

/// Discover all Markdown files under `root`.
///
/// `relative_path` of each file is computed against `base`, which must be
/// `root` or one of its ancestors. Results are sorted by path.
pub fn discover_files(root: &Path, base: &Path) -> Result<Vec<DiscoveredFile>> {
    if !root.exists() {
        return Err(Error::Config(format!(
            "Directory does not exist: {}",
            root.display()
        )));
    }

    if !root.is_dir() {
        return Err(Error::Config(format!(
            "Path is not a directory: {}",
            root.display()
        )));
    }

    let mut files = Vec::new();

    // Hidden entries are walked so the exclusion filter decides on them
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .sort_by_file_path(|a, b| a.cmp(b))
        .build();

    for result in walker {
        match result {
            Ok(entry) => {
                let path = entry.path();

                if path.is_dir() || !is_doc_file(path) {
                    continue;
                }

                let relative_path = path
                    .strip_prefix(base)
                    .unwrap_or(path)
                    .to_path_buf();

                files.push(DiscoveredFile {
                    path: path.to_path_buf(),
                    relative_path,
                });
            }
            Err(err) => {
                // some entries may be inaccessible
                warn!("Failed to access file: {}", err);
            }
        }
    }

    Ok(files)
}

/// Check if a file is a Markdown document based on extension
pub fn is_doc_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            matches!(
                ext.to_lowercase().as_str(),
                "md" | "markdown" | "mdown" | "mkd" | "mkdn"
            )
        })
        .unwrap_or(false)
}

/// Check if a path should be left out of the index.
///
/// Excludes generated, temporary and backup files, and hidden files other
/// than `.github`.
pub fn should_exclude(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    if EXCLUDE_PATTERNS.iter().any(|p| path_str.contains(p)) {
        return true;
    }

    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.') && name != ALLOWED_HIDDEN)
        .unwrap_or(false)
}

/// Read a discovered file into a [`DocumentSource`]
pub fn read_source(file: &DiscoveredFile) -> Result<DocumentSource> {
    let read_failure = |source: std::io::Error| Error::ReadFailure {
        path: file.path.clone(),
        source,
    };

    let content = std::fs::read_to_string(&file.path).map_err(read_failure)?;
    let metadata = std::fs::metadata(&file.path).map_err(read_failure)?;
    let modified = metadata
        .modified()
        .map(|time| DateTime::<Local>::from(time).naive_local())
        .map_err(read_failure)?;

    Ok(DocumentSource {
        path: file.relative_path.to_string_lossy().into_owned(),
        content,
        size: metadata.len(),
        modified,
    })
}
