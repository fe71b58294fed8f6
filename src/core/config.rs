use super::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Default documentation root, relative to the working directory
pub const DEFAULT_DOCS_ROOT: &str = "docs";
/// File name of the full index artifact
pub const INDEX_FILE_NAME: &str = ".doc-index.json";
/// File name of the reduced metadata artifact
pub const METADATA_FILE_NAME: &str = ".doc-metadata.json";

/// Configuration for docsearch
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory containing the documentation tree
    pub docs_root: PathBuf,
    /// Path to the full index artifact
    pub index_path: PathBuf,
    /// Path to the metadata artifact
    pub metadata_path: PathBuf,
}

impl Config {
    /// Create a new configuration rooted at `docs_root` (default: `docs`)
    pub fn new(docs_root: Option<PathBuf>) -> Self {
        let docs_root = docs_root.unwrap_or_else(|| PathBuf::from(DEFAULT_DOCS_ROOT));

        Self {
            index_path: docs_root.join(INDEX_FILE_NAME),
            metadata_path: docs_root.join(METADATA_FILE_NAME),
            docs_root,
        }
    }

    /// Override where the full index is read from and written to
    pub fn with_index_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.index_path = path;
        }
        self
    }

    /// Override where the metadata view is written to
    pub fn with_metadata_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.metadata_path = path;
        }
        self
    }

    /// Directory that stored document paths are relative to.
    ///
    /// This is the parent of the docs root, so a file `docs/guides/setup.md`
    /// is recorded as `docs/guides/setup.md` rather than `guides/setup.md`.
    pub fn display_base(&self) -> &Path {
        match self.docs_root.parent() {
            Some(parent) => parent,
            None => Path::new(""),
        }
    }

    /// Check the docs root exists and is a directory
    pub fn validate(&self) -> Result<()> {
        if !self.docs_root.exists() {
            return Err(Error::Config(format!(
                "Directory does not exist: {}",
                self.docs_root.display()
            )));
        }

        if !self.docs_root.is_dir() {
            return Err(Error::Config(format!(
                "Path is not a directory: {}",
                self.docs_root.display()
            )));
        }

        Ok(())
    }

    /// Check if the full index has been built
    pub fn is_indexed(&self) -> bool {
        self.index_path.exists()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
