// Core functionality
pub mod core {
    pub mod config;
    pub mod error;
}

// Index data model and artifacts
pub mod storage {
    pub mod artifact;
    pub mod index;
}

// Indexing pipeline
pub mod indexing {
    pub mod discovery;
    pub mod indexer;
    pub mod keywords;
    pub mod parser;
    pub mod priority;
}

// Query scoring & ranking
pub mod search {
    pub mod engine;
    pub mod scoring;
}

// User interfaces
pub mod ui {
    pub mod cli;
    pub mod report;
}

// Re-export commonly used types
pub use core::config::Config;
pub use core::error::{Error, Result};
pub use indexing::discovery::{discover_files, DocumentSource};
pub use indexing::indexer::{build_index, index_sources, BuildReport};
pub use indexing::keywords::{extract_keywords, KeywordTally};
pub use indexing::priority::classify;
pub use search::engine::{SearchEngine, SearchOptions, SearchResult};
pub use storage::artifact::{load_index, save_index, save_metadata};
pub use storage::index::{Document, Index, IndexMetadata, MetadataIndex, Priority, Section};
pub use ui::cli::Cli;
