use crate::core::error::{Error, Result};
use crate::search::scoring::{matching_sections, relevance_score, Query, SectionMatch};
use crate::storage::artifact::load_index;
use crate::storage::index::{Document, Index, IndexMetadata};
use std::path::Path;
use tracing::{debug, info};

// Search configuration constants
pub const DEFAULT_MAX_RESULTS: usize = 5;
pub const DEFAULT_MIN_SCORE: f64 = 0.3;
pub const DEFAULT_MAX_RELATED: usize = 3;
/// Matching sections reported per result
pub const MAX_MATCHING_SECTIONS: usize = 3;
/// Keywords of the reference document used as the related-documents query
const RELATED_QUERY_KEYWORDS: usize = 10;

/// Result limit and score threshold for a search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    pub max_results: usize,
    pub min_score: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

/// A ranked document with its best matching sections
#[derive(Debug, Clone)]
pub struct SearchResult<'a> {
    pub document: &'a Document,
    pub score: f64,
    pub matching_sections: Vec<SectionMatch<'a>>,
}

/// Read-only search over a loaded index
#[derive(Debug, Clone)]
pub struct SearchEngine {
    index: Index,
}

impl SearchEngine {
    /// Load the index artifact at `path`.
    ///
    /// Fails immediately if the artifact is missing or malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let index = load_index(path)?;
        info!("Loaded index with {} documents", index.metadata.total_documents);
        Ok(Self::from_index(index))
    }

    pub fn from_index(index: Index) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn statistics(&self) -> &IndexMetadata {
        &self.index.metadata
    }

    /// Search with a free-text query.
    ///
    /// A query with no usable keywords yields no results.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult<'_>> {
        let query = Query::parse(query);
        if query.is_empty() {
            debug!("No valid keywords in query");
            return Vec::new();
        }

        self.search_query(&query, options)
    }

    /// Score every document against a parsed query and rank the ones that
    /// clear the threshold. Equal scores keep index order.
    pub fn search_query(&self, query: &Query, options: &SearchOptions) -> Vec<SearchResult<'_>> {
        if query.is_empty() {
            return Vec::new();
        }
        debug!("Searching for: {}", query.keywords().join(", "));

        let mut results: Vec<SearchResult<'_>> = self
            .index
            .documents
            .iter()
            .filter_map(|document| {
                let score = relevance_score(document, query);
                (score >= options.min_score).then(|| SearchResult {
                    document,
                    score,
                    matching_sections: matching_sections(document, query, MAX_MATCHING_SECTIONS),
                })
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(options.max_results);
        results
    }

    /// Find documents related to the one at `document_path`.
    ///
    /// The reference document's top keywords are run as an ordinary query;
    /// the reference itself is filtered out of the results afterwards.
    pub fn find_related(
        &self,
        document_path: &str,
        max_related: usize,
    ) -> Result<Vec<SearchResult<'_>>> {
        let reference = self
            .index
            .document(document_path)
            .ok_or_else(|| Error::DocumentNotFound(document_path.to_string()))?;

        let query_text = reference
            .keywords
            .iter()
            .take(RELATED_QUERY_KEYWORDS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        let options = SearchOptions {
            max_results: max_related + 1,
            ..SearchOptions::default()
        };

        let mut related = self.search(&query_text, &options);
        related.retain(|r| r.document.path != document_path);
        related.truncate(max_related);
        Ok(related)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexing::discovery::DocumentSource;
    use crate::indexing::indexer::index_sources;
    use crate::storage::index::Priority;
    use chrono::NaiveDate;

    fn source(path: &str, content: &str) -> DocumentSource {
        DocumentSource {
            path: path.to_string(),
            content: content.to_string(),
            size: content.len() as u64,
            modified: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    fn engine() -> SearchEngine {
        SearchEngine::from_index(index_sources(vec![
            source(
                "docs/notes.md",
                "# Tag System Architecture\n## Overview\nThe tag system architecture stores tags.\n",
            ),
            source(
                "docs/architecture/tags.md",
                "# Tag System Architecture\n## Overview\nThe tag system architecture stores tags.\n",
            ),
            source(
                "docs/guides/photos.md",
                "# Photo Library\n## Import\nPhotos are imported with tags and albums.\n",
            ),
            source("docs/archives/legacy.md", "# Legacy Notes\nOld albums importer.\n"),
        ]))
    }

    #[test]
    fn test_priority_decides_between_equal_documents() {
        let engine = engine();
        let results = engine.search("architecture", &SearchOptions::default());

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].document.path, "docs/architecture/tags.md");
        assert_eq!(results[0].document.priority, Priority::Critical);
        assert_eq!(results[1].document.path, "docs/notes.md");
        assert!((results[0].score - results[1].score - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_results_sorted_and_bounded() {
        let engine = engine();
        let options = SearchOptions {
            max_results: 10,
            min_score: 0.0,
        };
        let results = engine.search("tags albums photos", &options);

        assert_eq!(results.len(), 4);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        for r in &results {
            assert!((0.0..=1.0).contains(&r.score));
            assert!(r.matching_sections.len() <= MAX_MATCHING_SECTIONS);
        }
    }

    #[test]
    fn test_limit_and_threshold() {
        let engine = engine();
        let results = engine.search(
            "tags",
            &SearchOptions {
                max_results: 1,
                min_score: 0.0,
            },
        );
        assert_eq!(results.len(), 1);

        let results = engine.search(
            "tags",
            &SearchOptions {
                max_results: 10,
                min_score: 0.99,
            },
        );
        assert!(results.is_empty());
    }

    #[test]
    fn test_ties_keep_index_order() {
        let engine = SearchEngine::from_index(index_sources(vec![
            source("docs/first.md", "# Alpha\nshared words here\n"),
            source("docs/second.md", "# Alpha\nshared words here\n"),
            source("docs/third.md", "# Alpha\nshared words here\n"),
        ]));
        let options = SearchOptions {
            max_results: 10,
            min_score: 0.0,
        };
        let results = engine.search("shared", &options);
        let paths: Vec<&str> = results.iter().map(|r| r.document.path.as_str()).collect();
        assert_eq!(paths, vec!["docs/first.md", "docs/second.md", "docs/third.md"]);
    }

    #[test]
    fn test_empty_query() {
        let engine = engine();
        assert!(engine.search("", &SearchOptions::default()).is_empty());
        assert!(engine.search("?! -- ..", &SearchOptions::default()).is_empty());
        assert!(engine.search("a of", &SearchOptions::default()).is_empty());
    }

    #[test]
    fn test_related_excludes_reference() {
        let engine = engine();
        let related = engine.find_related("docs/architecture/tags.md", 3).unwrap();

        assert!(!related.is_empty());
        assert!(related.len() <= 3);
        assert!(related.iter().all(|r| r.document.path != "docs/architecture/tags.md"));
        assert_eq!(related[0].document.path, "docs/notes.md");
    }

    #[test]
    fn test_related_unknown_path() {
        let engine = engine();
        let result = engine.find_related("docs/missing.md", 3);
        assert!(matches!(result, Err(Error::DocumentNotFound(_))));
    }

    #[test]
    fn test_statistics() {
        let engine = engine();
        assert_eq!(engine.statistics().total_documents, 4);
        assert_eq!(engine.index().documents.len(), 4);
    }
}
