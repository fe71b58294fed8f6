use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Version string written into every index artifact
pub const INDEX_VERSION: &str = "1.0.0";
/// Number of keywords kept per document in the metadata view
pub const METADATA_KEYWORDS: usize = 10;

/// Coarse importance tier of a document, used as a ranking boost
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    #[default]
    Normal,
    Archive,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Critical,
        Priority::High,
        Priority::Normal,
        Priority::Archive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Normal => "normal",
            Priority::Archive => "archive",
        }
    }

    /// Ranking multiplier applied by the search engine
    pub fn multiplier(&self) -> f64 {
        match self {
            Priority::Critical => 2.0,
            Priority::High => 1.5,
            Priority::Normal => 1.0,
            Priority::Archive => 0.3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A heading-delimited span of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text without the `#` markers
    pub title: String,
    /// Heading depth, 1 through 6
    pub level: u8,
    /// Raw lines between this heading and the next, each newline-terminated
    pub content: String,
    /// Ordinal position among the document's sections (not a file line number)
    pub line_start: usize,
}

/// A processed document as stored in the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Path relative to the docs root's parent; unique within an index
    pub path: String,
    pub title: String,
    pub priority: Priority,
    /// File size in bytes
    pub size: u64,
    pub modified: NaiveDateTime,
    pub sections: Vec<Section>,
    /// Frequency-descending keywords, at most 50
    pub keywords: Vec<String>,
    pub word_count: usize,
    pub heading_count: usize,
}

/// Number of documents per priority tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    pub critical: usize,
    pub high: usize,
    pub normal: usize,
    pub archive: usize,
}

impl PriorityBreakdown {
    pub fn from_documents<'a>(documents: impl IntoIterator<Item = &'a Document>) -> Self {
        let mut breakdown = Self::default();
        for document in documents {
            *breakdown.slot_mut(document.priority) += 1;
        }
        breakdown
    }

    pub fn count(&self, priority: Priority) -> usize {
        match priority {
            Priority::Critical => self.critical,
            Priority::High => self.high,
            Priority::Normal => self.normal,
            Priority::Archive => self.archive,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.normal + self.archive
    }

    fn slot_mut(&mut self, priority: Priority) -> &mut usize {
        match priority {
            Priority::Critical => &mut self.critical,
            Priority::High => &mut self.high,
            Priority::Normal => &mut self.normal,
            Priority::Archive => &mut self.archive,
        }
    }
}

/// Aggregate statistics describing an index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub version: String,
    pub generated: NaiveDateTime,
    pub total_documents: usize,
    pub priority_breakdown: PriorityBreakdown,
    pub total_sections: usize,
    pub total_words: usize,
    /// Top 100 keywords across all documents
    pub top_keywords: Vec<String>,
}

/// The full searchable index: processed documents plus aggregate metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub metadata: IndexMetadata,
    pub documents: Vec<Document>,
}

impl Index {
    /// Look up a document by exact path
    pub fn document(&self, path: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.path == path)
    }

    /// Check the structural invariants of the index.
    ///
    /// Returns a description of the first violation found.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        if self.metadata.total_documents != self.documents.len() {
            return Err(format!(
                "metadata reports {} documents but {} are present",
                self.metadata.total_documents,
                self.documents.len()
            ));
        }

        let breakdown_total = self.metadata.priority_breakdown.total();
        if breakdown_total != self.metadata.total_documents {
            return Err(format!(
                "priority breakdown sums to {} but total_documents is {}",
                breakdown_total, self.metadata.total_documents
            ));
        }

        if let Some(doc) = self
            .documents
            .iter()
            .find(|doc| doc.heading_count != doc.sections.len())
        {
            return Err(format!(
                "document {} has heading_count {} but {} sections",
                doc.path,
                doc.heading_count,
                doc.sections.len()
            ));
        }

        Ok(())
    }

    /// Project the index onto its lightweight metadata view
    pub fn metadata_view(&self) -> MetadataIndex {
        MetadataIndex {
            metadata: self.metadata.clone(),
            documents: self.documents.iter().map(DocumentSummary::from).collect(),
        }
    }
}

/// A document without section bodies, as stored in the metadata view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub path: String,
    pub title: String,
    pub priority: Priority,
    pub size: u64,
    pub modified: NaiveDateTime,
    pub keywords: Vec<String>,
    pub word_count: usize,
    pub heading_count: usize,
    pub section_titles: Vec<String>,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            path: doc.path.clone(),
            title: doc.title.clone(),
            priority: doc.priority,
            size: doc.size,
            modified: doc.modified,
            keywords: doc.keywords.iter().take(METADATA_KEYWORDS).cloned().collect(),
            word_count: doc.word_count,
            heading_count: doc.heading_count,
            section_titles: doc.sections.iter().map(|s| s.title.clone()).collect(),
        }
    }
}

/// Reduced view of an [`Index`] for inspection and version control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataIndex {
    pub metadata: IndexMetadata,
    pub documents: Vec<DocumentSummary>,
}
