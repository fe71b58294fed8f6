use crate::core::config::Config;
use crate::core::error::Result;
use crate::indexing::discovery::{discover_files, read_source, should_exclude, DocumentSource};
use crate::indexing::keywords::{extract_keywords, KeywordTally, MAX_KEYWORDS, TOP_GLOBAL_KEYWORDS};
use crate::indexing::parser::{document_title, parse_sections};
use crate::indexing::priority::classify;
use crate::storage::index::{Document, Index, IndexMetadata, PriorityBreakdown, INDEX_VERSION};
use chrono::Local;
use std::path::Path;
use tracing::{debug, info, warn};

/// Counters reported after a build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub discovered: usize,
    pub excluded: usize,
    pub failed: usize,
    pub indexed: usize,
}

/// Turn one raw source into a [`Document`], recording its keywords in `tally`
pub fn process_document(source: &DocumentSource, tally: &mut KeywordTally) -> Document {
    let sections = parse_sections(&source.content);
    let keywords = extract_keywords(&source.content, MAX_KEYWORDS);
    tally.add_all(&keywords);

    Document {
        path: source.path.clone(),
        title: document_title(&sections, Path::new(&source.path)),
        priority: classify(&source.path),
        size: source.size,
        modified: source.modified,
        heading_count: sections.len(),
        sections,
        keywords,
        word_count: source.content.split_whitespace().count(),
    }
}

/// Index an in-memory collection of sources in order
pub fn index_sources<I>(sources: I) -> Index
where
    I: IntoIterator<Item = DocumentSource>,
{
    let mut tally = KeywordTally::new();
    let documents: Vec<Document> = sources
        .into_iter()
        .map(|source| {
            debug!(path = %source.path, "processing document");
            process_document(&source, &mut tally)
        })
        .collect();

    assemble_index(documents, &tally)
}

/// Attach aggregate metadata to a finished document list
pub fn assemble_index(documents: Vec<Document>, tally: &KeywordTally) -> Index {
    let metadata = IndexMetadata {
        version: INDEX_VERSION.to_string(),
        generated: Local::now().naive_local(),
        total_documents: documents.len(),
        priority_breakdown: PriorityBreakdown::from_documents(&documents),
        total_sections: documents.iter().map(|d| d.heading_count).sum(),
        total_words: documents.iter().map(|d| d.word_count).sum(),
        top_keywords: tally.most_common(TOP_GLOBAL_KEYWORDS),
    };

    Index {
        metadata,
        documents,
    }
}

/// Build a full index from the documentation tree described by `config`.
///
/// Excluded paths are skipped before reading. Files that cannot be read are
/// logged and skipped; they never abort the build.
pub fn build_index(config: &Config) -> Result<(Index, BuildReport)> {
    config.validate()?;

    let files = discover_files(&config.docs_root, config.display_base())?;
    info!(count = files.len(), root = %config.docs_root.display(), "discovered markdown files");

    let mut report = BuildReport {
        discovered: files.len(),
        ..BuildReport::default()
    };

    let mut sources = Vec::with_capacity(files.len());
    for file in &files {
        if should_exclude(&file.relative_path) {
            debug!(path = %file.relative_path.display(), "skipping excluded file");
            report.excluded += 1;
            continue;
        }

        match read_source(file) {
            Ok(source) => sources.push(source),
            Err(e) => {
                warn!("{}", e);
                report.failed += 1;
            }
        }
    }

    let index = index_sources(sources);
    report.indexed = index.documents.len();
    info!(
        indexed = report.indexed,
        excluded = report.excluded,
        failed = report.failed,
        "built index"
    );

    Ok((index, report))
}
