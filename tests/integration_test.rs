use docsearch::storage::index::DocumentSummary;
use docsearch::{build_index, load_index, save_index, save_metadata, Config, Error, Priority, Result};
use docsearch::{MetadataIndex, SearchEngine, SearchOptions};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) -> Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn docs_tree(temp_dir: &TempDir) -> Result<Config> {
    let docs = temp_dir.path().join("docs");
    write(
        &docs,
        "architecture/TAG_SYSTEM_ARCHITECTURE.md",
        "# Tag System Architecture\n\nTags are stored per photo.\n\n## Storage\n\nTags persist in the tag store.\n",
    )?;
    write(
        &docs,
        "guides/getting-started.md",
        "# Getting Started\n\n## Install\n\nInstall the application.\n\n## Tags\n\nCreate tags from the sidebar.\n",
    )?;
    write(
        &docs,
        "archives/v1-notes.md",
        "# Version One\n\nLegacy importer notes.\n",
    )?;
    write(&docs, "readme.md", "Plain readme without headings.\n")?;
    write(&docs, ".draft.md", "# Draft\n\nhidden file\n")?;
    write(&docs, "guides/setup.bak.md", "# Backup\n")?;
    Ok(Config::new(Some(docs)))
}

#[test]
fn test_build_applies_exclusions() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let config = docs_tree(&temp_dir)?;

    let (index, report) = build_index(&config)?;

    assert_eq!(report.discovered, 6);
    assert_eq!(report.excluded, 2);
    assert_eq!(report.failed, 0);
    assert_eq!(report.indexed, 4);

    let paths: Vec<&str> = index.documents.iter().map(|d| d.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "docs/architecture/TAG_SYSTEM_ARCHITECTURE.md",
            "docs/archives/v1-notes.md",
            "docs/guides/getting-started.md",
            "docs/readme.md",
        ]
    );

    let readme = index.document("docs/readme.md").unwrap();
    assert_eq!(readme.title, "readme");
    assert!(readme.sections.is_empty());

    Ok(())
}

#[test]
fn test_build_invariants() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let config = docs_tree(&temp_dir)?;

    let (index, _) = build_index(&config)?;
    let meta = &index.metadata;

    assert_eq!(meta.total_documents, index.documents.len());
    assert_eq!(meta.priority_breakdown.total(), meta.total_documents);
    assert_eq!(meta.priority_breakdown.count(Priority::Critical), 1);
    assert_eq!(meta.priority_breakdown.count(Priority::High), 1);
    assert_eq!(meta.priority_breakdown.count(Priority::Archive), 1);
    assert_eq!(meta.priority_breakdown.count(Priority::Normal), 1);
    assert!(meta.top_keywords.len() <= 100);
    assert_eq!(meta.top_keywords[0], "tags");

    for doc in &index.documents {
        assert_eq!(doc.heading_count, doc.sections.len());
        assert!(doc.keywords.len() <= 50);
    }
    Ok(())
}

#[test]
fn test_unreadable_document_is_skipped() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let config = docs_tree(&temp_dir)?;
    fs::write(config.docs_root.join("binary.md"), [0xff, 0xfe, 0x00, 0xc3])?;

    let (index, report) = build_index(&config)?;

    assert_eq!(report.failed, 1);
    assert_eq!(index.documents.len(), 4);
    assert!(index.document("docs/binary.md").is_none());
    Ok(())
}

#[test]
fn test_build_missing_root() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::new(Some(temp_dir.path().join("nope")));
    assert!(matches!(build_index(&config), Err(Error::Config(_))));
}

#[test]
fn test_artifacts_round_trip() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let config = docs_tree(&temp_dir)?;

    let (index, _) = build_index(&config)?;
    save_index(&index, &config.index_path)?;
    save_metadata(&index.metadata_view(), &config.metadata_path)?;
    assert!(config.is_indexed());

    let loaded = load_index(&config.index_path)?;
    assert_eq!(loaded.documents.len(), index.documents.len());
    for (a, b) in loaded.documents.iter().zip(&index.documents) {
        assert_eq!(a.path, b.path);
        assert_eq!(a.priority, b.priority);
    }
    assert_eq!(loaded, index);

    let raw = fs::read_to_string(&config.metadata_path)?;
    let view: MetadataIndex = serde_json::from_str(&raw).unwrap();
    assert_eq!(view.metadata.total_documents, index.documents.len());
    let guide: &DocumentSummary = view
        .documents
        .iter()
        .find(|d| d.path == "docs/guides/getting-started.md")
        .unwrap();
    assert_eq!(guide.section_titles, vec!["Getting Started", "Install", "Tags"]);
    assert!(guide.keywords.len() <= 10);

    // the artifacts themselves never get indexed on a rebuild
    let (rebuilt, report) = build_index(&config)?;
    assert_eq!(rebuilt.documents.len(), index.documents.len());
    assert_eq!(report.discovered, 6);
    Ok(())
}

#[test]
fn test_search_engine_requires_index() {
    let temp_dir = TempDir::new().unwrap();
    let result = SearchEngine::load(&temp_dir.path().join(".doc-index.json"));
    match result {
        Err(e @ Error::ArtifactNotFound(_)) => {
            assert!(e.to_string().contains("docsearch build"));
        }
        other => panic!("expected ArtifactNotFound, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_search_engine_rejects_malformed_index() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".doc-index.json");
    fs::write(&path, r#"{"metadata": {"version": "1.0.0"}, "documents": []}"#)?;

    assert!(matches!(
        SearchEngine::load(&path),
        Err(Error::MalformedArtifact { .. })
    ));
    Ok(())
}

#[test]
fn test_end_to_end_search() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let config = docs_tree(&temp_dir)?;

    let (index, _) = build_index(&config)?;
    save_index(&index, &config.index_path)?;

    let engine = SearchEngine::load(&config.index_path)?;
    let results = engine.search("tag architecture", &SearchOptions::default());

    assert!(!results.is_empty());
    assert_eq!(
        results[0].document.path,
        "docs/architecture/TAG_SYSTEM_ARCHITECTURE.md"
    );
    assert!(!results[0].matching_sections.is_empty());

    let related = engine.find_related(&results[0].document.path, 3)?;
    assert!(related
        .iter()
        .all(|r| r.document.path != results[0].document.path));
    Ok(())
}
