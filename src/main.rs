use anyhow::Context;
use clap::Parser;
use docsearch::search::scoring::extract_query_keywords;
use docsearch::storage::artifact::artifact_size_kb;
use docsearch::ui::cli::{Cli, Commands, SearchArgs};
use docsearch::ui::report::{format_related, format_result, format_statistics, results_json};
use docsearch::{build_index, save_index, save_metadata, Config, Error, SearchEngine};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::new(cli.docs_dir.clone()).with_index_path(cli.index.clone());

    match cli.command {
        Some(Commands::Build { metadata }) => handle_build(config.with_metadata_path(metadata)),
        Some(Commands::Search { query, args }) => handle_search(&config, &query.join(" "), &args),
        Some(Commands::Related { path, limit, json }) => {
            handle_related(&config, &path, limit, json)
        }
        Some(Commands::Stats) => handle_stats(&config),
        None => handle_search(&config, &cli.query.join(" "), &cli.search),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_build(config: Config) -> anyhow::Result<()> {
    println!("🔨 Building documentation index from: {}", config.docs_root.display());

    let (index, report) = build_index(&config)
        .with_context(|| format!("Failed to index {}", config.docs_root.display()))?;

    println!("📁 Found {} markdown files", report.discovered);
    if report.excluded > 0 {
        println!("⏭️  Skipped {} excluded files", report.excluded);
    }
    if report.failed > 0 {
        println!("⚠️  {} files could not be read", report.failed);
    }
    println!("✅ Processed {} documents", report.indexed);

    save_index(&index, &config.index_path)?;
    print_saved("full index", &config.index_path)?;

    save_metadata(&index.metadata_view(), &config.metadata_path)?;
    print_saved("metadata", &config.metadata_path)?;

    println!("\n{}", format_statistics(&index.metadata));
    println!("\n✅ Index building complete!");

    Ok(())
}

fn print_saved(label: &str, path: &Path) -> anyhow::Result<()> {
    println!("💾 Saved {} to {}", label, path.display());
    println!("📊 Size: {:.2} KB", artifact_size_kb(path)?);
    Ok(())
}

fn open_engine(config: &Config) -> anyhow::Result<SearchEngine> {
    // ArtifactNotFound already carries the "run build first" guidance
    SearchEngine::load(&config.index_path).map_err(anyhow::Error::from)
}

fn handle_search(config: &Config, query: &str, args: &SearchArgs) -> anyhow::Result<()> {
    let engine = open_engine(config)?;

    let keywords = extract_query_keywords(query);
    if keywords.is_empty() && !args.json {
        println!("⚠️  No valid keywords in query");
        return Ok(());
    }
    if !args.json {
        println!("🔍 Searching for: {}", keywords.join(", "));
    }

    let results = engine.search(query, &args.options());

    if args.json {
        println!("{}", results_json(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("\n❌ No results found for: {}", query);
        println!("\nTry:");
        println!("  - Using different keywords");
        println!("  - Checking spelling");
        println!("  - Using more general terms");
        return Ok(());
    }

    println!("\n✅ Found {} results:", results.len());
    for result in &results {
        println!("{}", format_result(result));
    }

    let top = results[0].document;
    println!("\n\n🔗 Related documents to '{}':", top.title);
    match engine.find_related(&top.path, args.related) {
        Ok(related) if !related.is_empty() => println!("{}", format_related(&related)),
        Ok(_) => println!("  (none)"),
        Err(e) => println!("  ⚠️  {}", e),
    }

    Ok(())
}

fn handle_related(config: &Config, path: &str, limit: usize, json: bool) -> anyhow::Result<()> {
    let engine = open_engine(config)?;

    // an unknown path is reported, not fatal
    let related = match engine.find_related(path, limit) {
        Ok(related) => related,
        Err(e @ Error::DocumentNotFound(_)) => {
            eprintln!("⚠️  {}", e);
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", results_json(&related)?);
    } else if related.is_empty() {
        println!("No related documents found for: {}", path);
    } else {
        println!("🔗 Related documents to '{}':", path);
        println!("{}", format_related(&related));
    }

    Ok(())
}

fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let engine = open_engine(config)?;
    let metadata = engine.statistics();

    println!("Index: {}", config.index_path.display());
    println!("Version: {}  Generated: {}", metadata.version, metadata.generated);
    println!("{}", format_statistics(metadata));

    if let Some(best) = engine.index().documents.iter().max_by_key(|d| d.word_count) {
        println!("\n  Largest document: {} ({} words)", best.path, best.word_count);
    }
    if metadata.total_documents > 0 {
        let per_doc = metadata.total_sections as f64 / metadata.total_documents as f64;
        println!("  Sections per document: {:.1}", per_doc);
    }

    Ok(())
}
