use crate::search::engine::SearchResult;
use crate::storage::index::{IndexMetadata, Priority};
use serde::Serialize;

const RULE_WIDTH: usize = 80;
const TOP_KEYWORDS_SHOWN: usize = 10;

/// Render one search result as a text block
pub fn format_result(result: &SearchResult<'_>) -> String {
    let doc = result.document;
    let mut output = vec![
        format!("\n{}", "=".repeat(RULE_WIDTH)),
        format!("📄 {}", doc.title),
        format!("   Path: {}", doc.path),
        format!("   Priority: {}", doc.priority.as_str().to_uppercase()),
        format!("   Score: {}", percent(result.score)),
    ];

    if !result.matching_sections.is_empty() {
        output.push("\n   Matching Sections:".to_string());
        for (i, m) in result.matching_sections.iter().enumerate() {
            output.push(format!(
                "   {}. {} (Level {}) - {} matches",
                i + 1,
                m.section.title,
                m.section.level,
                m.matches
            ));

            let excerpt = m.excerpt();
            if !excerpt.is_empty() {
                output.push(format!("      \"{}...\"", excerpt));
            }
        }
    }

    output.join("\n")
}

/// Render a numbered related-documents listing
pub fn format_related(related: &[SearchResult<'_>]) -> String {
    related
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "  {}. {} ({}) - Score: {}",
                i + 1,
                r.document.title,
                r.document.path,
                percent(r.score)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render index statistics
pub fn format_statistics(metadata: &IndexMetadata) -> String {
    let mut output = vec![
        "📊 Index Statistics:".to_string(),
        format!("  Total documents: {}", metadata.total_documents),
        format!("  Total sections: {}", metadata.total_sections),
        format!("  Total words: {}", thousands(metadata.total_words)),
        "\n  Priority breakdown:".to_string(),
    ];

    for priority in Priority::ALL {
        output.push(format!(
            "    {}: {}",
            capitalize(priority.as_str()),
            metadata.priority_breakdown.count(priority)
        ));
    }

    output.push("\n  Top 10 keywords:".to_string());
    for (i, keyword) in metadata.top_keywords.iter().take(TOP_KEYWORDS_SHOWN).enumerate() {
        output.push(format!("    {}. {}", i + 1, keyword));
    }

    output.join("\n")
}

/// Score as a percentage with two decimals, e.g. `87.50%`
pub fn percent(score: f64) -> String {
    format!("{:.2}%", score * 100.0)
}

fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentView<'a> {
    pub path: &'a str,
    pub title: &'a str,
    pub priority: Priority,
}

#[derive(Debug, Serialize)]
pub struct SectionView<'a> {
    pub title: &'a str,
    pub level: u8,
    pub score: f64,
    pub matches: usize,
    pub excerpt: String,
}

/// JSON shape of a search result
#[derive(Debug, Serialize)]
pub struct ResultView<'a> {
    pub document: DocumentView<'a>,
    pub score: f64,
    pub matching_sections: Vec<SectionView<'a>>,
}

impl<'a> From<&SearchResult<'a>> for ResultView<'a> {
    fn from(result: &SearchResult<'a>) -> Self {
        Self {
            document: DocumentView {
                path: &result.document.path,
                title: &result.document.title,
                priority: result.document.priority,
            },
            score: result.score,
            matching_sections: result
                .matching_sections
                .iter()
                .map(|m| SectionView {
                    title: &m.section.title,
                    level: m.section.level,
                    score: m.score,
                    matches: m.matches,
                    excerpt: m.excerpt(),
                })
                .collect(),
        }
    }
}

/// Serialize results as pretty JSON
pub fn results_json(results: &[SearchResult<'_>]) -> serde_json::Result<String> {
    let views: Vec<ResultView<'_>> = results.iter().map(ResultView::from).collect();
    serde_json::to_string_pretty(&views)
}
