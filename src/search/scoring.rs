use crate::storage::index::{Document, Section};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

// Component weights. A critical document maxing every component scores
// exactly 1.0.
pub const TITLE_WEIGHT: f64 = 0.3;
pub const KEYWORD_WEIGHT: f64 = 0.3;
pub const SECTION_WEIGHT: f64 = 0.2;
pub const PRIORITY_WEIGHT: f64 = 0.2;
/// Largest priority multiplier, used to normalise the priority component
const MAX_PRIORITY_MULTIPLIER: f64 = 2.0;

/// Query tokens must be strictly longer than this (in characters)
const MIN_QUERY_TOKEN_CHARS: usize = 2;
/// Characters of section content shown in an excerpt
pub const EXCERPT_CHARS: usize = 150;

static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("Invalid query cleanup regex"));

/// Split free text into lowercase query keywords.
///
/// Punctuation becomes whitespace and tokens of two characters or fewer
/// are dropped.
pub fn extract_query_keywords(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    NON_WORD_RE
        .replace_all(&lowered, " ")
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_QUERY_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// A parsed query: its keywords plus a whole-word pattern for each
#[derive(Debug, Clone)]
pub struct Query {
    keywords: Vec<String>,
    patterns: Vec<Option<Regex>>,
}

impl Query {
    pub fn parse(text: &str) -> Self {
        Self::from_keywords(extract_query_keywords(text))
    }

    pub fn from_keywords(keywords: Vec<String>) -> Self {
        let patterns = keywords
            .iter()
            .map(|kw| match Regex::new(&format!(r"\b{}\b", regex::escape(kw))) {
                Ok(re) => Some(re),
                Err(e) => {
                    // the keyword still counts toward |Q| but can never match
                    warn!(keyword = %kw, "Failed to compile keyword pattern: {}", e);
                    None
                }
            })
            .collect();

        Self { keywords, patterns }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Number of keywords occurring in `text` as whole words
    pub fn word_hits(&self, text: &str) -> usize {
        self.patterns
            .iter()
            .flatten()
            .filter(|re| re.is_match(text))
            .count()
    }

    /// Number of keywords occurring anywhere in `text`, word boundaries ignored
    pub fn substring_hits(&self, text: &str) -> usize {
        self.keywords.iter().filter(|kw| text.contains(kw.as_str())).count()
    }
}

/// The weighted components of a relevance score
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub title: f64,
    pub keywords: f64,
    pub sections: f64,
    pub priority: f64,
}

impl ScoreBreakdown {
    /// Sum of the components, capped at 1.0
    pub fn total(&self) -> f64 {
        (self.title + self.keywords + self.sections + self.priority).min(1.0)
    }
}

fn section_text(section: &Section) -> String {
    format!("{} {}", section.title, section.content).to_lowercase()
}

/// Score each component of `document`'s relevance to `query`
pub fn score_components(document: &Document, query: &Query) -> ScoreBreakdown {
    if query.is_empty() {
        return ScoreBreakdown::default();
    }
    let n = query.len() as f64;

    let title = document.title.to_lowercase();
    let title_score = (query.word_hits(&title) as f64 / n) * TITLE_WEIGHT;

    let keywords_text = document
        .keywords
        .iter()
        .map(|k| k.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    let keyword_score = (query.word_hits(&keywords_text) as f64 / n) * KEYWORD_WEIGHT;

    // each (section, keyword) pair counts at most once
    let section_hits: usize = document
        .sections
        .iter()
        .map(|section| query.word_hits(&section_text(section)))
        .sum();
    let possible = query.len() * document.sections.len();
    let section_score = if possible > 0 {
        (section_hits as f64 / possible as f64).min(1.0) * SECTION_WEIGHT
    } else {
        0.0
    };

    let priority_score =
        document.priority.multiplier() * PRIORITY_WEIGHT / MAX_PRIORITY_MULTIPLIER;

    ScoreBreakdown {
        title: title_score,
        keywords: keyword_score,
        sections: section_score,
        priority: priority_score,
    }
}

/// Relevance of `document` to `query`, in `[0.0, 1.0]`
pub fn relevance_score(document: &Document, query: &Query) -> f64 {
    if query.is_empty() {
        return 0.0;
    }
    score_components(document, query).total()
}

/// A section that mentions at least one query keyword
#[derive(Debug, Clone, PartialEq)]
pub struct SectionMatch<'a> {
    pub section: &'a Section,
    /// Fraction of query keywords found in the section
    pub score: f64,
    /// Number of query keywords found in the section
    pub matches: usize,
}

impl SectionMatch<'_> {
    /// Leading content of the section, trimmed
    pub fn excerpt(&self) -> String {
        let head: String = self.section.content.chars().take(EXCERPT_CHARS).collect();
        head.trim().to_string()
    }
}

/// Rank the sections of `document` by plain substring matches.
///
/// Unlike [`score_components`], keywords match anywhere inside words here.
pub fn matching_sections<'a>(
    document: &'a Document,
    query: &Query,
    max_sections: usize,
) -> Vec<SectionMatch<'a>> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<SectionMatch<'a>> = document
        .sections
        .iter()
        .filter_map(|section| {
            let matches = query.substring_hits(&section_text(section));
            (matches > 0).then(|| SectionMatch {
                section,
                score: matches as f64 / query.len() as f64,
                matches,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(max_sections);
    scored
}
