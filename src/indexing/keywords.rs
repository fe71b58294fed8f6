use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Default number of keywords kept per document
pub const MAX_KEYWORDS: usize = 50;
/// Number of global keywords kept in index metadata
pub const TOP_GLOBAL_KEYWORDS: usize = 100;
/// Tokens must be strictly longer than this (in characters) to count
const MIN_KEYWORD_CHARS: usize = 3;

static MARKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[#*`\[\]()]").expect("Invalid markup regex"));
static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("Invalid word regex"));

/// English and French function words ignored during extraction
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
    "does", "did", "will", "would", "should", "could", "may", "might", "can", "this", "that",
    "these", "those", "it", "its", "de", "la", "le", "les", "un", "une", "des", "et", "ou",
    "dans", "pour", "avec", "par", "sur",
];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Frequency counter that remembers first-seen order.
///
/// Ranking is by descending count; equal counts keep the order in which the
/// words were first recorded.
#[derive(Debug, Clone, Default)]
pub struct KeywordTally {
    counts: Vec<(String, usize)>,
    positions: HashMap<String, usize>,
}

impl KeywordTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `word`
    pub fn add(&mut self, word: &str) {
        match self.positions.get(word) {
            Some(&pos) => self.counts[pos].1 += 1,
            None => {
                self.positions.insert(word.to_string(), self.counts.len());
                self.counts.push((word.to_string(), 1));
            }
        }
    }

    /// Count one occurrence of every word in `words`
    pub fn add_all<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.add(word.as_ref());
        }
    }

    pub fn count(&self, word: &str) -> usize {
        self.positions
            .get(word)
            .map(|&pos| self.counts[pos].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` most frequent words
    pub fn most_common(&self, n: usize) -> Vec<String> {
        let mut ranked: Vec<&(String, usize)> = self.counts.iter().collect();
        // stable sort keeps first-seen order among ties
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(n)
            .map(|(word, _)| word.clone())
            .collect()
    }
}

/// Extract up to `max_keywords` keywords from `text`, most frequent first.
///
/// Markup punctuation is blanked out, the text is lowercased and split into
/// word tokens, and tokens of three characters or fewer or in
/// [`STOP_WORDS`] are dropped.
pub fn extract_keywords(text: &str, max_keywords: usize) -> Vec<String> {
    let cleaned = MARKUP_RE.replace_all(text, " ").to_lowercase();

    let mut tally = KeywordTally::new();
    for token in WORD_RE.find_iter(&cleaned) {
        let word = token.as_str();
        if word.chars().count() > MIN_KEYWORD_CHARS && !is_stop_word(word) {
            tally.add(word);
        }
    }

    tally.most_common(max_keywords)
}
