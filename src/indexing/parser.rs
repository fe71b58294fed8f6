use crate::storage::index::Section;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// ATX heading: one to six `#`, whitespace, then the heading text
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("Invalid heading regex"));

/// Split Markdown content into heading-delimited sections.
///
/// Text before the first heading belongs to no section. Every line after a
/// heading, blank lines included, is appended to that heading's content
/// followed by a newline. Heading nesting is not validated.
pub fn parse_sections(content: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for line in content.split('\n') {
        if let Some(caps) = HEADING_RE.captures(line) {
            if let Some(section) = current.take() {
                sections.push(section);
            }

            current = Some(Section {
                title: caps[2].trim().to_string(),
                level: caps[1].len() as u8,
                content: String::new(),
                line_start: sections.len(),
            });
        } else if let Some(section) = current.as_mut() {
            section.content.push_str(line);
            section.content.push('\n');
        }
    }

    if let Some(section) = current {
        sections.push(section);
    }

    sections
}

/// Title of a document: the first level-1 heading, else the file stem
pub fn document_title(sections: &[Section], path: &Path) -> String {
    sections
        .iter()
        .find(|s| s.level == 1)
        .map(|s| s.title.clone())
        .unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        })
}
