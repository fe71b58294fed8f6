use crate::storage::index::Priority;

const CRITICAL_PATTERNS: &[&str] = &["architecture", "security", "tag_system_architecture"];
const HIGH_PATTERNS: &[&str] = &["guide", "implementation", "components", "guides/"];
const ARCHIVE_PATTERNS: &[&str] = &["archives", "old", "deprecated"];

/// Classify a document path into a priority tier.
///
/// Matching is a case-insensitive substring test; the first tier that
/// matches wins, in the order critical, high, archive.
pub fn classify(path: &str) -> Priority {
    let path = path.to_lowercase();
    let matches_any = |patterns: &[&str]| patterns.iter().any(|p| path.contains(p));

    if matches_any(CRITICAL_PATTERNS) {
        Priority::Critical
    } else if matches_any(HIGH_PATTERNS) {
        Priority::High
    } else if matches_any(ARCHIVE_PATTERNS) {
        Priority::Archive
    } else {
        Priority::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers() {
        assert_eq!(classify("docs/ARCHITECTURE.md"), Priority::Critical);
        assert_eq!(classify("docs/security/policy.md"), Priority::Critical);
        assert_eq!(classify("docs/guides/setup.md"), Priority::High);
        assert_eq!(classify("docs/Implementation_Notes.md"), Priority::High);
        assert_eq!(classify("docs/archives/2023.md"), Priority::Archive);
        assert_eq!(classify("docs/deprecated-api.md"), Priority::Archive);
        assert_eq!(classify("docs/readme.md"), Priority::Normal);
    }

    #[test]
    fn test_precedence() {
        assert_eq!(classify("docs/archives/architecture.md"), Priority::Critical);
        assert_eq!(classify("docs/old/guide.md"), Priority::High);
        assert_eq!(classify("docs/deprecated/security.md"), Priority::Critical);
    }

    #[test]
    fn test_substring_semantics() {
        // "old" matches inside other words
        assert_eq!(classify("docs/folder/notes.md"), Priority::Archive);
        assert_eq!(classify("docs/guideline.md"), Priority::High);
    }
}
