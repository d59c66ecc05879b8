//! Keyword strategies and note classification predicates.

use crate::graph::{NoteGraph, NoteRef};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// How keywords are recognised in notes.
#[derive(Debug, Clone)]
pub enum KeywordMatchStrategy {
    /// A note's own tags are its keywords.
    Tags,
    /// Linked notes whose path starts with the prefix.
    FileNamePrefix(String),
    /// Linked notes whose path ends with the suffix.
    FileNameSuffix(String),
    /// Linked notes whose path matches the pattern.
    FileNameRegex(Regex),
}

impl KeywordMatchStrategy {
    /// Settings spelling of the strategy.
    #[must_use]
    pub const fn method_name(&self) -> &'static str {
        match self {
            Self::Tags => "tags",
            Self::FileNamePrefix(_) => "fileNamePrefix",
            Self::FileNameSuffix(_) => "fileNameSuffix",
            Self::FileNameRegex(_) => "fileNameRegex",
        }
    }

    /// Whether a link target counts as a keyword note.
    ///
    /// The tags strategy accepts targets carrying at least one tag; the file
    /// name strategies test the target's vault path.
    #[must_use]
    pub fn is_keyword(&self, graph: &dyn NoteGraph, target: &NoteRef) -> bool {
        match self {
            Self::Tags => graph.tags(target).is_ok_and(|tags| !tags.is_empty()),
            Self::FileNamePrefix(_) | Self::FileNameSuffix(_) | Self::FileNameRegex(_) => {
                self.matches_keyword(target.as_str())
            }
        }
    }

    /// Pattern test applied to an extracted keyword string.
    #[must_use]
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        match self {
            Self::Tags => true,
            Self::FileNamePrefix(prefix) => keyword.starts_with(prefix.as_str()),
            Self::FileNameSuffix(suffix) => keyword.ends_with(suffix.as_str()),
            Self::FileNameRegex(regex) => regex.is_match(keyword),
        }
    }
}

/// Pure `note → bool` classifier used for literature and permanent notes.
#[derive(Debug, Clone)]
pub enum NoteClassPredicate {
    /// Note carries exactly this tag.
    Tags(String),
    /// File name starts with the input.
    FileNamePrefix(String),
    /// File name (with or without `.md`) ends with the input.
    FileNameSuffix(String),
    /// File name matches the pattern.
    FileNameRegex(Regex),
    /// Vault path contains the input.
    FolderPath(String),
}

impl NoteClassPredicate {
    /// Settings spelling of the predicate.
    #[must_use]
    pub const fn method_name(&self) -> &'static str {
        match self {
            Self::Tags(_) => "tags",
            Self::FileNamePrefix(_) => "fileNamePrefix",
            Self::FileNameSuffix(_) => "fileNameSuffix",
            Self::FileNameRegex(_) => "fileNameRegex",
            Self::FolderPath(_) => "folderPath",
        }
    }

    /// Classify `note`. Notes with unreadable metadata carry no tags.
    #[must_use]
    pub fn matches(&self, graph: &dyn NoteGraph, note: &NoteRef) -> bool {
        match self {
            Self::Tags(tag) => graph
                .tags(note)
                .is_ok_and(|tags| tags.iter().any(|candidate| candidate == tag)),
            Self::FileNamePrefix(prefix) => graph.file_name(note).starts_with(prefix.as_str()),
            Self::FileNameSuffix(suffix) => {
                let file_name = graph.file_name(note);
                file_name.ends_with(suffix.as_str())
                    || file_name.replacen(".md", "", 1).ends_with(suffix.as_str())
            }
            Self::FileNameRegex(regex) => regex.is_match(&graph.file_name(note)),
            Self::FolderPath(fragment) => note.as_str().contains(fragment.as_str()),
        }
    }
}

/// Which notes count toward a keyword's backlink total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BacklinkScope {
    /// Every note that survives the exclusion rules.
    AllNotes,
    /// Only notes classified as permanent notes.
    #[default]
    PermanentNotesOnly,
}

impl BacklinkScope {
    /// Column title used by table renderers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AllNotes => "All Links",
            Self::PermanentNotesOnly => "Permanent Links",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VaultGraph;

    fn sample_graph() -> VaultGraph {
        VaultGraph::from_sources([
            ("Literature/L-Book.md", "---\ntags: [source]\n---\n"),
            ("Zettel/Idea-perm.md", "#idea"),
            ("Keywords/K-Rust.md", ""),
        ])
    }

    #[test]
    fn test_note_class_predicates() -> Result<(), regex::Error> {
        let graph = sample_graph();
        let book = NoteRef::new("Literature/L-Book.md");
        let idea = NoteRef::new("Zettel/Idea-perm.md");

        assert!(NoteClassPredicate::Tags("source".to_string()).matches(&graph, &book));
        assert!(!NoteClassPredicate::Tags("sour".to_string()).matches(&graph, &book));
        assert!(NoteClassPredicate::FileNamePrefix("L-".to_string()).matches(&graph, &book));
        assert!(NoteClassPredicate::FileNameSuffix("-perm".to_string()).matches(&graph, &idea));
        assert!(NoteClassPredicate::FileNameSuffix("perm.md".to_string()).matches(&graph, &idea));
        assert!(NoteClassPredicate::FileNameRegex(Regex::new(r"^Idea")?).matches(&graph, &idea));
        assert!(NoteClassPredicate::FolderPath("Zettel".to_string()).matches(&graph, &idea));
        assert!(NoteClassPredicate::FolderPath(String::new()).matches(&graph, &book));
        Ok(())
    }

    #[test]
    fn test_keyword_strategy_tests_paths() -> Result<(), regex::Error> {
        let graph = sample_graph();
        let keyword = NoteRef::new("Keywords/K-Rust.md");
        let idea = NoteRef::new("Zettel/Idea-perm.md");

        let prefix = KeywordMatchStrategy::FileNamePrefix("Keywords/K-".to_string());
        assert!(prefix.is_keyword(&graph, &keyword));
        assert!(!prefix.is_keyword(&graph, &idea));

        let regex = KeywordMatchStrategy::FileNameRegex(Regex::new(r"K-\w+\.md$")?);
        assert!(regex.is_keyword(&graph, &keyword));

        assert!(KeywordMatchStrategy::Tags.is_keyword(&graph, &idea));
        assert!(!KeywordMatchStrategy::Tags.is_keyword(&graph, &keyword));
        Ok(())
    }

    #[test]
    fn test_backlink_scope_labels() {
        assert_eq!(BacklinkScope::AllNotes.label(), "All Links");
        assert_eq!(BacklinkScope::default().label(), "Permanent Links");
    }
}
