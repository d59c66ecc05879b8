//! Per-note keyword extraction.

use super::classify::KeywordMatchStrategy;
use crate::graph::{NoteGraph, NoteRef};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Keywords found in one candidate note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedKeywordRecord {
    /// Source note.
    pub note: NoteRef,
    /// Keywords in extraction order, duplicates kept.
    pub keywords: Vec<String>,
    /// `!keywords.is_empty()`.
    pub has_keywords: bool,
}

impl MatchedKeywordRecord {
    fn new(note: NoteRef, keywords: Vec<String>) -> Self {
        let has_keywords = !keywords.is_empty();
        Self {
            note,
            keywords,
            has_keywords,
        }
    }
}

/// Extract the keywords of `note` under `strategy`.
///
/// Unreadable metadata yields an empty record.
#[must_use]
pub fn extract_keywords(
    graph: &dyn NoteGraph,
    note: &NoteRef,
    strategy: &KeywordMatchStrategy,
) -> MatchedKeywordRecord {
    let keywords = match strategy {
        KeywordMatchStrategy::Tags => match graph.tags(note) {
            Ok(tags) => tags,
            Err(err) => {
                log::warn!("Skipping keywords of {note}: {err}");
                Vec::new()
            }
        },
        KeywordMatchStrategy::FileNamePrefix(_)
        | KeywordMatchStrategy::FileNameSuffix(_)
        | KeywordMatchStrategy::FileNameRegex(_) => graph
            .outbound_link_targets(note)
            .into_iter()
            .filter(|target| strategy.is_keyword(graph, target))
            .map(|target| target.as_str().to_string())
            .filter(|keyword| strategy.matches_keyword(keyword))
            .collect(),
    };
    MatchedKeywordRecord::new(note.clone(), keywords)
}

/// Extract every note in parallel; output order follows `notes`.
#[must_use]
pub fn extract_all(
    graph: &dyn NoteGraph,
    notes: &[NoteRef],
    strategy: &KeywordMatchStrategy,
) -> Vec<MatchedKeywordRecord> {
    notes
        .par_iter()
        .map(|note| extract_keywords(graph, note, strategy))
        .collect()
}
