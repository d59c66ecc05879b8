//! Keyword frequency ranking and backlink counting.

use super::classify::{KeywordMatchStrategy, NoteClassPredicate};
use super::extract::{MatchedKeywordRecord, extract_all};
use super::filter::{ExclusionRules, apply_exclusions};
use crate::graph::NoteGraph;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Ranked keyword before cloud-factor scaling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredKeyword {
    /// Keyword as extracted (tag or note path).
    pub display_name: String,
    /// File name of the note the keyword resolves to, or the keyword itself.
    pub resolved_file_name: String,
    /// 1-based position after the stable descending sort.
    pub rank: usize,
    /// Occurrences across the candidate set.
    pub score: usize,
    /// Notes in the backlink scope whose keywords contain this one.
    pub backlink_count: usize,
}

/// Keyword → number of notes whose keywords contain it.
///
/// Built once per invocation so backlink counting is a lookup instead of a
/// rescan of the vault per keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordIndex {
    containing_notes: HashMap<String, usize>,
}

impl KeywordIndex {
    /// Index every note that passes `exclusions` (and `permanent`, when set).
    #[must_use]
    pub fn build(
        graph: &dyn NoteGraph,
        strategy: &KeywordMatchStrategy,
        exclusions: &ExclusionRules,
        permanent: Option<&NoteClassPredicate>,
    ) -> Self {
        let mut notes = apply_exclusions(graph, graph.list_all_notes(), exclusions);
        if let Some(predicate) = permanent {
            notes.retain(|note| predicate.matches(graph, note));
        }
        Self::from_records(&extract_all(graph, &notes, strategy))
    }

    /// Index precomputed records; each note counts once per keyword.
    #[must_use]
    pub fn from_records(records: &[MatchedKeywordRecord]) -> Self {
        let mut containing_notes: HashMap<String, usize> = HashMap::new();
        for record in records.iter().filter(|record| record.has_keywords) {
            let distinct: HashSet<&str> = record.keywords.iter().map(String::as_str).collect();
            for keyword in distinct {
                *containing_notes.entry(keyword.to_string()).or_default() += 1;
            }
        }
        Self { containing_notes }
    }

    /// Notes containing `keyword`.
    #[must_use]
    pub fn containing_notes(&self, keyword: &str) -> usize {
        self.containing_notes.get(keyword).copied().unwrap_or(0)
    }
}

/// Count, rank and resolve the keywords of `records`.
///
/// Ties keep the order in which keywords were first encountered.
#[must_use]
pub fn aggregate(
    graph: &dyn NoteGraph,
    records: &[MatchedKeywordRecord],
    index: &KeywordIndex,
) -> Vec<ScoredKeyword> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for keyword in records
        .iter()
        .filter(|record| record.has_keywords)
        .flat_map(|record| record.keywords.iter())
    {
        let count = counts.entry(keyword.as_str()).or_insert_with(|| {
            order.push(keyword.as_str());
            0
        });
        *count += 1;
    }

    let mut ranked: Vec<(&str, usize)> = order
        .into_iter()
        .map(|keyword| (keyword, counts.get(keyword).copied().unwrap_or(0)))
        .collect();
    ranked.sort_by(|left, right| right.1.cmp(&left.1));

    ranked
        .into_iter()
        .enumerate()
        .map(|(position, (keyword, score))| {
            let resolved_file_name = match graph.resolve_display_name(keyword) {
                Some(note) => graph.file_name(&note),
                None => {
                    log::debug!("Keyword '{keyword}' resolves to no note");
                    keyword.to_string()
                }
            };
            ScoredKeyword {
                display_name: keyword.to_string(),
                resolved_file_name,
                rank: position + 1,
                score,
                backlink_count: index.containing_notes(keyword),
            }
        })
        .collect()
}
