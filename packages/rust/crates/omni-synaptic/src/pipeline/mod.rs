//! Keyword aggregation pipeline.
//!
//! Neighborhood selection → exclusions → per-note extraction → ranking →
//! cloud-factor scaling. Every stage takes the graph snapshot explicitly and
//! keeps no state between invocations.

mod aggregate;
mod classify;
mod extract;
mod filter;
mod neighborhood;
mod scale;

pub use aggregate::{KeywordIndex, ScoredKeyword, aggregate};
pub use classify::{BacklinkScope, KeywordMatchStrategy, NoteClassPredicate};
pub use extract::{MatchedKeywordRecord, extract_all, extract_keywords};
pub use filter::{ExclusionDimension, ExclusionPattern, ExclusionRules, apply_exclusions};
pub use neighborhood::{ExtendedClassification, one_hop, select_candidates, with_focus};
pub use scale::{KeywordCloudEntry, MAX_CLOUD_FACTOR, MIN_CLOUD_FACTOR, scale_cloud_factors};

use crate::graph::{NoteGraph, NoteRef};
use crate::options::SynapticRouteOptions;
use crate::settings::SynapticSettings;

/// Notes scanned for `focus`: selection, exclusions, then the focus note.
#[must_use]
pub fn candidate_notes(
    graph: &dyn NoteGraph,
    focus: &NoteRef,
    global: bool,
    settings: &SynapticSettings,
) -> Vec<NoteRef> {
    let extended = settings
        .lucy_zettelkasten
        .then_some(ExtendedClassification {
            literature: &settings.literature_notes,
            permanent: &settings.permanent_notes,
        });
    let selected = select_candidates(graph, focus, global, extended);
    let filtered = apply_exclusions(graph, selected, &settings.exclusions);
    with_focus(filtered, focus)
}

/// Backlink index for the configured scope.
#[must_use]
pub fn backlink_index(graph: &dyn NoteGraph, settings: &SynapticSettings) -> KeywordIndex {
    let permanent = match settings.backlink_scope {
        BacklinkScope::AllNotes => None,
        BacklinkScope::PermanentNotesOnly => Some(&settings.permanent_notes),
    };
    KeywordIndex::build(
        graph,
        &settings.keyword_strategy,
        &settings.exclusions,
        permanent,
    )
}

/// Run the whole pipeline for one `SynapticRoute` block.
///
/// A focus note missing from the snapshot still contributes (nothing) and
/// never fails the computation.
#[must_use]
pub fn compute_keyword_cloud(
    graph: &dyn NoteGraph,
    focus: &NoteRef,
    options: &SynapticRouteOptions,
    settings: &SynapticSettings,
) -> Vec<KeywordCloudEntry> {
    let candidates = candidate_notes(graph, focus, options.global, settings);
    let records = extract_all(graph, &candidates, &settings.keyword_strategy);
    let index = backlink_index(graph, settings);
    let scored = aggregate(graph, &records, &index);
    log::debug!(
        "Aggregated {} keywords from {} candidates for {focus}",
        scored.len(),
        candidates.len()
    );
    scale_cloud_factors(scored)
}
