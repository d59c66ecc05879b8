//! Candidate selection around a focus note.

use super::classify::NoteClassPredicate;
use crate::graph::{NoteGraph, NoteRef};
use std::collections::HashSet;

/// Two-tier classification used for the literature → permanent expansion.
#[derive(Debug, Clone, Copy)]
pub struct ExtendedClassification<'a> {
    /// Literature notes are expanded by one more hop.
    pub literature: &'a NoteClassPredicate,
    /// Second-hop notes kept when they are permanent notes.
    pub permanent: &'a NoteClassPredicate,
}

/// Order-preserving deduplicating collector.
#[derive(Debug, Default)]
struct UniqueNotes {
    seen: HashSet<NoteRef>,
    notes: Vec<NoteRef>,
}

impl UniqueNotes {
    fn push(&mut self, note: NoteRef) {
        if self.seen.insert(note.clone()) {
            self.notes.push(note);
        }
    }

    fn extend(&mut self, notes: impl IntoIterator<Item = NoteRef>) {
        for note in notes {
            self.push(note);
        }
    }

    fn into_vec(self) -> Vec<NoteRef> {
        self.notes
    }
}

/// Outbound targets then inbound sources of `note`, first-seen order.
#[must_use]
pub fn one_hop(graph: &dyn NoteGraph, note: &NoteRef) -> Vec<NoteRef> {
    let mut unique = UniqueNotes::default();
    unique.extend(graph.outbound_link_targets(note));
    unique.extend(graph.inbound_link_sources(note));
    unique.into_vec()
}

/// Candidate notes to scan, before exclusions and without the focus note.
///
/// Global scope yields the whole vault. Local scope yields the one-hop
/// neighborhood, plus permanent notes reached through literature notes when
/// `extended` is set.
#[must_use]
pub fn select_candidates(
    graph: &dyn NoteGraph,
    focus: &NoteRef,
    global: bool,
    extended: Option<ExtendedClassification<'_>>,
) -> Vec<NoteRef> {
    if global {
        return graph.list_all_notes();
    }

    let first_hop = one_hop(graph, focus);
    let Some(extended) = extended else {
        return first_hop;
    };

    let mut second_hop = UniqueNotes::default();
    for literature in first_hop
        .iter()
        .filter(|note| extended.literature.matches(graph, note))
    {
        second_hop.extend(one_hop(graph, literature));
    }

    let mut candidates = UniqueNotes::default();
    candidates.extend(first_hop);
    candidates.extend(
        second_hop
            .into_vec()
            .into_iter()
            .filter(|note| extended.permanent.matches(graph, note)),
    );
    log::debug!(
        "Selected {} local candidates around {focus}",
        candidates.notes.len()
    );
    candidates.into_vec()
}

/// Append `focus` to an already filtered candidate list, exactly once.
#[must_use]
pub fn with_focus(mut candidates: Vec<NoteRef>, focus: &NoteRef) -> Vec<NoteRef> {
    candidates.retain(|note| note != focus);
    candidates.push(focus.clone());
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VaultGraph;

    #[test]
    fn test_one_hop_dedupes_in_first_seen_order() {
        let graph = VaultGraph::from_sources([
            ("F.md", "[[G]] [[H]] [[G]]"),
            ("G.md", ""),
            ("H.md", "[[F]]"),
        ]);
        assert_eq!(
            one_hop(&graph, &NoteRef::new("F.md")),
            vec![NoteRef::new("G.md"), NoteRef::new("H.md")]
        );
    }

    #[test]
    fn test_with_focus_never_duplicates() {
        let focus = NoteRef::new("F.md");
        let out = with_focus(vec![focus.clone(), NoteRef::new("G.md")], &focus);
        assert_eq!(out, vec![NoteRef::new("G.md"), focus]);
    }
}
