//! Exclusion rules applied to candidate note sets.

use crate::error::SynapticError;
use crate::graph::{NoteGraph, NoteRef};
use regex::Regex;

/// One folder or file name exclusion pattern.
#[derive(Debug, Clone)]
pub enum ExclusionPattern {
    /// Substring containment.
    Literal(String),
    /// `/…/`-delimited regular expression, tested with search semantics.
    Regex(Regex),
}

impl ExclusionPattern {
    /// Parse a configured pattern; `/…/` selects the regex form.
    pub fn parse(raw: &str) -> Result<Self, SynapticError> {
        if raw.len() >= 2 && raw.starts_with('/') && raw.ends_with('/') {
            let inner = &raw[1..raw.len() - 1];
            let regex = Regex::new(inner).map_err(|source| SynapticError::InvalidPattern {
                pattern: raw.to_string(),
                source,
            })?;
            return Ok(Self::Regex(regex));
        }
        Ok(Self::Literal(raw.to_string()))
    }

    /// Test `text` against the pattern.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Self::Literal(fragment) => text.contains(fragment.as_str()),
            Self::Regex(regex) => regex.is_match(text),
        }
    }
}

/// Independent exclusion dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionDimension {
    /// File name against file name patterns.
    FileName,
    /// Folder path against folder patterns.
    Folder,
    /// Tags against excluded tags (exact membership).
    Tag,
}

impl ExclusionDimension {
    /// Every dimension.
    pub const ALL: [Self; 3] = [Self::FileName, Self::Folder, Self::Tag];
}

/// Folder, tag and file name exclusions.
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    /// Folder path patterns.
    pub folders: Vec<ExclusionPattern>,
    /// Excluded tags.
    pub tags: Vec<String>,
    /// File name patterns.
    pub file_names: Vec<ExclusionPattern>,
}

fn parse_patterns(raw: &[String]) -> Result<Vec<ExclusionPattern>, SynapticError> {
    raw.iter().map(|pattern| ExclusionPattern::parse(pattern)).collect()
}

impl ExclusionRules {
    /// Compile raw settings lists.
    pub fn new(
        folders: &[String],
        tags: &[String],
        file_names: &[String],
    ) -> Result<Self, SynapticError> {
        Ok(Self {
            folders: parse_patterns(folders)?,
            tags: tags.to_vec(),
            file_names: parse_patterns(file_names)?,
        })
    }

    /// No exclusion configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.tags.is_empty() && self.file_names.is_empty()
    }

    /// Whether `note` is excluded along one dimension.
    #[must_use]
    pub fn excludes_by(
        &self,
        graph: &dyn NoteGraph,
        note: &NoteRef,
        dimension: ExclusionDimension,
    ) -> bool {
        match dimension {
            ExclusionDimension::FileName => {
                if self.file_names.is_empty() {
                    return false;
                }
                let file_name = graph.file_name(note);
                self.file_names.iter().any(|p| p.is_match(&file_name))
            }
            ExclusionDimension::Folder => {
                if self.folders.is_empty() {
                    return false;
                }
                let folder = graph.folder_path(note);
                self.folders.iter().any(|p| p.is_match(&folder))
            }
            ExclusionDimension::Tag => {
                if self.tags.is_empty() {
                    return false;
                }
                match graph.tags(note) {
                    Ok(tags) => tags.iter().any(|tag| self.tags.contains(tag)),
                    Err(err) => {
                        log::debug!("Treating note without readable tags as untagged: {err}");
                        false
                    }
                }
            }
        }
    }

    /// Whether `note` is excluded along any dimension.
    #[must_use]
    pub fn excludes(&self, graph: &dyn NoteGraph, note: &NoteRef) -> bool {
        ExclusionDimension::ALL
            .iter()
            .any(|dimension| self.excludes_by(graph, note, *dimension))
    }

    /// Drop notes excluded along a single dimension, keeping order.
    #[must_use]
    pub fn retain_dimension(
        &self,
        graph: &dyn NoteGraph,
        notes: Vec<NoteRef>,
        dimension: ExclusionDimension,
    ) -> Vec<NoteRef> {
        notes
            .into_iter()
            .filter(|note| !self.excludes_by(graph, note, dimension))
            .collect()
    }
}

/// Drop every note excluded by `rules`, keeping order.
#[must_use]
pub fn apply_exclusions(
    graph: &dyn NoteGraph,
    notes: Vec<NoteRef>,
    rules: &ExclusionRules,
) -> Vec<NoteRef> {
    if rules.is_empty() {
        return notes;
    }
    notes
        .into_iter()
        .filter(|note| !rules.excludes(graph, note))
        .collect()
}
