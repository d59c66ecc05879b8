//! Note graph accessor contract and the in-memory vault snapshot.

mod parser;
mod vault;

use crate::error::SynapticError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use parser::{find_synaptic_blocks, is_supported_note};
pub use vault::{VaultGraph, VaultGraphStats};

/// Vault-relative note path (`/` separated); the identity of a note.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteRef(String);

impl NoteRef {
    /// Wrap a vault-relative path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Full path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment (`Folder/Note.md` → `Note.md`).
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// File name without its last extension (`Note.v2.md` → `Note.v2`).
    #[must_use]
    pub fn basename(&self) -> &str {
        let file_name = self.file_name();
        match file_name.rsplit_once('.') {
            Some((stem, _ext)) if !stem.is_empty() => stem,
            _ => file_name,
        }
    }

    /// Everything before the last separator; empty for vault-root notes.
    #[must_use]
    pub fn folder_path(&self) -> &str {
        self.0.rsplit_once('/').map_or("", |(folder, _)| folder)
    }
}

impl fmt::Display for NoteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NoteRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Read-only view over one snapshot of the note graph.
///
/// Implementations must be deterministic for a fixed snapshot; every pipeline
/// stage receives the graph explicitly.
pub trait NoteGraph: Send + Sync {
    /// Every note of the snapshot, in a stable order.
    fn list_all_notes(&self) -> Vec<NoteRef>;

    /// Body + frontmatter tags (without `#`); duplicates allowed.
    ///
    /// Unknown notes have no tags. Fails when the note's metadata is unreadable.
    fn tags(&self, note: &NoteRef) -> Result<Vec<String>, SynapticError>;

    /// Outbound link targets; unresolved links keep the raw link text.
    fn outbound_link_targets(&self, note: &NoteRef) -> Vec<NoteRef>;

    /// Notes linking to `note`.
    fn inbound_link_sources(&self, note: &NoteRef) -> Vec<NoteRef>;

    /// Note whose basename, file name or full path equals `name`.
    fn resolve_display_name(&self, name: &str) -> Option<NoteRef>;

    /// Folder component of the note path.
    fn folder_path(&self, note: &NoteRef) -> String {
        note.folder_path().to_string()
    }

    /// File name component of the note path.
    fn file_name(&self, note: &NoteRef) -> String {
        note.file_name().to_string()
    }
}
