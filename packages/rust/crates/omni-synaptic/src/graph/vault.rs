//! In-memory vault snapshot implementing [`NoteGraph`].

use super::parser::{
    LinkTarget, ParsedNote, is_supported_note, parse_note, relative_note_path,
    trim_md_extension,
};
use super::{NoteGraph, NoteRef};
use crate::error::SynapticError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Summary stats of a vault snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultGraphStats {
    /// Indexed notes.
    pub total_notes: usize,
    /// Link occurrences resolved to an indexed note.
    pub links_in_graph: usize,
    /// Link occurrences pointing nowhere.
    pub unresolved_links: usize,
    /// Notes with no incoming/outgoing resolved links.
    pub orphans: usize,
    /// Notes whose frontmatter failed to parse.
    pub malformed_notes: usize,
}

/// Immutable snapshot of a markdown vault: tags, links and backlinks per note.
#[derive(Debug, Clone, Default)]
pub struct VaultGraph {
    root: Option<PathBuf>,
    notes: Vec<NoteRef>,
    tags_by_note: HashMap<NoteRef, Result<Vec<String>, String>>,
    outgoing: HashMap<NoteRef, Vec<NoteRef>>,
    incoming: HashMap<NoteRef, Vec<NoteRef>>,
    position_by_basename: HashMap<String, usize>,
    position_by_file_name: HashMap<String, usize>,
    position_by_path: HashMap<String, usize>,
    links_in_graph: usize,
    unresolved_links: usize,
}

fn should_skip_entry(path: &Path, root: &Path) -> bool {
    if path == root {
        return false;
    }
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn first_position(map: &mut HashMap<String, usize>, key: String, position: usize) {
    map.entry(key).or_insert(position);
}

impl VaultGraph {
    /// Walk `root` and index every markdown note below it.
    ///
    /// Hidden entries (`.obsidian`, `.git`, dotfiles) are skipped; unreadable
    /// notes are logged and left out of the snapshot.
    pub fn build(root: &Path) -> Result<Self, SynapticError> {
        if !root.is_dir() {
            return Err(SynapticError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("vault root is not a directory: {}", root.display()),
            )));
        }

        let files: Vec<PathBuf> = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !should_skip_entry(entry.path(), root))
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file() && is_supported_note(entry.path()))
            .map(walkdir::DirEntry::into_path)
            .collect();

        let parsed: Vec<ParsedNote> = files
            .par_iter()
            .filter_map(|path| {
                let rel_path = relative_note_path(path, root)?;
                match std::fs::read_to_string(path) {
                    Ok(content) => Some(parse_note(&rel_path, &content)),
                    Err(err) => {
                        log::warn!("Skipping unreadable note {}: {err}", path.display());
                        None
                    }
                }
            })
            .collect();

        let mut graph = Self::from_parsed(parsed);
        graph.root = Some(root.to_path_buf());
        log::debug!(
            "Indexed vault {}: {} notes, {} links",
            root.display(),
            graph.notes.len(),
            graph.links_in_graph
        );
        Ok(graph)
    }

    /// Build a snapshot from in-memory `(vault-relative path, markdown)` pairs.
    #[must_use]
    pub fn from_sources<I, P, C>(sources: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: AsRef<str>,
    {
        let parsed = sources
            .into_iter()
            .map(|(path, content)| parse_note(&path.into(), content.as_ref()))
            .collect();
        Self::from_parsed(parsed)
    }

    fn from_parsed(parsed: Vec<ParsedNote>) -> Self {
        let mut graph = Self::default();

        for (position, note) in parsed.iter().enumerate() {
            let note_ref = NoteRef::new(note.path.clone());
            first_position(
                &mut graph.position_by_basename,
                note_ref.basename().to_string(),
                position,
            );
            first_position(
                &mut graph.position_by_file_name,
                note_ref.file_name().to_string(),
                position,
            );
            first_position(
                &mut graph.position_by_path,
                trim_md_extension(note_ref.as_str()),
                position,
            );
            graph.notes.push(note_ref);
        }

        let mut incoming_seen: HashMap<NoteRef, HashSet<NoteRef>> = HashMap::new();
        for (source, note) in graph.notes.clone().iter().zip(parsed) {
            let mut targets = Vec::with_capacity(note.link_targets.len());
            for link in &note.link_targets {
                match graph.resolve_link(link) {
                    Some(target) => {
                        graph.links_in_graph += 1;
                        if incoming_seen
                            .entry(target.clone())
                            .or_default()
                            .insert(source.clone())
                        {
                            graph
                                .incoming
                                .entry(target.clone())
                                .or_default()
                                .push(source.clone());
                        }
                        targets.push(target);
                    }
                    None => {
                        graph.unresolved_links += 1;
                        targets.push(NoteRef::new(link.target.clone()));
                    }
                }
            }
            graph.outgoing.insert(source.clone(), targets);
            graph.tags_by_note.insert(source.clone(), note.tags);
        }

        graph
    }

    /// Note named by `raw`: basename, file name or vault path with or without
    /// the markdown extension.
    #[must_use]
    pub fn resolve_note_path(&self, raw: &str) -> Option<NoteRef> {
        self.resolve_display_name(raw).or_else(|| {
            self.position_by_path
                .get(&trim_md_extension(raw))
                .and_then(|position| self.notes.get(*position).cloned())
        })
    }

    /// Folder-relative target first, then the path as written, then its
    /// last segment (shortest-path links).
    fn resolve_link(&self, link: &LinkTarget) -> Option<NoteRef> {
        self.resolve_note_path(&link.target).or_else(|| {
            let written = link.written.as_deref()?;
            self.resolve_note_path(written).or_else(|| {
                written
                    .rsplit('/')
                    .next()
                    .and_then(|segment| self.resolve_display_name(segment))
            })
        })
    }

    /// Vault root when built from disk.
    #[must_use]
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Whether `note` is part of the snapshot.
    #[must_use]
    pub fn contains(&self, note: &NoteRef) -> bool {
        self.tags_by_note.contains_key(note)
    }

    /// Return normalized stats payload.
    #[must_use]
    pub fn stats(&self) -> VaultGraphStats {
        let orphans = self
            .notes
            .iter()
            .filter(|note| {
                let out_empty = self
                    .outgoing
                    .get(*note)
                    .is_none_or(|targets| targets.iter().all(|t| !self.contains(t)));
                let in_empty = self.incoming.get(*note).is_none_or(Vec::is_empty);
                out_empty && in_empty
            })
            .count();
        let malformed_notes = self.tags_by_note.values().filter(|t| t.is_err()).count();
        VaultGraphStats {
            total_notes: self.notes.len(),
            links_in_graph: self.links_in_graph,
            unresolved_links: self.unresolved_links,
            orphans,
            malformed_notes,
        }
    }
}

impl NoteGraph for VaultGraph {
    fn list_all_notes(&self) -> Vec<NoteRef> {
        self.notes.clone()
    }

    fn tags(&self, note: &NoteRef) -> Result<Vec<String>, SynapticError> {
        match self.tags_by_note.get(note) {
            None => Ok(Vec::new()),
            Some(Ok(tags)) => Ok(tags.clone()),
            Some(Err(message)) => Err(SynapticError::MalformedFrontmatter {
                note: note.to_string(),
                message: message.clone(),
            }),
        }
    }

    fn outbound_link_targets(&self, note: &NoteRef) -> Vec<NoteRef> {
        self.outgoing.get(note).cloned().unwrap_or_default()
    }

    fn inbound_link_sources(&self, note: &NoteRef) -> Vec<NoteRef> {
        self.incoming.get(note).cloned().unwrap_or_default()
    }

    fn resolve_display_name(&self, name: &str) -> Option<NoteRef> {
        let by_name = [
            self.position_by_basename.get(name),
            self.position_by_file_name.get(name),
        ]
        .into_iter()
        .flatten()
        .min()
        .copied();
        match by_name.and_then(|position| self.notes.get(position)) {
            Some(note) => Some(note.clone()),
            None => {
                let exact = NoteRef::new(name);
                self.contains(&exact).then_some(exact)
            }
        }
    }
}
