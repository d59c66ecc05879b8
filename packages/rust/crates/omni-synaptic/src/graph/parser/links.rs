use comrak::{Arena, Options, nodes::NodeValue, parse_document};
use std::path::{Component, Path};

use super::paths::{normalize_slashes, trim_md_extension};

const SYNAPTIC_BLOCK_INFO: &str = "SynapticRoute";

/// One outgoing link before resolution against the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LinkTarget {
    /// Wikilink name, or markdown link joined against the source folder.
    pub target: String,
    /// Markdown link path as written, when it differs from `target`.
    pub written: Option<String>,
}

impl LinkTarget {
    #[must_use]
    pub(crate) fn named(target: String) -> Self {
        Self {
            target,
            written: None,
        }
    }
}

/// Strip alias, heading and block anchors from a wikilink body.
pub(super) fn normalize_wikilink_target(raw: &str) -> Option<String> {
    let mut candidate = raw.trim();
    for separator in ['|', '#'] {
        if let Some((left, _right)) = candidate.split_once(separator) {
            candidate = left;
        }
    }
    let normalized = normalize_slashes(candidate.trim())
        .trim_matches('/')
        .to_string();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

fn extract_relative_dir_parts(path: &Path) -> Vec<String> {
    let Some(parent) = path.parent() else {
        return Vec::new();
    };
    parent
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().to_string()),
            _ => None,
        })
        .collect()
}

fn normalize_markdown_target(raw: &str, source_path: &Path) -> Option<LinkTarget> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Support [text](<path/to/doc.md>) and [text](path/to/doc.md "title")
    let unwrapped = if trimmed.starts_with('<') {
        let end = trimmed.find('>')?;
        &trimmed[1..end]
    } else {
        trimmed.split_whitespace().next().unwrap_or_default()
    };
    let mut candidate = normalize_slashes(&unwrapped.replace("%20", " "));
    let lower_candidate = candidate.to_lowercase();
    if candidate.is_empty() || lower_candidate.starts_with('#') {
        return None;
    }
    if lower_candidate.contains("://")
        || lower_candidate.starts_with("mailto:")
        || lower_candidate.starts_with("tel:")
        || lower_candidate.starts_with("data:")
    {
        return None;
    }

    if let Some((left, _right)) = candidate.split_once('#') {
        candidate = left.to_string();
    }
    if let Some((left, _right)) = candidate.split_once('?') {
        candidate = left.to_string();
    }

    let absolute = candidate.starts_with('/');
    let mut parts: Vec<String> = if absolute {
        Vec::new()
    } else {
        extract_relative_dir_parts(source_path)
    };
    for segment in candidate.split('/') {
        let cleaned = segment.trim();
        if cleaned.is_empty() || cleaned == "." {
            continue;
        }
        if cleaned == ".." {
            parts.pop();
            continue;
        }
        parts.push(cleaned.to_string());
    }
    if parts.is_empty() {
        return None;
    }

    let normalized = trim_md_extension(&parts.join("/"))
        .trim_matches('/')
        .to_string();
    if normalized.is_empty() {
        return None;
    }
    let written = trim_md_extension(candidate.trim_start_matches("./"))
        .trim_matches('/')
        .to_string();
    Some(LinkTarget {
        written: (!written.is_empty() && written != normalized).then_some(written),
        target: normalized,
    })
}

/// Body link targets in document order, duplicates kept.
///
/// Wikilinks stay as written (note names); markdown links are joined
/// against the source note's folder and keep their written path.
pub(super) fn extract_links(body: &str, source_path: &Path) -> Vec<LinkTarget> {
    let mut options = Options::default();
    // Obsidian-style `[[target|title]]`.
    options.extension.wikilinks_title_after_pipe = true;
    let arena = Arena::new();
    let root_node = parse_document(&arena, body, &options);

    let mut out: Vec<LinkTarget> = Vec::new();
    for node in root_node.descendants() {
        let normalized = match &node.data().value {
            NodeValue::Link(link) => normalize_markdown_target(&link.url, source_path),
            NodeValue::WikiLink(link) => {
                normalize_wikilink_target(&link.url).map(LinkTarget::named)
            }
            _ => None,
        };
        if let Some(normalized) = normalized {
            out.push(normalized);
        }
    }
    out
}

/// Literal bodies of every fenced ```` ```SynapticRoute ```` block in a note.
#[must_use]
pub fn find_synaptic_blocks(markdown: &str) -> Vec<String> {
    let (_frontmatter, body) = super::content::parse_frontmatter(markdown);
    let options = Options::default();
    let arena = Arena::new();
    let root_node = parse_document(&arena, body, &options);

    let mut out: Vec<String> = Vec::new();
    for node in root_node.descendants() {
        if let NodeValue::CodeBlock(block) = &node.data().value
            && block.fenced
            && block
                .info
                .split_whitespace()
                .next()
                .is_some_and(|lang| lang.eq_ignore_ascii_case(SYNAPTIC_BLOCK_INFO))
        {
            out.push(block.literal.clone());
        }
    }
    out
}
