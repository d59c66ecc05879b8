//! Markdown note parsing for the vault snapshot.

mod content;
mod links;
mod paths;

use std::path::Path;

use self::content::{
    Frontmatter, extract_body_tags, extract_frontmatter_links, extract_frontmatter_tags,
    parse_frontmatter,
};
use self::links::extract_links;

pub(crate) use self::links::LinkTarget;

pub(crate) use self::paths::{relative_note_path, trim_md_extension};
pub use self::links::find_synaptic_blocks;
pub use self::paths::is_supported_note;

/// Parsed note payload + unresolved outgoing link targets.
#[derive(Debug, Clone)]
pub(crate) struct ParsedNote {
    /// Vault-relative path with extension.
    pub path: String,
    /// Body tags then frontmatter tags, or the frontmatter diagnostic.
    pub tags: Result<Vec<String>, String>,
    /// Raw link targets: frontmatter wikilinks, then body links.
    pub link_targets: Vec<LinkTarget>,
}

/// Parse one note into tags and outgoing link targets.
#[must_use]
pub(crate) fn parse_note(rel_path: &str, content: &str) -> ParsedNote {
    let (frontmatter, body) = parse_frontmatter(content);
    let body_tags = extract_body_tags(body);
    let body_links = extract_links(body, Path::new(rel_path));

    let (tags, mut link_targets) = match frontmatter {
        Frontmatter::Absent => (Ok(body_tags), Vec::new()),
        Frontmatter::Parsed(value) => {
            let mut tags = body_tags;
            tags.extend(extract_frontmatter_tags(&value));
            let links = extract_frontmatter_links(&value)
                .into_iter()
                .map(LinkTarget::named)
                .collect();
            (Ok(tags), links)
        }
        Frontmatter::Malformed(message) => (Err(message), Vec::new()),
    };
    link_targets.extend(body_links);

    ParsedNote {
        path: rel_path.to_string(),
        tags,
        link_targets,
    }
}
