use std::path::Path;

pub(super) fn normalize_slashes(raw: &str) -> String {
    raw.replace('\\', "/")
}

pub(crate) fn trim_md_extension(raw: &str) -> String {
    let lower = raw.to_lowercase();
    for ext in [".markdown", ".mdx", ".md"] {
        if lower.ends_with(ext) {
            return raw[..raw.len().saturating_sub(ext.len())].to_string();
        }
    }
    raw.to_string()
}

/// Whether file extension is supported by the vault note parser.
#[must_use]
pub fn is_supported_note(path: &Path) -> bool {
    path.extension()
        .and_then(|v| v.to_str())
        .is_some_and(|ext| matches!(ext.to_lowercase().as_str(), "md" | "markdown" | "mdx"))
}

/// Vault-relative path with `/` separators, extension kept.
pub(crate) fn relative_note_path(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let out = normalize_slashes(&rel.to_string_lossy())
        .trim_matches('/')
        .to_string();
    if out.is_empty() { None } else { Some(out) }
}
