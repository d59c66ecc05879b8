use regex::Regex;
use serde_yaml::Value;
use std::sync::LazyLock;

use super::links::normalize_wikilink_target;

fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(_compile_err) => match Regex::new(r"$^") {
            Ok(fallback) => fallback,
            Err(fallback_err) => panic!("hardcoded fallback regex must compile: {fallback_err}"),
        },
    }
}

static FRONTMATTER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"(?s)\A---\s*\n(.*?)\n(?:---|\.\.\.)\s*\n?"));
static BODY_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"(?:^|\s)#([\p{L}\p{N}_/\-]+)"));
static INLINE_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"`[^`]*`"));
static WIKILINK_REGEX: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"\[\[([^\[\]]+)\]\]"));

/// Frontmatter state of one note.
#[derive(Debug, Clone)]
pub(super) enum Frontmatter {
    Absent,
    Parsed(Value),
    Malformed(String),
}

pub(super) fn parse_frontmatter(content: &str) -> (Frontmatter, &str) {
    let Some(caps) = FRONTMATTER_REGEX.captures(content) else {
        return (Frontmatter::Absent, content);
    };
    let body = caps.get(0).map_or(content, |m| &content[m.end()..]);
    let raw = caps.get(1).map_or("", |m| m.as_str());
    let frontmatter = match serde_yaml::from_str::<Value>(raw) {
        Ok(value) => Frontmatter::Parsed(value),
        Err(err) => Frontmatter::Malformed(err.to_string()),
    };
    (frontmatter, body)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn first_comma_segment(raw: &str) -> String {
    raw.split(',').next().unwrap_or_default().trim().to_string()
}

/// Frontmatter tags from `tag:` then `tags:`.
///
/// Comma handling is asymmetric: list items containing a comma
/// keep only their first segment, and a `tags:` list whose first item holds a
/// comma collapses to that single segment.
pub(super) fn extract_frontmatter_tags(frontmatter: &Value) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    match frontmatter.get("tag") {
        Some(Value::Sequence(items)) => {
            for item in items {
                match item {
                    Value::String(text) if text.contains(',') => {
                        out.push(first_comma_segment(text));
                    }
                    other => out.extend(scalar_to_string(other)),
                }
            }
        }
        Some(Value::String(text)) => {
            if text.contains(',') {
                out.push(first_comma_segment(text));
            } else {
                out.push(text.clone());
            }
        }
        _ => {}
    }

    match frontmatter.get("tags") {
        Some(Value::Sequence(items)) => match items.first() {
            Some(Value::String(first)) if first.contains(',') => {
                out.push(first_comma_segment(first));
            }
            _ => out.extend(items.iter().filter_map(scalar_to_string)),
        },
        Some(Value::String(text)) => {
            if text.contains(',') {
                out.extend(text.split(',').map(|tag| tag.trim().to_string()));
            } else {
                out.push(text.trim().to_string());
            }
        }
        _ => {}
    }

    out
}

/// Inline `#tags` outside fenced and inline code; numeric-only tags rejected.
pub(super) fn extract_body_tags(body: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut fence: Option<&str> = None;
    for line in body.lines() {
        let trimmed = line.trim_start();
        if let Some(marker) = fence {
            if trimmed.starts_with(marker) {
                fence = None;
            }
            continue;
        }
        if trimmed.starts_with("```") {
            fence = Some("```");
            continue;
        }
        if trimmed.starts_with("~~~") {
            fence = Some("~~~");
            continue;
        }
        let without_code = INLINE_CODE_REGEX.replace_all(line, " ");
        for caps in BODY_TAG_REGEX.captures_iter(&without_code) {
            let Some(tag) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            if tag.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            out.push(tag.to_string());
        }
    }
    out
}

fn collect_wikilinks(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(text) => {
            for caps in WIKILINK_REGEX.captures_iter(text) {
                if let Some(target) = caps.get(1).and_then(|m| normalize_wikilink_target(m.as_str()))
                {
                    out.push(target);
                }
            }
        }
        Value::Sequence(items) => {
            for item in items {
                collect_wikilinks(item, out);
            }
        }
        Value::Mapping(map) => {
            for item in map.values() {
                collect_wikilinks(item, out);
            }
        }
        Value::Tagged(tagged) => collect_wikilinks(&tagged.value, out),
        _ => {}
    }
}

/// `[[wikilinks]]` written inside frontmatter values (e.g. `up: "[[MOC]]"`).
pub(super) fn extract_frontmatter_links(frontmatter: &Value) -> Vec<String> {
    let mut out = Vec::new();
    collect_wikilinks(frontmatter, &mut out);
    out
}
