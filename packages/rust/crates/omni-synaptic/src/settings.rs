//! Plugin-level settings: keyword strategy, classification, exclusions.
//!
//! Settings come from the vault's plugin `data.json`, optionally overlaid by a
//! YAML file, deep-merged and then validated into [`SynapticSettings`].

use crate::error::SynapticError;
use crate::pipeline::{
    BacklinkScope, ExclusionRules, KeywordMatchStrategy, NoteClassPredicate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// Plugin settings file, relative to the vault root.
pub const PLUGIN_SETTINGS_RELATIVE_PATH: &str = ".obsidian/plugins/synaptic-route/data.json";

/// Keyword selection method as written in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeywordSelectionMethod {
    /// Note tags.
    #[default]
    Tags,
    /// Linked note path prefix.
    FileNamePrefix,
    /// Linked note path suffix.
    FileNameSuffix,
    /// Linked note path regex.
    FileNameRegex,
}

/// Note classification method as written in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoteSelectionMethod {
    /// Tag membership.
    Tags,
    /// File name prefix.
    FileNamePrefix,
    /// File name suffix.
    FileNameSuffix,
    /// File name regex (`regex` is accepted as an alias).
    #[serde(alias = "regex")]
    FileNameRegex,
    /// Path fragment.
    #[default]
    FolderPath,
}

/// Settings document as stored by the plugin (camelCase keys).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RawSynapticSettings {
    /// Keyword strategy.
    pub keyword_selection_method: KeywordSelectionMethod,
    /// Prefix, suffix or pattern for the keyword strategy.
    pub keyword_selection_input: String,
    /// Backlink counting scope.
    pub keyword_backlink_type: BacklinkScope,
    /// Permanent note classifier.
    pub permanent_note_selection_method: NoteSelectionMethod,
    /// Input of the permanent note classifier.
    pub permanent_note_selection_input: String,
    /// Enable the literature → permanent neighborhood expansion.
    pub lucy_zettelkasten_enabled: bool,
    /// Literature note classifier.
    pub literature_note_selection_method: NoteSelectionMethod,
    /// Input of the literature note classifier.
    pub literature_note_selection_input: String,
    /// Excluded folder patterns.
    pub exclude_folders: Vec<String>,
    /// Excluded tags.
    pub exclude_tags: Vec<String>,
    /// Excluded file name patterns.
    pub exclude_file_name_patterns: Vec<String>,
}

/// Validated settings with compiled patterns.
#[derive(Debug, Clone)]
pub struct SynapticSettings {
    /// How keywords are recognised.
    pub keyword_strategy: KeywordMatchStrategy,
    /// Which notes feed backlink counts.
    pub backlink_scope: BacklinkScope,
    /// Permanent (main) note classifier.
    pub permanent_notes: NoteClassPredicate,
    /// Literature → permanent expansion toggle.
    pub lucy_zettelkasten: bool,
    /// Literature note classifier.
    pub literature_notes: NoteClassPredicate,
    /// Exclusion rules.
    pub exclusions: ExclusionRules,
}

impl Default for SynapticSettings {
    fn default() -> Self {
        Self {
            keyword_strategy: KeywordMatchStrategy::Tags,
            backlink_scope: BacklinkScope::PermanentNotesOnly,
            permanent_notes: NoteClassPredicate::FolderPath(String::new()),
            lucy_zettelkasten: false,
            literature_notes: NoteClassPredicate::FolderPath(String::new()),
            exclusions: ExclusionRules::default(),
        }
    }
}

fn compile_setting_regex(pattern: &str) -> Result<Regex, SynapticError> {
    Regex::new(pattern).map_err(|source| SynapticError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn note_predicate(
    method: NoteSelectionMethod,
    input: &str,
) -> Result<NoteClassPredicate, SynapticError> {
    let input = input.to_string();
    Ok(match method {
        NoteSelectionMethod::Tags => NoteClassPredicate::Tags(input),
        NoteSelectionMethod::FileNamePrefix => NoteClassPredicate::FileNamePrefix(input),
        NoteSelectionMethod::FileNameSuffix => NoteClassPredicate::FileNameSuffix(input),
        NoteSelectionMethod::FileNameRegex => {
            NoteClassPredicate::FileNameRegex(compile_setting_regex(&input)?)
        }
        NoteSelectionMethod::FolderPath => NoteClassPredicate::FolderPath(input),
    })
}

impl TryFrom<RawSynapticSettings> for SynapticSettings {
    type Error = SynapticError;

    fn try_from(raw: RawSynapticSettings) -> Result<Self, Self::Error> {
        let keyword_strategy = match raw.keyword_selection_method {
            KeywordSelectionMethod::Tags => KeywordMatchStrategy::Tags,
            KeywordSelectionMethod::FileNamePrefix => {
                KeywordMatchStrategy::FileNamePrefix(raw.keyword_selection_input)
            }
            KeywordSelectionMethod::FileNameSuffix => {
                KeywordMatchStrategy::FileNameSuffix(raw.keyword_selection_input)
            }
            KeywordSelectionMethod::FileNameRegex => KeywordMatchStrategy::FileNameRegex(
                compile_setting_regex(&raw.keyword_selection_input)?,
            ),
        };
        Ok(Self {
            keyword_strategy,
            backlink_scope: raw.keyword_backlink_type,
            permanent_notes: note_predicate(
                raw.permanent_note_selection_method,
                &raw.permanent_note_selection_input,
            )?,
            lucy_zettelkasten: raw.lucy_zettelkasten_enabled,
            literature_notes: note_predicate(
                raw.literature_note_selection_method,
                &raw.literature_note_selection_input,
            )?,
            exclusions: ExclusionRules::new(
                &raw.exclude_folders,
                &raw.exclude_tags,
                &raw.exclude_file_name_patterns,
            )?,
        })
    }
}

impl RawSynapticSettings {
    /// Decode a merged settings value.
    pub fn from_value(value: Value) -> Result<Self, SynapticError> {
        serde_yaml::from_value(value).map_err(|err| SynapticError::InvalidSettings(err.to_string()))
    }
}

fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                if let Some(existing) = base_map.get_mut(&key) {
                    deep_merge(existing, value);
                } else {
                    base_map.insert(key, value);
                }
            }
        }
        (base_value, overlay_value) => {
            *base_value = overlay_value;
        }
    }
}

fn load_plugin_json(path: &Path) -> Result<Option<Value>, SynapticError> {
    if !path.is_file() {
        log::debug!("No plugin settings at {}; using defaults", path.display());
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let json: serde_json::Value = serde_json::from_str(&content).map_err(|err| {
        SynapticError::InvalidSettings(format!("{}: {err}", path.display()))
    })?;
    serde_yaml::to_value(json)
        .map(Some)
        .map_err(|err| SynapticError::InvalidSettings(format!("{}: {err}", path.display())))
}

fn load_override_yaml(path: &Path) -> Result<Option<Value>, SynapticError> {
    if !path.is_file() {
        log::warn!("Settings override {} not found; ignoring", path.display());
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    serde_yaml::from_str::<Value>(&content)
        .map(|value| match value {
            Value::Null => None,
            other => Some(other),
        })
        .map_err(|err| SynapticError::InvalidSettings(format!("{}: {err}", path.display())))
}

/// Path of the plugin settings file inside `vault_root`.
#[must_use]
pub fn plugin_settings_path(vault_root: &Path) -> PathBuf {
    vault_root.join(PLUGIN_SETTINGS_RELATIVE_PATH)
}

/// Merge plugin `data.json` and an optional YAML override, then validate.
///
/// Missing files fall back to defaults; undecodable files and invalid
/// patterns are errors.
pub fn resolve_synaptic_settings(
    vault_root: &Path,
    override_path: Option<&Path>,
) -> Result<SynapticSettings, SynapticError> {
    let mut merged = Value::Mapping(Mapping::new());
    if let Some(plugin) = load_plugin_json(&plugin_settings_path(vault_root))? {
        deep_merge(&mut merged, plugin);
    }
    if let Some(path) = override_path
        && let Some(overlay) = load_override_yaml(path)?
    {
        deep_merge(&mut merged, overlay);
    }
    SynapticSettings::try_from(RawSynapticSettings::from_value(merged)?)
}
