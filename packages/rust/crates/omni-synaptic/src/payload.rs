//! Serializable payload handed to the renderer.

use crate::options::{ChartKind, SynapticRouteOptions};
use crate::pipeline::{KeywordCloudEntry, KeywordMatchStrategy};
use crate::settings::SynapticSettings;
use serde::{Deserialize, Serialize};

/// Keyword entry with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadEntry {
    /// Ranked, scaled keyword.
    #[serde(flatten)]
    pub entry: KeywordCloudEntry,
    /// Text shown for the keyword.
    pub label: String,
}

/// Labels and values for a chart renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDataset {
    /// Chart flavour.
    pub kind: ChartKind,
    /// `#label` per entry, rank order.
    pub labels: Vec<String>,
    /// Score per entry, rank order.
    pub scores: Vec<usize>,
}

/// Everything a renderer needs for one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynapticPayload {
    /// Validated block options.
    pub options: SynapticRouteOptions,
    /// Keyword strategy in settings spelling.
    pub keyword_method: String,
    /// Title of the backlink column.
    pub backlink_label: String,
    /// Entries in rank order.
    pub entries: Vec<PayloadEntry>,
}

/// Display text for a keyword.
///
/// Tags are shown as-is. Note keywords lose the configured prefix or suffix
/// and are reduced to their file name without `.md`.
#[must_use]
pub fn keyword_label(strategy: &KeywordMatchStrategy, display_name: &str) -> String {
    let stripped = match strategy {
        KeywordMatchStrategy::Tags => return display_name.to_string(),
        KeywordMatchStrategy::FileNamePrefix(prefix) => display_name
            .strip_prefix(prefix.as_str())
            .unwrap_or(display_name),
        KeywordMatchStrategy::FileNameSuffix(suffix) => display_name
            .strip_suffix(suffix.as_str())
            .unwrap_or(display_name),
        KeywordMatchStrategy::FileNameRegex(_) => display_name,
    };
    let file_name = stripped.rsplit('/').next().unwrap_or(stripped);
    let label = file_name.strip_suffix(".md").unwrap_or(file_name);
    if label.is_empty() {
        display_name.to_string()
    } else {
        label.to_string()
    }
}

impl SynapticPayload {
    /// Attach labels and titles to computed entries.
    #[must_use]
    pub fn new(
        options: SynapticRouteOptions,
        settings: &SynapticSettings,
        entries: Vec<KeywordCloudEntry>,
    ) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| PayloadEntry {
                label: keyword_label(&settings.keyword_strategy, &entry.display_name),
                entry,
            })
            .collect();
        Self {
            options,
            keyword_method: settings.keyword_strategy.method_name().to_string(),
            backlink_label: settings.backlink_scope.label().to_string(),
            entries,
        }
    }

    /// Chart labels and scores; bar chart unless the block asks otherwise.
    #[must_use]
    pub fn chart_dataset(&self) -> ChartDataset {
        ChartDataset {
            kind: self.options.render.chart_kind().unwrap_or_default(),
            labels: self
                .entries
                .iter()
                .map(|entry| format!("#{}", entry.label))
                .collect(),
            scores: self.entries.iter().map(|entry| entry.entry.score).collect(),
        }
    }
}
