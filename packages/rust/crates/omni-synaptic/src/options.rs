//! `SynapticRoute` code block options: parsing, validation and serialization.

use crate::error::{SynapticError, SyntaxError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const VALID_KEYS: [&str; 6] = [
    "type",
    "charttype",
    "global",
    "maxitem",
    "maxrandomitem",
    "theme",
];

const DEFAULT_MAX_ITEM: u32 = 30;
const DEFAULT_MAX_RANDOM_ITEM: u32 = 5;

/// Chart flavour used when rendering as a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    /// Bar chart.
    #[default]
    Bar,
    /// Line chart.
    Line,
    /// Pie chart.
    Pie,
    /// Doughnut chart.
    Doughnut,
    /// Polar area chart.
    PolarArea,
}

impl ChartKind {
    /// Every chart kind, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Bar,
        Self::Line,
        Self::Pie,
        Self::Doughnut,
        Self::PolarArea,
    ];

    /// Canonical block spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Pie => "pie",
            Self::Doughnut => "doughnut",
            Self::PolarArea => "polarArea",
        }
    }
}

/// Visualization selected by the `type` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderKind {
    /// Word cloud spans sized by cloud factor.
    #[default]
    WordCloud,
    /// Chart dataset of the given kind.
    Chart(ChartKind),
    /// Ranked table.
    Table,
}

impl RenderKind {
    /// Canonical `type` spelling.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::WordCloud => "wordcloud",
            Self::Chart(_) => "chart",
            Self::Table => "table",
        }
    }

    /// Chart kind when rendering as a chart.
    #[must_use]
    pub const fn chart_kind(self) -> Option<ChartKind> {
        match self {
            Self::Chart(kind) => Some(kind),
            Self::WordCloud | Self::Table => None,
        }
    }
}

/// Visual theme passed through to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Force dark colors.
    Dark,
    /// Force light colors.
    Light,
    /// Follow the host theme.
    #[default]
    Default,
}

impl Theme {
    /// Every theme, in declaration order.
    pub const ALL: [Self; 3] = [Self::Dark, Self::Light, Self::Default];

    /// Canonical block spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Default => "default",
        }
    }
}

/// Validated options of one `SynapticRoute` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynapticRouteOptions {
    /// Visualization kind (carries the chart kind for charts).
    pub render: RenderKind,
    /// Scan the whole vault instead of the focus note's neighborhood.
    pub global: bool,
    /// Maximum displayed items (validated, not applied by the engine).
    pub max_item: u32,
    /// Maximum random extra items (validated, not applied by the engine).
    pub max_random_item: u32,
    /// Visual theme.
    pub theme: Theme,
}

impl Default for SynapticRouteOptions {
    fn default() -> Self {
        Self {
            render: RenderKind::WordCloud,
            global: false,
            max_item: DEFAULT_MAX_ITEM,
            max_random_item: DEFAULT_MAX_RANDOM_ITEM,
            theme: Theme::Default,
        }
    }
}

impl SynapticRouteOptions {
    /// Parse and validate a raw block in one step.
    pub fn parse(source: &str) -> Result<Self, SynapticError> {
        validate_options(&parse_option_block(source))
    }

    /// Serialize back into block syntax accepted by [`SynapticRouteOptions::parse`].
    #[must_use]
    pub fn to_block(&self) -> String {
        let mut lines = vec![format!("type: {}", self.render.type_name())];
        if let Some(kind) = self.render.chart_kind() {
            lines.push(format!("chartType: {}", kind.as_str()));
        }
        lines.push(format!("global: {}", self.global));
        lines.push(format!("maxItem: {}", self.max_item));
        lines.push(format!("maxRandomItem: {}", self.max_random_item));
        lines.push(format!("theme: {}", self.theme.as_str()));
        lines.join("\n")
    }
}

/// Split a block into lower-cased key → raw value pairs.
///
/// Lines are trimmed; a line contributes only when both the first and second
/// `:`-separated segments are non-empty. A repeated key keeps its last value.
#[must_use]
pub fn parse_option_block(source: &str) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for line in source.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let mut parts = line.split(':').map(str::trim);
        let key = parts.next().unwrap_or_default();
        let value = parts.next().unwrap_or_default();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        out.insert(key.to_lowercase(), value.to_string());
    }
    out
}

fn enum_error<T: Copy>(choices: &[T], spell: fn(T) -> &'static str) -> String {
    let listed: Vec<String> = choices.iter().map(|c| format!("'{}'", spell(*c))).collect();
    format!("Must be one of: {}", listed.join(", "))
}

fn match_enum<T: Copy>(choices: &[T], spell: fn(T) -> &'static str, raw: &str) -> Option<T> {
    let normalized = raw.to_lowercase();
    choices
        .iter()
        .copied()
        .find(|choice| spell(*choice).to_lowercase() == normalized)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeName {
    WordCloud,
    Chart,
    Table,
}

const TYPE_NAMES: [TypeName; 3] = [TypeName::WordCloud, TypeName::Chart, TypeName::Table];

const fn type_spelling(name: TypeName) -> &'static str {
    match name {
        TypeName::WordCloud => "wordcloud",
        TypeName::Chart => "chart",
        TypeName::Table => "table",
    }
}

fn validate_type(value: &str) -> Result<TypeName, String> {
    match_enum(&TYPE_NAMES, type_spelling, value)
        .ok_or_else(|| enum_error(&TYPE_NAMES, type_spelling))
}

fn validate_chart_kind(value: &str) -> Result<ChartKind, String> {
    match_enum(&ChartKind::ALL, ChartKind::as_str, value)
        .ok_or_else(|| enum_error(&ChartKind::ALL, ChartKind::as_str))
}

fn validate_theme(value: &str) -> Result<Theme, String> {
    match_enum(&Theme::ALL, Theme::as_str, value)
        .ok_or_else(|| enum_error(&Theme::ALL, Theme::as_str))
}

fn validate_global(value: &str) -> Result<bool, String> {
    match value.to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err("Must be 'true' or 'false'".to_string()),
    }
}

fn validate_positive(value: &str) -> Result<u32, String> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|number| *number >= 1)
        .ok_or_else(|| "Must be a positive integer".to_string())
}

/// Validate raw key/value pairs into options.
///
/// Every offending key is reported; options are returned only when none failed.
/// `charttype` is consulted only when `type` resolves to `chart`.
pub fn validate_options(
    raw: &HashMap<String, String>,
) -> Result<SynapticRouteOptions, SynapticError> {
    let mut options = SynapticRouteOptions::default();
    let mut errors: Vec<SyntaxError> = Vec::new();

    let mut keys: Vec<&String> = raw.keys().collect();
    keys.sort();

    for key in &keys {
        if !VALID_KEYS.contains(&key.as_str()) {
            let valid: Vec<String> = VALID_KEYS.iter().map(|k| format!("'{k}'")).collect();
            errors.push(SyntaxError::new(
                key,
                &raw[*key],
                format!("Invalid key. Valid keys are: {}", valid.join(", ")),
            ));
        }
    }

    let mut type_name = TypeName::WordCloud;
    if let Some(value) = raw.get("type") {
        match validate_type(value) {
            Ok(parsed) => type_name = parsed,
            Err(message) => errors.push(SyntaxError::new("type", value, message)),
        }
    }

    options.render = match type_name {
        TypeName::WordCloud => RenderKind::WordCloud,
        TypeName::Table => RenderKind::Table,
        TypeName::Chart => {
            let mut kind = ChartKind::default();
            if let Some(value) = raw.get("charttype") {
                match validate_chart_kind(value) {
                    Ok(parsed) => kind = parsed,
                    Err(message) => errors.push(SyntaxError::new("charttype", value, message)),
                }
            }
            RenderKind::Chart(kind)
        }
    };

    if let Some(value) = raw.get("global") {
        match validate_global(value) {
            Ok(flag) => options.global = flag,
            Err(message) => errors.push(SyntaxError::new("global", value, message)),
        }
    }
    if let Some(value) = raw.get("maxitem") {
        match validate_positive(value) {
            Ok(number) => options.max_item = number,
            Err(message) => errors.push(SyntaxError::new("maxitem", value, message)),
        }
    }
    if let Some(value) = raw.get("maxrandomitem") {
        match validate_positive(value) {
            Ok(number) => options.max_random_item = number,
            Err(message) => errors.push(SyntaxError::new("maxrandomitem", value, message)),
        }
    }
    if let Some(value) = raw.get("theme") {
        match validate_theme(value) {
            Ok(theme) => options.theme = theme,
            Err(message) => errors.push(SyntaxError::new("theme", value, message)),
        }
    }

    if errors.is_empty() {
        Ok(options)
    } else {
        Err(SynapticError::Syntax(errors))
    }
}
