use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Named configuration sections that merge key-by-key against a base theme.
///
/// Every other top-level key is a passthrough key and replaces wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionKind {
    Chart,
    Grid,
    XAxis,
    YAxis,
    Tooltip,
    Legend,
    DataLabels,
}

impl SectionKind {
    pub const ALL: [Self; 7] = [
        Self::Chart,
        Self::Grid,
        Self::XAxis,
        Self::YAxis,
        Self::Tooltip,
        Self::Legend,
        Self::DataLabels,
    ];

    /// Key used by the rendering library for this section.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Chart => "chart",
            Self::Grid => "grid",
            Self::XAxis => "xaxis",
            Self::YAxis => "yaxis",
            Self::Tooltip => "tooltip",
            Self::Legend => "legend",
            Self::DataLabels => "dataLabels",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

/// Typed chart configuration: the recognized sections plus an ordered
/// extension map for passthrough keys (`series`, `colors`, `fill`, ...).
///
/// Deserialization is permissive: `null` sections count as absent and a
/// non-object document yields an empty config.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct ChartConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    chart: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    grid: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    xaxis: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    yaxis: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tooltip: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legend: Option<Value>,
    #[serde(rename = "dataLabels", skip_serializing_if = "Option::is_none")]
    data_labels: Option<Value>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

impl ChartConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a config from a JSON document, routing each top-level key to
    /// its section or to the passthrough map.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let mut config = Self::default();
        match value {
            Value::Object(entries) => {
                for (key, entry) in entries {
                    config.set(key, entry);
                }
            }
            Value::Null => {}
            other => {
                debug!(kind = value_kind(&other), "ignoring non-object chart config document");
            }
        }
        config
    }

    /// Sets a top-level key. Section keys land in their section slot, where
    /// `null` clears the section; passthrough keys keep `null` as a value.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match SectionKind::from_key(&key) {
            Some(kind) => *self.slot_mut(kind) = non_null(value),
            None => {
                self.extra.insert(key, value);
            }
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.set(key, value);
        self
    }

    #[must_use]
    pub fn with_section(mut self, kind: SectionKind, value: Value) -> Self {
        *self.slot_mut(kind) = non_null(value);
        self
    }

    #[must_use]
    pub fn section(&self, kind: SectionKind) -> Option<&Value> {
        match kind {
            SectionKind::Chart => self.chart.as_ref(),
            SectionKind::Grid => self.grid.as_ref(),
            SectionKind::XAxis => self.xaxis.as_ref(),
            SectionKind::YAxis => self.yaxis.as_ref(),
            SectionKind::Tooltip => self.tooltip.as_ref(),
            SectionKind::Legend => self.legend.as_ref(),
            SectionKind::DataLabels => self.data_labels.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: SectionKind) -> &mut Option<Value> {
        match kind {
            SectionKind::Chart => &mut self.chart,
            SectionKind::Grid => &mut self.grid,
            SectionKind::XAxis => &mut self.xaxis,
            SectionKind::YAxis => &mut self.yaxis,
            SectionKind::Tooltip => &mut self.tooltip,
            SectionKind::Legend => &mut self.legend,
            SectionKind::DataLabels => &mut self.data_labels,
        }
    }

    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn extra_keys(&self) -> impl Iterator<Item = &str> {
        self.extra.keys().map(String::as_str)
    }

    /// Resolves a dotted path such as `xaxis.labels.style.colors`.
    ///
    /// The first segment names a section or passthrough key; the rest walk
    /// nested objects (numeric segments index arrays).
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let head = segments.next()?;
        let mut current = match SectionKind::from_key(head) {
            Some(kind) => self.section(kind)?,
            None => self.extra.get(head)?,
        };
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        SectionKind::ALL
            .iter()
            .all(|kind| self.section(*kind).is_none())
            && self.extra.is_empty()
    }

    /// Layers `overrides` on top of `self`. See [`merge`].
    #[must_use]
    pub fn merged_with(&self, overrides: &ChartConfig) -> ChartConfig {
        merge(self, overrides)
    }

    /// Flattens the config into the JSON document handed to the rendering library.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut document = Map::new();
        for kind in SectionKind::ALL {
            if let Some(section) = self.section(kind) {
                document.insert(kind.key().to_owned(), section.clone());
            }
        }
        for (key, value) in &self.extra {
            document.insert(key.clone(), value.clone());
        }
        Value::Object(document)
    }
}

impl From<Value> for ChartConfig {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

/// Builds a full configuration by layering `overrides` over `base`.
///
/// Recognized sections merge one level deep: override keys win, base keys
/// the override does not mention survive. Nested objects inside a section
/// are replaced wholesale. When either side of a section is not an object,
/// the override value (if any) replaces the section outright. Passthrough
/// keys from `overrides` replace same-named base keys.
///
/// Neither input is modified.
#[must_use]
pub fn merge(base: &ChartConfig, overrides: &ChartConfig) -> ChartConfig {
    let mut merged = ChartConfig::default();
    for kind in SectionKind::ALL {
        *merged.slot_mut(kind) = merge_section(kind, base.section(kind), overrides.section(kind));
    }

    merged.extra = base.extra.clone();
    for (key, value) in &overrides.extra {
        merged.extra.insert(key.clone(), value.clone());
    }
    merged
}

fn merge_section(
    kind: SectionKind,
    base: Option<&Value>,
    overrides: Option<&Value>,
) -> Option<Value> {
    match (base, overrides) {
        (Some(Value::Object(base)), Some(Value::Object(overrides))) => {
            let mut section = base.clone();
            for (key, value) in overrides {
                section.insert(key.clone(), value.clone());
            }
            Some(Value::Object(section))
        }
        (Some(base), Some(overrides)) => {
            debug!(
                section = kind.key(),
                base_kind = value_kind(base),
                override_kind = value_kind(overrides),
                "override replaces section without merging"
            );
            Some(overrides.clone())
        }
        (None, Some(overrides)) => Some(overrides.clone()),
        (Some(base), None) => Some(base.clone()),
        (None, None) => None,
    }
}

fn non_null(value: Value) -> Option<Value> {
    if value.is_null() { None } else { Some(value) }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
