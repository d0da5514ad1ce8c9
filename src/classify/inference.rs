use serde::{Deserialize, Serialize};
use std::fmt;

/// Measurement classification assigned to a file (e.g. "functional", "anatomy_t1w")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementLabel(String);

impl MeasurementLabel {
    /// Wrap a label
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MeasurementLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MeasurementLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for MeasurementLabel {
    fn from(label: String) -> Self {
        Self(label)
    }
}

/// Infers a measurement label from a series description.
///
/// Any `Fn(&str) -> MeasurementLabel` closure implements this trait.
pub trait MeasurementInference {
    /// Label for the given series description
    fn infer_measurement(&self, series_description: &str) -> MeasurementLabel;
}

impl<F> MeasurementInference for F
where
    F: Fn(&str) -> MeasurementLabel,
{
    fn infer_measurement(&self, series_description: &str) -> MeasurementLabel {
        self(series_description)
    }
}

/// One substring rule of a [`LabelTable`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRule {
    /// Case-insensitive substring of the series description
    pub pattern: String,

    /// Label assigned when the pattern matches
    pub label: MeasurementLabel,
}

impl LabelRule {
    /// Create a rule
    pub fn new(pattern: impl Into<String>, label: impl Into<MeasurementLabel>) -> Self {
        Self {
            pattern: pattern.into(),
            label: label.into(),
        }
    }
}

/// Configurable inference: first matching rule wins, else the default label.
///
/// ```toml
/// [measurement]
/// default = "unknown"
///
/// [[measurement.rules]]
/// pattern = "fmri"
/// label = "functional"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelTable {
    /// Rules in priority order
    pub rules: Vec<LabelRule>,

    /// Label used when no rule matches
    pub default: MeasurementLabel,
}

impl Default for LabelTable {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            default: MeasurementLabel::new("unknown"),
        }
    }
}

impl LabelTable {
    /// Append a rule with the lowest priority so far
    pub fn with_rule(mut self, pattern: impl Into<String>, label: impl Into<MeasurementLabel>) -> Self {
        self.rules.push(LabelRule::new(pattern, label));
        self
    }
}

impl MeasurementInference for LabelTable {
    fn infer_measurement(&self, series_description: &str) -> MeasurementLabel {
        let description = series_description.to_lowercase();
        self.rules
            .iter()
            .find(|rule| description.contains(&rule.pattern.to_lowercase()))
            .map(|rule| rule.label.clone())
            .unwrap_or_else(|| self.default.clone())
    }
}
