// File: crates/trend-core/src/config.rs
// Summary: Chart configuration (dataset location, field conventions, layout, labels, style) loaded from YAML.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::series::DEFAULT_VALUE_MARKER;
use crate::theme::{self, Theme};
use crate::types::Layout;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub x: String,
    pub y: String,
    pub title: String,
    /// Shown instead of the chart when a filter matches nothing.
    pub empty: String,
    /// Shown instead of the chart when the dataset fails to load.
    pub error: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            x: "Year".into(),
            y: "Percentage of population uninsured (%)".into(),
            title: "Percent of population Uninsured from 2009-2020 in VA Counties".into(),
            empty: "No data matches the current filters".into(),
            error: "The dataset could not be loaded".into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Style {
    pub line_width: f32,
    pub marker_radius: f32,
    pub label_font_size: f32,
    pub title_font_size: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self { line_width: 1.2, marker_radius: 3.0, label_font_size: 12.0, title_font_size: 16.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// File path or http(s) URL of the dataset.
    pub dataset: String,
    /// Top-level JSON array holding the records.
    pub records_field: String,
    /// Field carrying the category identity of a record.
    pub category_field: String,
    /// Substring that marks a year-tagged value column.
    pub value_marker: String,
    pub layout: Layout,
    pub labels: Labels,
    /// Theme preset name, see `theme::presets`.
    pub theme: String,
    pub style: Style,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            dataset: "assets/years.json".into(),
            records_field: "Years".into(),
            category_field: "COUNTY".into(),
            value_marker: DEFAULT_VALUE_MARKER.into(),
            layout: Layout::default(),
            labels: Labels::default(),
            theme: "light".into(),
            style: Style::default(),
        }
    }
}

impl ChartConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn theme(&self) -> Theme {
        theme::find(&self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg = ChartConfig::from_yaml_str(
            "dataset: https://example.org/years.json\nlayout:\n  width: 1000\nlabels:\n  title: Custom\n",
        )
        .expect("config");
        assert_eq!(cfg.dataset, "https://example.org/years.json");
        assert_eq!(cfg.layout.width, 1000);
        assert_eq!(cfg.layout.height, 450);
        assert_eq!(cfg.layout.insets.left, 40);
        assert_eq!(cfg.labels.title, "Custom");
        assert_eq!(cfg.labels.x, "Year");
        assert_eq!(cfg.records_field, "Years");
    }

    #[test]
    fn bad_yaml_is_a_config_error() {
        let err = ChartConfig::from_yaml_str("layout: [1, 2").unwrap_err();
        assert!(matches!(err, crate::ChartError::Config(_)));
    }
}
