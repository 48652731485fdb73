//! # Common Types
//!
//! This module contains the input types used throughout the crate for
//! describing the data to chart and the options that shape the chart.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The values of a single series.
///
/// `x_values` holds timestamps or category names and is used as the shared
/// label axis; `y_values` holds the plotted numbers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesValues {
    pub x_values: Vec<String>,
    pub y_values: Vec<f64>,
}

impl SeriesValues {
    pub fn new<S: Into<String>>(x_values: impl IntoIterator<Item = S>, y_values: Vec<f64>) -> Self {
        Self {
            x_values: x_values.into_iter().map(Into::into).collect(),
            y_values,
        }
    }
}

/// An ordered mapping from series key to its values.
///
/// Iteration follows insertion order. Inserting a key that is already present
/// replaces its values without moving it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatasetDescription {
    series: Vec<(String, SeriesValues)>,
}

impl DatasetDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, values: SeriesValues) {
        let key = key.into();
        match self.series.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = values,
            None => self.series.push((key, values)),
        }
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_series(mut self, key: impl Into<String>, values: SeriesValues) -> Self {
        self.insert(key, values);
        self
    }

    pub fn get(&self, key: &str) -> Option<&SeriesValues> {
        self.series
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, values)| values)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SeriesValues)> {
        self.series.iter().map(|(key, values)| (key.as_str(), values))
    }

    pub fn first(&self) -> Option<(&str, &SeriesValues)> {
        self.series.first().map(|(key, values)| (key.as_str(), values))
    }

    pub fn last(&self) -> Option<(&str, &SeriesValues)> {
        self.series.last().map(|(key, values)| (key.as_str(), values))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, SeriesValues)> for DatasetDescription {
    fn from_iter<I: IntoIterator<Item = (K, SeriesValues)>>(iter: I) -> Self {
        let mut description = Self::new();
        for (key, values) in iter {
            description.insert(key, values);
        }
        description
    }
}

impl Serialize for DatasetDescription {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.series.len()))?;
        for (key, values) in &self.series {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

// JSON objects are read entry by entry so document order becomes series order.
impl<'de> Deserialize<'de> for DatasetDescription {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DescriptionVisitor;

        impl<'de> Visitor<'de> for DescriptionVisitor {
            type Value = DatasetDescription;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of series keys to {x_values, y_values}")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut description = DatasetDescription::new();
                while let Some((key, values)) = access.next_entry::<String, SeriesValues>()? {
                    description.insert(key, values);
                }
                Ok(description)
            }
        }

        deserializer.deserialize_map(DescriptionVisitor)
    }
}

/// Data for a horizontal bar chart: one bar per label.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HorizontalBarData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Chart kind as understood by the rendering library.
///
/// Names that are not known here are kept verbatim and passed through.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChartType {
    #[default]
    Line,
    Bar,
    Scatter,
    Pie,
    Doughnut,
    Radar,
    PolarArea,
    Bubble,
    Other(String),
}

impl ChartType {
    pub fn as_str(&self) -> &str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Scatter => "scatter",
            ChartType::Pie => "pie",
            ChartType::Doughnut => "doughnut",
            ChartType::Radar => "radar",
            ChartType::PolarArea => "polarArea",
            ChartType::Bubble => "bubble",
            ChartType::Other(name) => name,
        }
    }
}

impl From<String> for ChartType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "line" => ChartType::Line,
            "bar" => ChartType::Bar,
            "scatter" => ChartType::Scatter,
            "pie" => ChartType::Pie,
            "doughnut" => ChartType::Doughnut,
            "radar" => ChartType::Radar,
            "polarArea" => ChartType::PolarArea,
            "bubble" => ChartType::Bubble,
            _ => ChartType::Other(name),
        }
    }
}

impl From<&str> for ChartType {
    fn from(name: &str) -> Self {
        ChartType::from(name.to_string())
    }
}

impl From<ChartType> for String {
    fn from(chart_type: ChartType) -> Self {
        chart_type.as_str().to_string()
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scale type of an axis.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AxisType {
    #[default]
    Time,
    TimeSeries,
    Category,
    Linear,
    Logarithmic,
    Other(String),
}

impl AxisType {
    pub fn as_str(&self) -> &str {
        match self {
            AxisType::Time => "time",
            AxisType::TimeSeries => "timeseries",
            AxisType::Category => "category",
            AxisType::Linear => "linear",
            AxisType::Logarithmic => "logarithmic",
            AxisType::Other(name) => name,
        }
    }
}

impl From<String> for AxisType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "time" => AxisType::Time,
            "timeseries" => AxisType::TimeSeries,
            "category" => AxisType::Category,
            "linear" => AxisType::Linear,
            "logarithmic" => AxisType::Logarithmic,
            _ => AxisType::Other(name),
        }
    }
}

impl From<&str> for AxisType {
    fn from(name: &str) -> Self {
        AxisType::from(name.to_string())
    }
}

impl From<AxisType> for String {
    fn from(axis_type: AxisType) -> Self {
        axis_type.as_str().to_string()
    }
}

impl fmt::Display for AxisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional chart settings. Every omitted field falls back to a default when
/// the configuration is built.
///
/// | option       | default              |
/// |--------------|----------------------|
/// | `title`      | no title block       |
/// | `y_label`    | no y axis title      |
/// | `chart_type` | [`ChartType::Line`]  |
/// | `x_type`     | [`AxisType::Time`]   |
/// | `x_label`    | `"Date"`             |
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_type: Option<AxisType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
}

impl ChartSettings {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_y_label(mut self, y_label: impl Into<String>) -> Self {
        self.y_label = Some(y_label.into());
        self
    }

    pub fn with_chart_type(mut self, chart_type: impl Into<ChartType>) -> Self {
        self.chart_type = Some(chart_type.into());
        self
    }

    pub fn with_x_type(mut self, x_type: impl Into<AxisType>) -> Self {
        self.x_type = Some(x_type.into());
        self
    }

    pub fn with_x_label(mut self, x_label: impl Into<String>) -> Self {
        self.x_label = Some(x_label.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_description_keeps_document_order() {
        let json = r#"{
            "Zed": {"x_values": ["a"], "y_values": [1.0]},
            "Amy": {"x_values": ["b"], "y_values": [2.0]},
            "Max": {"x_values": ["c"], "y_values": [3.0]}
        }"#;
        let description: DatasetDescription = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = description.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["Zed", "Amy", "Max"]);
        assert_eq!(description.last().unwrap().1.x_values, vec!["c".to_string()]);
    }

    #[test]
    fn test_reinsert_replaces_in_place() {
        let mut description = DatasetDescription::new()
            .with_series("A", SeriesValues::new(["1"], vec![1.0]))
            .with_series("B", SeriesValues::new(["2"], vec![2.0]));
        description.insert("A", SeriesValues::new(["3"], vec![3.0]));

        assert_eq!(description.len(), 2);
        assert_eq!(description.first().unwrap().0, "A");
        assert_eq!(description.get("A").unwrap().y_values, vec![3.0]);
    }

    #[test]
    fn test_settings_from_json() {
        let settings: ChartSettings = serde_json::from_str(
            r#"{"title": "Total", "chart_type": "bar", "x_type": "wobbly", "unused": 1}"#,
        )
        .unwrap();

        assert_eq!(settings.title.as_deref(), Some("Total"));
        assert_eq!(settings.chart_type, Some(ChartType::Bar));
        assert_eq!(settings.x_type, Some(AxisType::Other("wobbly".to_string())));
        assert_eq!(settings.y_label, None);
    }

    #[test]
    fn test_unknown_names_pass_through() {
        let chart_type = ChartType::from("sparkline");
        assert_eq!(chart_type.as_str(), "sparkline");
        assert_eq!(serde_json::to_string(&chart_type).unwrap(), r#""sparkline""#);
        assert_eq!(serde_json::to_string(&ChartType::PolarArea).unwrap(), r#""polarArea""#);
    }
}
