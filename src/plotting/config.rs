//! Chart configuration in the shape the rendering library consumes.
//!
//! The structs serialize to the library's JSON schema: camelCase keys, unset
//! optional fields omitted, and an undisplayed title written as `{}`.

use serde::{Deserialize, Serialize};

use crate::types::{AxisType, ChartType};

/// Time label parser pattern (date-fns tokens).
pub const TIME_PARSER: &str = "yyyy-MM-dd'T'HH:mm:ss";

/// Tick format used when the time axis shows whole days.
pub const DAY_DISPLAY_FORMAT: &str = "dd-MM-yyyy";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Whether bars run along the x axis.
    pub fn is_horizontal(&self) -> bool {
        self.options.index_axis == Some(IndexAxis::Y)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_axis: Option<IndexAxis>,
    pub scales: Scales,
    #[serde(default)]
    pub plugins: Plugins,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintain_aspect_ratio: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Elements>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexAxis {
    X,
    Y,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scales {
    pub x: Scale,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Scale>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<AxisType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeOptions>,
    #[serde(default)]
    pub title: TitleBlock,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOptions {
    pub parser: String,
    pub display_formats: DisplayFormats,
}

impl Default for TimeOptions {
    fn default() -> Self {
        Self {
            parser: TIME_PARSER.to_string(),
            display_formats: DisplayFormats {
                day: DAY_DISPLAY_FORMAT.to_string(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayFormats {
    pub day: String,
}

/// Title of the chart or of an axis. The default block is empty and is not
/// displayed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl TitleBlock {
    pub fn shown(text: impl Into<String>) -> Self {
        Self {
            display: Some(true),
            text: Some(text.into()),
        }
    }

    /// Text to draw, if the block is displayed.
    pub fn visible_text(&self) -> Option<&str> {
        match self.display {
            Some(true) => self.text.as_deref(),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Plugins {
    #[serde(default)]
    pub legend: Legend,
    #[serde(default)]
    pub title: TitleBlock,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<LegendPosition>,
}

impl Legend {
    /// The library shows the legend unless told otherwise.
    pub fn is_displayed(&self) -> bool {
        self.display.unwrap_or(true)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Elements {
    pub point: PointElement,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointElement {
    pub radius: f64,
}
