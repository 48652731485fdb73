//! # Render Requests
//!
//! A render request is a JSON document that declares drawing surfaces and the
//! charts to mount on them:
//!
//! ```json
//! {
//!   "surfaces": [{"id": "hours", "path": "hours.png", "width": 800, "height": 400}],
//!   "charts": [
//!     {"kind": "series", "canvas_id": "hours", "data": {"Ann": {"x_values": [], "y_values": []}}},
//!     {"kind": "horizontal_bar", "canvas_id": "zones", "data": {"labels": [], "values": []}}
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::{ChartSettings, DatasetDescription, HorizontalBarData};

pub const DEFAULT_SURFACE_WIDTH: u32 = 800;
pub const DEFAULT_SURFACE_HEIGHT: u32 = 400;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub surfaces: Vec<SurfaceSpec>,
    #[serde(default)]
    pub charts: Vec<ChartRequest>,
}

impl RenderRequest {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl std::str::FromStr for RenderRequest {
    type Err = crate::error::ChartError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSpec {
    pub id: String,
    pub path: PathBuf,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 {
    DEFAULT_SURFACE_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_SURFACE_HEIGHT
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartRequest {
    Series {
        canvas_id: String,
        data: DatasetDescription,
        #[serde(default)]
        settings: ChartSettings,
    },
    HorizontalBar {
        canvas_id: String,
        data: HorizontalBarData,
        #[serde(default)]
        settings: ChartSettings,
    },
}

impl ChartRequest {
    pub fn canvas_id(&self) -> &str {
        match self {
            ChartRequest::Series { canvas_id, .. } | ChartRequest::HorizontalBar { canvas_id, .. } => {
                canvas_id
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChartType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_request() {
        let request: RenderRequest = r#"{
            "surfaces": [
                {"id": "hours", "path": "hours.png"},
                {"id": "zones", "path": "out/zones.svg", "width": 300, "height": 200}
            ],
            "charts": [
                {
                    "kind": "series",
                    "canvas_id": "hours",
                    "data": {"Ann": {"x_values": ["2023-05-01T00:00:00"], "y_values": [1.0]}},
                    "settings": {"chart_type": "bar"}
                },
                {
                    "kind": "horizontal_bar",
                    "canvas_id": "zones",
                    "data": {"labels": ["Z1"], "values": [3.0]}
                }
            ]
        }"#
        .parse()
        .unwrap();

        assert_eq!(request.surfaces[0].width, DEFAULT_SURFACE_WIDTH);
        assert_eq!(request.surfaces[0].height, DEFAULT_SURFACE_HEIGHT);
        assert_eq!(request.surfaces[1].width, 300);
        assert_eq!(request.charts[1].canvas_id(), "zones");

        match &request.charts[0] {
            ChartRequest::Series { data, settings, .. } => {
                assert_eq!(data.len(), 1);
                assert_eq!(settings.chart_type, Some(ChartType::Bar));
            }
            other => panic!("unexpected chart request {:?}", other),
        }
        match &request.charts[1] {
            ChartRequest::HorizontalBar { settings, .. } => {
                assert_eq!(settings, &ChartSettings::default());
            }
            other => panic!("unexpected chart request {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let result: Result<RenderRequest> =
            r#"{"charts": [{"kind": "pie3d", "canvas_id": "x"}]}"#.parse();
        assert!(result.is_err());
    }
}
