use log::{debug, warn};

use super::colors::ColorRamp;
use super::config::{
    ChartConfig, ChartData, ChartOptions, Dataset, Elements, IndexAxis, Legend, LegendPosition,
    Plugins, PointElement, Scale, Scales, TimeOptions, TitleBlock,
};
use crate::types::{ChartSettings, ChartType, DatasetDescription, HorizontalBarData};

pub const DEFAULT_X_LABEL: &str = "Date";
pub const HORIZONTAL_BAR_X_LABEL: &str = "Minutes";
pub const HORIZONTAL_BAR_DATASET_LABEL: &str = "Minutes in zone";
pub const HORIZONTAL_BAR_TITLE: &str = "Chart.js Horizontal Bar Chart";
pub const HORIZONTAL_BAR_BORDER_COLOR: &str = "rgba(75, 192, 192, 1)";
pub const HORIZONTAL_BAR_BORDER_WIDTH: u32 = 1;

/// Which series supplies the shared label axis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LabelSource {
    /// The series inserted last.
    #[default]
    LastSeries,
    /// The series inserted first.
    FirstSeries,
    /// A named series; the last series is used when the key is absent.
    Series(String),
}

/// Maps a dataset description and settings to a [`ChartConfig`].
#[derive(Clone, Debug, Default)]
pub struct ChartConfigBuilder {
    label_source: LabelSource,
}

impl ChartConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label_source(mut self, label_source: LabelSource) -> Self {
        self.label_source = label_source;
        self
    }

    pub fn build(&self, data: &DatasetDescription, settings: &ChartSettings) -> ChartConfig {
        let datasets: Vec<Dataset> = data
            .iter()
            .map(|(key, values)| Dataset {
                label: key.to_string(),
                data: values.y_values.clone(),
                ..Default::default()
            })
            .collect();

        let labels = self.labels(data);
        if data.is_empty() {
            warn!("building chart configuration from an empty dataset description");
        }

        let title = settings
            .title
            .as_ref()
            .map(TitleBlock::shown)
            .unwrap_or_default();
        let y_title = settings
            .y_label
            .as_ref()
            .map(TitleBlock::shown)
            .unwrap_or_default();
        let chart_type = settings.chart_type.clone().unwrap_or_default();
        let x_type = settings.x_type.clone().unwrap_or_default();
        let x_label = settings
            .x_label
            .clone()
            .unwrap_or_else(|| DEFAULT_X_LABEL.to_string());

        debug!(
            "built {} configuration with {} series and {} labels",
            chart_type,
            datasets.len(),
            labels.len()
        );

        ChartConfig {
            chart_type,
            data: ChartData { labels, datasets },
            options: ChartOptions {
                index_axis: None,
                scales: Scales {
                    x: Scale {
                        axis_type: Some(x_type),
                        time: Some(TimeOptions::default()),
                        title: TitleBlock::shown(x_label),
                    },
                    y: Some(Scale {
                        title: y_title,
                        ..Default::default()
                    }),
                },
                plugins: Plugins {
                    legend: Legend {
                        display: Some(true),
                        position: None,
                    },
                    title,
                },
                responsive: Some(true),
                maintain_aspect_ratio: Some(false),
                elements: Some(Elements {
                    point: PointElement { radius: 0.0 },
                }),
            },
        }
    }

    fn labels(&self, data: &DatasetDescription) -> Vec<String> {
        let source = match &self.label_source {
            LabelSource::LastSeries => data.last(),
            LabelSource::FirstSeries => data.first(),
            LabelSource::Series(key) => data
                .get(key)
                .map(|values| (key.as_str(), values))
                .or_else(|| data.last()),
        };
        source
            .map(|(_, values)| values.x_values.clone())
            .unwrap_or_default()
    }
}

/// Build a chart configuration with the default label source.
pub fn build_chart_config(data: &DatasetDescription, settings: &ChartSettings) -> ChartConfig {
    ChartConfigBuilder::new().build(data, settings)
}

/// Build a single-series horizontal bar configuration, one ramp color per bar.
///
/// `settings` is accepted for symmetry with [`build_chart_config`] and is not
/// read.
pub fn build_horizontal_bar_config(data: &HorizontalBarData, _settings: &ChartSettings) -> ChartConfig {
    let background_color = ColorRamp::default().generate(data.labels.len());

    ChartConfig {
        chart_type: ChartType::Bar,
        data: ChartData {
            labels: data.labels.clone(),
            datasets: vec![Dataset {
                label: HORIZONTAL_BAR_DATASET_LABEL.to_string(),
                data: data.values.clone(),
                border_color: Some(HORIZONTAL_BAR_BORDER_COLOR.to_string()),
                border_width: Some(HORIZONTAL_BAR_BORDER_WIDTH),
                background_color: Some(background_color),
            }],
        },
        options: ChartOptions {
            index_axis: Some(IndexAxis::Y),
            scales: Scales {
                x: Scale {
                    title: TitleBlock::shown(HORIZONTAL_BAR_X_LABEL),
                    ..Default::default()
                },
                y: None,
            },
            plugins: Plugins {
                legend: Legend {
                    display: None,
                    position: Some(LegendPosition::Right),
                },
                title: TitleBlock::shown(HORIZONTAL_BAR_TITLE),
            },
            responsive: Some(true),
            maintain_aspect_ratio: None,
            elements: None,
        },
    }
}
