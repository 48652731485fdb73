use super::*;
use crate::error::ChartError;
use crate::types::{ChartSettings, DatasetDescription, HorizontalBarData, SeriesValues};
use std::fs;
use tempfile::TempDir;

fn setup_registry(names: &[&str]) -> (SurfaceRegistry, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let mut registry = SurfaceRegistry::new();
    for name in names {
        let id = name.split('.').next().unwrap();
        registry.register(Surface::new(id, temp_dir.path().join(name), (640, 480)));
    }
    (registry, temp_dir)
}

fn hours_data() -> DatasetDescription {
    let dates = ["2023-05-01T00:00:00", "2023-05-02T00:00:00", "2023-05-03T00:00:00"];
    DatasetDescription::new()
        .with_series("Ann", SeriesValues::new(dates, vec![0.0, 1.5, 2.5]))
        .with_series("Bob", SeriesValues::new(dates, vec![1.0, 1.0, 3.0]))
}

fn assert_written(chart: &Chart) {
    let metadata = fs::metadata(&chart.surface.path).unwrap();
    assert!(metadata.len() > 0);
}

#[test]
fn test_render_line_chart() {
    let (registry, _temp_dir) = setup_registry(&["hours.png"]);
    let settings = ChartSettings::default()
        .with_title("Total hours trained")
        .with_y_label("Hours trained");

    let chart = create_chart(&registry, &PlottersRenderer::default(), "hours", &hours_data(), &settings)
        .unwrap();
    assert_written(&chart);
}

#[test]
fn test_render_svg() {
    let (registry, _temp_dir) = setup_registry(&["hours.svg"]);

    let chart = create_chart(
        &registry,
        &PlottersRenderer::default(),
        "hours",
        &hours_data(),
        &ChartSettings::default(),
    )
    .unwrap();

    let svg = fs::read_to_string(&chart.surface.path).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn test_render_category_bars() {
    let (registry, _temp_dir) = setup_registry(&["weekly.png"]);
    let data = DatasetDescription::new()
        .with_series("Ann", SeriesValues::new(["18", "19", "20"], vec![2.0, 0.0, 4.5]));
    let settings = ChartSettings::default()
        .with_chart_type("bar")
        .with_x_type("category")
        .with_x_label("Week");

    let chart = create_chart(&registry, &PlottersRenderer::default(), "weekly", &data, &settings)
        .unwrap();
    assert_written(&chart);
}

#[test]
fn test_render_horizontal_bars() {
    let (registry, _temp_dir) = setup_registry(&["zones.png"]);
    let data = HorizontalBarData {
        labels: ["Zone 1", "Zone 2", "Zone 3", "Zone 4", "Zone 5"].map(String::from).to_vec(),
        values: vec![42.0, 65.0, 20.0, 7.5, 1.0],
    };

    let chart = create_horizontal_bar_chart(
        &registry,
        &PlottersRenderer::default(),
        "zones",
        &data,
        &ChartSettings::default(),
    )
    .unwrap();
    assert_written(&chart);
}

#[test]
fn test_render_empty_dataset() {
    let (registry, _temp_dir) = setup_registry(&["empty.png"]);

    let chart = create_chart(
        &registry,
        &PlottersRenderer::default(),
        "empty",
        &DatasetDescription::new(),
        &ChartSettings::default(),
    )
    .unwrap();
    assert!(chart.config.data.labels.is_empty());
    assert_written(&chart);
}

#[test]
fn test_unknown_chart_type_fails_at_draw_time() {
    let (registry, _temp_dir) = setup_registry(&["hours.png"]);
    let settings = ChartSettings::default().with_chart_type("sparkline");

    // the configuration itself builds fine
    assert_eq!(build_chart_config(&hours_data(), &settings).chart_type.as_str(), "sparkline");

    let result = create_chart(&registry, &PlottersRenderer::default(), "hours", &hours_data(), &settings);
    assert!(matches!(result, Err(ChartError::UnsupportedChartType(name)) if name == "sparkline"));
}

#[test]
fn test_unknown_axis_type_fails_at_draw_time() {
    let (registry, _temp_dir) = setup_registry(&["hours.png"]);
    let settings = ChartSettings::default().with_x_type("wobbly");

    let result = create_chart(&registry, &PlottersRenderer::default(), "hours", &hours_data(), &settings);
    assert!(matches!(result, Err(ChartError::UnsupportedAxisType(_))));
}

#[test]
fn test_unparseable_time_label() {
    let (registry, _temp_dir) = setup_registry(&["hours.png"]);
    let data = DatasetDescription::new()
        .with_series("Ann", SeriesValues::new(["last tuesday"], vec![1.0]));

    let result = create_chart(&registry, &PlottersRenderer::default(), "hours", &data, &ChartSettings::default());
    assert!(matches!(result, Err(ChartError::TimeParse { .. })));
}

#[test]
fn test_missing_canvas() {
    let (registry, _temp_dir) = setup_registry(&[]);

    let result = create_chart(
        &registry,
        &PlottersRenderer::default(),
        "hours",
        &hours_data(),
        &ChartSettings::default(),
    );
    assert!(matches!(result, Err(ChartError::NotFound(_))));
}

#[test]
fn test_legend_at_every_position() {
    use super::config::LegendPosition;
    use plotters::prelude::*;

    let renderer = PlottersRenderer::default();
    let positions = [
        None,
        Some(LegendPosition::Top),
        Some(LegendPosition::Bottom),
        Some(LegendPosition::Left),
        Some(LegendPosition::Right),
    ];
    for position in positions {
        let mut config = build_chart_config(&hours_data(), &ChartSettings::default());
        config.options.plugins.legend.position = position;

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (640, 480)).into_drawing_area();
            renderer.draw(&root, &config).unwrap();
            root.present().unwrap();
        }
        assert!(svg.contains("Ann"), "legend missing for {:?}", position);
        assert!(svg.contains("Bob"), "legend missing for {:?}", position);
    }
}

#[test]
fn test_render_tiny_and_zero_surfaces() {
    let temp_dir = TempDir::new().unwrap();
    let mut registry = SurfaceRegistry::new();
    registry.register(Surface::new("tiny", temp_dir.path().join("tiny.png"), (10, 10)));
    registry.register(Surface::new("zero", temp_dir.path().join("zero.png"), (0, 0)));
    let renderer = PlottersRenderer::default();

    let chart = create_chart(&registry, &renderer, "tiny", &hours_data(), &ChartSettings::default());
    assert!(chart.is_ok());

    let result = create_chart(&registry, &renderer, "zero", &hours_data(), &ChartSettings::default());
    assert!(matches!(result, Err(ChartError::Drawing(_))));
}
