use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use trainchart::app::{App, RenderRequest};
use trainchart::plotting::{build_chart_config, build_horizontal_bar_config};
use trainchart::{ChartError, ChartSettings, DatasetDescription, HorizontalBarData};

fn sample_request() -> RenderRequest {
    let request = json!({
        "surfaces": [
            {"id": "hours-chart", "path": "hours.png"},
            {"id": "weekly-chart", "path": "weekly.svg", "width": 600, "height": 300},
            {"id": "zones-chart", "path": "zones/zones.png"}
        ],
        "charts": [
            {
                "kind": "series",
                "canvas_id": "hours-chart",
                "data": {
                    "Ann": {
                        "x_values": ["2023-05-01T00:00:00", "2023-05-02T00:00:00", "2023-05-03T00:00:00"],
                        "y_values": [0.0, 1.0, 2.5]
                    },
                    "Bob": {
                        "x_values": ["2023-05-01T00:00:00", "2023-05-02T00:00:00", "2023-05-03T00:00:00"],
                        "y_values": [0.5, 0.5, 0.5]
                    }
                },
                "settings": {"title": "Total hours trained", "y_label": "Hours trained"}
            },
            {
                "kind": "series",
                "canvas_id": "weekly-chart",
                "data": {
                    "Ann": {"x_values": ["18", "19"], "y_values": [2.5, 2.0]}
                },
                "settings": {"chart_type": "bar", "x_type": "category", "x_label": "Week"}
            },
            {
                "kind": "horizontal_bar",
                "canvas_id": "zones-chart",
                "data": {
                    "labels": ["Zone 1", "Zone 2", "Zone 3", "Zone 4", "Zone 5"],
                    "values": [40.0, 62.0, 18.0, 6.0, 1.0]
                }
            }
        ]
    });
    serde_json::from_value(request).unwrap()
}

#[test]
fn test_full_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let request_path = temp_dir.path().join("request.json");
    fs::write(&request_path, serde_json::to_string(&sample_request()).unwrap()).unwrap();

    let mut app = App::new(temp_dir.path().join("out"));
    app.load_request(RenderRequest::from_path(&request_path).unwrap());

    let charts = app.render_all().unwrap();
    assert_eq!(charts.len(), 3);
    for chart in &charts {
        let metadata = fs::metadata(&chart.surface.path).unwrap();
        assert!(metadata.len() > 0);
    }
    assert!(temp_dir.path().join("out/zones/zones.png").is_file());

    // Labels come from the last series
    assert_eq!(charts[0].config.data.labels.len(), 3);
    assert_eq!(charts[0].config.data.datasets[1].label, "Bob");
}

#[test]
fn test_configs_match_builders() {
    let mut app = App::default();
    app.load_request(sample_request());

    let configs = app.configs();
    assert_eq!(configs.len(), 3);

    let zones = HorizontalBarData {
        labels: ["Zone 1", "Zone 2", "Zone 3", "Zone 4", "Zone 5"].map(String::from).to_vec(),
        values: vec![40.0, 62.0, 18.0, 6.0, 1.0],
    };
    assert_eq!(configs[2].1, build_horizontal_bar_config(&zones, &ChartSettings::default()));

    let weekly_json = configs[1].1.to_json().unwrap();
    assert_eq!(weekly_json["type"], json!("bar"));
    assert_eq!(weekly_json["options"]["scales"]["x"]["type"], json!("category"));
    assert_eq!(weekly_json["options"]["scales"]["x"]["title"]["text"], json!("Week"));
    assert_eq!(weekly_json["options"]["plugins"]["title"], json!({}));
}

#[test]
fn test_horizontal_bar_json() {
    let data = HorizontalBarData {
        labels: vec!["Z1".to_string(), "Z2".to_string()],
        values: vec![5.0, 7.0],
    };
    let config = build_horizontal_bar_config(&data, &ChartSettings::default());

    assert_eq!(
        config.to_json().unwrap(),
        json!({
            "type": "bar",
            "data": {
                "labels": ["Z1", "Z2"],
                "datasets": [{
                    "label": "Minutes in zone",
                    "data": [5.0, 7.0],
                    "borderColor": "rgba(75, 192, 192, 1)",
                    "borderWidth": 1,
                    "backgroundColor": ["rgb(255, 230, 230)", "rgb(255, 115, 115)"]
                }]
            },
            "options": {
                "indexAxis": "y",
                "scales": {"x": {"title": {"display": true, "text": "Minutes"}}},
                "plugins": {
                    "legend": {"position": "right"},
                    "title": {"display": true, "text": "Chart.js Horizontal Bar Chart"}
                },
                "responsive": true
            }
        })
    );
}

#[test]
fn test_error_handling() {
    // Unknown canvas
    let mut app = App::default();
    let mut request = sample_request();
    request.surfaces.clear();
    app.load_request(request);
    assert!(matches!(app.render_all(), Err(ChartError::NotFound(id)) if id == "hours-chart"));

    // Malformed settings only fail once drawn
    let temp_dir = TempDir::new().unwrap();
    let request: RenderRequest = serde_json::from_value(json!({
        "surfaces": [{"id": "c", "path": "c.png"}],
        "charts": [{
            "kind": "series",
            "canvas_id": "c",
            "data": {"Ann": {"x_values": ["1"], "y_values": [1.0]}},
            "settings": {"chart_type": "radar", "x_type": "category"}
        }]
    }))
    .unwrap();
    let mut app = App::new(temp_dir.path());
    app.load_request(request);
    assert_eq!(app.configs()[0].1.chart_type.as_str(), "radar");
    assert!(matches!(app.render_all(), Err(ChartError::UnsupportedChartType(_))));
}

#[test]
fn test_idempotent_builds() {
    let data: DatasetDescription = serde_json::from_value(json!({
        "A": {"x_values": ["2023-05-01T00:00:00"], "y_values": [1.0]},
        "B": {"x_values": ["2023-06-01T00:00:00"], "y_values": [2.0]}
    }))
    .unwrap();
    let settings = ChartSettings::default().with_x_label("Day");

    let first = build_chart_config(&data, &settings);
    let second = build_chart_config(&data, &settings);
    assert_eq!(first, second);
    assert_eq!(first.data.labels, vec!["2023-06-01T00:00:00".to_string()]);
}

#[test]
fn test_configs_for_shared_canvas() {
    let request: RenderRequest = serde_json::from_value(json!({
        "surfaces": [{"id": "zones", "path": "zones.png"}],
        "charts": [
            {
                "kind": "horizontal_bar",
                "canvas_id": "zones",
                "data": {"labels": ["Zone 1"], "values": [10.0]}
            },
            {
                "kind": "series",
                "canvas_id": "zones",
                "data": {"Ann": {"x_values": ["18"], "y_values": [2.5]}},
                "settings": {"chart_type": "bar", "x_type": "category"}
            }
        ]
    }))
    .unwrap();
    let mut app = App::default();
    app.load_request(request);

    let value = app.configs_json().unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["canvas_id"], json!("zones"));
    assert_eq!(entries[0]["config"]["options"]["indexAxis"], json!("y"));
    assert_eq!(entries[1]["canvas_id"], json!("zones"));
    assert_eq!(entries[1]["config"]["data"]["labels"], json!(["18"]));
}
