use chrono::NaiveDate;
use log::{info, warn};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

use super::request::{ChartRequest, RenderRequest, SurfaceSpec, DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};
use crate::analysis::{training_graphs, TrainingSession};
use crate::error::Result;
use crate::plotting::{
    build_chart_config, build_horizontal_bar_config, create_chart, create_horizontal_bar_chart,
    Chart, ChartConfig, PlottersRenderer, Renderer, Surface, SurfaceRegistry,
};

/// Application state: registered surfaces, queued charts and the renderer
/// that draws them.
pub struct App {
    pub out_dir: PathBuf,
    pub registry: SurfaceRegistry,
    pub charts: Vec<ChartRequest>,
    renderer: Box<dyn Renderer>,
}

impl App {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            registry: SurfaceRegistry::new(),
            charts: Vec::new(),
            renderer: Box::new(PlottersRenderer::default()),
        }
    }

    /// Swap the renderer used by [`render_all`](Self::render_all).
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Register the request's surfaces and queue its charts.
    ///
    /// Relative surface paths are resolved against the output directory.
    pub fn load_request(&mut self, request: RenderRequest) {
        for spec in request.surfaces {
            self.add_surface(spec);
        }
        self.charts.extend(request.charts);
    }

    pub fn add_surface(&mut self, spec: SurfaceSpec) {
        let path = self.out_dir.join(&spec.path);
        self.registry
            .register(Surface::new(spec.id, path, (spec.width, spec.height)));
    }

    /// Queue one surface and chart per training graph, named after the graph.
    pub fn add_training_graphs(&mut self, sessions: &[TrainingSession], start: NaiveDate, end: NaiveDate) {
        for graph in training_graphs(sessions, start, end) {
            self.add_surface(SurfaceSpec {
                id: graph.name.to_string(),
                path: PathBuf::from(format!("{}.png", graph.name)),
                width: DEFAULT_SURFACE_WIDTH,
                height: DEFAULT_SURFACE_HEIGHT,
            });
            self.charts.push(ChartRequest::Series {
                canvas_id: graph.name.to_string(),
                data: graph.data,
                settings: graph.settings,
            });
        }
    }

    /// Build every queued configuration without drawing anything.
    pub fn configs(&self) -> Vec<(String, ChartConfig)> {
        self.charts
            .iter()
            .map(|request| {
                let config = match request {
                    ChartRequest::Series { data, settings, .. } => build_chart_config(data, settings),
                    ChartRequest::HorizontalBar { data, settings, .. } => {
                        build_horizontal_bar_config(data, settings)
                    }
                };
                (request.canvas_id().to_string(), config)
            })
            .collect()
    }

    /// Every queued configuration as a JSON array of `{canvas_id, config}`
    /// entries, in request order. Charts sharing a canvas are all kept.
    pub fn configs_json(&self) -> Result<Value> {
        let entries = self
            .configs()
            .into_iter()
            .map(|(canvas_id, config)| -> Result<Value> {
                Ok(json!({ "canvas_id": canvas_id, "config": config.to_json()? }))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::Array(entries))
    }

    /// Render every queued chart in order, stopping at the first failure.
    pub fn render_all(&self) -> Result<Vec<Chart>> {
        if self.charts.is_empty() {
            warn!("no charts to render");
        }

        let mut rendered = Vec::with_capacity(self.charts.len());
        for request in &self.charts {
            if let Ok(surface) = self.registry.resolve(request.canvas_id()) {
                ensure_parent(&surface.path)?;
            }
            let chart = match request {
                ChartRequest::Series {
                    canvas_id,
                    data,
                    settings,
                } => create_chart(&self.registry, self.renderer.as_ref(), canvas_id, data, settings)?,
                ChartRequest::HorizontalBar {
                    canvas_id,
                    data,
                    settings,
                } => create_horizontal_bar_chart(
                    &self.registry,
                    self.renderer.as_ref(),
                    canvas_id,
                    data,
                    settings,
                )?,
            };
            rendered.push(chart);
        }

        info!("rendered {} chart(s) into {}", rendered.len(), self.out_dir.display());
        Ok(rendered)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(".")
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}
