use log::{debug, info};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::builder::{build_chart_config, build_horizontal_bar_config};
use super::colors::parse_css_color;
use super::config::{ChartConfig, Dataset, LegendPosition, TIME_PARSER};
use super::styles::{ChartStyle, ChartTheme};
use super::time_format::{format_timestamp, parse_time};
use crate::error::{drawing_err, ChartError, Result};
use crate::types::{AxisType, ChartSettings, ChartType, DatasetDescription, HorizontalBarData};

type Plane<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Image format written for a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceFormat {
    Png,
    Svg,
}

impl SurfaceFormat {
    /// `.svg` files are written as SVG, everything else as PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => SurfaceFormat::Svg,
            _ => SurfaceFormat::Png,
        }
    }
}

/// A named drawing surface backed by an image file.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    pub id: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub format: SurfaceFormat,
}

impl Surface {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>, size: (u32, u32)) -> Self {
        let path = path.into();
        Self {
            id: id.into(),
            format: SurfaceFormat::from_path(&path),
            path,
            width: size.0,
            height: size.1,
        }
    }
}

/// Resolves surface ids to surfaces.
#[derive(Clone, Debug, Default)]
pub struct SurfaceRegistry {
    surfaces: HashMap<String, Surface>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface, replacing any surface with the same id.
    pub fn register(&mut self, surface: Surface) {
        self.surfaces.insert(surface.id.clone(), surface);
    }

    pub fn resolve(&self, id: &str) -> Result<&Surface> {
        self.surfaces
            .get(id)
            .ok_or_else(|| ChartError::NotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

/// Draws a chart configuration onto a surface.
pub trait Renderer {
    fn render(&self, surface: &Surface, config: &ChartConfig) -> Result<()>;
}

/// A chart mounted on a surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Chart {
    pub surface: Surface,
    pub config: ChartConfig,
}

/// Resolve `canvas_id`, build the line/bar configuration and render it.
pub fn create_chart(
    registry: &SurfaceRegistry,
    renderer: &dyn Renderer,
    canvas_id: &str,
    data: &DatasetDescription,
    settings: &ChartSettings,
) -> Result<Chart> {
    let surface = registry.resolve(canvas_id)?;
    let config = build_chart_config(data, settings);
    mount(renderer, surface, config)
}

/// Resolve `canvas_id`, build the horizontal bar configuration and render it.
pub fn create_horizontal_bar_chart(
    registry: &SurfaceRegistry,
    renderer: &dyn Renderer,
    canvas_id: &str,
    data: &HorizontalBarData,
    settings: &ChartSettings,
) -> Result<Chart> {
    let surface = registry.resolve(canvas_id)?;
    let config = build_horizontal_bar_config(data, settings);
    mount(renderer, surface, config)
}

fn mount(renderer: &dyn Renderer, surface: &Surface, config: ChartConfig) -> Result<Chart> {
    renderer.render(surface, &config)?;
    info!("rendered {} chart on `{}`", config.chart_type, surface.id);
    Ok(Chart {
        surface: surface.clone(),
        config,
    })
}

/// Placement of the values along the x axis.
enum XAxis {
    Category,
    Time { display: String },
    Linear,
}

impl XAxis {
    fn tick(&self, x: f64, labels: &[String]) -> String {
        match self {
            XAxis::Category => category_label(x, labels),
            XAxis::Time { display } => format_timestamp(x, display),
            XAxis::Linear => format!("{x}"),
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum SeriesKind {
    Line,
    Bar,
    Scatter,
}

/// Renders configurations with plotters.
#[derive(Default)]
pub struct PlottersRenderer {
    pub theme: ChartTheme,
    pub style: ChartStyle,
}

impl PlottersRenderer {
    pub fn new(theme: ChartTheme, style: ChartStyle) -> Self {
        Self { theme, style }
    }

    /// Draw `config` onto any plotters drawing area.
    pub fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        config: &ChartConfig,
    ) -> Result<()> {
        let kind = match config.chart_type {
            ChartType::Line => SeriesKind::Line,
            ChartType::Bar => SeriesKind::Bar,
            ChartType::Scatter => SeriesKind::Scatter,
            ref other => return Err(ChartError::UnsupportedChartType(other.to_string())),
        };

        root.fill(&self.theme.background_color).map_err(drawing_err)?;

        if config.is_horizontal() && kind == SeriesKind::Bar {
            self.draw_horizontal_bars(root, config)
        } else {
            self.draw_cartesian(root, config, kind)
        }
    }

    fn draw_cartesian<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        config: &ChartConfig,
        kind: SeriesKind,
    ) -> Result<()> {
        let labels = &config.data.labels;
        let (axis, positions) = x_positions(config)?;

        let slot = min_gap(&positions);
        let (x_min, x_max) = match (&axis, kind) {
            (XAxis::Category, _) => (-0.5, labels.len().max(1) as f64 - 0.5),
            (_, SeriesKind::Bar) => padded_span(&positions, slot / 2.0),
            _ => padded_span(&positions, 0.0),
        };
        let (y_min, y_max) = value_range(
            config.data.datasets.iter().flat_map(|d| d.data.iter().copied()),
            kind == SeriesKind::Bar,
        );

        let mut builder = ChartBuilder::on(root);
        builder
            .margin(self.style.margin)
            .set_all_label_area_size(self.style.label_area_size);
        if let Some(title) = config.options.plugins.title.visible_text() {
            builder.caption(title, self.title_font());
        }
        let mut chart = builder
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(drawing_err)?;

        let x_formatter = |x: &f64| axis.tick(*x, labels);
        let mut mesh = chart.configure_mesh();
        mesh.light_line_style(TRANSPARENT)
            .bold_line_style(self.theme.grid_color)
            .axis_style(self.theme.axis_color)
            .label_style(self.label_font())
            .x_label_formatter(&x_formatter);
        if matches!(axis, XAxis::Category) {
            mesh.x_labels(labels.len().max(1));
        }
        if let Some(text) = config.options.scales.x.title.visible_text() {
            mesh.x_desc(text);
        }
        if let Some(text) = config.options.scales.y.as_ref().and_then(|y| y.title.visible_text()) {
            mesh.y_desc(text);
        }
        mesh.draw().map_err(drawing_err)?;

        let show_legend = config.options.plugins.legend.is_displayed();
        let point_radius = config
            .options
            .elements
            .as_ref()
            .map(|e| e.point.radius)
            .unwrap_or(3.0);
        let series_count = config.data.datasets.len();

        for (index, dataset) in config.data.datasets.iter().enumerate() {
            let points: Vec<(f64, f64)> = positions
                .iter()
                .zip(&dataset.data)
                .map(|(x, y)| (*x, *y))
                .collect();

            match kind {
                SeriesKind::Line => {
                    let color = self.line_color(dataset, index)?;
                    let stroke = color.stroke_width(self.style.line_width);
                    let anno = chart
                        .draw_series(LineSeries::new(points.clone(), stroke))
                        .map_err(drawing_err)?;
                    if show_legend {
                        anno.label(dataset.label.as_str()).legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], stroke)
                        });
                    }
                    if point_radius > 0.0 {
                        let radius = point_radius.round() as i32;
                        chart
                            .draw_series(points.iter().map(|p| Circle::new(*p, radius, color.filled())))
                            .map_err(drawing_err)?;
                    }
                }
                SeriesKind::Scatter => {
                    let color = self.line_color(dataset, index)?;
                    let radius = point_radius.max(3.0).round() as i32;
                    let anno = chart
                        .draw_series(points.iter().map(|p| Circle::new(*p, radius, color.filled())))
                        .map_err(drawing_err)?;
                    if show_legend {
                        anno.label(dataset.label.as_str())
                            .legend(move |(x, y)| Circle::new((x + 10, y), radius, color.filled()));
                    }
                }
                SeriesKind::Bar => {
                    let fills = self.bar_colors(dataset, index, points.len())?;
                    let group = slot * self.style.bar_fill;
                    let width = group / series_count as f64;
                    let offset = -group / 2.0 + index as f64 * width;
                    let bars: Vec<_> = points
                        .iter()
                        .zip(&fills)
                        .map(|((x, y), fill)| {
                            let x0 = x + offset;
                            Rectangle::new([(x0, 0.0), (x0 + width, *y)], fill.filled())
                        })
                        .collect();
                    let legend_fill = fills.first().copied().unwrap_or(self.theme.series_color(index));
                    let anno = chart.draw_series(bars).map_err(drawing_err)?;
                    if show_legend {
                        anno.label(dataset.label.as_str()).legend(move |(x, y)| {
                            Rectangle::new([(x, y - 5), (x + 20, y + 5)], legend_fill.filled())
                        });
                    }
                    self.draw_bar_borders(&mut chart, dataset, &points, |x, y| {
                        [(x + offset, 0.0), (x + offset + width, y)]
                    })?;
                }
            }
        }

        if show_legend && series_count > 0 {
            self.draw_legend(&mut chart, config.options.plugins.legend.position)?;
        }
        Ok(())
    }

    fn draw_horizontal_bars<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        config: &ChartConfig,
    ) -> Result<()> {
        let labels = &config.data.labels;
        let count = labels.len();
        // first label at the top
        let row = |i: usize| (count.max(1) - 1 - i.min(count.max(1) - 1)) as f64;

        let (x_min, x_max) = value_range(
            config.data.datasets.iter().flat_map(|d| d.data.iter().copied()),
            true,
        );

        let mut builder = ChartBuilder::on(root);
        builder
            .margin(self.style.margin)
            .set_all_label_area_size(self.style.label_area_size);
        if let Some(title) = config.options.plugins.title.visible_text() {
            builder.caption(title, self.title_font());
        }
        let mut chart = builder
            .build_cartesian_2d(x_min..x_max, -0.5..count.max(1) as f64 - 0.5)
            .map_err(drawing_err)?;

        let y_formatter = |y: &f64| {
            let flipped = (count.max(1) - 1) as f64 - *y;
            category_label(flipped, labels)
        };
        let mut mesh = chart.configure_mesh();
        mesh.light_line_style(TRANSPARENT)
            .bold_line_style(self.theme.grid_color)
            .axis_style(self.theme.axis_color)
            .label_style(self.label_font())
            .y_labels(count.max(1))
            .y_label_formatter(&y_formatter);
        if let Some(text) = config.options.scales.x.title.visible_text() {
            mesh.x_desc(text);
        }
        if let Some(text) = config.options.scales.y.as_ref().and_then(|y| y.title.visible_text()) {
            mesh.y_desc(text);
        }
        mesh.draw().map_err(drawing_err)?;

        let show_legend = config.options.plugins.legend.is_displayed();
        let series_count = config.data.datasets.len();
        let group = self.style.bar_fill;

        for (index, dataset) in config.data.datasets.iter().enumerate() {
            let fills = self.bar_colors(dataset, index, dataset.data.len())?;
            let height = group / series_count as f64;
            let offset = group / 2.0 - (index + 1) as f64 * height;
            let points: Vec<(f64, f64)> = dataset
                .data
                .iter()
                .take(count)
                .enumerate()
                .map(|(i, value)| (row(i), *value))
                .collect();

            let bars: Vec<_> = points
                .iter()
                .zip(&fills)
                .map(|((y, value), fill)| {
                    Rectangle::new([(0.0, y + offset), (*value, y + offset + height)], fill.filled())
                })
                .collect();
            let legend_fill = fills.first().copied().unwrap_or(self.theme.series_color(index));
            let anno = chart.draw_series(bars).map_err(drawing_err)?;
            if show_legend {
                anno.label(dataset.label.as_str()).legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 20, y + 5)], legend_fill.filled())
                });
            }
            self.draw_bar_borders(&mut chart, dataset, &points, |y, value| {
                [(0.0, y + offset), (value, y + offset + height)]
            })?;
        }

        if show_legend && series_count > 0 {
            self.draw_legend(&mut chart, config.options.plugins.legend.position)?;
        }
        Ok(())
    }

    fn draw_bar_borders<DB: DrawingBackend>(
        &self,
        chart: &mut Plane<'_, DB>,
        dataset: &Dataset,
        points: &[(f64, f64)],
        corners: impl Fn(f64, f64) -> [(f64, f64); 2],
    ) -> Result<()> {
        let (Some(color), Some(width)) = (&dataset.border_color, dataset.border_width) else {
            return Ok(());
        };
        if width == 0 {
            return Ok(());
        }
        let stroke = parse_css_color(color)?.stroke_width(width);
        chart
            .draw_series(
                points
                    .iter()
                    .map(|(a, b)| Rectangle::new(corners(*a, *b), stroke)),
            )
            .map_err(drawing_err)?;
        Ok(())
    }

    fn draw_legend<'a, DB: DrawingBackend + 'a>(
        &self,
        chart: &mut Plane<'a, DB>,
        position: Option<LegendPosition>,
    ) -> Result<()> {
        let position = match position {
            Some(LegendPosition::Top) | None => SeriesLabelPosition::UpperMiddle,
            Some(LegendPosition::Bottom) => SeriesLabelPosition::LowerMiddle,
            Some(LegendPosition::Left) => SeriesLabelPosition::MiddleLeft,
            Some(LegendPosition::Right) => SeriesLabelPosition::MiddleRight,
        };
        chart
            .configure_series_labels()
            .position(position)
            .background_style(self.theme.background_color)
            .border_style(self.theme.axis_color)
            .label_font(self.label_font())
            .draw()
            .map_err(drawing_err)?;
        Ok(())
    }

    fn line_color(&self, dataset: &Dataset, index: usize) -> Result<RGBAColor> {
        match &dataset.border_color {
            Some(color) => parse_css_color(color),
            None => Ok(self.theme.series_color(index)),
        }
    }

    fn bar_colors(&self, dataset: &Dataset, index: usize, count: usize) -> Result<Vec<RGBAColor>> {
        let fallback = self.theme.series_color(index).mix(0.6);
        let given = dataset.background_color.as_deref().unwrap_or_default();
        (0..count)
            .map(|i| match given.get(i) {
                Some(color) => parse_css_color(color),
                None => Ok(fallback),
            })
            .collect()
    }

    fn title_font(&self) -> TextStyle<'static> {
        ("sans-serif", self.style.title_font_size)
            .into_font()
            .color(&self.theme.text_color)
    }

    fn label_font(&self) -> TextStyle<'static> {
        ("sans-serif", self.style.font_size)
            .into_font()
            .color(&self.theme.text_color)
    }
}

impl Renderer for PlottersRenderer {
    fn render(&self, surface: &Surface, config: &ChartConfig) -> Result<()> {
        debug!(
            "drawing {} chart onto {} ({}x{})",
            config.chart_type,
            surface.path.display(),
            surface.width,
            surface.height
        );
        let size = (surface.width, surface.height);
        match surface.format {
            SurfaceFormat::Png => {
                let root = BitMapBackend::new(&surface.path, size).into_drawing_area();
                self.draw(&root, config)?;
                root.present().map_err(drawing_err)?;
            }
            SurfaceFormat::Svg => {
                let root = SVGBackend::new(&surface.path, size).into_drawing_area();
                self.draw(&root, config)?;
                root.present().map_err(drawing_err)?;
            }
        }
        Ok(())
    }
}

/// Resolve the x axis type and the coordinate of every label.
fn x_positions(config: &ChartConfig) -> Result<(XAxis, Vec<f64>)> {
    let scale = &config.options.scales.x;
    let labels = &config.data.labels;

    match scale.axis_type.clone().unwrap_or(AxisType::Category) {
        AxisType::Category => Ok((XAxis::Category, (0..labels.len()).map(|i| i as f64).collect())),
        AxisType::Time | AxisType::TimeSeries => {
            let time = scale.time.clone().unwrap_or_default();
            let parser = if time.parser.is_empty() {
                TIME_PARSER
            } else {
                time.parser.as_str()
            };
            let positions = labels
                .iter()
                .map(|label| parse_time(label, parser).map(|t| t.and_utc().timestamp() as f64))
                .collect::<Result<Vec<f64>>>()?;
            Ok((
                XAxis::Time {
                    display: time.display_formats.day,
                },
                positions,
            ))
        }
        AxisType::Linear => {
            let positions = labels
                .iter()
                .map(|label| {
                    label
                        .trim()
                        .parse::<f64>()
                        .map_err(|_| ChartError::InvalidNumber(label.clone()))
                })
                .collect::<Result<Vec<f64>>>()?;
            Ok((XAxis::Linear, positions))
        }
        other => Err(ChartError::UnsupportedAxisType(other.to_string())),
    }
}

fn category_label(x: f64, labels: &[String]) -> String {
    let nearest = x.round();
    if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }
    labels.get(nearest as usize).cloned().unwrap_or_default()
}

/// Smallest distance between neighbouring positions, 1.0 when undefined.
fn min_gap(positions: &[f64]) -> f64 {
    let mut sorted = positions.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|gap| *gap > 0.0)
        .fold(None, |acc: Option<f64>, gap| Some(acc.map_or(gap, |a| a.min(gap))))
        .unwrap_or(1.0)
}

fn padded_span(positions: &[f64], pad: f64) -> (f64, f64) {
    let (min, max) = positions
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| (lo.min(*x), hi.max(*x)));
    if !min.is_finite() {
        return (0.0, 1.0);
    }
    if min == max {
        let pad = pad.max(0.5);
        return (min - pad, max + pad);
    }
    (min - pad, max + pad)
}

/// Value axis range with 5% headroom. Bars always include zero.
fn value_range(values: impl Iterator<Item = f64>, include_zero: bool) -> (f64, f64) {
    let (mut min, mut max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !min.is_finite() {
        return (0.0, 1.0);
    }
    if include_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }
    if min == max {
        max = min + 1.0;
    }
    let pad = (max - min) * 0.05;
    let lower = if include_zero && min == 0.0 { 0.0 } else { min - pad };
    (lower, max + pad)
}
