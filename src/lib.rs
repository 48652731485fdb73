//! # Training Chart Configuration Library
//!
//! `trainchart` turns training statistics into chart configurations in the
//! shape Chart.js consumes, and mounts them on named drawing surfaces.
//!
//! ## Features
//!
//! - Build line/bar configurations from named series with documented defaults
//! - Build horizontal bar configurations colored by a linear red ramp
//! - Resolve drawing surfaces by id and render configurations with plotters
//! - Derive cumulative and weekly training-hour datasets from sessions
//! - Batch rendering from a JSON request file
//!
//! ## Example
//!
//! ```no_run
//! use trainchart::plotting::{create_chart, PlottersRenderer, Surface, SurfaceRegistry};
//! use trainchart::types::{ChartSettings, DatasetDescription, SeriesValues};
//!
//! let mut registry = SurfaceRegistry::new();
//! registry.register(Surface::new("hours", "hours.png", (800, 400)));
//!
//! let data = DatasetDescription::new().with_series(
//!     "Ann",
//!     SeriesValues::new(["2023-05-01T00:00:00", "2023-05-02T00:00:00"], vec![0.5, 1.5]),
//! );
//! let settings = ChartSettings::default().with_title("Total hours trained");
//!
//! let chart = create_chart(&registry, &PlottersRenderer::default(), "hours", &data, &settings)?;
//! println!("{}", serde_json::to_string_pretty(&chart.config)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analysis;
pub mod app;
pub mod error;
pub mod plotting;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use error::{ChartError, Result};
pub use plotting::{build_chart_config, build_horizontal_bar_config, ChartConfig, ColorRamp};
pub use types::{ChartSettings, DatasetDescription, HorizontalBarData, SeriesValues};
