pub mod builder;
pub mod colors;
pub mod config;
pub mod render;
pub mod styles;
pub mod time_format;

#[cfg(test)]
mod tests;

pub use builder::{build_chart_config, build_horizontal_bar_config, ChartConfigBuilder, LabelSource};
pub use colors::{parse_css_color, ColorRamp};
pub use config::ChartConfig;
pub use render::{
    create_chart, create_horizontal_bar_chart, Chart, PlottersRenderer, Renderer, Surface,
    SurfaceFormat, SurfaceRegistry,
};
