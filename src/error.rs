use thiserror::Error;

/// Errors raised while resolving a drawing surface or rendering a chart.
///
/// Building a configuration never fails; malformed settings travel through the
/// configuration and surface here once the renderer tries to draw them.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("drawing surface `{0}` not found")]
    NotFound(String),

    #[error("unsupported chart type `{0}`")]
    UnsupportedChartType(String),

    #[error("unsupported axis type `{0}`")]
    UnsupportedAxisType(String),

    #[error("cannot parse `{value}` as a time with format `{format}`")]
    TimeParse { value: String, format: String },

    #[error("cannot parse `{0}` as a number")]
    InvalidNumber(String),

    #[error("cannot parse color `{0}`")]
    InvalidColor(String),

    #[error("drawing failed: {0}")]
    Drawing(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;

/// Wrap a plotters drawing error.
pub(crate) fn drawing_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Drawing(e.to_string())
}
