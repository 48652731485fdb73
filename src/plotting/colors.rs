use plotters::style::RGBAColor;

use crate::error::{ChartError, Result};

/// Linear red ramp used to color discrete bars.
///
/// Red stays saturated while green and blue fall together from `start`
/// toward `end`. The last color stops one step short of `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorRamp {
    pub start: f64,
    pub end: f64,
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self {
            start: 230.0,
            end: 0.0,
        }
    }
}

impl ColorRamp {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Green/blue channel value for each of `count` colors.
    pub fn channels(&self, count: usize) -> Vec<f64> {
        let step = (self.start - self.end) / count as f64;
        (0..count).map(|i| self.start - i as f64 * step).collect()
    }

    /// `count` colors formatted as `rgb(255, g, g)`.
    pub fn generate(&self, count: usize) -> Vec<String> {
        self.channels(count)
            .into_iter()
            .map(|channel| format!("rgb(255, {channel}, {channel})"))
            .collect()
    }
}

/// Parse a CSS color as written into a chart configuration.
///
/// Accepts `rgb(r, g, b)`, `rgba(r, g, b, a)` and `#rrggbb`.
pub fn parse_css_color(value: &str) -> Result<RGBAColor> {
    let invalid = || ChartError::InvalidColor(value.to_string());
    let trimmed = value.trim();

    if let Some(hex) = trimmed.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        return Ok(RGBAColor(channel(0)?, channel(2)?, channel(4)?, 1.0));
    }

    let inner = trimmed
        .strip_prefix("rgba(")
        .or_else(|| trimmed.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(invalid)?;

    let parts = inner
        .split(',')
        .map(|part| part.trim().parse::<f64>().map_err(|_| invalid()))
        .collect::<Result<Vec<f64>>>()?;

    let to_u8 = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    match parts.as_slice() {
        [r, g, b] => Ok(RGBAColor(to_u8(*r), to_u8(*g), to_u8(*b), 1.0)),
        [r, g, b, a] => Ok(RGBAColor(to_u8(*r), to_u8(*g), to_u8(*b), a.clamp(0.0, 1.0))),
        _ => Err(invalid()),
    }
}
