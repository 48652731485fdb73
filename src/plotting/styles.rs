use plotters::style::RGBAColor;

/// Chart theme configuration
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
    /// Colors handed out to series that do not carry their own
    pub series_palette: Vec<RGBAColor>,
}

impl ChartTheme {
    pub fn series_color(&self, index: usize) -> RGBAColor {
        if self.series_palette.is_empty() {
            return self.text_color;
        }
        self.series_palette[index % self.series_palette.len()]
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBAColor(255, 255, 255, 1.0),
            text_color: RGBAColor(102, 102, 102, 1.0),
            grid_color: RGBAColor(0, 0, 0, 0.1),
            axis_color: RGBAColor(0, 0, 0, 0.4),
            series_palette: vec![
                RGBAColor(54, 162, 235, 1.0),
                RGBAColor(255, 99, 132, 1.0),
                RGBAColor(255, 159, 64, 1.0),
                RGBAColor(255, 205, 86, 1.0),
                RGBAColor(75, 192, 192, 1.0),
                RGBAColor(153, 102, 255, 1.0),
                RGBAColor(201, 203, 207, 1.0),
            ],
        }
    }
}

/// Chart style configuration
pub struct ChartStyle {
    pub line_width: u32,
    pub font_size: u32,
    pub title_font_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
    /// Fraction of a category slot covered by bars
    pub bar_fill: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line_width: 2,
            font_size: 15,
            title_font_size: 24,
            margin: 10,
            label_area_size: 50,
            bar_fill: 0.8,
        }
    }
}
