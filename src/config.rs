//! Chart configuration.
//!
//! Every field has a default that reproduces the published charts, so an empty JSON object
//! (`{}`) is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::ease::Ease;
use crate::foundation::core::{Canvas, Color, Margins};
use crate::foundation::error::{VizError, VizResult};

/// Top-level configuration for both visualizations.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub line_chart: LineChartConfig,
    pub flow_map: FlowMapConfig,
}

impl VizConfig {
    /// Parse a JSON configuration and validate it.
    pub fn from_json_str(s: &str) -> VizResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> VizResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            VizError::fetch(format!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> VizResult<()> {
        self.line_chart.validate()?;
        self.flow_map.validate()
    }
}

/// Column names of the indicator table.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorColumns {
    pub year: String,
    pub value: String,
}

impl Default for IndicatorColumns {
    fn default() -> Self {
        Self {
            year: "Year".to_owned(),
            value: "GDP".to_owned(),
        }
    }
}

/// Time-series line chart settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LineChartConfig {
    pub canvas: Canvas,
    pub margins: Margins,
    pub columns: IndicatorColumns,
    /// Multiplier applied to the maximum value to leave room above the line.
    pub y_headroom: f64,
    pub y_ticks: usize,
    pub line_color: Color,
    pub hover_color: Color,
    pub line_width: f64,
    pub point_radius: f64,
    pub point_radius_hover: f64,
    pub point_stroke_width: f64,
    pub point_stroke_width_hover: f64,
    pub draw_in_ms: u64,
    pub draw_in_ease: Ease,
    pub point_fade_ms: u64,
    pub hover_ms: u64,
    /// Time allowed for the indicator table to arrive before the chart gives up.
    pub load_timeout_ms: u64,
    pub x_title: String,
    pub y_title: String,
    pub value_label: String,
    pub value_prefix: String,
    pub value_suffix: String,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 800.0,
                height: 400.0,
            },
            margins: Margins {
                top: 40.0,
                right: 30.0,
                bottom: 50.0,
                left: 50.0,
            },
            columns: IndicatorColumns::default(),
            y_headroom: 1.1,
            y_ticks: 6,
            line_color: Color::rgb(0xd3, 0x2f, 0x2f),
            hover_color: Color::rgb(0xb7, 0x1c, 0x1c),
            line_width: 3.0,
            point_radius: 4.0,
            point_radius_hover: 7.0,
            point_stroke_width: 2.0,
            point_stroke_width_hover: 3.0,
            draw_in_ms: 2000,
            draw_in_ease: Ease::OutCubic,
            point_fade_ms: 500,
            hover_ms: 200,
            load_timeout_ms: 15_000,
            x_title: "Years".to_owned(),
            y_title: "Billions of USD ($)".to_owned(),
            value_label: "GDP".to_owned(),
            value_prefix: "$".to_owned(),
            value_suffix: " B".to_owned(),
        }
    }
}

impl LineChartConfig {
    pub fn validate(&self) -> VizResult<()> {
        self.canvas.validate()?;
        let m = &self.margins;
        if m.left + m.right >= self.canvas.width || m.top + m.bottom >= self.canvas.height {
            return Err(VizError::validation("line chart margins leave no plot area"));
        }
        if self.columns.year.trim().is_empty() || self.columns.value.trim().is_empty() {
            return Err(VizError::validation("indicator column names must be non-empty"));
        }
        if !(self.y_headroom.is_finite() && self.y_headroom >= 1.0) {
            return Err(VizError::validation("y_headroom must be >= 1"));
        }
        if self.y_ticks == 0 {
            return Err(VizError::validation("y_ticks must be > 0"));
        }
        if self.draw_in_ms == 0 {
            return Err(VizError::validation("draw_in_ms must be > 0"));
        }
        if self.load_timeout_ms == 0 {
            return Err(VizError::validation("load_timeout_ms must be > 0"));
        }
        Ok(())
    }
}

/// Column names of the flow table.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowColumns {
    pub year: String,
    pub origin_code: String,
    pub dest_code: String,
    pub dest_name: String,
    /// Numeric columns summed into a single flow value.
    pub value_columns: Vec<String>,
}

impl Default for FlowColumns {
    fn default() -> Self {
        Self {
            year: "Year".to_owned(),
            origin_code: "Country of Origin ISO".to_owned(),
            dest_code: "Country of Asylum ISO".to_owned(),
            dest_name: "Country of Asylum".to_owned(),
            value_columns: vec![
                "Refugees".to_owned(),
                "Asylum-seekers".to_owned(),
                "Other people in need of international protection".to_owned(),
            ],
        }
    }
}

/// Mercator projection parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// `[longitude, latitude]` in degrees mapped to `translate`.
    pub center: [f64; 2],
    pub scale: f64,
    /// Pixel position of `center`; `None` means the canvas center.
    pub translate: Option<[f64; 2]>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            center: [30.0, 30.0],
            scale: 350.0,
            translate: None,
        }
    }
}

/// Geographic flow map settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowMapConfig {
    pub canvas: Canvas,
    pub columns: FlowColumns,
    pub origin_code: String,
    /// Records before this year are discarded at load time.
    pub min_year: i32,
    /// Frame-set threshold; only values strictly above are drawn.
    pub min_value: f64,
    pub top_n: usize,
    pub projection: ProjectionConfig,
    pub width_domain_max: f64,
    pub width_range: [f64; 2],
    pub bow: f64,
    pub land_fill: Color,
    pub land_stroke: Color,
    pub land_stroke_width: f64,
    pub arc_color: Color,
    pub arc_opacity: f64,
    pub hover_color: Color,
    pub hover_opacity: f64,
    pub hover_extra_width: f64,
    pub origin_radius: f64,
    pub origin_fill: Color,
    pub play_interval_ms: u64,
    pub hover_ms: u64,
    pub tooltip_offset: [f64; 2],
    pub load_timeout_ms: u64,
    pub value_label: String,
}

impl Default for FlowMapConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 620.0,
                height: 320.0,
            },
            columns: FlowColumns::default(),
            origin_code: "YEM".to_owned(),
            min_year: 2012,
            min_value: 500.0,
            top_n: 30,
            projection: ProjectionConfig::default(),
            width_domain_max: 15_000.0,
            width_range: [0.5, 6.0],
            bow: 0.2,
            land_fill: Color::rgb(0xf5, 0xf5, 0xf5),
            land_stroke: Color::rgb(0xbf, 0xbf, 0xbf),
            land_stroke_width: 0.5,
            arc_color: Color::rgb(0xd3, 0x2f, 0x2f),
            arc_opacity: 0.6,
            hover_color: Color::rgb(0xb7, 0x1c, 0x1c),
            hover_opacity: 1.0,
            hover_extra_width: 2.0,
            origin_radius: 5.0,
            origin_fill: Color::rgb(0xb7, 0x1c, 0x1c),
            play_interval_ms: 1000,
            hover_ms: 200,
            tooltip_offset: [12.0, -12.0],
            load_timeout_ms: 15_000,
            value_label: "Migrants".to_owned(),
        }
    }
}

impl FlowMapConfig {
    pub fn validate(&self) -> VizResult<()> {
        self.canvas.validate()?;
        if self.origin_code.trim().is_empty() {
            return Err(VizError::validation("origin_code must be non-empty"));
        }
        let c = &self.columns;
        if [&c.year, &c.origin_code, &c.dest_code, &c.dest_name]
            .iter()
            .any(|s| s.trim().is_empty())
        {
            return Err(VizError::validation("flow column names must be non-empty"));
        }
        if c.value_columns.is_empty() {
            return Err(VizError::validation("at least one value column is required"));
        }
        if self.top_n == 0 {
            return Err(VizError::validation("top_n must be > 0"));
        }
        if !(self.width_domain_max.is_finite() && self.width_domain_max > 0.0) {
            return Err(VizError::validation("width_domain_max must be > 0"));
        }
        if self.width_range[0] > self.width_range[1] {
            return Err(VizError::validation("width_range must be ascending"));
        }
        if !(self.projection.scale.is_finite() && self.projection.scale > 0.0) {
            return Err(VizError::validation("projection scale must be > 0"));
        }
        if self.play_interval_ms == 0 {
            return Err(VizError::validation("play_interval_ms must be > 0"));
        }
        if self.load_timeout_ms == 0 {
            return Err(VizError::validation("load_timeout_ms must be > 0"));
        }
        Ok(())
    }

    /// Projection translation, defaulting to the canvas center.
    pub fn translate(&self) -> [f64; 2] {
        self.projection
            .translate
            .unwrap_or([self.canvas.width / 2.0, self.canvas.height / 2.0])
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
