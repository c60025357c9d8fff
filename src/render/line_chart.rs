//! Layer builders for the time-series line chart.

use crate::config::LineChartConfig;
use crate::data::indicator::TimeSeries;
use crate::foundation::core::{Color, Point};
use crate::foundation::math::fmt_grouped;
use crate::render::curve::monotone_x;
use crate::scale::linear::LinearScale;
use crate::scene::{Layer, LineCap, Shape, ShapeKey, ShapeKind, Style, TextAnchor, TextShape};

pub const AXES_LAYER: &str = "axes";
pub const SERIES_LAYER: &str = "series";

const AXIS_FONT_SIZE: f64 = 12.0;
const AXIS_COLOR: Color = Color::rgb(0x66, 0x66, 0x66);
const TITLE_COLOR: Color = Color::rgb(0x99, 0x99, 0x99);
const GRID_STROKE: Color = Color::rgb(0xe0, 0xe0, 0xe0);
const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const X_TICKS: usize = 10;

/// Year and value scales fitted to one series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineScales {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl LineScales {
    /// `x` spans the year extent; `y` spans `[0, max * headroom]` extended to round ticks.
    ///
    /// An empty series gets unit domains so axes still render.
    pub fn compute(series: &TimeSeries, cfg: &LineChartConfig) -> Self {
        let w = cfg.canvas.width;
        let h = cfg.canvas.height;
        let m = &cfg.margins;

        let (y0, y1) = series.year_extent().unwrap_or((0, 1));
        let x = LinearScale::new([f64::from(y0), f64::from(y1)], [m.left, w - m.right]);

        let top = series
            .max_value()
            .map(|v| v * cfg.y_headroom)
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(1.0);
        let y = LinearScale::new([0.0, top], [h - m.bottom, m.top]).nice_with(cfg.y_ticks);

        Self { x, y }
    }

    pub fn point(&self, year: i32, value: f64) -> Point {
        Point::new(self.x.apply(f64::from(year)), self.y.apply(value))
    }
}

fn axis_text(pos: Point, text: String, anchor: TextAnchor, color: Color) -> Shape {
    Shape::new(
        ShapeKind::Text(TextShape {
            pos,
            text,
            font_size: AXIS_FONT_SIZE,
            anchor,
            bold: false,
            rotate_deg: 0.0,
        }),
        Style::filled(color),
    )
}

/// Fractional digits needed to tell ticks `step` apart.
fn tick_decimals(ticks: &[f64]) -> usize {
    let step = match ticks {
        [a, b, ..] => (b - a).abs(),
        _ => return 0,
    };
    if !(step > 0.0) || step >= 1.0 {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

/// Axes, dashed gridlines and axis titles. Depends only on the scales.
pub fn line_chart_static_layer(scales: &LineScales, cfg: &LineChartConfig) -> Layer {
    let mut layer = Layer::new(AXES_LAYER);
    let w = cfg.canvas.width;
    let h = cfg.canvas.height;
    let m = &cfg.margins;
    let baseline = h - m.bottom;

    // Horizontal gridlines at every non-zero value tick.
    let y_ticks = scales.y.ticks(cfg.y_ticks);
    for &v in y_ticks.iter().filter(|v| **v != 0.0) {
        let y = scales.y.apply(v);
        let mut style = Style::stroked(GRID_STROKE, 1.0);
        style.dash = Some(vec![4.0, 4.0]);
        layer.push(Shape::new(
            ShapeKind::Line {
                from: Point::new(m.left, y),
                to: Point::new(w - m.right, y),
            },
            style,
        ));
    }

    // x axis: domain line, outward ticks and integer year labels.
    let [x0, x1] = scales.x.range();
    layer.push(Shape::new(
        ShapeKind::Line {
            from: Point::new(x0, baseline),
            to: Point::new(x1, baseline),
        },
        Style::stroked(AXIS_COLOR, 1.0),
    ));
    for year in scales.x.ticks(X_TICKS).into_iter().filter(|t| t.fract() == 0.0) {
        let x = scales.x.apply(year);
        layer.push(Shape::new(
            ShapeKind::Line {
                from: Point::new(x, baseline),
                to: Point::new(x, baseline + TICK_SIZE),
            },
            Style::stroked(AXIS_COLOR, 1.0),
        ));
        layer.push(axis_text(
            Point::new(x, baseline + TICK_SIZE + TICK_PADDING + AXIS_FONT_SIZE * 0.71),
            format!("{year:.0}"),
            TextAnchor::Middle,
            AXIS_COLOR,
        ));
    }

    // y axis: labels only, no domain line or tick marks.
    let decimals = tick_decimals(&y_ticks);
    for &v in &y_ticks {
        layer.push(axis_text(
            Point::new(
                m.left - TICK_SIZE - TICK_PADDING,
                scales.y.apply(v) + AXIS_FONT_SIZE * 0.32,
            ),
            fmt_grouped(v, decimals),
            TextAnchor::End,
            AXIS_COLOR,
        ));
    }

    let mut y_title = axis_text(
        Point::new(AXIS_FONT_SIZE, h / 2.0),
        cfg.y_title.clone(),
        TextAnchor::Middle,
        TITLE_COLOR,
    );
    if let ShapeKind::Text(t) = &mut y_title.kind {
        t.rotate_deg = -90.0;
    }
    layer.push(y_title);
    layer.push(axis_text(
        Point::new(w / 2.0, h - 5.0),
        cfg.x_title.clone(),
        TextAnchor::Middle,
        TITLE_COLOR,
    ));

    layer
}

/// The series line plus one marker per point, in their settled (fully drawn, unhovered)
/// appearance. Every shape is keyed so presentation can be layered on top.
pub fn line_chart_dynamic_layer(
    series: &TimeSeries,
    scales: &LineScales,
    cfg: &LineChartConfig,
) -> Layer {
    let mut layer = Layer::new(SERIES_LAYER);
    if series.is_empty() {
        return layer;
    }

    let pts = series
        .points()
        .iter()
        .map(|p| scales.point(p.year, p.value))
        .collect::<Vec<_>>();

    let mut line = Style::stroked(cfg.line_color, cfg.line_width);
    line.line_cap = LineCap::Round;
    line.round_join = true;
    layer.push(Shape::new(ShapeKind::Path(monotone_x(&pts)), line).keyed(ShapeKey::Line));

    for (p, center) in series.points().iter().zip(pts) {
        let mut style = Style::stroked(cfg.line_color, cfg.point_stroke_width);
        style.fill = Some(Color::WHITE);
        layer.push(
            Shape::new(
                ShapeKind::Circle {
                    center,
                    radius: cfg.point_radius,
                },
                style,
            )
            .keyed(ShapeKey::Point(p.year)),
        );
    }

    layer
}

#[cfg(test)]
#[path = "../../tests/unit/render/line_chart.rs"]
mod tests;
