//! Tooltip content, sizing and placement.
//!
//! Tooltips are ordinary shapes composed into the frame's top layer. Placement keeps the box
//! inside the canvas whenever its anchor is.

use kurbo::Size;

use crate::config::{FlowMapConfig, LineChartConfig};
use crate::data::flow::FlowRecord;
use crate::foundation::core::{Canvas, Color, Point, Rect, Vec2};
use crate::foundation::math::fmt_grouped;
use crate::scene::{Layer, Shape, ShapeKey, ShapeKind, Style, TextAnchor, TextShape};

pub const TOOLTIP_LAYER: &str = "tooltip";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> TextMetrics;
}

/// Font-independent estimate: fixed advance per char and fixed line height, both relative to
/// the font size.
#[derive(Clone, Copy, Debug)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl Default for DeterministicTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_factor: 0.6,
            line_height_factor: 1.2,
        }
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> TextMetrics {
        let font_size = font_size.max(1.0);
        let lines = text.split('\n').collect::<Vec<_>>();
        let max_chars = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        TextMetrics {
            width: max_chars as f64 * font_size * self.char_width_factor,
            height: lines.len() as f64 * font_size * self.line_height_factor,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipLine {
    pub text: String,
    pub bold: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipContent {
    pub lines: Vec<TooltipLine>,
}

impl TooltipContent {
    /// A bold heading followed by one plain line.
    pub fn titled(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            lines: vec![
                TooltipLine {
                    text: title.into(),
                    bold: true,
                },
                TooltipLine {
                    text: body.into(),
                    bold: false,
                },
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipStyle {
    pub background: Color,
    pub text: Color,
    pub font_size: f64,
    /// Horizontal and vertical padding.
    pub padding: Vec2,
    pub corner_radius: f64,
    pub line_height: f64,
    pub align: TextAnchor,
}

impl TooltipStyle {
    pub fn line_chart() -> Self {
        Self {
            background: Color::rgba(0, 0, 0, 0.85),
            text: Color::WHITE,
            font_size: 12.0,
            padding: Vec2::new(8.0, 8.0),
            corner_radius: 4.0,
            line_height: 1.2,
            align: TextAnchor::Middle,
        }
    }

    pub fn flow_map() -> Self {
        Self {
            background: Color::rgba(0, 0, 0, 0.9),
            text: Color::WHITE,
            font_size: 13.0,
            padding: Vec2::new(12.0, 8.0),
            corner_radius: 4.0,
            line_height: 1.2,
            align: TextAnchor::Start,
        }
    }
}

pub fn line_chart_content(year: i32, value: f64, cfg: &LineChartConfig) -> TooltipContent {
    TooltipContent::titled(
        format!("Year: {year}"),
        format!(
            "{}: {}{value:.2}{}",
            cfg.value_label, cfg.value_prefix, cfg.value_suffix
        ),
    )
}

pub fn flow_map_content(record: &FlowRecord, cfg: &FlowMapConfig) -> TooltipContent {
    TooltipContent::titled(
        format!("{} ({})", record.dest_name, record.year),
        format!("{}: {}", cfg.value_label, fmt_count(record.value)),
    )
}

/// Grouped thousands with up to three fractional digits, trailing zeros dropped.
fn fmt_count(v: f64) -> String {
    let s = fmt_grouped(v, 3);
    match s.split_once('.') {
        Some((int, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                int.to_owned()
            } else {
                format!("{int}.{frac}")
            }
        }
        None => s,
    }
}

/// Outer size of the box holding `content`.
pub fn box_size(content: &TooltipContent, style: &TooltipStyle, m: &dyn TextMeasurer) -> Size {
    let text_w = content
        .lines
        .iter()
        .map(|l| m.measure(&l.text, style.font_size).width)
        .fold(0.0, f64::max);
    let text_h = content.lines.len() as f64 * style.font_size * style.line_height;
    Size::new(
        text_w + 2.0 * style.padding.x,
        text_h + 2.0 * style.padding.y,
    )
}

/// Top-left corner for a box beside `anchor`, flipped to the side of the anchor facing the
/// canvas center so it does not run off the far edge.
pub fn quadrant_origin(anchor: Point, size: Size, gap: Vec2, canvas: Canvas) -> Point {
    let x = if anchor.x > canvas.width / 2.0 {
        anchor.x - size.width - gap.x
    } else {
        anchor.x + gap.x
    };
    let y = if anchor.y > canvas.height / 2.0 {
        anchor.y - size.height - gap.y
    } else {
        anchor.y + gap.y
    };
    clamp_origin(Point::new(x, y), size, canvas)
}

/// Top-left corner for a box following the pointer at a fixed offset.
pub fn cursor_origin(cursor: Point, offset: Vec2, size: Size, canvas: Canvas) -> Point {
    clamp_origin(cursor + offset, size, canvas)
}

fn clamp_origin(p: Point, size: Size, canvas: Canvas) -> Point {
    Point::new(
        p.x.clamp(0.0, (canvas.width - size.width).max(0.0)),
        p.y.clamp(0.0, (canvas.height - size.height).max(0.0)),
    )
}

/// Background box and text lines, all at `opacity`.
pub fn tooltip_layer(
    content: &TooltipContent,
    origin: Point,
    size: Size,
    style: &TooltipStyle,
    opacity: f64,
) -> Layer {
    let mut layer = Layer::new(TOOLTIP_LAYER);
    if opacity <= 0.0 || content.lines.is_empty() {
        return layer;
    }

    let mut bg = Style::filled(style.background);
    bg.opacity = opacity;
    layer.push(
        Shape::new(
            ShapeKind::Rect {
                rect: Rect::from_origin_size(origin, size),
                corner_radius: style.corner_radius,
            },
            bg,
        )
        .keyed(ShapeKey::Tooltip),
    );

    let x = match style.align {
        TextAnchor::Start => origin.x + style.padding.x,
        TextAnchor::Middle => origin.x + size.width / 2.0,
        TextAnchor::End => origin.x + size.width - style.padding.x,
    };
    let step = style.font_size * style.line_height;
    for (i, line) in content.lines.iter().enumerate() {
        let mut fg = Style::filled(style.text);
        fg.opacity = opacity;
        layer.push(Shape::new(
            ShapeKind::Text(TextShape {
                pos: Point::new(x, origin.y + style.padding.y + step * i as f64 + style.font_size),
                text: line.text.clone(),
                font_size: style.font_size,
                anchor: style.align,
                bold: line.bold,
                rotate_deg: 0.0,
            }),
            fg,
        ));
    }
    layer
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/tooltip.rs"]
mod tests;
