use std::fmt::Write as _;

use crate::foundation::math::fmt_num;
use crate::scene::shape::{LineCap, MarkerDef, Scene, Shape, ShapeKind, Style, TextAnchor};

impl Scene {
    /// Serialize as a standalone SVG document sized to the logical viewport.
    pub fn to_svg(&self) -> String {
        let mut out = String::with_capacity(256 + self.shape_count() * 160);
        let w = fmt_num(self.canvas.width);
        let h = fmt_num(self.canvas.height);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#
        );

        if !self.defs.is_empty() {
            out.push_str("<defs>");
            for m in &self.defs {
                write_marker(&mut out, m);
            }
            out.push_str("</defs>");
        }

        for layer in &self.layers {
            let _ = write!(out, r#"<g class="{}">"#, escape(&layer.name));
            for shape in &layer.shapes {
                write_shape(&mut out, shape);
            }
            out.push_str("</g>");
        }

        out.push_str("</svg>");
        out
    }
}

fn write_marker(out: &mut String, m: &MarkerDef) {
    let vb = m.view_box;
    let _ = write!(
        out,
        r#"<marker id="{}" viewBox="{} {} {} {}" refX="{}" refY="{}" markerWidth="{}" markerHeight="{}" orient="auto"><path d="{}" fill="{}"/></marker>"#,
        escape(&m.id),
        fmt_num(vb.x0),
        fmt_num(vb.y0),
        fmt_num(vb.width()),
        fmt_num(vb.height()),
        fmt_num(m.ref_point.x),
        fmt_num(m.ref_point.y),
        fmt_num(m.width),
        fmt_num(m.height),
        m.path.to_svg(),
        m.fill.to_css(),
    );
}

fn write_shape(out: &mut String, shape: &Shape) {
    let id = shape
        .id
        .as_deref()
        .map(|id| format!(r#" id="{}""#, escape(id)))
        .unwrap_or_default();
    let style = style_attrs(&shape.style);

    match &shape.kind {
        ShapeKind::Path(path) => {
            let _ = write!(out, r#"<path{id} d="{}"{style}/>"#, path.to_svg());
        }
        ShapeKind::Circle { center, radius } => {
            let _ = write!(
                out,
                r#"<circle{id} cx="{}" cy="{}" r="{}"{style}/>"#,
                fmt_num(center.x),
                fmt_num(center.y),
                fmt_num(*radius)
            );
        }
        ShapeKind::Line { from, to } => {
            let _ = write!(
                out,
                r#"<line{id} x1="{}" y1="{}" x2="{}" y2="{}"{style}/>"#,
                fmt_num(from.x),
                fmt_num(from.y),
                fmt_num(to.x),
                fmt_num(to.y)
            );
        }
        ShapeKind::Rect {
            rect,
            corner_radius,
        } => {
            let _ = write!(
                out,
                r#"<rect{id} x="{}" y="{}" width="{}" height="{}" rx="{r}" ry="{r}"{style}/>"#,
                fmt_num(rect.x0),
                fmt_num(rect.y0),
                fmt_num(rect.width()),
                fmt_num(rect.height()),
                r = fmt_num(*corner_radius),
            );
        }
        ShapeKind::Text(t) => {
            let anchor = match t.anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let rotate = if t.rotate_deg != 0.0 {
                format!(
                    r#" transform="rotate({} {} {})""#,
                    fmt_num(t.rotate_deg),
                    fmt_num(t.pos.x),
                    fmt_num(t.pos.y)
                )
            } else {
                String::new()
            };
            let weight = if t.bold { r#" font-weight="bold""# } else { "" };
            let _ = write!(
                out,
                r#"<text{id} x="{}" y="{}" font-size="{}" font-family="sans-serif" text-anchor="{anchor}"{weight}{rotate}{style}>{}</text>"#,
                fmt_num(t.pos.x),
                fmt_num(t.pos.y),
                fmt_num(t.font_size),
                escape(&t.text)
            );
        }
    }
}

fn style_attrs(s: &Style) -> String {
    let mut out = String::new();
    match s.fill {
        Some(c) => {
            let _ = write!(out, r#" fill="{}""#, c.to_css());
        }
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(c) = s.stroke {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            c.to_css(),
            fmt_num(s.stroke_width)
        );
        if s.stroke_opacity < 1.0 {
            let _ = write!(out, r#" stroke-opacity="{}""#, fmt_num(s.stroke_opacity));
        }
        if s.line_cap == LineCap::Round {
            out.push_str(r#" stroke-linecap="round""#);
        }
        if s.round_join {
            out.push_str(r#" stroke-linejoin="round""#);
        }
        if let Some(dash) = &s.dash {
            let list = dash.iter().map(|d| fmt_num(*d)).collect::<Vec<_>>().join(",");
            let _ = write!(out, r#" stroke-dasharray="{list}""#);
            if s.dash_offset != 0.0 {
                let _ = write!(out, r#" stroke-dashoffset="{}""#, fmt_num(s.dash_offset));
            }
        }
    }
    if s.opacity < 1.0 {
        let _ = write!(out, r#" opacity="{}""#, fmt_num(s.opacity.max(0.0)));
    }
    if let Some(m) = &s.marker_end {
        let _ = write!(out, r#" marker-end="url(#{})""#, escape(m));
    }
    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/svg.rs"]
mod tests;
