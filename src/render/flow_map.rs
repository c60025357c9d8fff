//! Layer builders for the geographic flow map.

use crate::config::FlowMapConfig;
use crate::data::flow::FlowRecord;
use crate::data::geo::BoundarySet;
use crate::foundation::core::{BezPath, Color, Point, Rect};
use crate::render::curve::{flow_arc, quad_to_path};
use crate::scale::projection::Mercator;
use crate::scale::sqrt::SqrtScale;
use crate::scene::{Layer, LineCap, MarkerDef, Shape, ShapeKey, ShapeKind, Style};

pub const MAP_LAYER: &str = "map-layer";
pub const ARROWS_LAYER: &str = "arrows-layer";
pub const ARROWHEAD_ID: &str = "arrowhead";

/// Pixel mappings shared by the boundary and arc layers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowScales {
    pub projection: Mercator,
    pub width: SqrtScale,
}

impl FlowScales {
    pub fn from_config(cfg: &FlowMapConfig) -> Self {
        let [tx, ty] = cfg.translate();
        Self {
            projection: Mercator::new(
                cfg.projection.center,
                cfg.projection.scale,
                Point::new(tx, ty),
            ),
            width: SqrtScale::new(cfg.width_domain_max, cfg.width_range),
        }
    }

    /// Projected centroid of the boundary with `code`.
    pub fn centroid(&self, boundaries: &BoundarySet, code: &str) -> Option<Point> {
        let feature = boundaries.get(code)?;
        self.projection.centroid(&feature.geometry)
    }
}

/// Boundaries and the definitions the arcs reference.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowStatic {
    pub layer: Layer,
    pub defs: Vec<MarkerDef>,
}

pub fn arrowhead(fill: Color) -> MarkerDef {
    let mut path = BezPath::new();
    path.move_to((0.0, -5.0));
    path.line_to((10.0, 0.0));
    path.line_to((0.0, 5.0));
    MarkerDef {
        id: ARROWHEAD_ID.to_owned(),
        view_box: Rect::new(0.0, -5.0, 10.0, 5.0),
        ref_point: Point::new(8.0, 0.0),
        width: 4.0,
        height: 4.0,
        path,
        fill,
    }
}

/// One filled outline per boundary, tagged with its code, plus the arrowhead marker.
pub fn flow_map_static_layer(
    boundaries: &BoundarySet,
    scales: &FlowScales,
    cfg: &FlowMapConfig,
) -> FlowStatic {
    let mut layer = Layer::new(MAP_LAYER);
    for feature in boundaries.features() {
        let mut style = Style::stroked(cfg.land_stroke, cfg.land_stroke_width);
        style.fill = Some(cfg.land_fill);
        layer.push(
            Shape::new(
                ShapeKind::Path(scales.projection.path(&feature.geometry)),
                style,
            )
            .keyed(ShapeKey::Boundary(feature.id.clone()))
            .with_id(feature.id.clone()),
        );
    }
    FlowStatic {
        layer,
        defs: vec![arrowhead(cfg.arc_color)],
    }
}

/// Arcs for one frame set, then the origin marker on top.
///
/// Records whose destination (or the origin) has no boundary are skipped. Arc shapes carry
/// their settled style; emphasis is applied per frame.
pub fn flow_map_dynamic_layer(
    frame: &[&FlowRecord],
    boundaries: &BoundarySet,
    scales: &FlowScales,
    cfg: &FlowMapConfig,
) -> Layer {
    let mut layer = Layer::new(ARROWS_LAYER);
    let Some(origin) = scales.centroid(boundaries, &cfg.origin_code) else {
        tracing::debug!(origin = %cfg.origin_code, "origin has no boundary; no arcs drawn");
        return layer;
    };

    let mut skipped = 0usize;
    for record in frame {
        let Some(dest) = scales.centroid(boundaries, &record.dest_code) else {
            skipped += 1;
            continue;
        };
        let arc = flow_arc(origin, dest, cfg.bow);
        let mut style = Style::stroked(cfg.arc_color, scales.width.apply(record.value));
        style.stroke_opacity = cfg.arc_opacity;
        style.line_cap = LineCap::Round;
        style.marker_end = Some(ARROWHEAD_ID.to_owned());
        layer.push(
            Shape::new(ShapeKind::Path(quad_to_path(&arc)), style)
                .keyed(ShapeKey::Arc(record.dest_code.clone())),
        );
    }
    if skipped > 0 {
        tracing::debug!(skipped, "flow records without a destination boundary");
    }

    let mut marker = Style::stroked(Color::WHITE, 2.0);
    marker.fill = Some(cfg.origin_fill);
    layer.push(
        Shape::new(
            ShapeKind::Circle {
                center: origin,
                radius: cfg.origin_radius,
            },
            marker,
        )
        .keyed(ShapeKey::Origin),
    );
    layer
}

#[cfg(test)]
#[path = "../../tests/unit/render/flow_map.rs"]
mod tests;
