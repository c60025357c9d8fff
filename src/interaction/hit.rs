use kurbo::ParamCurveNearest;

use crate::foundation::core::Point;
use crate::scene::{Layer, ShapeKey, ShapeKind};

/// Minimum half-width of the band around a stroked path that counts as a hit.
const MIN_STROKE_REACH: f64 = 3.0;
const NEAREST_ACCURACY: f64 = 1e-3;

/// Key of the topmost hoverable shape of `layer` under `pos`.
///
/// Circles hit inside their radius; paths hit within half their stroke width (at least
/// a few pixels). `slop` widens both.
pub fn hit_test(layer: &Layer, pos: Point, slop: f64) -> Option<ShapeKey> {
    layer.shapes.iter().rev().find_map(|shape| {
        let key = shape.key.as_ref().filter(|k| k.is_hoverable())?;
        let hit = match &shape.kind {
            ShapeKind::Circle { center, radius } => (pos - *center).hypot() <= radius + slop,
            ShapeKind::Path(path) => {
                let reach = (shape.style.stroke_width / 2.0).max(MIN_STROKE_REACH) + slop;
                path.segments()
                    .any(|seg| seg.nearest(pos, NEAREST_ACCURACY).distance_sq <= reach * reach)
            }
            _ => false,
        };
        hit.then(|| key.clone())
    })
}
