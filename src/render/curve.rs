use kurbo::{ParamCurve, QuadBez};

use crate::foundation::core::{BezPath, Point, Vec2};

/// Monotone cubic interpolation in x (Fritsch–Carlson tangents, as `d3.curveMonotoneX`).
///
/// The curve never overshoots the data vertically between consecutive points. Consecutive
/// duplicate points are skipped; two points give a straight segment.
pub fn monotone_x(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();

    let mut state = 0u8;
    let (mut x0, mut y0, mut x1, mut y1) = (f64::NAN, f64::NAN, f64::NAN, f64::NAN);
    let mut t0 = f64::NAN;

    for p in points {
        let (x, y) = (p.x, p.y);
        if x == x1 && y == y1 {
            continue;
        }

        let mut t1 = f64::NAN;
        match state {
            0 => {
                state = 1;
                path.move_to((x, y));
            }
            1 => state = 2,
            2 => {
                state = 3;
                t1 = slope3(x0, y0, x1, y1, x, y);
                hermite(&mut path, x0, y0, x1, y1, slope2(x0, y0, x1, y1, t1), t1);
            }
            _ => {
                t1 = slope3(x0, y0, x1, y1, x, y);
                hermite(&mut path, x0, y0, x1, y1, t0, t1);
            }
        }

        x0 = x1;
        y0 = y1;
        x1 = x;
        y1 = y;
        t0 = t1;
    }

    match state {
        2 => path.line_to((x1, y1)),
        3 => {
            let t1 = slope2(x0, y0, x1, y1, t0);
            hermite(&mut path, x0, y0, x1, y1, t0, t1);
        }
        _ => {}
    }
    path
}

fn sign(v: f64) -> f64 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

// Tangent at the middle of three points.
fn slope3(x0: f64, y0: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let h0 = x1 - x0;
    let h1 = x2 - x1;
    let s0 = (y1 - y0) / if h0 != 0.0 { h0 } else if h1 < 0.0 { -0.0 } else { 0.0 };
    let s1 = (y2 - y1) / if h1 != 0.0 { h1 } else if h0 < 0.0 { -0.0 } else { 0.0 };
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let v = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if v.is_finite() { v } else { 0.0 }
}

// One-sided tangent at an end point.
fn slope2(x0: f64, y0: f64, x1: f64, y1: f64, t: f64) -> f64 {
    let h = x1 - x0;
    if h != 0.0 {
        (3.0 * (y1 - y0) / h - t) / 2.0
    } else {
        t
    }
}

fn hermite(path: &mut BezPath, x0: f64, y0: f64, x1: f64, y1: f64, t0: f64, t1: f64) {
    let dx = (x1 - x0) / 3.0;
    path.curve_to(
        (x0 + dx, y0 + dx * t0),
        (x1 - dx, y1 - dx * t1),
        (x1, y1),
    );
}

/// Quadratic arc from `from` to `to`, its control point pushed off the chord midpoint by
/// `bow * |chord|` along the chord normal that points up the screen.
pub fn flow_arc(from: Point, to: Point, bow: f64) -> QuadBez {
    let chord = to - from;
    let len = chord.hypot();
    let mid = from.midpoint(to);
    if len == 0.0 {
        return QuadBez::new(from, mid, to);
    }
    let mut normal = Vec2::new(chord.y, -chord.x) / len;
    if normal.y > 0.0 || (normal.y == 0.0 && normal.x < 0.0) {
        normal = -normal;
    }
    QuadBez::new(from, mid + normal * (len * bow), to)
}

pub(crate) fn quad_to_path(arc: &QuadBez) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(arc.start());
    path.quad_to(arc.p1, arc.end());
    path
}

#[cfg(test)]
#[path = "../../tests/unit/render/curve.rs"]
mod tests;
