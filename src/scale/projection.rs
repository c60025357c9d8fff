use std::f64::consts::FRAC_PI_4;

use crate::data::geo::{Geometry, Ring};
use crate::foundation::core::{BezPath, Point};

/// Latitude limit of the Web-Mercator square; poles would project to infinity.
const MAX_LAT_DEG: f64 = 85.051_128_779_806_59;

/// Spherical Mercator projection with a fixed center, zoom and translation.
///
/// `center` (longitude, latitude in degrees) lands on `translate` in pixels; `scale` is pixels
/// per radian. The same instance must be used for boundaries and for arc endpoints so arcs
/// line up with country shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mercator {
    center: [f64; 2],
    scale: f64,
    translate: Point,
    raw_center: (f64, f64),
}

impl Mercator {
    pub fn new(center: [f64; 2], scale: f64, translate: Point) -> Self {
        Self {
            center,
            scale,
            translate,
            raw_center: raw(center[0], center[1]),
        }
    }

    pub fn center(&self) -> [f64; 2] {
        self.center
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate(&self) -> Point {
        self.translate
    }

    /// Project a `[longitude, latitude]` position in degrees to pixels (y grows downward).
    pub fn project(&self, lon: f64, lat: f64) -> Point {
        let (x, y) = raw(lon, lat);
        Point::new(
            self.translate.x + self.scale * (x - self.raw_center.0),
            self.translate.y - self.scale * (y - self.raw_center.1),
        )
    }

    /// Closed pixel-space outline of every ring of `geometry`.
    pub fn path(&self, geometry: &Geometry) -> BezPath {
        let mut path = BezPath::new();
        for polygon in &geometry.polygons {
            for ring in polygon {
                let pts = open_ring(ring);
                let Some((first, rest)) = pts.split_first() else {
                    continue;
                };
                path.move_to(self.project(first[0], first[1]));
                for p in rest {
                    path.line_to(self.project(p[0], p[1]));
                }
                path.close_path();
            }
        }
        path
    }

    /// Planar centroid of the projected geometry.
    ///
    /// Area-weighted over all rings (holes subtract by winding). Falls back to the
    /// perimeter-weighted centroid for zero-area input and to the vertex mean after that.
    /// `None` when the geometry has no positions.
    pub fn centroid(&self, geometry: &Geometry) -> Option<Point> {
        let mut acc = CentroidAcc::default();
        for polygon in &geometry.polygons {
            for ring in polygon {
                let pts = open_ring(ring)
                    .iter()
                    .map(|p| self.project(p[0], p[1]))
                    .collect::<Vec<_>>();
                acc.ring(&pts);
            }
        }
        acc.finish()
    }
}

fn raw(lon_deg: f64, lat_deg: f64) -> (f64, f64) {
    let phi = lat_deg.clamp(-MAX_LAT_DEG, MAX_LAT_DEG).to_radians();
    (lon_deg.to_radians(), (FRAC_PI_4 + phi / 2.0).tan().ln())
}

/// Ring positions without the closing duplicate of the first position.
fn open_ring(ring: &Ring) -> &[[f64; 2]] {
    match ring.as_slice() {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        all => all,
    }
}

#[derive(Default)]
struct CentroidAcc {
    // Vertices.
    x0: f64,
    y0: f64,
    z0: f64,
    // Edges, length-weighted.
    x1: f64,
    y1: f64,
    z1: f64,
    // Area, signed.
    x2: f64,
    y2: f64,
    z2: f64,
}

impl CentroidAcc {
    fn ring(&mut self, pts: &[Point]) {
        let Some((&first, rest)) = pts.split_first() else {
            return;
        };
        self.vertex(first);
        let mut prev = first;
        for &p in rest {
            self.edge(prev, p);
            self.vertex(p);
            prev = p;
        }
        self.edge(prev, first);
    }

    fn edge(&mut self, a: Point, b: Point) {
        let len = (b - a).hypot();
        self.x1 += len * (a.x + b.x) / 2.0;
        self.y1 += len * (a.y + b.y) / 2.0;
        self.z1 += len;

        let z = a.y * b.x - a.x * b.y;
        self.x2 += z * (a.x + b.x);
        self.y2 += z * (a.y + b.y);
        self.z2 += z * 3.0;
    }

    fn vertex(&mut self, p: Point) {
        self.x0 += p.x;
        self.y0 += p.y;
        self.z0 += 1.0;
    }

    fn finish(&self) -> Option<Point> {
        const EPS: f64 = 1e-9;
        if self.z2.abs() > EPS {
            Some(Point::new(self.x2 / self.z2, self.y2 / self.z2))
        } else if self.z1 > EPS {
            Some(Point::new(self.x1 / self.z1, self.y1 / self.z1))
        } else if self.z0 > 0.0 {
            Some(Point::new(self.x0 / self.z0, self.y0 / self.z0))
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/projection.rs"]
mod tests;
