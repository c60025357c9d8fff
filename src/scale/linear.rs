use crate::foundation::math::lerp;
use crate::scale::ticks;

/// Affine map from a numeric domain to a pixel range.
///
/// Values outside the domain extrapolate. A zero-width domain maps everything to the middle
/// of the range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Extend the domain to round tick boundaries (10 nominal ticks).
    pub fn nice(self) -> Self {
        self.nice_with(10)
    }

    pub fn nice_with(self, count: usize) -> Self {
        let (a, b) = ticks::nice(self.domain[0], self.domain[1], count);
        Self {
            domain: [a, b],
            range: self.range,
        }
    }

    pub fn apply(&self, v: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        lerp(r0, r1, (v - d0) / (d1 - d0))
    }

    /// Inverse mapping from range back to domain.
    pub fn invert(&self, px: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if r1 == r0 {
            return (d0 + d1) / 2.0;
        }
        lerp(d0, d1, (px - r0) / (r1 - r0))
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks::ticks(self.domain[0], self.domain[1], count)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/linear.rs"]
mod tests;
