/// Square-root magnitude scale.
///
/// Maps `[0, domain_max]` to `range` through `sqrt`, so output grows sub-linearly. Inputs are
/// clamped into the domain: values above `domain_max` cap at `range[1]` and non-positive
/// or non-finite values map to `range[0]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqrtScale {
    domain_max: f64,
    range: [f64; 2],
}

impl SqrtScale {
    pub fn new(domain_max: f64, range: [f64; 2]) -> Self {
        Self { domain_max, range }
    }

    pub fn apply(&self, v: f64) -> f64 {
        let [r0, r1] = self.range;
        if !(self.domain_max > 0.0) || !v.is_finite() || v <= 0.0 {
            return r0;
        }
        let t = (v.min(self.domain_max) / self.domain_max).sqrt();
        r0 + (r1 - r0) * t
    }
}
