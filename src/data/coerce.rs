/// How a raw table field becomes a number.
///
/// Numeric cleaning never raises an error; the policy only decides whether an unparsable
/// field becomes `0` or disqualifies its row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NumericCoercion {
    /// Missing, empty and non-numeric fields become `0`.
    Permissive,
    /// Missing, empty and non-numeric fields yield `None`; callers drop the row.
    Strict,
}

impl NumericCoercion {
    /// Coerce a raw field to a finite number according to the policy.
    pub fn number(self, raw: Option<&str>) -> Option<f64> {
        let parsed = raw.and_then(parse_finite);
        match self {
            Self::Permissive => Some(parsed.unwrap_or(0.0)),
            Self::Strict => parsed,
        }
    }

    /// Coerce a raw field to a year. Fractional input is truncated toward zero.
    pub fn year(self, raw: Option<&str>) -> Option<i32> {
        let v = self.number(raw)?;
        if v < f64::from(i32::MIN) || v > f64::from(i32::MAX) {
            return match self {
                Self::Permissive => Some(0),
                Self::Strict => None,
            };
        }
        Some(v.trunc() as i32)
    }
}

/// Sum several fields, each counted as `0` when missing or non-numeric.
pub fn lenient_sum<'a>(fields: impl IntoIterator<Item = Option<&'a str>>) -> f64 {
    fields
        .into_iter()
        .map(|f| NumericCoercion::Permissive.number(f).unwrap_or(0.0))
        .sum()
}

fn parse_finite(raw: &str) -> Option<f64> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
#[path = "../../tests/unit/data/coerce.rs"]
mod tests;
