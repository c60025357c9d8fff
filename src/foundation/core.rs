use crate::foundation::error::{VizError, VizResult};

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Milliseconds on the visualization's monotonic clock.
///
/// The host drives time explicitly; nothing in the crate reads a wall clock.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TimeMs(pub u64);

impl TimeMs {
    /// Return `self + ms`, saturating at `u64::MAX`.
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier` (zero if `earlier` is in the future).
    pub fn since(self, earlier: TimeMs) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Logical viewport size of a chart, independent of physical pixel density.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in logical pixels.
    pub width: f64,
    /// Height in logical pixels.
    pub height: f64,
}

impl Canvas {
    /// Create a validated canvas with strictly positive, finite dimensions.
    pub fn new(width: f64, height: f64) -> VizResult<Self> {
        let c = Self { width, height };
        c.validate()?;
        Ok(c)
    }

    pub(crate) fn validate(self) -> VizResult<()> {
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(VizError::validation("canvas dimensions must be finite"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(VizError::validation("canvas dimensions must be > 0"));
        }
        Ok(())
    }

    /// Geometric center of the viewport.
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Full viewport rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Plot-area insets.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Straight-alpha RGBA color with 8-bit channels and a float alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub a: f64,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional).
    pub fn parse_hex(s: &str) -> VizResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> VizResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| VizError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        match s.len() {
            3 => {
                let mut out = [0u8; 3];
                for (i, ch) in s.chars().enumerate() {
                    let pair: String = [ch, ch].iter().collect();
                    out[i] = hex_byte(&pair)?;
                }
                Ok(Self::rgb(out[0], out[1], out[2]))
            }
            6 if s.is_ascii() => Ok(Self::rgb(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            _ => Err(VizError::validation(format!(
                "color must be #rgb or #rrggbb, got \"{s}\""
            ))),
        }
    }

    /// Linear blend in straight-alpha space; `t = 0` is `self`, `t = 1` is `other`.
    pub fn mix(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| -> u8 {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
        };
        Color {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// CSS serialization: `#rrggbb` when opaque, `rgba(..)` otherwise.
    pub fn to_css(self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{})",
                self.r,
                self.g,
                self.b,
                crate::foundation::math::fmt_num(self.a.clamp(0.0, 1.0))
            )
        }
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<f64>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self::parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => {
                let to_u8 = |x: f64| x.clamp(0.0, 255.0).round() as u8;
                match v.as_slice() {
                    [r, g, b] => Ok(Self::rgb(to_u8(*r), to_u8(*g), to_u8(*b))),
                    [r, g, b, a] => Ok(Self::rgba(to_u8(*r), to_u8(*g), to_u8(*b), *a)),
                    _ => Err(serde::de::Error::custom(
                        "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                    )),
                }
            }
        }
    }
}

impl serde::Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_css())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
