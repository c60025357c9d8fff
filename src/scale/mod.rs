//! Numeric scales and the geographic projection.

pub mod linear;
pub mod projection;
pub mod sqrt;
pub(crate) mod ticks;
