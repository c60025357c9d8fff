//! Pointer hit testing, hover emphasis and tooltips.

pub mod hit;
pub mod hover;
pub mod tooltip;
