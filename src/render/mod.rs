//! Pure layer builders and the stage that schedules them.
//!
//! Builders take data and mappings and return fresh [`Layer`](crate::scene::Layer)s; they
//! never look at previous output. [`stage::Stage`] decides when to call them.

pub mod curve;
pub mod flow_map;
pub mod line_chart;
pub mod stage;
