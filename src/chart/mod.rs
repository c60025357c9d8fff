//! Chart instances: mount, feed data, drive with a clock, read frames.
//!
//! Each instance owns all of its state. Nothing is shared between instances and everything an
//! instance scheduled is released when it is unmounted or dropped.

pub mod flow_map;
pub mod line_chart;
pub mod view_state;

pub use flow_map::FlowMap;
pub use line_chart::LineChart;
pub use view_state::ViewState;
