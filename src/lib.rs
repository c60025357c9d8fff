//! Storyviz renders two data-story charts as retained scenes:
//!
//! - an animated time-series line chart ([`LineChart`]) with a draw-in reveal, hoverable
//!   point markers and tooltips;
//! - a geographic flow map ([`FlowMap`]) of weighted arcs from one origin country, with a
//!   year selector and a looping playback.
//!
//! Hosts mount a chart, deliver fetched inputs, drive it with an explicit clock and read
//! frames back as [`Scene`]s, which serialize to SVG or rasterize to RGBA.
#![forbid(unsafe_code)]

mod foundation;

pub mod animation;
pub mod chart;
pub mod config;
pub mod data;
pub mod interaction;
pub mod render;
pub mod scale;
pub mod scene;

pub use crate::foundation::core::{BezPath, Canvas, Color, Margins, Point, Rect, TimeMs, Vec2};
pub use crate::foundation::error::{VizError, VizResult};

pub use crate::chart::{FlowMap, LineChart, ViewState};
pub use crate::config::{FlowMapConfig, LineChartConfig, VizConfig};
pub use crate::data::load::{LoadFailure, LoadStatus};
pub use crate::scene::Scene;
pub use crate::scene::raster::{FrameRgba, RasterOpts, rasterize};
