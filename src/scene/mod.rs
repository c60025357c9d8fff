//! Retained shape model and its SVG/PNG outputs.

pub mod raster;
pub mod shape;
pub mod svg;

pub use shape::{
    Layer, LineCap, MarkerDef, Scene, Shape, ShapeKey, ShapeKind, Style, TextAnchor, TextShape,
};
