use crate::foundation::core::{BezPath, Canvas, Color, Point, Rect};

/// Identity of a data-backed shape, stable across redraws of the same data.
///
/// Interaction and animation address shapes through their key, never through layer
/// positions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKey {
    /// The time-series line.
    Line,
    /// Time-series point marker, by year.
    Point(i32),
    /// Flow arc, by destination code.
    Arc(String),
    /// Country boundary, by code.
    Boundary(String),
    /// The flow origin marker.
    Origin,
    /// Tooltip box.
    Tooltip,
}

impl ShapeKey {
    /// Whether pointer hover over this shape is meaningful.
    pub fn is_hoverable(&self) -> bool {
        matches!(self, ShapeKey::Point(_) | ShapeKey::Arc(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextShape {
    pub pos: Point,
    pub text: String,
    pub font_size: f64,
    pub anchor: TextAnchor,
    pub bold: bool,
    /// Rotation in degrees around `pos`.
    pub rotate_deg: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    Path(BezPath),
    Circle { center: Point, radius: f64 },
    Line { from: Point, to: Point },
    Rect { rect: Rect, corner_radius: f64 },
    Text(TextShape),
}

/// Paint attributes. `None` paints mean "not painted".
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub stroke_opacity: f64,
    pub opacity: f64,
    pub dash: Option<Vec<f64>>,
    pub dash_offset: f64,
    pub line_cap: LineCap,
    pub round_join: bool,
    /// Id of a [`MarkerDef`] drawn at the path end.
    pub marker_end: Option<String>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            stroke_opacity: 1.0,
            opacity: 1.0,
            dash: None,
            dash_offset: 0.0,
            line_cap: LineCap::Butt,
            round_join: false,
            marker_end: None,
        }
    }
}

impl Style {
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            ..Self::default()
        }
    }

    pub fn stroked(color: Color, width: f64) -> Self {
        Self {
            stroke: Some(color),
            stroke_width: width,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub key: Option<ShapeKey>,
    /// Emitted as the SVG `id` attribute.
    pub id: Option<String>,
    pub kind: ShapeKind,
    pub style: Style,
}

impl Shape {
    pub fn new(kind: ShapeKind, style: Style) -> Self {
        Self {
            key: None,
            id: None,
            kind,
            style,
        }
    }

    pub fn keyed(mut self, key: ShapeKey) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// An ordered, named group of shapes; later shapes paint over earlier ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layer {
    pub name: String,
    pub shapes: Vec<Shape>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shapes: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn find(&self, key: &ShapeKey) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.key.as_ref() == Some(key))
    }

    pub fn find_mut(&mut self, key: &ShapeKey) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.key.as_ref() == Some(key))
    }
}

/// Arrowhead-style marker referenced by `Style::marker_end`.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerDef {
    pub id: String,
    pub view_box: Rect,
    pub ref_point: Point,
    pub width: f64,
    pub height: f64,
    pub path: BezPath,
    pub fill: Color,
}

/// A complete frame: viewport, marker definitions and layers bottom-to-top.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub canvas: Canvas,
    pub defs: Vec<MarkerDef>,
    pub layers: Vec<Layer>,
}

impl Scene {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            defs: Vec::new(),
            layers: Vec::new(),
        }
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn shape_count(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }

    pub fn find(&self, key: &ShapeKey) -> Option<&Shape> {
        self.layers.iter().find_map(|l| l.find(key))
    }

    pub fn find_mut(&mut self, key: &ShapeKey) -> Option<&mut Shape> {
        self.layers.iter_mut().find_map(|l| l.find_mut(key))
    }

    pub fn layer_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.name == name)
    }
}
