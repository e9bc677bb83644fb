use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::callbacks::{MappingFn, StyleFn};
use crate::core::style::ShapeStyle;
use crate::core::value::Record;

/// Rendering primitives of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    Point,
    Interval,
    Line,
    Area,
}

impl GeometryKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Interval => "interval",
            Self::Line => "line",
            Self::Area => "area",
        }
    }
}

/// Coordinate system applied after scales resolve positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoordinateSpec {
    /// Horizontal and vertical roles of the two position fields are swapped.
    pub transposed: bool,
}

impl CoordinateSpec {
    #[must_use]
    pub fn rect() -> Self {
        Self { transposed: false }
    }

    #[must_use]
    pub fn transposed() -> Self {
        Self { transposed: true }
    }
}

#[derive(Clone)]
pub enum ColorSource {
    Single(String),
    Palette(Vec<String>),
    Callback(MappingFn),
}

/// Color encoding of a geometry.
#[derive(Clone)]
pub struct ColorMapping {
    /// Fields feeding the mapping; empty for a constant color.
    pub fields: Vec<String>,
    pub source: ColorSource,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SizeMapping {
    Fixed(f64),
    Field { field: String, range: [f64; 2] },
}

#[derive(Clone)]
pub enum ShapeMapping {
    Fixed(String),
    Callback(MappingFn),
}

/// Static style or a function of the record, evaluated per rendered element.
#[derive(Clone)]
pub enum StyleSource {
    Static(ShapeStyle),
    Dynamic(StyleFn),
}

impl StyleSource {
    #[must_use]
    pub fn evaluate(&self, record: &Record) -> ShapeStyle {
        match self {
            Self::Static(style) => style.clone(),
            Self::Dynamic(style_fn) => style_fn(record),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelSpec {
    pub field: String,
    pub position: Option<String>,
    pub style: ShapeStyle,
}

/// One geometry bound to scales, ready to hand to the engine.
#[derive(Clone)]
pub struct GeometryDescriptor {
    pub kind: GeometryKind,
    /// Name in the chart type's own vocabulary (`bar`, `scatter`, ...).
    pub name: String,
    /// Position fields; the first maps to the horizontal axis unless the
    /// coordinate system is transposed.
    pub position: SmallVec<[String; 2]>,
    pub color: Option<ColorMapping>,
    pub size: Option<SizeMapping>,
    pub shape: Option<ShapeMapping>,
    pub style: Option<StyleSource>,
    pub label: Option<LabelSpec>,
    pub tooltip_fields: Vec<String>,
    pub animate: bool,
    /// Geometry-local data; `None` renders the view's data source.
    pub data: Option<Vec<Record>>,
    /// Component id for add-on geometries.
    pub owner: Option<String>,
}

impl GeometryDescriptor {
    #[must_use]
    pub fn new(kind: GeometryKind, name: impl Into<String>, position: [&str; 2]) -> Self {
        Self {
            kind,
            name: name.into(),
            position: position.iter().map(|field| (*field).to_owned()).collect(),
            color: None,
            size: None,
            shape: None,
            style: None,
            label: None,
            tooltip_fields: Vec::new(),
            animate: true,
            data: None,
            owner: None,
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: StyleSource) -> Self {
        self.style = Some(style);
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: Vec<Record>) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn owned_by(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}

impl fmt::Debug for GeometryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeometryDescriptor")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("position", &self.position)
            .field("color_fields", &self.color.as_ref().map(|color| &color.fields))
            .field("size", &self.size)
            .field("has_shape", &self.shape.is_some())
            .field("has_style", &self.style.is_some())
            .field("label", &self.label)
            .field("animate", &self.animate)
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}
