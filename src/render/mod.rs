mod headless_view;
mod snapshot;
mod ticks;

pub use headless_view::HeadlessView;
pub use snapshot::{
    AnnotationSnapshot, AxisLabelItem, AxisSnapshot, AxisTitleSnapshot, ElementSnapshot,
    GeometrySnapshot, LegendItem, LegendSnapshot, VIEW_SNAPSHOT_JSON_SCHEMA_V1, ViewCall,
    ViewSnapshot, ViewSnapshotJsonContractV1,
};
pub use ticks::{infer_scale_kind, resolve_ticks};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{
    AnnotationOptions, AxisStyleOverride, CoordinateSpec, GeometryDescriptor, GeometryKind,
    Padding, Record, ScaleDefinition, ShapeStyle,
};
use crate::error::PlotResult;

/// Host element the view draws into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub id: String,
    pub width: u32,
    pub height: u32,
}

impl Container {
    #[must_use]
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GeometryId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnnotationId(pub u64);

/// Annotation handed to the view, tagged with the component that owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSpec {
    pub annotation: AnnotationOptions,
    pub owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipSpec {
    pub shared: bool,
    pub crosshairs: Option<String>,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegendSpec {
    pub position: String,
}

/// Title or description text drawn above the plotting region.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextGuide {
    pub text: String,
    pub style: ShapeStyle,
}

/// Low-level interaction event raised by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewEvent {
    pub name: String,
    pub geometry: Option<GeometryKind>,
    pub record: Option<Record>,
    pub x: f64,
    pub y: f64,
}

impl ViewEvent {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            geometry: None,
            record: None,
            x: 0.0,
            y: 0.0,
        }
    }

    #[must_use]
    pub fn on_geometry(mut self, geometry: GeometryKind, record: Record) -> Self {
        self.geometry = Some(geometry);
        self.record = Some(record);
        self
    }
}

pub type ViewEventHandlerFn = Arc<dyn Fn(&ViewEvent) + Send + Sync + 'static>;

/// Contract of the grammar-of-graphics view driven by a plot layer.
///
/// The layer calls these in stage order (scales, coordinate, geometries,
/// annotations, animation, events) and then `render`. Components use the
/// same contract to add and later remove the elements they own.
pub trait EngineView {
    fn container(&self) -> &Container;

    fn set_padding(&mut self, padding: Padding);
    fn set_title(&mut self, title: Option<TextGuide>);
    fn set_description(&mut self, description: Option<TextGuide>);
    fn source(&mut self, data: &[Record]);
    fn data(&self) -> &[Record];

    fn scale(&mut self, definition: ScaleDefinition);
    fn scale_definition(&self, field: &str) -> Option<&ScaleDefinition>;
    /// `None` disables the axis for `field` entirely.
    fn axis(&mut self, field: &str, axis: Option<AxisStyleOverride>);
    fn coordinate(&mut self, coordinate: CoordinateSpec);
    fn tooltip(&mut self, tooltip: Option<TooltipSpec>);
    /// `None` disables the legend for `field`.
    fn legend(&mut self, field: &str, legend: Option<LegendSpec>);

    fn add_geometry(&mut self, geometry: GeometryDescriptor) -> GeometryId;
    fn remove_geometry(&mut self, id: GeometryId) -> bool;
    fn set_animation(&mut self, id: GeometryId, enabled: bool) -> PlotResult<()>;

    fn add_annotation(&mut self, annotation: AnnotationSpec) -> AnnotationId;
    fn remove_annotation(&mut self, id: AnnotationId) -> bool;

    fn on(&mut self, engine_event: &str, handler: ViewEventHandlerFn);

    fn render(&mut self) -> PlotResult<()>;
    fn change_data(&mut self, data: &[Record]);
    /// Drops every scale, guide, geometry, annotation and handler, keeping data.
    fn clear(&mut self);
    fn destroy(&mut self);
    fn is_destroyed(&self) -> bool;
}

