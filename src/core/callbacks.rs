use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::core::style::ShapeStyle;
use crate::core::value::{FieldValue, Record};

/// Axis label formatter: raw scale value to display text.
pub type LabelFormatterFn = Arc<dyn Fn(&FieldValue) -> String + Send + Sync + 'static>;
/// Per-element style evaluated for each rendered record.
pub type StyleFn = Arc<dyn Fn(&Record) -> ShapeStyle + Send + Sync + 'static>;
/// Per-element color or shape selection.
pub type MappingFn = Arc<dyn Fn(&Record) -> String + Send + Sync + 'static>;
/// Handler for a semantic plot event.
pub type PlotEventHandlerFn = Arc<dyn Fn(&PlotEvent) + Send + Sync + 'static>;

/// Event delivered to user handlers after engine-name translation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotEvent {
    /// Semantic name the handler was registered under (`onBarClick`).
    pub name: String,
    /// Engine event that triggered it (`interval:click`).
    pub engine_event: String,
    /// Geometry name in the chart type's own vocabulary (`bar`), when known.
    pub geometry: Option<String>,
    pub record: Option<Record>,
    pub x: f64,
    pub y: f64,
}

/// Typed callbacks that travel next to the declarative options document.
///
/// Callbacks must be pure: they run synchronously during render and must not
/// re-enter the layer.
#[derive(Clone, Default)]
pub struct PlotCallbacks {
    pub x_axis_formatter: Option<LabelFormatterFn>,
    pub y_axis_formatter: Option<LabelFormatterFn>,
    pub style: Option<StyleFn>,
    pub color: Option<MappingFn>,
    pub shape: Option<MappingFn>,
    pub events: IndexMap<String, PlotEventHandlerFn>,
}

impl PlotCallbacks {
    /// Right-biased merge: every callback set in `patch` replaces ours.
    pub fn overlay(&mut self, patch: PlotCallbacks) {
        if patch.x_axis_formatter.is_some() {
            self.x_axis_formatter = patch.x_axis_formatter;
        }
        if patch.y_axis_formatter.is_some() {
            self.y_axis_formatter = patch.y_axis_formatter;
        }
        if patch.style.is_some() {
            self.style = patch.style;
        }
        if patch.color.is_some() {
            self.color = patch.color;
        }
        if patch.shape.is_some() {
            self.shape = patch.shape;
        }
        self.events.extend(patch.events);
    }
}

impl fmt::Debug for PlotCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotCallbacks")
            .field("x_axis_formatter", &self.x_axis_formatter.is_some())
            .field("y_axis_formatter", &self.y_axis_formatter.is_some())
            .field("style", &self.style.is_some())
            .field("color", &self.color.is_some())
            .field("shape", &self.shape.is_some())
            .field("events", &self.events.keys().collect::<Vec<_>>())
            .finish()
    }
}
