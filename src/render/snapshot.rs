use serde::{Deserialize, Serialize};

use crate::core::{
    AnnotationOptions, AxisPosition, CoordinateSpec, FieldValue, GeometryKind, Padding,
    ShapeStyle,
};
use crate::error::{PlotError, PlotResult};

use super::{AnnotationId, Container, GeometryId, TextGuide, TooltipSpec};

pub const VIEW_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Typed state of a rendered view, used by tests and debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub container: Container,
    pub padding: Padding,
    pub title: Option<TextGuide>,
    pub description: Option<TextGuide>,
    pub coordinate: CoordinateSpec,
    pub axes: Vec<AxisSnapshot>,
    pub geometries: Vec<GeometrySnapshot>,
    pub annotations: Vec<AnnotationSnapshot>,
    pub legends: Vec<LegendSnapshot>,
    pub tooltip: Option<TooltipSpec>,
    pub event_bindings: Vec<String>,
}

impl ViewSnapshot {
    #[must_use]
    pub fn axis(&self, field: &str) -> Option<&AxisSnapshot> {
        self.axes.iter().find(|axis| axis.field == field)
    }

    /// Geometries added by the plot itself, excluding component-owned ones.
    pub fn plot_geometries(&self) -> impl Iterator<Item = &GeometrySnapshot> {
        self.geometries
            .iter()
            .filter(|geometry| geometry.owner.is_none())
    }

    pub fn owned_by<'a>(&'a self, owner: &'a str) -> impl Iterator<Item = &'a GeometrySnapshot> {
        self.geometries
            .iter()
            .filter(move |geometry| geometry.owner.as_deref() == Some(owner))
    }

    pub fn to_json_contract_v1_pretty(&self) -> PlotResult<String> {
        let payload = ViewSnapshotJsonContractV1 {
            schema_version: VIEW_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            PlotError::InvalidData(format!("failed to serialize view snapshot contract v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> PlotResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ViewSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: ViewSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            PlotError::InvalidData(format!("failed to parse view snapshot json payload: {e}"))
        })?;
        if payload.schema_version != VIEW_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(PlotError::InvalidData(format!(
                "unsupported view snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ViewSnapshot,
}

/// One drawn axis. Absent sub-elements are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSnapshot {
    pub field: String,
    pub position: AxisPosition,
    pub line: Option<ShapeStyle>,
    pub tick_line: Option<ShapeStyle>,
    pub grid: Option<ShapeStyle>,
    pub title: Option<AxisTitleSnapshot>,
    pub ticks: Vec<FieldValue>,
    pub label_items: Vec<AxisLabelItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTitleSnapshot {
    pub text: String,
    pub style: ShapeStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabelItem {
    pub value: FieldValue,
    pub text: String,
    pub text_style: ShapeStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    pub id: GeometryId,
    pub kind: GeometryKind,
    pub name: String,
    pub position: Vec<String>,
    pub owner: Option<String>,
    pub animate: bool,
    pub elements: Vec<ElementSnapshot>,
}

/// One rendered element with its lazily evaluated encodings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub index: usize,
    pub position: Vec<FieldValue>,
    pub color: Option<String>,
    pub size: Option<f64>,
    pub shape: Option<String>,
    pub style: Option<ShapeStyle>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSnapshot {
    pub id: AnnotationId,
    pub owner: Option<String>,
    pub annotation: AnnotationOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendSnapshot {
    pub field: String,
    pub position: String,
    pub items: Vec<LegendItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendItem {
    pub name: String,
    pub color: Option<String>,
}

/// Ordered log entry of one call the view received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum ViewCall {
    Padding,
    Title { visible: bool },
    Description { visible: bool },
    Source { records: usize },
    Scale { field: String },
    Axis { field: String, visible: bool },
    Coordinate { transposed: bool },
    Tooltip { visible: bool },
    Legend { field: String, visible: bool },
    AddGeometry { id: GeometryId, kind: GeometryKind, owner: Option<String> },
    RemoveGeometry { id: GeometryId },
    Animation { id: GeometryId, enabled: bool },
    AddAnnotation { id: AnnotationId, owner: Option<String> },
    RemoveAnnotation { id: AnnotationId },
    On { event: String },
    Render,
    ChangeData { records: usize },
    Clear,
    Destroy,
}
