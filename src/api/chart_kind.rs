use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::core::{
    CoordinateSpec, GeometryDescriptor, GeometryKind, PlotCallbacks, PlotOptions,
    ScaleDefinition, ScaleKind, ShapeMapping, ShapeStyle, SizeMapping, SizeOption, StyleSource,
};
use crate::error::{PlotError, PlotResult};
use crate::extensions::{PlotComponent, Quadrant, Trendline};

use super::axis_resolver::{ResolvedAxis, resolve_axis};
use super::event_registry::{
    EventMapping, bar_event_mapping, bubble_event_mapping, column_event_mapping,
    line_event_mapping, scatter_event_mapping,
};

/// Closed set of chart types riding on the shared pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Column,
    Line,
    Scatter,
    Bubble,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Bar,
        ChartKind::Column,
        ChartKind::Line,
        ChartKind::Scatter,
        ChartKind::Bubble,
    ];

    #[must_use]
    pub fn spec(self) -> &'static ChartTypeSpec {
        match self {
            Self::Bar => &BAR,
            Self::Column => &COLUMN,
            Self::Line => &LINE,
            Self::Scatter => &SCATTER,
            Self::Bubble => &BUBBLE,
        }
    }
}

/// Which resolved scale feeds the first position slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionOrder {
    /// `[xField, yField]`.
    XY,
    /// `[yField, xField]`, used by transposed chart types.
    YX,
}

/// Scales produced by a chart type's scale hook.
#[derive(Debug, Clone)]
pub struct ScaleSet {
    pub x: ResolvedAxis,
    pub y: ResolvedAxis,
    /// Non-positional scales (size, color) with no axis.
    pub extra: Vec<ScaleDefinition>,
}

pub type ScaleHook = fn(&PlotOptions, &PlotCallbacks) -> PlotResult<ScaleSet>;
pub type EncodeHook = fn(&PlotOptions, &PlotCallbacks, GeometryDescriptor) -> GeometryDescriptor;
pub type ComponentHook = fn(&PlotOptions) -> Vec<Box<dyn PlotComponent>>;

/// One geometry a chart type contributes to the view.
#[derive(Clone, Copy)]
pub struct GeometryPlan {
    /// Name in the chart type's vocabulary, looked up in the geometry table.
    pub name: &'static str,
    pub order: PositionOrder,
    /// The geometry carrying labels, tooltips and the user style callback.
    pub primary: bool,
    pub enabled: fn(&PlotOptions) -> bool,
    pub encode: EncodeHook,
}

/// Plain configuration record describing one chart type.
pub struct ChartTypeSpec {
    pub kind: ChartKind,
    pub tag: &'static str,
    pub defaults: fn() -> Value,
    /// Plot vocabulary to engine primitive.
    pub geometry_table: &'static [(&'static str, GeometryKind)],
    /// Declared, never inferred from field types.
    pub transposed: bool,
    pub geometries: &'static [GeometryPlan],
    pub event_mapping: fn() -> EventMapping,
    pub scale_hook: ScaleHook,
    pub component_hook: ComponentHook,
}

impl ChartTypeSpec {
    #[must_use]
    pub fn engine_geometry(&self, name: &str) -> Option<GeometryKind> {
        self.geometry_table
            .iter()
            .find(|(plot_name, _)| *plot_name == name)
            .map(|(_, kind)| *kind)
    }

    /// Inverse lookup used to name engine geometries in plot events.
    #[must_use]
    pub fn plot_geometry(&self, kind: GeometryKind) -> Option<&'static str> {
        self.geometry_table
            .iter()
            .find(|(_, engine_kind)| *engine_kind == kind)
            .map(|(plot_name, _)| *plot_name)
    }

    #[must_use]
    pub fn coordinate(&self) -> CoordinateSpec {
        if self.transposed {
            CoordinateSpec::transposed()
        } else {
            CoordinateSpec::rect()
        }
    }
}

impl fmt::Debug for GeometryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeometryPlan")
            .field("name", &self.name)
            .field("order", &self.order)
            .field("primary", &self.primary)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for ChartTypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartTypeSpec")
            .field("kind", &self.kind)
            .field("tag", &self.tag)
            .field("geometry_table", &self.geometry_table)
            .field("transposed", &self.transposed)
            .field("geometries", &self.geometries)
            .finish_non_exhaustive()
    }
}

static BAR: ChartTypeSpec = ChartTypeSpec {
    kind: ChartKind::Bar,
    tag: "bar",
    defaults: bar_defaults,
    geometry_table: &[("bar", GeometryKind::Interval)],
    transposed: true,
    geometries: &[GeometryPlan {
        name: "bar",
        order: PositionOrder::YX,
        primary: true,
        enabled: always,
        encode: encode_bar,
    }],
    event_mapping: bar_event_mapping,
    scale_hook: position_scales,
    component_hook: no_components,
};

static COLUMN: ChartTypeSpec = ChartTypeSpec {
    kind: ChartKind::Column,
    tag: "column",
    defaults: column_defaults,
    geometry_table: &[("column", GeometryKind::Interval)],
    transposed: false,
    geometries: &[GeometryPlan {
        name: "column",
        order: PositionOrder::XY,
        primary: true,
        enabled: always,
        encode: encode_column,
    }],
    event_mapping: column_event_mapping,
    scale_hook: position_scales,
    component_hook: no_components,
};

static LINE: ChartTypeSpec = ChartTypeSpec {
    kind: ChartKind::Line,
    tag: "line",
    defaults: line_defaults,
    geometry_table: &[("line", GeometryKind::Line), ("point", GeometryKind::Point)],
    transposed: false,
    geometries: &[
        GeometryPlan {
            name: "line",
            order: PositionOrder::XY,
            primary: true,
            enabled: always,
            encode: encode_line,
        },
        GeometryPlan {
            name: "point",
            order: PositionOrder::XY,
            primary: false,
            enabled: line_points_visible,
            encode: encode_line_points,
        },
    ],
    event_mapping: line_event_mapping,
    scale_hook: position_scales,
    component_hook: no_components,
};

static SCATTER: ChartTypeSpec = ChartTypeSpec {
    kind: ChartKind::Scatter,
    tag: "scatter",
    defaults: scatter_defaults,
    geometry_table: &[("scatter", GeometryKind::Point)],
    transposed: false,
    geometries: &[GeometryPlan {
        name: "scatter",
        order: PositionOrder::XY,
        primary: true,
        enabled: always,
        encode: encode_points,
    }],
    event_mapping: scatter_event_mapping,
    scale_hook: position_scales,
    component_hook: point_components,
};

static BUBBLE: ChartTypeSpec = ChartTypeSpec {
    kind: ChartKind::Bubble,
    tag: "bubble",
    defaults: bubble_defaults,
    geometry_table: &[("bubble", GeometryKind::Point)],
    transposed: false,
    geometries: &[GeometryPlan {
        name: "bubble",
        order: PositionOrder::XY,
        primary: true,
        enabled: always,
        encode: encode_points,
    }],
    event_mapping: bubble_event_mapping,
    scale_hook: bubble_scales,
    component_hook: point_components,
};

fn bar_defaults() -> Value {
    json!({
        "xAxis": {
            "style": {
                "line": { "visible": false },
                "tickLine": { "visible": false },
                "grid": { "visible": true }
            }
        },
        "yAxis": {
            "style": {
                "line": { "visible": true },
                "tickLine": { "visible": true },
                "grid": { "visible": false }
            }
        },
        "tooltip": { "shared": true, "crosshairs": { "type": "rect" } },
        "label": { "position": "right" },
        "legend": { "position": "top-left" }
    })
}

fn column_defaults() -> Value {
    json!({
        "tooltip": { "shared": true, "crosshairs": { "type": "rect" } },
        "label": { "position": "top" },
        "legend": { "position": "top-left" }
    })
}

fn line_defaults() -> Value {
    json!({
        "lineSize": 2,
        "smooth": false,
        "point": { "visible": false, "size": 3, "shape": "circle" },
        "tooltip": { "shared": true, "crosshairs": { "type": "y" } },
        "legend": { "position": "top-left" }
    })
}

fn scatter_defaults() -> Value {
    json!({
        "pointSize": 4,
        "pointStyle": { "strokeOpacity": 1, "fillOpacity": 0.4, "opacity": 0.65 },
        "shape": "circle",
        "xAxis": { "style": { "grid": { "visible": true } } },
        "tooltip": { "visible": true, "shared": false, "crosshairs": { "type": "rect" } },
        "label": { "visible": false, "position": "top" }
    })
}

fn bubble_defaults() -> Value {
    json!({
        "pointSize": [4, 30],
        "pointStyle": { "lineWidth": 1, "strokeOpacity": 1, "fillOpacity": 0.95 },
        "shape": "circle",
        "xAxis": { "style": { "grid": { "visible": true } } },
        "tooltip": { "visible": true, "shared": false },
        "label": { "visible": false, "position": "top" }
    })
}

fn always(_: &PlotOptions) -> bool {
    true
}

fn line_points_visible(options: &PlotOptions) -> bool {
    options.point.visible
}

fn required<'a>(value: Option<&'a String>, key: &'static str) -> PlotResult<&'a str> {
    value
        .map(String::as_str)
        .filter(|field| !field.is_empty())
        .ok_or(PlotError::MissingField { field: key })
}

/// Resolves the x and y scales from `xField`/`xAxis` and `yField`/`yAxis`.
fn position_scales(options: &PlotOptions, callbacks: &PlotCallbacks) -> PlotResult<ScaleSet> {
    let x_field = required(options.x_field.as_ref(), "xField")?;
    let y_field = required(options.y_field.as_ref(), "yField")?;
    Ok(ScaleSet {
        x: resolve_axis(x_field, &options.x_axis, callbacks.x_axis_formatter.clone()),
        y: resolve_axis(y_field, &options.y_axis, callbacks.y_axis_formatter.clone()),
        extra: Vec::new(),
    })
}

fn bubble_scales(options: &PlotOptions, callbacks: &PlotCallbacks) -> PlotResult<ScaleSet> {
    let mut scales = position_scales(options, callbacks)?;
    if let Some(size_field) = options.size_field.as_deref() {
        scales
            .extra
            .push(ScaleDefinition::new(size_field).with_kind(ScaleKind::Linear));
    }
    Ok(scales)
}

fn static_or_dynamic(
    callbacks: &PlotCallbacks,
    style: Option<&ShapeStyle>,
) -> Option<StyleSource> {
    match (&callbacks.style, style) {
        (Some(style_fn), _) => Some(StyleSource::Dynamic(style_fn.clone())),
        (None, Some(style)) => Some(StyleSource::Static(style.clone())),
        (None, None) => None,
    }
}

fn encode_bar(
    options: &PlotOptions,
    callbacks: &PlotCallbacks,
    mut geometry: GeometryDescriptor,
) -> GeometryDescriptor {
    geometry.size = options.bar_size.map(SizeMapping::Fixed);
    geometry.style = static_or_dynamic(callbacks, options.bar_style.as_ref());
    geometry
}

fn encode_column(
    options: &PlotOptions,
    callbacks: &PlotCallbacks,
    mut geometry: GeometryDescriptor,
) -> GeometryDescriptor {
    geometry.size = options.column_size.map(SizeMapping::Fixed);
    geometry.style = static_or_dynamic(callbacks, options.column_style.as_ref());
    geometry
}

fn encode_line(
    options: &PlotOptions,
    callbacks: &PlotCallbacks,
    mut geometry: GeometryDescriptor,
) -> GeometryDescriptor {
    geometry.size = options.line_size.map(SizeMapping::Fixed);
    let shape = if options.smooth { "smooth" } else { "line" };
    geometry.shape = Some(ShapeMapping::Fixed(shape.to_owned()));
    geometry.style = static_or_dynamic(callbacks, options.line_style.as_ref());
    geometry
}

fn encode_line_points(
    options: &PlotOptions,
    _callbacks: &PlotCallbacks,
    mut geometry: GeometryDescriptor,
) -> GeometryDescriptor {
    geometry.size = options.point.size.map(SizeMapping::Fixed);
    geometry.shape = options.point.shape.clone().map(ShapeMapping::Fixed);
    geometry.style = options.point.style.clone().map(StyleSource::Static);
    geometry
}

fn encode_points(
    options: &PlotOptions,
    callbacks: &PlotCallbacks,
    mut geometry: GeometryDescriptor,
) -> GeometryDescriptor {
    geometry.size = match (options.size_field.as_deref(), options.point_size) {
        (Some(field), Some(size @ SizeOption::Range(_))) => Some(SizeMapping::Field {
            field: field.to_owned(),
            range: size.range(),
        }),
        (_, Some(size)) => Some(SizeMapping::Fixed(size.range()[0])),
        (_, None) => None,
    };
    geometry.shape = match (&callbacks.shape, &options.shape) {
        (Some(shape_fn), _) => Some(ShapeMapping::Callback(shape_fn.clone())),
        (None, Some(shape)) => Some(ShapeMapping::Fixed(shape.clone())),
        (None, None) => None,
    };
    geometry.style = static_or_dynamic(callbacks, options.point_style.as_ref());
    geometry
}

fn no_components(_: &PlotOptions) -> Vec<Box<dyn PlotComponent>> {
    Vec::new()
}

/// Quadrant and trendline overlays for point charts.
fn point_components(options: &PlotOptions) -> Vec<Box<dyn PlotComponent>> {
    let mut components: Vec<Box<dyn PlotComponent>> = Vec::new();
    if let Some(quadrant) = options.quadrant.as_ref().filter(|quadrant| quadrant.visible) {
        components.push(Box::new(Quadrant::new(quadrant.clone())));
    }
    if let Some(trendline) = options.trendline.as_ref().filter(|trendline| trendline.visible) {
        components.push(Box::new(Trendline::new(trendline.clone())));
    }
    components
}
