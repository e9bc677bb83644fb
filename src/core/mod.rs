//! Data model shared by the pipeline, the engine view and components.

pub mod axis;
pub mod callbacks;
pub mod geometry;
pub mod options;
pub mod scale;
pub mod style;
pub mod value;

pub use axis::{AxisPosition, AxisStyleOverride, AxisTitle};
pub use callbacks::{
    LabelFormatterFn, MappingFn, PlotCallbacks, PlotEvent, PlotEventHandlerFn, StyleFn,
};
pub use geometry::{
    ColorMapping, ColorSource, CoordinateSpec, GeometryDescriptor, GeometryKind, LabelSpec,
    ShapeMapping, SizeMapping, StyleSource,
};
pub use options::{
    AnnotationAnchor, AnnotationOptions, AxisElementOptions, AxisOptions, AxisStyleOptions,
    AxisTitleOptions, ColorOption, CrosshairsOptions, FieldList, LabelOptions, LegendOptions,
    Padding, PlotOptions, PointMarkerOptions, QuadrantLabelOptions, QuadrantOptions,
    RegressionKind, SizeOption, TextGuideOptions, TooltipOptions, TrendlineOptions,
};
pub use scale::{DEFAULT_TICK_COUNT, LinearScale, MAX_TICKS, ScaleDefinition, ScaleKind, nice_step};
pub use style::ShapeStyle;
pub use value::{FieldValue, Record, field, record};
