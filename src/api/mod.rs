//! Option merging, chart-type registry and the plot-layer pipeline.

mod axis_resolver;
mod chart_kind;
mod component_manager;
mod config_merger;
mod defaults;
mod event_registry;
mod geometry_binder;
mod pipeline;
mod plot_layer;
mod user_options;

pub use axis_resolver::{ResolvedAxis, resolve_axis};
pub use chart_kind::{
    ChartKind, ChartTypeSpec, ComponentHook, EncodeHook, GeometryPlan, PositionOrder, ScaleHook,
    ScaleSet,
};
pub use component_manager::{ComponentManager, ComponentOrigin};
pub use config_merger::{deep_merge_into, merge_options};
pub use defaults::{DEFAULT_PALETTE, global_defaults};
pub use event_registry::{
    EventMapping, EventParserRegistry, bar_event_mapping, base_event_mapping,
    bubble_event_mapping, column_event_mapping, line_event_mapping, scatter_event_mapping,
};
pub use geometry_binder::bind;
pub use pipeline::PipelineStage;
pub use plot_layer::{LayerState, PlotLayer};
pub use user_options::UserOptions;
