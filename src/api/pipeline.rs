use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{PlotCallbacks, PlotEvent, PlotOptions, TextGuideOptions};
use crate::error::PlotResult;
use crate::render::{
    AnnotationSpec, EngineView, GeometryId, LegendSpec, TextGuide, TooltipSpec, ViewEvent,
    ViewEventHandlerFn,
};

use super::chart_kind::{ChartTypeSpec, ScaleSet};
use super::event_registry::EventMapping;
use super::geometry_binder::bind;

/// Configuration stages applied to the view, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Scale,
    Coordinate,
    Geometry,
    Annotation,
    Animation,
    EventParsing,
}

impl PipelineStage {
    pub const ORDERED: [PipelineStage; 6] = [
        PipelineStage::Scale,
        PipelineStage::Coordinate,
        PipelineStage::Geometry,
        PipelineStage::Annotation,
        PipelineStage::Animation,
        PipelineStage::EventParsing,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scale => "scale",
            Self::Coordinate => "coordinate",
            Self::Geometry => "geometry",
            Self::Annotation => "annotation",
            Self::Animation => "animation",
            Self::EventParsing => "event_parsing",
        }
    }
}

/// Read-only inputs shared by every stage.
pub(crate) struct StageInput<'a> {
    pub spec: &'static ChartTypeSpec,
    pub options: &'a PlotOptions,
    pub callbacks: &'a PlotCallbacks,
    pub events: Option<&'a EventMapping>,
}

/// Values one stage hands to the next.
#[derive(Default)]
struct StageState {
    scales: Option<ScaleSet>,
    geometries: Vec<GeometryId>,
}

/// Runs all six stages against `view`. Stops at the first failing stage,
/// leaving the view partially configured.
pub(crate) fn run_stages(
    view: &mut dyn EngineView,
    input: &StageInput<'_>,
) -> PlotResult<Vec<GeometryId>> {
    let mut state = StageState::default();
    for stage in PipelineStage::ORDERED {
        debug!(chart = input.spec.tag, stage = stage.as_str(), "running pipeline stage");
        match stage {
            PipelineStage::Scale => scale_stage(view, input, &mut state)?,
            PipelineStage::Coordinate => view.coordinate(input.spec.coordinate()),
            PipelineStage::Geometry => geometry_stage(view, input, &mut state)?,
            PipelineStage::Annotation => annotation_stage(view, input.options),
            PipelineStage::Animation => animation_stage(view, input.options, &state)?,
            PipelineStage::EventParsing => event_stage(view, input),
        }
    }
    Ok(state.geometries)
}

fn text_guide(options: &TextGuideOptions) -> Option<TextGuide> {
    options.visible.then(|| TextGuide {
        text: options.text.clone(),
        style: options.style.clone(),
    })
}

fn scale_stage(
    view: &mut dyn EngineView,
    input: &StageInput<'_>,
    state: &mut StageState,
) -> PlotResult<()> {
    let options = input.options;
    view.source(&options.data);
    view.set_padding(options.padding);
    view.set_title(text_guide(&options.title));
    view.set_description(text_guide(&options.description));

    let scales = (input.spec.scale_hook)(options, input.callbacks)?;
    view.scale(scales.x.scale.clone());
    view.scale(scales.y.scale.clone());
    for extra in &scales.extra {
        view.scale(extra.clone());
    }
    view.axis(&scales.x.scale.field, scales.x.axis.clone());
    view.axis(&scales.y.scale.field, scales.y.axis.clone());

    state.scales = Some(scales);
    Ok(())
}

fn geometry_stage(
    view: &mut dyn EngineView,
    input: &StageInput<'_>,
    state: &mut StageState,
) -> PlotResult<()> {
    let Some(scales) = state.scales.as_ref() else {
        return Ok(());
    };
    let options = input.options;
    let geometries = bind(input.spec, scales, options, input.callbacks)?;
    let tooltip_fields = geometries
        .first()
        .map(|geometry| geometry.tooltip_fields.clone())
        .unwrap_or_default();
    for geometry in geometries {
        state.geometries.push(view.add_geometry(geometry));
    }

    view.tooltip(options.tooltip.visible.then(|| TooltipSpec {
        shared: options.tooltip.shared,
        crosshairs: options
            .tooltip
            .crosshairs
            .as_ref()
            .map(|crosshairs| crosshairs.kind.clone()),
        fields: tooltip_fields,
    }));
    for color_field in options.color_fields() {
        view.legend(
            color_field,
            options.legend.visible.then(|| LegendSpec {
                position: options.legend.position.clone(),
            }),
        );
    }
    Ok(())
}

fn annotation_stage(view: &mut dyn EngineView, options: &PlotOptions) {
    for annotation in &options.annotations {
        view.add_annotation(AnnotationSpec {
            annotation: annotation.clone(),
            owner: None,
        });
    }
}

fn animation_stage(
    view: &mut dyn EngineView,
    options: &PlotOptions,
    state: &StageState,
) -> PlotResult<()> {
    if options.animation {
        return Ok(());
    }
    for id in &state.geometries {
        view.set_animation(*id, false)?;
    }
    Ok(())
}

/// Binds user handlers through the chart type's event mapping. Handlers see
/// the semantic name and the chart type's geometry name, never engine names
/// alone.
fn event_stage(view: &mut dyn EngineView, input: &StageInput<'_>) {
    if input.callbacks.events.is_empty() {
        return;
    }
    let Some(mapping) = input.events else {
        warn!(chart = input.spec.tag, "no event mapping registered; handlers not bound");
        return;
    };
    let spec = input.spec;
    for (name, handler) in &input.callbacks.events {
        let Some(engine_event) = mapping.engine_event(name) else {
            warn!(chart = spec.tag, event = %name, "unknown plot event; skipping handler");
            continue;
        };
        let name = name.clone();
        let handler = Arc::clone(handler);
        let wrapped: ViewEventHandlerFn = Arc::new(move |event: &ViewEvent| {
            handler(&PlotEvent {
                name: name.clone(),
                engine_event: event.name.clone(),
                geometry: event
                    .geometry
                    .and_then(|kind| spec.plot_geometry(kind))
                    .map(str::to_owned),
                record: event.record.clone(),
                x: event.x,
                y: event.y,
            });
        });
        view.on(engine_event, wrapped);
    }
}
