use tracing::trace;

use crate::core::{
    ColorMapping, ColorOption, ColorSource, GeometryDescriptor, LabelSpec, PlotCallbacks,
    PlotOptions,
};
use crate::error::{PlotError, PlotResult};

use super::chart_kind::{ChartTypeSpec, PositionOrder, ScaleSet};
use super::defaults::DEFAULT_PALETTE;

/// Produces the geometry descriptors of a chart type from its resolved scales.
///
/// Position fields come from the scale set, ordered by each plan's
/// [`PositionOrder`]: transposed chart types list the y field first. Color
/// and label encodings are shared by every chart type; size, shape and style
/// come from the plan's encode hook. Only the primary geometry carries labels
/// and tooltip fields.
pub fn bind(
    spec: &ChartTypeSpec,
    scales: &ScaleSet,
    options: &PlotOptions,
    callbacks: &PlotCallbacks,
) -> PlotResult<Vec<GeometryDescriptor>> {
    let x_field = scales.x.scale.field.as_str();
    let y_field = scales.y.scale.field.as_str();
    let color = color_mapping(options, callbacks);

    let mut geometries = Vec::with_capacity(spec.geometries.len());
    for plan in spec.geometries {
        if !(plan.enabled)(options) {
            trace!(geometry = plan.name, "geometry disabled by options");
            continue;
        }
        let kind = spec.engine_geometry(plan.name).ok_or_else(|| {
            PlotError::InvalidOptions(format!(
                "chart type `{}` has no engine geometry for `{}`",
                spec.tag, plan.name
            ))
        })?;
        let position = match plan.order {
            PositionOrder::XY => [x_field, y_field],
            PositionOrder::YX => [y_field, x_field],
        };

        let mut geometry = GeometryDescriptor::new(kind, plan.name, position);
        geometry.color = Some(color.clone());
        if plan.primary {
            geometry.label = label_spec(options, position[1]);
            geometry.tooltip_fields = tooltip_fields(options, &position);
        }
        geometries.push((plan.encode)(options, callbacks, geometry));
    }
    Ok(geometries)
}

/// Callback beats palette beats single color. Without color fields a palette
/// collapses to its first entry.
fn color_mapping(options: &PlotOptions, callbacks: &PlotCallbacks) -> ColorMapping {
    let fields = options.color_fields().to_vec();
    let source = match (&callbacks.color, &options.color) {
        (Some(color_fn), _) => ColorSource::Callback(color_fn.clone()),
        (None, Some(ColorOption::Single(color))) => ColorSource::Single(color.clone()),
        (None, Some(ColorOption::Palette(palette))) if !palette.is_empty() => {
            if fields.is_empty() {
                ColorSource::Single(palette[0].clone())
            } else {
                ColorSource::Palette(palette.clone())
            }
        }
        (None, _) => {
            if fields.is_empty() {
                ColorSource::Single(DEFAULT_PALETTE[0].to_owned())
            } else {
                ColorSource::Palette(DEFAULT_PALETTE.iter().map(|c| (*c).to_owned()).collect())
            }
        }
    };
    ColorMapping { fields, source }
}

fn label_spec(options: &PlotOptions, value_field: &str) -> Option<LabelSpec> {
    options.label.visible.then(|| LabelSpec {
        field: value_field.to_owned(),
        position: options.label.position.clone(),
        style: options.label.style.clone(),
    })
}

fn tooltip_fields(options: &PlotOptions, position: &[&str; 2]) -> Vec<String> {
    if let Some(fields) = &options.tooltip.fields {
        return fields.clone();
    }
    let mut fields: Vec<String> = position.iter().map(|field| (*field).to_owned()).collect();
    for extra in options
        .color_fields()
        .iter()
        .chain(options.size_field.as_ref())
    {
        if !fields.contains(extra) {
            fields.push(extra.clone());
        }
    }
    fields
}
