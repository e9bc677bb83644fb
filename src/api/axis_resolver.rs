use crate::core::{
    AxisElementOptions, AxisOptions, AxisStyleOverride, AxisTitle, AxisTitleOptions,
    LabelFormatterFn, ScaleDefinition, ShapeStyle,
};

/// Scale plus axis directive derived from one axis description.
///
/// `axis: None` means no axis is created for the field; the scale still
/// carries bounds, niceness and tick hints.
#[derive(Debug, Clone)]
pub struct ResolvedAxis {
    pub scale: ScaleDefinition,
    pub axis: Option<AxisStyleOverride>,
}

/// Translates a user-facing axis description into the engine vocabulary.
///
/// Field existence is not checked here: an axis for a field absent from the
/// data resolves normally and shows up as a degenerate scale at render.
#[must_use]
pub fn resolve_axis(
    field: &str,
    options: &AxisOptions,
    formatter: Option<LabelFormatterFn>,
) -> ResolvedAxis {
    let mut scale = ScaleDefinition::new(field);
    scale.kind = options.kind;
    scale.min = options.min;
    scale.max = options.max;
    scale.nice = options.nice.unwrap_or(true);
    scale.tick_count = options.tick_count;
    scale.tick_interval = options.tick_interval;
    scale.alias = options
        .style
        .title
        .as_ref()
        .and_then(|title| title.text.clone());
    scale.formatter = formatter;

    let axis = options.visible.then(|| AxisStyleOverride {
        line: resolve_element(options.style.line.as_ref()),
        tick_line: resolve_element(options.style.tick_line.as_ref()),
        grid: resolve_element(options.style.grid.as_ref()),
        label: resolve_element(options.style.label.as_ref()),
        title: resolve_title(options.style.title.as_ref()),
    });

    ResolvedAxis { scale, axis }
}

/// Visible unless explicitly `visible: false`; hidden elements carry no style.
fn resolve_element(element: Option<&AxisElementOptions>) -> Option<ShapeStyle> {
    match element {
        None => Some(ShapeStyle::default()),
        Some(element) if element.visible == Some(false) => None,
        Some(element) => Some(element.style.clone()),
    }
}

fn resolve_title(title: Option<&AxisTitleOptions>) -> Option<AxisTitle> {
    match title {
        None => Some(AxisTitle::default()),
        Some(title) if title.visible == Some(false) => None,
        Some(title) => Some(AxisTitle {
            text: title.text.clone(),
            offset: title.offset,
            style: title.text_style.clone(),
        }),
    }
}
