use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::{
    AxisPosition, AxisStyleOverride, ColorSource, CoordinateSpec, FieldValue,
    GeometryDescriptor, Padding, Record, ScaleDefinition, ShapeMapping, SizeMapping, field,
};
use crate::error::{PlotError, PlotResult};

use super::snapshot::{
    AnnotationSnapshot, AxisLabelItem, AxisSnapshot, AxisTitleSnapshot, ElementSnapshot,
    GeometrySnapshot, LegendItem, LegendSnapshot, ViewCall, ViewSnapshot,
};
use super::ticks::{category_index, distinct_values, resolve_ticks};
use super::{
    AnnotationId, AnnotationSpec, Container, EngineView, GeometryId, LegendSpec, TextGuide,
    TooltipSpec, ViewEvent, ViewEventHandlerFn,
};

/// In-memory engine view used by tests and headless consumers.
///
/// It records every call in order and, on `render`, materializes a typed
/// `ViewSnapshot`: axes with ticks and formatted labels, geometries with
/// per-element encodings, legends and annotations.
pub struct HeadlessView {
    container: Container,
    padding: Padding,
    title: Option<TextGuide>,
    description: Option<TextGuide>,
    data: Vec<Record>,
    scales: IndexMap<String, ScaleDefinition>,
    axes: IndexMap<String, Option<AxisStyleOverride>>,
    coordinate: CoordinateSpec,
    tooltip: Option<TooltipSpec>,
    legends: IndexMap<String, Option<LegendSpec>>,
    geometries: IndexMap<GeometryId, GeometryDescriptor>,
    annotations: IndexMap<AnnotationId, AnnotationSpec>,
    handlers: IndexMap<String, Vec<ViewEventHandlerFn>>,
    next_id: u64,
    calls: Vec<ViewCall>,
    snapshot: Option<ViewSnapshot>,
    render_count: usize,
    destroyed: bool,
}

impl HeadlessView {
    #[must_use]
    pub fn new(container: Container) -> Self {
        Self {
            container,
            padding: Padding::Auto,
            title: None,
            description: None,
            data: Vec::new(),
            scales: IndexMap::new(),
            axes: IndexMap::new(),
            coordinate: CoordinateSpec::rect(),
            tooltip: None,
            legends: IndexMap::new(),
            geometries: IndexMap::new(),
            annotations: IndexMap::new(),
            handlers: IndexMap::new(),
            next_id: 0,
            calls: Vec::new(),
            snapshot: None,
            render_count: 0,
            destroyed: false,
        }
    }

    /// State materialized by the last successful `render`.
    #[must_use]
    pub fn snapshot(&self) -> Option<&ViewSnapshot> {
        self.snapshot.as_ref()
    }

    #[must_use]
    pub fn calls(&self) -> &[ViewCall] {
        &self.calls
    }

    #[must_use]
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    #[must_use]
    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    #[must_use]
    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }

    /// Dispatches an engine event to bound handlers; returns how many ran.
    pub fn emit(&self, event: &ViewEvent) -> usize {
        let Some(handlers) = self.handlers.get(&event.name) else {
            return 0;
        };
        for handler in handlers {
            handler(event);
        }
        handlers.len()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn geometry_data<'a>(&'a self, geometry: &'a GeometryDescriptor) -> &'a [Record] {
        geometry.data.as_deref().unwrap_or(&self.data)
    }

    /// Values of `name` across the data source and plot-owned local data.
    ///
    /// Component geometries draw against the resolved scales and never feed
    /// scale inference.
    fn field_values(&self, name: &str) -> Vec<FieldValue> {
        let local = self
            .geometries
            .values()
            .filter(|geometry| geometry.owner.is_none())
            .filter_map(|geometry| geometry.data.as_deref());
        std::iter::once(self.data.as_slice())
            .chain(local)
            .flat_map(|records| records.iter().map(|record| field(record, name).clone()))
            .collect()
    }

    fn position_fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = Vec::new();
        let plot_first = self
            .geometries
            .values()
            .filter(|geometry| geometry.owner.is_none())
            .chain(
                self.geometries
                    .values()
                    .filter(|geometry| geometry.owner.is_some()),
            );
        for geometry in plot_first {
            for (slot, name) in geometry.position.iter().enumerate() {
                if fields.len() <= slot {
                    fields.push(name.clone());
                }
            }
            if fields.len() >= 2 {
                break;
            }
        }
        fields
    }

    fn build_axes(&self) -> Vec<AxisSnapshot> {
        let mut axes = Vec::new();
        for (slot, name) in self.position_fields().into_iter().enumerate() {
            let style = match self.axes.get(&name) {
                Some(None) => continue,
                Some(Some(style)) => style.clone(),
                None => AxisStyleOverride::engine_default(),
            };
            let horizontal = (slot == 0) != self.coordinate.transposed;
            let position = if horizontal {
                AxisPosition::Bottom
            } else {
                AxisPosition::Left
            };

            let definition = self
                .scales
                .get(&name)
                .cloned()
                .unwrap_or_else(|| ScaleDefinition::new(name.clone()));
            let ticks = resolve_ticks(&definition, &self.field_values(&name));
            let label_items = match &style.label {
                Some(text_style) => ticks
                    .iter()
                    .map(|value| AxisLabelItem {
                        value: value.clone(),
                        text: match &definition.formatter {
                            Some(formatter) => formatter(value),
                            None => value.to_label(),
                        },
                        text_style: text_style.clone(),
                    })
                    .collect(),
                None => Vec::new(),
            };
            let title = style.title.as_ref().map(|title| AxisTitleSnapshot {
                text: title
                    .text
                    .clone()
                    .or_else(|| definition.alias.clone())
                    .unwrap_or_else(|| name.clone()),
                style: title.style.clone(),
            });

            axes.push(AxisSnapshot {
                field: name,
                position,
                line: style.line,
                tick_line: style.tick_line,
                grid: style.grid,
                title,
                ticks,
                label_items,
            });
        }
        axes
    }

    fn build_geometry(&self, id: GeometryId, geometry: &GeometryDescriptor) -> GeometrySnapshot {
        let data = self.geometry_data(geometry);
        let color_domain = geometry.color.as_ref().map(|color| {
            let keys: Vec<FieldValue> = data
                .iter()
                .map(|record| color_key(record, &color.fields))
                .collect();
            distinct_values(keys.iter())
        });
        let size_extent = match &geometry.size {
            Some(SizeMapping::Field { field: name, .. }) => data
                .iter()
                .filter_map(|record| field(record, name).as_f64())
                .fold(None, |acc: Option<(f64, f64)>, value| match acc {
                    Some((min, max)) => Some((min.min(value), max.max(value))),
                    None => Some((value, value)),
                }),
            _ => None,
        };

        let elements = data
            .iter()
            .enumerate()
            .map(|(index, record)| {
                trace!(geometry = %geometry.name, index, "evaluate element");
                let color = geometry.color.as_ref().and_then(|color| match &color.source {
                    ColorSource::Single(value) => Some(value.clone()),
                    ColorSource::Callback(mapping) => Some(mapping(record)),
                    ColorSource::Palette(palette) if palette.is_empty() => None,
                    ColorSource::Palette(palette) => {
                        let key = color_key(record, &color.fields);
                        let position = color_domain
                            .as_deref()
                            .and_then(|domain| category_index(domain, &key))
                            .unwrap_or(0);
                        Some(palette[position % palette.len()].clone())
                    }
                });
                let size = geometry.size.as_ref().map(|size| match size {
                    SizeMapping::Fixed(value) => *value,
                    SizeMapping::Field { field: name, range } => {
                        let value = field(record, name).as_f64();
                        match (value, size_extent) {
                            (Some(value), Some((min, max))) if max > min => {
                                range[0] + (value - min) / (max - min) * (range[1] - range[0])
                            }
                            _ => range[0],
                        }
                    }
                });
                let shape = geometry.shape.as_ref().map(|shape| match shape {
                    ShapeMapping::Fixed(value) => value.clone(),
                    ShapeMapping::Callback(mapping) => mapping(record),
                });
                ElementSnapshot {
                    index,
                    position: geometry
                        .position
                        .iter()
                        .map(|name| field(record, name).clone())
                        .collect(),
                    color,
                    size,
                    shape,
                    style: geometry.style.as_ref().map(|style| style.evaluate(record)),
                    label: geometry
                        .label
                        .as_ref()
                        .map(|label| field(record, &label.field).to_label()),
                }
            })
            .collect();

        GeometrySnapshot {
            id,
            kind: geometry.kind,
            name: geometry.name.clone(),
            position: geometry.position.to_vec(),
            owner: geometry.owner.clone(),
            animate: geometry.animate,
            elements,
        }
    }

    fn build_legends(&self, geometries: &[GeometrySnapshot]) -> Vec<LegendSnapshot> {
        let mut legends = Vec::new();
        for (name, spec) in &self.legends {
            let Some(spec) = spec else {
                continue;
            };
            let Some((descriptor, snapshot)) = self
                .geometries
                .values()
                .zip(geometries)
                .find(|(descriptor, _)| {
                    descriptor
                        .color
                        .as_ref()
                        .is_some_and(|color| color.fields.contains(name))
                })
            else {
                continue;
            };
            let data = self.geometry_data(descriptor);
            let mut items: Vec<LegendItem> = Vec::new();
            for (record, element) in data.iter().zip(&snapshot.elements) {
                let item_name = field(record, name).to_label();
                if items.iter().all(|item| item.name != item_name) {
                    items.push(LegendItem {
                        name: item_name,
                        color: element.color.clone(),
                    });
                }
            }
            legends.push(LegendSnapshot {
                field: name.clone(),
                position: spec.position.clone(),
                items,
            });
        }
        legends
    }
}

fn color_key(record: &Record, fields: &[String]) -> FieldValue {
    match fields {
        [] => FieldValue::Null,
        [single] => field(record, single).clone(),
        many => FieldValue::Text(
            many.iter()
                .map(|name| field(record, name).to_label())
                .collect::<Vec<_>>()
                .join("-"),
        ),
    }
}

impl EngineView for HeadlessView {
    fn container(&self) -> &Container {
        &self.container
    }

    fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
        self.calls.push(ViewCall::Padding);
    }

    fn set_title(&mut self, title: Option<TextGuide>) {
        self.calls.push(ViewCall::Title {
            visible: title.is_some(),
        });
        self.title = title;
    }

    fn set_description(&mut self, description: Option<TextGuide>) {
        self.calls.push(ViewCall::Description {
            visible: description.is_some(),
        });
        self.description = description;
    }

    fn source(&mut self, data: &[Record]) {
        self.data = data.to_vec();
        self.calls.push(ViewCall::Source {
            records: data.len(),
        });
    }

    fn data(&self) -> &[Record] {
        &self.data
    }

    fn scale(&mut self, definition: ScaleDefinition) {
        self.calls.push(ViewCall::Scale {
            field: definition.field.clone(),
        });
        self.scales.insert(definition.field.clone(), definition);
    }

    fn scale_definition(&self, field: &str) -> Option<&ScaleDefinition> {
        self.scales.get(field)
    }

    fn axis(&mut self, field: &str, axis: Option<AxisStyleOverride>) {
        self.calls.push(ViewCall::Axis {
            field: field.to_owned(),
            visible: axis.is_some(),
        });
        self.axes.insert(field.to_owned(), axis);
    }

    fn coordinate(&mut self, coordinate: CoordinateSpec) {
        self.calls.push(ViewCall::Coordinate {
            transposed: coordinate.transposed,
        });
        self.coordinate = coordinate;
    }

    fn tooltip(&mut self, tooltip: Option<TooltipSpec>) {
        self.calls.push(ViewCall::Tooltip {
            visible: tooltip.is_some(),
        });
        self.tooltip = tooltip;
    }

    fn legend(&mut self, field: &str, legend: Option<LegendSpec>) {
        self.calls.push(ViewCall::Legend {
            field: field.to_owned(),
            visible: legend.is_some(),
        });
        self.legends.insert(field.to_owned(), legend);
    }

    fn add_geometry(&mut self, geometry: GeometryDescriptor) -> GeometryId {
        let id = GeometryId(self.next_id());
        self.calls.push(ViewCall::AddGeometry {
            id,
            kind: geometry.kind,
            owner: geometry.owner.clone(),
        });
        self.geometries.insert(id, geometry);
        id
    }

    fn remove_geometry(&mut self, id: GeometryId) -> bool {
        self.calls.push(ViewCall::RemoveGeometry { id });
        self.geometries.shift_remove(&id).is_some()
    }

    fn set_animation(&mut self, id: GeometryId, enabled: bool) -> PlotResult<()> {
        let geometry = self
            .geometries
            .get_mut(&id)
            .ok_or_else(|| PlotError::Engine(format!("unknown geometry id {}", id.0)))?;
        geometry.animate = enabled;
        self.calls.push(ViewCall::Animation { id, enabled });
        Ok(())
    }

    fn add_annotation(&mut self, annotation: AnnotationSpec) -> AnnotationId {
        let id = AnnotationId(self.next_id());
        self.calls.push(ViewCall::AddAnnotation {
            id,
            owner: annotation.owner.clone(),
        });
        self.annotations.insert(id, annotation);
        id
    }

    fn remove_annotation(&mut self, id: AnnotationId) -> bool {
        self.calls.push(ViewCall::RemoveAnnotation { id });
        self.annotations.shift_remove(&id).is_some()
    }

    fn on(&mut self, engine_event: &str, handler: ViewEventHandlerFn) {
        self.calls.push(ViewCall::On {
            event: engine_event.to_owned(),
        });
        self.handlers
            .entry(engine_event.to_owned())
            .or_default()
            .push(handler);
    }

    fn render(&mut self) -> PlotResult<()> {
        if self.destroyed {
            return Err(PlotError::Engine("cannot render a destroyed view".to_owned()));
        }
        for geometry in self.geometries.values() {
            if geometry.position.iter().any(String::is_empty) {
                return Err(PlotError::Engine(format!(
                    "geometry `{}` has an empty position field",
                    geometry.name
                )));
            }
        }

        let geometries: Vec<GeometrySnapshot> = self
            .geometries
            .iter()
            .map(|(id, geometry)| self.build_geometry(*id, geometry))
            .collect();
        let snapshot = ViewSnapshot {
            container: self.container.clone(),
            padding: self.padding,
            title: self.title.clone(),
            description: self.description.clone(),
            coordinate: self.coordinate,
            axes: self.build_axes(),
            legends: self.build_legends(&geometries),
            geometries,
            annotations: self
                .annotations
                .iter()
                .map(|(id, spec)| AnnotationSnapshot {
                    id: *id,
                    owner: spec.owner.clone(),
                    annotation: spec.annotation.clone(),
                })
                .collect(),
            tooltip: self.tooltip.clone(),
            event_bindings: self.handlers.keys().cloned().collect(),
        };

        self.render_count += 1;
        debug!(
            container = %self.container.id,
            axes = snapshot.axes.len(),
            geometries = snapshot.geometries.len(),
            render_count = self.render_count,
            "headless view rendered"
        );
        self.snapshot = Some(snapshot);
        self.calls.push(ViewCall::Render);
        Ok(())
    }

    fn change_data(&mut self, data: &[Record]) {
        self.data = data.to_vec();
        self.calls.push(ViewCall::ChangeData {
            records: data.len(),
        });
    }

    fn clear(&mut self) {
        self.scales.clear();
        self.axes.clear();
        self.coordinate = CoordinateSpec::rect();
        self.tooltip = None;
        self.legends.clear();
        self.geometries.clear();
        self.annotations.clear();
        self.handlers.clear();
        self.title = None;
        self.description = None;
        self.calls.push(ViewCall::Clear);
    }

    fn destroy(&mut self) {
        self.clear();
        self.data.clear();
        self.snapshot = None;
        self.destroyed = true;
        self.calls.push(ViewCall::Destroy);
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}
