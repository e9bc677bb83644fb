use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use plot_rs::api::{ChartKind, PlotLayer, UserOptions};
use plot_rs::core::{GeometryKind, Record, ShapeStyle, field};
use plot_rs::render::{Container, HeadlessView};
use serde_json::{Value, json};

fn sales() -> Value {
    json!([
        { "genre": "Sports", "sold": 275, "kind": "a" },
        { "genre": "Strategy", "sold": 115, "kind": "b" },
        { "genre": "Action", "sold": 120, "kind": "a" },
        { "genre": "Shooter", "sold": 350, "kind": "b" }
    ])
}

fn render(kind: ChartKind, options: UserOptions) -> PlotLayer<HeadlessView> {
    let mut layer = PlotLayer::new(
        kind,
        HeadlessView::new(Container::new("encoding", 640, 480)),
        options,
    );
    layer.render().expect("render");
    layer
}

fn sold(record: &Record) -> f64 {
    field(record, "sold").as_f64().unwrap_or_default()
}

#[test]
fn style_callback_is_evaluated_for_every_element() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let options = UserOptions::new(json!({
        "data": sales(),
        "xField": "genre",
        "yField": "sold",
        "columnStyle": { "fill": "gray" }
    }))
    .with_style(move |record| {
        counter.fetch_add(1, Ordering::SeqCst);
        if sold(record) > 200.0 {
            ShapeStyle::fill("red")
        } else {
            ShapeStyle::fill("blue")
        }
    });
    let layer = render(ChartKind::Column, options);

    let snapshot = layer.view().snapshot().expect("snapshot");
    let columns = snapshot.plot_geometries().next().expect("columns");
    let fills: Vec<_> = columns
        .elements
        .iter()
        .map(|element| element.style.as_ref().and_then(|style| style.fill.clone()))
        .collect();
    assert_eq!(
        fills,
        vec![
            Some("red".to_owned()),
            Some("blue".to_owned()),
            Some("blue".to_owned()),
            Some("red".to_owned()),
        ]
    );
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[test]
fn static_style_applies_without_callback() {
    let layer = render(
        ChartKind::Column,
        UserOptions::new(json!({
            "data": sales(),
            "xField": "genre",
            "yField": "sold",
            "columnStyle": { "fill": "gray", "lineWidth": 1 }
        })),
    );
    let snapshot = layer.view().snapshot().expect("snapshot");
    let columns = snapshot.plot_geometries().next().expect("columns");
    for element in &columns.elements {
        let style = element.style.as_ref().expect("static style");
        assert_eq!(style.fill.as_deref(), Some("gray"));
        assert_eq!(style.line_width, Some(1.0));
    }
}

#[test]
fn color_callback_beats_palette() {
    let options = UserOptions::new(json!({
        "data": sales(),
        "xField": "genre",
        "yField": "sold",
        "colorField": "kind",
        "color": ["#111111", "#222222"]
    }))
    .with_color_mapping(|record| {
        if field(record, "kind").to_label() == "a" {
            "#aa0000".to_owned()
        } else {
            "#0000bb".to_owned()
        }
    });
    let layer = render(ChartKind::Column, options);

    let snapshot = layer.view().snapshot().expect("snapshot");
    let colors: Vec<_> = snapshot
        .plot_geometries()
        .next()
        .expect("columns")
        .elements
        .iter()
        .filter_map(|element| element.color.clone())
        .collect();
    assert_eq!(colors, vec!["#aa0000", "#0000bb", "#aa0000", "#0000bb"]);
}

#[test]
fn palette_cycles_over_color_field_domain() {
    let layer = render(
        ChartKind::Column,
        UserOptions::new(json!({
            "data": sales(),
            "xField": "genre",
            "yField": "sold",
            "colorField": "kind",
            "color": ["#111111", "#222222"]
        })),
    );
    let snapshot = layer.view().snapshot().expect("snapshot");
    let colors: Vec<_> = snapshot
        .plot_geometries()
        .next()
        .expect("columns")
        .elements
        .iter()
        .filter_map(|element| element.color.clone())
        .collect();
    assert_eq!(colors, vec!["#111111", "#222222", "#111111", "#222222"]);

    let legend = &snapshot.legends[0];
    assert_eq!(legend.field, "kind");
    let names: Vec<_> = legend.items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn single_color_without_field_paints_everything() {
    let layer = render(
        ChartKind::Bar,
        UserOptions::new(json!({
            "data": sales(),
            "xField": "sold",
            "yField": "genre",
            "color": "#123456"
        })),
    );
    let snapshot = layer.view().snapshot().expect("snapshot");
    let bars = snapshot.plot_geometries().next().expect("bars");
    assert!(
        bars.elements
            .iter()
            .all(|element| element.color.as_deref() == Some("#123456"))
    );
    assert!(snapshot.legends.is_empty());
}

#[test]
fn scatter_shape_callback_selects_per_record() {
    let options = UserOptions::new(json!({
        "data": sales(),
        "xField": "genre",
        "yField": "sold",
        "shape": "square"
    }))
    .with_shape_mapping(|record| {
        if sold(record) > 200.0 {
            "diamond".to_owned()
        } else {
            "circle".to_owned()
        }
    });
    let layer = render(ChartKind::Scatter, options);

    let snapshot = layer.view().snapshot().expect("snapshot");
    let shapes: Vec<_> = snapshot
        .plot_geometries()
        .next()
        .expect("points")
        .elements
        .iter()
        .filter_map(|element| element.shape.clone())
        .collect();
    assert_eq!(shapes, vec!["diamond", "circle", "circle", "diamond"]);
}

#[test]
fn line_adds_point_markers_only_when_visible() {
    let plain = render(
        ChartKind::Line,
        UserOptions::new(json!({ "data": sales(), "xField": "genre", "yField": "sold" })),
    );
    let snapshot = plain.view().snapshot().expect("snapshot");
    let kinds: Vec<_> = snapshot.plot_geometries().map(|geometry| geometry.kind).collect();
    assert_eq!(kinds, vec![GeometryKind::Line]);
    assert_eq!(
        snapshot.geometries[0].elements[0].shape.as_deref(),
        Some("line")
    );

    let marked = render(
        ChartKind::Line,
        UserOptions::new(json!({
            "data": sales(),
            "xField": "genre",
            "yField": "sold",
            "smooth": true,
            "point": { "visible": true, "size": 5, "shape": "circle" }
        })),
    );
    let snapshot = marked.view().snapshot().expect("snapshot");
    let geometries: Vec<_> = snapshot.plot_geometries().collect();
    assert_eq!(geometries.len(), 2);
    assert_eq!(geometries[0].kind, GeometryKind::Line);
    assert_eq!(geometries[0].elements[0].shape.as_deref(), Some("smooth"));
    assert_eq!(geometries[1].kind, GeometryKind::Point);
    assert_eq!(geometries[1].elements[0].size, Some(5.0));
    assert_eq!(geometries[1].elements[0].shape.as_deref(), Some("circle"));
}

#[test]
fn labels_follow_the_value_field_of_the_primary_geometry() {
    let layer = render(
        ChartKind::Column,
        UserOptions::new(json!({
            "data": sales(),
            "xField": "genre",
            "yField": "sold",
            "label": { "visible": true }
        })),
    );
    let snapshot = layer.view().snapshot().expect("snapshot");
    let labels: Vec<_> = snapshot
        .plot_geometries()
        .next()
        .expect("columns")
        .elements
        .iter()
        .filter_map(|element| element.label.clone())
        .collect();
    assert_eq!(labels, vec!["275", "115", "120", "350"]);
    let tooltip = snapshot.tooltip.as_ref().expect("tooltip");
    assert_eq!(tooltip.fields, vec!["genre", "sold"]);
}

#[test]
fn disabled_animation_reaches_every_plot_geometry() {
    let layer = render(
        ChartKind::Line,
        UserOptions::new(json!({
            "data": sales(),
            "xField": "genre",
            "yField": "sold",
            "animation": false,
            "point": { "visible": true }
        })),
    );
    let snapshot = layer.view().snapshot().expect("snapshot");
    assert!(snapshot.plot_geometries().all(|geometry| !geometry.animate));
}
