use std::sync::{Arc, Mutex};

use plot_rs::api::{
    ChartKind, EventMapping, EventParserRegistry, PlotLayer, UserOptions, bubble_event_mapping,
    scatter_event_mapping,
};
use plot_rs::core::{GeometryKind, PlotEvent, record};
use plot_rs::render::{Container, HeadlessView, ViewEvent};
use serde_json::json;

fn bar_options() -> UserOptions {
    UserOptions::new(json!({
        "data": [ { "year": "1991", "value": 3 }, { "year": "1992", "value": 4 } ],
        "xField": "value",
        "yField": "year"
    }))
}

#[test]
fn builtin_registry_covers_every_chart_kind() {
    let registry = EventParserRegistry::builtin();
    for kind in ChartKind::ALL {
        let mapping = registry.resolve(kind).expect("mapping registered");
        assert_eq!(mapping.engine_event("onPlotClick"), Some("plotclick"));
    }
    assert_eq!(
        registry
            .resolve(ChartKind::Bar)
            .and_then(|mapping| mapping.engine_event("onBarClick")),
        Some("interval:click")
    );
}

#[test]
fn scatter_mapping_extends_bubble_mapping() {
    let bubble = bubble_event_mapping();
    let scatter = scatter_event_mapping();
    for (semantic, engine) in bubble.iter() {
        assert_eq!(scatter.engine_event(semantic), Some(engine));
    }
    assert_eq!(scatter.len(), bubble.len() + 2);
    assert_eq!(scatter.engine_event("onQuadrantClick"), Some("quadrant:click"));
    assert!(bubble.engine_event("onQuadrantClick").is_none());
}

#[test]
fn registered_mapping_replaces_builtin() {
    let mut registry = EventParserRegistry::builtin();
    let previous = registry.register(
        ChartKind::Column,
        EventMapping::from_entries(&[("onColumnClick", "element:click")]),
    );
    assert!(previous.is_some());
    let mapping = registry.resolve(ChartKind::Column).expect("mapping");
    assert_eq!(mapping.engine_event("onColumnClick"), Some("element:click"));
    assert!(mapping.engine_event("onPlotClick").is_none());
}

#[test]
fn handlers_receive_semantic_events_with_plot_geometry_names() {
    let received: Arc<Mutex<Vec<PlotEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);
    let options = bar_options()
        .on("onBarClick", move |event| {
            sink.lock().expect("lock").push(event.clone());
        })
        .on("onSomethingUnknown", |_event| {});

    let mut layer = PlotLayer::new(
        ChartKind::Bar,
        HeadlessView::new(Container::new("events", 300, 300)),
        options,
    );
    layer.render().expect("render");

    let snapshot = layer.view().snapshot().expect("snapshot");
    assert_eq!(snapshot.event_bindings, vec!["interval:click"]);

    let clicked = record([("year", "1991")]);
    let dispatched = layer.view().emit(
        &ViewEvent::new("interval:click").on_geometry(GeometryKind::Interval, clicked.clone()),
    );
    assert_eq!(dispatched, 1);
    assert_eq!(layer.view().emit(&ViewEvent::new("point:click")), 0);

    let events = received.lock().expect("lock");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "onBarClick");
    assert_eq!(events[0].engine_event, "interval:click");
    assert_eq!(events[0].geometry.as_deref(), Some("bar"));
    assert_eq!(events[0].record.as_ref(), Some(&clicked));
}

#[test]
fn empty_registry_binds_nothing() {
    let options = bar_options().on("onBarClick", |_event| {});
    let mut layer = PlotLayer::new(
        ChartKind::Bar,
        HeadlessView::new(Container::new("events", 300, 300)),
        options,
    )
    .with_event_registry(EventParserRegistry::new());
    layer.render().expect("render");
    assert!(
        layer
            .view()
            .snapshot()
            .expect("snapshot")
            .event_bindings
            .is_empty()
    );
}
