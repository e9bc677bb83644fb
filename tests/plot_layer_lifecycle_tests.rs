use plot_rs::PlotError;
use plot_rs::api::{ChartKind, LayerState, PlotLayer, UserOptions};
use plot_rs::core::{FieldValue, record};
use plot_rs::render::{Container, EngineView, HeadlessView, ViewCall};
use serde_json::json;

fn column_options() -> UserOptions {
    UserOptions::new(json!({
        "data": [
            { "genre": "Sports", "sold": 275, "kind": "a" },
            { "genre": "Strategy", "sold": 115, "kind": "b" },
            { "genre": "Action", "sold": 120, "kind": "a" },
            { "genre": "Shooter", "sold": 350, "kind": "b" }
        ],
        "xField": "genre",
        "yField": "sold"
    }))
}

fn column_layer(options: UserOptions) -> PlotLayer<HeadlessView> {
    PlotLayer::new(
        ChartKind::Column,
        HeadlessView::new(Container::new("container", 640, 480)),
        options,
    )
}

fn call_name(call: &ViewCall) -> &'static str {
    match call {
        ViewCall::Padding => "padding",
        ViewCall::Title { .. } => "title",
        ViewCall::Description { .. } => "description",
        ViewCall::Source { .. } => "source",
        ViewCall::Scale { .. } => "scale",
        ViewCall::Axis { .. } => "axis",
        ViewCall::Coordinate { .. } => "coordinate",
        ViewCall::Tooltip { .. } => "tooltip",
        ViewCall::Legend { .. } => "legend",
        ViewCall::AddGeometry { .. } => "add_geometry",
        ViewCall::RemoveGeometry { .. } => "remove_geometry",
        ViewCall::Animation { .. } => "animation",
        ViewCall::AddAnnotation { .. } => "add_annotation",
        ViewCall::RemoveAnnotation { .. } => "remove_annotation",
        ViewCall::On { .. } => "on",
        ViewCall::Render => "render",
        ViewCall::ChangeData { .. } => "change_data",
        ViewCall::Clear => "clear",
        ViewCall::Destroy => "destroy",
    }
}

#[test]
fn construction_does_not_touch_the_view() {
    let layer = column_layer(column_options());
    assert_eq!(layer.state(), LayerState::Constructed);
    assert!(layer.options().is_none());
    assert!(layer.view().calls().is_empty());
}

#[test]
fn stages_run_in_fixed_order_before_render() {
    let options = UserOptions::new(json!({
        "data": [ { "genre": "Sports", "sold": 275, "kind": "a" } ],
        "xField": "genre",
        "yField": "sold",
        "colorField": "kind",
        "animation": false,
        "annotations": [
            { "type": "text", "position": ["Sports", 275], "content": "peak" }
        ]
    }))
    .on("onColumnClick", |_event| {});
    let mut layer = column_layer(options);
    layer.render().expect("render");

    let names: Vec<&str> = layer.view().calls().iter().map(call_name).collect();
    assert_eq!(
        names,
        vec![
            "source",
            "padding",
            "title",
            "description",
            "scale",
            "scale",
            "axis",
            "axis",
            "coordinate",
            "add_geometry",
            "tooltip",
            "legend",
            "add_annotation",
            "animation",
            "on",
            "render",
        ]
    );
    assert_eq!(layer.state(), LayerState::Rendered);
}

#[test]
fn destroy_twice_is_a_no_op() {
    let mut layer = column_layer(column_options());
    layer.render().expect("render");
    layer.destroy();
    let calls_after_first = layer.view().calls().len();
    layer.destroy();

    assert_eq!(layer.state(), LayerState::Destroyed);
    assert!(layer.view().is_destroyed());
    assert_eq!(layer.view().calls().len(), calls_after_first);
}

#[test]
fn destroy_before_render_leaves_view_untouched() {
    let mut layer = column_layer(column_options());
    layer.configure().expect("configure");
    layer.destroy();

    assert_eq!(layer.state(), LayerState::Destroyed);
    assert!(!layer.view().is_destroyed());
    assert!(layer.view().calls().is_empty());
}

#[test]
fn operations_after_destroy_are_lifecycle_errors() {
    let mut layer = column_layer(column_options());
    layer.render().expect("render");
    layer.destroy();

    assert!(matches!(
        layer.render(),
        Err(PlotError::Lifecycle {
            operation: "render",
            state: LayerState::Destroyed
        })
    ));
    assert!(matches!(
        layer.update(json!({ "xAxis": { "visible": false } })),
        Err(PlotError::Lifecycle { .. })
    ));
    assert!(matches!(layer.change_data(Vec::new()), Err(PlotError::Lifecycle { .. })));
    assert!(matches!(layer.repaint(), Err(PlotError::Lifecycle { .. })));
}

#[test]
fn second_render_is_rejected() {
    let mut layer = column_layer(column_options());
    layer.render().expect("render");
    let error = layer.render().expect_err("second render");
    assert!(matches!(
        error,
        PlotError::Lifecycle {
            state: LayerState::Rendered,
            ..
        }
    ));
    assert_eq!(layer.view().render_count(), 1);
}

#[test]
fn missing_x_field_surfaces_from_the_scale_stage() {
    let mut layer = column_layer(UserOptions::new(json!({
        "data": [ { "sold": 1 } ],
        "yField": "sold"
    })));
    let error = layer.render().expect_err("missing xField");
    assert!(matches!(error, PlotError::MissingField { field: "xField" }));
    assert_eq!(layer.state(), LayerState::Configured);
    assert_eq!(layer.view().render_count(), 0);
}

#[test]
fn malformed_options_fail_to_configure() {
    let mut layer = column_layer(UserOptions::new(json!({
        "xField": "genre",
        "yField": "sold",
        "padding": [1, 2, 3]
    })));
    assert!(matches!(layer.configure(), Err(PlotError::InvalidOptions(_))));
    assert_eq!(layer.state(), LayerState::Constructed);
}

#[test]
fn update_rebuilds_the_view_from_merged_options() {
    let mut layer = column_layer(column_options());
    layer.render().expect("render");
    assert_eq!(layer.view().snapshot().expect("snapshot").axes.len(), 2);

    layer
        .update(json!({ "yAxis": { "visible": false }, "padding": [10, 20] }))
        .expect("update");

    assert_eq!(layer.state(), LayerState::Rendered);
    let options = layer.options().expect("options");
    assert!(!options.y_axis.visible);
    assert_eq!(options.x_field.as_deref(), Some("genre"));

    let snapshot = layer.view().snapshot().expect("snapshot");
    assert_eq!(snapshot.axes.len(), 1);
    assert_eq!(snapshot.plot_geometries().count(), 1);
    assert!(layer.view().calls().contains(&ViewCall::Clear));
    assert_eq!(layer.view().render_count(), 2);
}

#[test]
fn update_before_render_only_reconfigures() {
    let mut layer = column_layer(column_options());
    layer
        .update(json!({ "xAxis": { "tickCount": 3 } }))
        .expect("update");
    assert_eq!(layer.state(), LayerState::Configured);
    assert_eq!(layer.options().expect("options").x_axis.tick_count, Some(3));
    assert!(layer.view().calls().is_empty());
}

#[test]
fn rejected_update_does_not_poison_later_updates() {
    let mut layer = column_layer(column_options());
    layer.render().expect("render");

    let error = layer
        .update(json!({ "padding": "bogus" }))
        .expect_err("unknown padding keyword");
    assert!(matches!(error, PlotError::InvalidOptions(_)));
    assert!(layer.user_options().value.get("padding").is_none());
    assert_eq!(layer.state(), LayerState::Rendered);
    assert_eq!(layer.view().render_count(), 1);

    layer.update(json!({ "animation": false })).expect("update");
    assert!(!layer.options().expect("options").animation);
    assert_eq!(layer.view().render_count(), 2);
}

#[test]
fn change_data_rerenders_and_survives_later_updates() {
    let mut layer = column_layer(column_options());
    layer.render().expect("render");

    let data = vec![
        record([("genre", FieldValue::from("MOBA")), ("sold", FieldValue::from(42.0))]),
        record([("genre", FieldValue::from("RPG")), ("sold", FieldValue::from(17.0))]),
    ];
    layer.change_data(data).expect("change data");

    assert_eq!(layer.options().expect("options").data.len(), 2);
    let geometry = layer
        .view()
        .snapshot()
        .expect("snapshot")
        .plot_geometries()
        .next()
        .expect("column geometry")
        .clone();
    assert_eq!(geometry.elements.len(), 2);
    assert!(
        layer
            .view()
            .calls()
            .contains(&ViewCall::ChangeData { records: 2 })
    );

    layer.update(json!({ "animation": false })).expect("update");
    assert_eq!(layer.view().data().len(), 2);
}

#[test]
fn repaint_only_re_renders() {
    let mut layer = column_layer(column_options());
    layer.render().expect("render");
    let calls_before = layer.view().calls().len();

    layer.repaint().expect("repaint");
    assert_eq!(layer.view().render_count(), 2);
    assert_eq!(layer.view().calls().len(), calls_before + 1);
}
