use plot_rs::api::{ChartKind, LayerState, PlotLayer, UserOptions};
use plot_rs::core::{AxisPosition, FieldValue, ShapeStyle};
use plot_rs::render::{Container, EngineView, HeadlessView};
use serde_json::{Value, json};

fn year_values() -> Value {
    json!([
        { "year": "1991", "value": 3 },
        { "year": "1992", "value": 4 },
        { "year": "1993", "value": 3.5 },
        { "year": "1994", "value": 5 },
        { "year": "1995", "value": 4.9 },
        { "year": "1996", "value": 6 },
        { "year": "1997", "value": 7 },
        { "year": "1998", "value": 9 },
        { "year": "1999", "value": 13 }
    ])
}

fn bar_layer(options: UserOptions) -> PlotLayer<HeadlessView> {
    PlotLayer::new(
        ChartKind::Bar,
        HeadlessView::new(Container::new("canvas1", 600, 600)),
        options,
    )
}

#[test]
fn bar_renders_two_axes_on_transposed_coordinate() {
    let mut layer = bar_layer(UserOptions::new(json!({
        "width": 600,
        "height": 600,
        "padding": "auto",
        "data": year_values(),
        "xField": "value",
        "yField": "year",
        "xAxis": { "visible": true },
        "yAxis": { "visible": true }
    })));
    layer.render().expect("render bar");

    let snapshot = layer.view().snapshot().expect("snapshot");
    assert_eq!(snapshot.axes.len(), 2);
    assert!(snapshot.coordinate.transposed);

    let bars: Vec<_> = snapshot.plot_geometries().collect();
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].name, "bar");
    assert_eq!(bars[0].position, vec!["year", "value"]);
    assert_eq!(bars[0].elements.len(), 9);

    // Transposed: the first position field is drawn vertically.
    assert_eq!(snapshot.axis("year").expect("year axis").position, AxisPosition::Left);
    assert_eq!(snapshot.axis("value").expect("value axis").position, AxisPosition::Bottom);

    layer.destroy();
    assert_eq!(layer.state(), LayerState::Destroyed);
    assert!(layer.view().is_destroyed());
}

#[test]
fn hidden_axes_are_not_created() {
    let mut both_hidden = bar_layer(UserOptions::new(json!({
        "data": year_values(),
        "xField": "value",
        "yField": "year",
        "xAxis": { "visible": false },
        "yAxis": { "visible": false }
    })));
    both_hidden.render().expect("render");
    assert!(both_hidden.view().snapshot().expect("snapshot").axes.is_empty());

    let mut x_hidden = bar_layer(UserOptions::new(json!({
        "data": year_values(),
        "xField": "value",
        "yField": "year",
        "xAxis": { "visible": false },
        "yAxis": { "visible": true }
    })));
    x_hidden.render().expect("render");
    let snapshot = x_hidden.view().snapshot().expect("snapshot");
    assert_eq!(snapshot.axes.len(), 1);
    assert_eq!(snapshot.axes[0].field, "year");
}

#[test]
fn x_axis_style_and_formatter_reach_every_label() {
    let options = UserOptions::new(json!({
        "data": year_values(),
        "xField": "value",
        "yField": "year",
        "xAxis": {
            "visible": true,
            "min": 5,
            "nice": false,
            "tickCount": 5,
            "style": {
                "line": { "visible": true, "stroke": "red" },
                "tickLine": { "visible": true, "stroke": "red" },
                "grid": { "visible": true, "stroke": "red", "lineWidth": 2 },
                "label": { "visible": true, "fill": "red", "fontSize": 14 },
                "title": {
                    "visible": true,
                    "text": "Value",
                    "textStyle": { "fill": "red", "fontSize": 16 }
                }
            }
        },
        "yAxis": { "visible": true }
    }))
    .with_x_axis_formatter(|value: &FieldValue| format!("{}abc", value.to_label()));
    let mut layer = bar_layer(options);
    layer.render().expect("render");

    let snapshot = layer.view().snapshot().expect("snapshot");
    let axis = snapshot.axis("value").expect("value axis");
    let line = axis.line.as_ref().expect("axis line");
    assert_eq!(line.stroke.as_deref(), Some("red"));
    let tick_line = axis.tick_line.as_ref().expect("tick line");
    assert_eq!(tick_line.stroke.as_deref(), Some("red"));
    let grid = axis.grid.as_ref().expect("grid");
    assert_eq!(grid.stroke.as_deref(), Some("red"));
    assert_eq!(grid.line_width, Some(2.0));

    let texts: Vec<_> = axis.label_items.iter().map(|item| item.text.as_str()).collect();
    assert_eq!(texts, vec!["5abc", "7abc", "9abc", "11abc", "13abc"]);
    let label_style = ShapeStyle {
        fill: Some("red".to_owned()),
        font_size: Some(14.0),
        ..ShapeStyle::default()
    };
    for item in &axis.label_items {
        assert_eq!(item.text_style, label_style);
    }

    let title = axis.title.as_ref().expect("axis title");
    assert_eq!(title.text, "Value");
    assert_eq!(
        title.style,
        ShapeStyle {
            fill: Some("red".to_owned()),
            font_size: Some(16.0),
            ..ShapeStyle::default()
        }
    );

    // Formatter only touches label text; the category axis keeps raw labels.
    let year_axis = snapshot.axis("year").expect("year axis");
    assert_eq!(year_axis.label_items[0].text, "1991");
    assert_eq!(year_axis.ticks.len(), 9);
}

#[test]
fn y_axis_label_and_title_styles_match_exactly() {
    let mut layer = bar_layer(UserOptions::new(json!({
        "data": year_values(),
        "xField": "value",
        "yField": "year",
        "yAxis": {
            "visible": true,
            "style": {
                "label": { "visible": true, "fill": "red", "fontSize": 10 },
                "title": { "visible": true, "textStyle": { "fill": "blue" } }
            }
        }
    })));
    layer.render().expect("render");

    let snapshot = layer.view().snapshot().expect("snapshot");
    let axis = snapshot.axis("year").expect("year axis");
    assert_eq!(axis.label_items.len(), 9);
    for item in &axis.label_items {
        assert_eq!(item.text_style.fill.as_deref(), Some("red"));
        assert_eq!(item.text_style.font_size, Some(10.0));
    }

    // Untouched title attributes keep their defaults.
    let title = axis.title.as_ref().expect("axis title");
    assert_eq!(title.text, "year");
    assert_eq!(title.style.fill.as_deref(), Some("blue"));
    assert_eq!(title.style.font_size, Some(12.0));
}

#[test]
fn invisible_axis_elements_resolve_to_absent_styles() {
    let mut layer = bar_layer(UserOptions::new(json!({
        "data": year_values(),
        "xField": "value",
        "yField": "year",
        "xAxis": {
            "visible": true,
            "style": {
                "line": { "visible": false },
                "tickLine": { "visible": false },
                "label": { "visible": false }
            }
        }
    })));
    layer.render().expect("render");

    let snapshot = layer.view().snapshot().expect("snapshot");
    let axis = snapshot.axis("value").expect("value axis");
    assert!(axis.line.is_none());
    assert!(axis.tick_line.is_none());
    assert!(axis.label_items.is_empty());
    assert!(!axis.ticks.is_empty());
}

#[test]
fn swapping_bar_for_column_flips_transpose_and_field_order() {
    // Transposition is declared by the chart kind, not inferred from which
    // field holds categories, so the swap goes through the kind.
    let data = year_values();
    let mut bar = bar_layer(UserOptions::new(json!({
        "data": data.clone(),
        "xField": "value",
        "yField": "year"
    })));
    bar.render().expect("render bar");

    let mut column = PlotLayer::new(
        ChartKind::Column,
        HeadlessView::new(Container::new("canvas2", 600, 600)),
        UserOptions::new(json!({ "data": data, "xField": "year", "yField": "value" })),
    );
    column.render().expect("render column");

    let bar_snapshot = bar.view().snapshot().expect("bar snapshot");
    let column_snapshot = column.view().snapshot().expect("column snapshot");
    assert!(bar_snapshot.coordinate.transposed);
    assert!(!column_snapshot.coordinate.transposed);

    let bar_geometry = bar_snapshot.plot_geometries().next().expect("bar geometry");
    let column_geometry = column_snapshot
        .plot_geometries()
        .next()
        .expect("column geometry");
    assert_eq!(bar_geometry.position, vec!["year", "value"]);
    assert_eq!(column_geometry.position, vec!["year", "value"]);
    assert_eq!(bar.view().data(), column.view().data());
}

#[test]
fn linear_value_axis_uses_nice_ticks() {
    let mut layer = bar_layer(UserOptions::new(json!({
        "data": year_values(),
        "xField": "value",
        "yField": "year"
    })));
    layer.render().expect("render");

    let snapshot = layer.view().snapshot().expect("snapshot");
    let ticks: Vec<f64> = snapshot
        .axis("value")
        .expect("value axis")
        .ticks
        .iter()
        .filter_map(FieldValue::as_f64)
        .collect();
    assert_eq!(ticks, vec![2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0]);
}

#[test]
fn tick_interval_drives_value_axis_ticks() {
    let value_ticks = |interval: f64| {
        let mut layer = bar_layer(UserOptions::new(json!({
            "data": year_values(),
            "xField": "value",
            "yField": "year",
            "xAxis": { "tickInterval": interval }
        })));
        layer.render().expect("render");
        let snapshot = layer.view().snapshot().expect("snapshot");
        snapshot
            .axis("value")
            .expect("value axis")
            .ticks
            .iter()
            .filter_map(FieldValue::as_f64)
            .collect::<Vec<_>>()
    };

    assert_eq!(value_ticks(4.0), vec![4.0, 8.0, 12.0]);
    // Too dense to draw: the default nice ticks are used instead.
    assert_eq!(
        value_ticks(1e-13),
        vec![2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0]
    );
}
