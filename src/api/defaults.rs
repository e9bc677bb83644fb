use serde_json::{Value, json};

/// Categorical palette shared by every chart type.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#5B8FF9", "#5AD8A6", "#5D7092", "#F6BD16", "#E8684A", "#6DC8EC", "#9270CA", "#FF9D4D",
    "#269A99", "#FF99C3",
];

/// Engine-wide defaults: the leftmost layer of every merge.
#[must_use]
pub fn global_defaults() -> Value {
    json!({
        "padding": "auto",
        "animation": true,
        "color": DEFAULT_PALETTE,
        "title": {
            "visible": false,
            "text": "",
            "style": { "fontSize": 18, "fill": "#262626" }
        },
        "description": {
            "visible": false,
            "text": "",
            "style": { "fontSize": 12, "fill": "#8C8C8C" }
        },
        "xAxis": {
            "visible": true,
            "style": {
                "line": { "visible": true, "stroke": "#BFBFBF", "lineWidth": 1 },
                "tickLine": { "visible": true, "stroke": "#BFBFBF", "lineWidth": 1 },
                "grid": { "visible": false, "stroke": "#E9E9E9", "lineWidth": 1 },
                "label": { "visible": true, "fill": "#8C8C8C", "fontSize": 12 },
                "title": { "visible": false, "offset": 12, "textStyle": { "fill": "#595959", "fontSize": 12 } }
            }
        },
        "yAxis": {
            "visible": true,
            "style": {
                "line": { "visible": false, "stroke": "#BFBFBF", "lineWidth": 1 },
                "tickLine": { "visible": false, "stroke": "#BFBFBF", "lineWidth": 1 },
                "grid": { "visible": true, "stroke": "#E9E9E9", "lineWidth": 1 },
                "label": { "visible": true, "fill": "#8C8C8C", "fontSize": 12 },
                "title": { "visible": false, "offset": 12, "textStyle": { "fill": "#595959", "fontSize": 12 } }
            }
        },
        "tooltip": {
            "visible": true,
            "shared": true,
            "crosshairs": { "type": "line" }
        },
        "legend": {
            "visible": true,
            "position": "bottom-center"
        },
        "label": {
            "visible": false
        }
    })
}
