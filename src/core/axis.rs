use serde::{Deserialize, Serialize};

use crate::core::style::ShapeStyle;

/// Per-sub-element style of one drawn axis.
///
/// `None` means the sub-element is not drawn at all; `Some` with an empty
/// style means "draw with engine defaults". The two are never interchangeable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisStyleOverride {
    pub line: Option<ShapeStyle>,
    pub tick_line: Option<ShapeStyle>,
    pub grid: Option<ShapeStyle>,
    pub label: Option<ShapeStyle>,
    pub title: Option<AxisTitle>,
}

impl AxisStyleOverride {
    /// Every sub-element visible with engine-default style, title hidden.
    #[must_use]
    pub fn engine_default() -> Self {
        Self {
            line: Some(ShapeStyle::default()),
            tick_line: Some(ShapeStyle::default()),
            grid: Some(ShapeStyle::default()),
            label: Some(ShapeStyle::default()),
            title: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisTitle {
    pub text: Option<String>,
    pub offset: Option<f64>,
    pub style: ShapeStyle,
}

/// Physical side of the plotting region an axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    Bottom,
    Left,
}
