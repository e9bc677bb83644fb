use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Drawing attributes handed to the engine for one visual element.
///
/// Well-known attributes are typed; anything else the engine understands
/// (`textAlign`, `radius`, `shadowBlur`, ...) lands in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapeStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_dash: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ShapeStyle {
    #[must_use]
    pub fn stroke(color: impl Into<String>) -> Self {
        Self {
            stroke: Some(color.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn fill(color: impl Into<String>) -> Self {
        Self {
            fill: Some(color.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = Some(line_width);
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Returns `self` with every attribute set in `top` taking precedence.
    #[must_use]
    pub fn overlay(mut self, top: &ShapeStyle) -> Self {
        fn pick<T: Clone>(base: &mut Option<T>, top: &Option<T>) {
            if top.is_some() {
                base.clone_from(top);
            }
        }
        pick(&mut self.stroke, &top.stroke);
        pick(&mut self.fill, &top.fill);
        pick(&mut self.line_width, &top.line_width);
        pick(&mut self.line_dash, &top.line_dash);
        pick(&mut self.opacity, &top.opacity);
        pick(&mut self.fill_opacity, &top.fill_opacity);
        pick(&mut self.stroke_opacity, &top.stroke_opacity);
        pick(&mut self.font_size, &top.font_size);
        for (key, value) in &top.extra {
            self.extra.insert(key.clone(), value.clone());
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
