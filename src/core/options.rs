use serde::{Deserialize, Serialize};

use crate::core::scale::ScaleKind;
use crate::core::style::ShapeStyle;
use crate::core::value::{FieldValue, Record};

/// Canonical merged configuration tree for one plot layer.
///
/// Built once from the three merged option layers and shared read-only
/// (behind `Arc`) with stages and components. Keys follow the camelCase
/// vocabulary of the declarative options document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlotOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub padding: Padding,
    pub data: Vec<Record>,
    pub x_field: Option<String>,
    pub y_field: Option<String>,
    #[serde(alias = "colorFields")]
    pub color_field: Option<FieldList>,
    pub size_field: Option<String>,
    pub color: Option<ColorOption>,
    pub x_axis: AxisOptions,
    pub y_axis: AxisOptions,
    pub animation: bool,
    pub title: TextGuideOptions,
    pub description: TextGuideOptions,
    pub tooltip: TooltipOptions,
    pub legend: LegendOptions,
    pub label: LabelOptions,
    pub point_size: Option<SizeOption>,
    pub point_style: Option<ShapeStyle>,
    pub shape: Option<String>,
    pub bar_size: Option<f64>,
    pub bar_style: Option<ShapeStyle>,
    pub column_size: Option<f64>,
    pub column_style: Option<ShapeStyle>,
    pub line_size: Option<f64>,
    pub line_style: Option<ShapeStyle>,
    pub smooth: bool,
    pub point: PointMarkerOptions,
    pub annotations: Vec<AnnotationOptions>,
    pub quadrant: Option<QuadrantOptions>,
    pub trendline: Option<TrendlineOptions>,
}

impl PlotOptions {
    /// Color-mapped fields, in declaration order.
    #[must_use]
    pub fn color_fields(&self) -> &[String] {
        match &self.color_field {
            Some(FieldList::One(field)) => std::slice::from_ref(field),
            Some(FieldList::Many(fields)) => fields,
            None => &[],
        }
    }
}

/// Layout padding around the plotting region.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "PaddingRepr", into = "PaddingRepr")]
pub enum Padding {
    /// Engine measures guides and computes padding itself.
    #[default]
    Auto,
    /// `[top, right, bottom, left]` in pixels.
    Fixed([f64; 4]),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum PaddingRepr {
    Keyword(String),
    Uniform(f64),
    Sides(Vec<f64>),
}

impl TryFrom<PaddingRepr> for Padding {
    type Error = String;

    fn try_from(repr: PaddingRepr) -> Result<Self, Self::Error> {
        match repr {
            PaddingRepr::Keyword(keyword) if keyword == "auto" => Ok(Self::Auto),
            PaddingRepr::Keyword(keyword) => Err(format!("unknown padding keyword `{keyword}`")),
            PaddingRepr::Uniform(value) => Ok(Self::Fixed([value; 4])),
            PaddingRepr::Sides(sides) => match sides.as_slice() {
                [all] => Ok(Self::Fixed([*all; 4])),
                [vertical, horizontal] => Ok(Self::Fixed([
                    *vertical,
                    *horizontal,
                    *vertical,
                    *horizontal,
                ])),
                [top, right, bottom, left] => Ok(Self::Fixed([*top, *right, *bottom, *left])),
                other => Err(format!(
                    "padding array must have 1, 2 or 4 entries, got {}",
                    other.len()
                )),
            },
        }
    }
}

impl From<Padding> for PaddingRepr {
    fn from(padding: Padding) -> Self {
        match padding {
            Padding::Auto => Self::Keyword("auto".to_owned()),
            Padding::Fixed(sides) => Self::Sides(sides.to_vec()),
        }
    }
}

/// `"field"` or `["a", "b"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldList {
    One(String),
    Many(Vec<String>),
}

/// A single color or a palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorOption {
    Single(String),
    Palette(Vec<String>),
}

/// Fixed point size or a `[min, max]` range for size-mapped fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeOption {
    Fixed(f64),
    Range([f64; 2]),
}

impl SizeOption {
    #[must_use]
    pub fn range(self) -> [f64; 2] {
        match self {
            Self::Fixed(size) => [size, size],
            Self::Range(range) => range,
        }
    }
}

/// User-facing axis description, resolved into a scale plus an axis override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AxisOptions {
    pub visible: bool,
    #[serde(rename = "type")]
    pub kind: Option<ScaleKind>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub nice: Option<bool>,
    pub tick_count: Option<usize>,
    pub tick_interval: Option<f64>,
    pub style: AxisStyleOptions,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            visible: true,
            kind: None,
            min: None,
            max: None,
            nice: None,
            tick_count: None,
            tick_interval: None,
            style: AxisStyleOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AxisStyleOptions {
    pub line: Option<AxisElementOptions>,
    pub tick_line: Option<AxisElementOptions>,
    pub grid: Option<AxisElementOptions>,
    pub label: Option<AxisElementOptions>,
    pub title: Option<AxisTitleOptions>,
}

/// `{ visible, ...style }` for one axis sub-element.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AxisElementOptions {
    pub visible: Option<bool>,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AxisTitleOptions {
    pub visible: Option<bool>,
    pub text: Option<String>,
    pub offset: Option<f64>,
    pub text_style: ShapeStyle,
}

/// Chart title or description text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextGuideOptions {
    pub visible: bool,
    pub text: String,
    pub style: ShapeStyle,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TooltipOptions {
    pub visible: bool,
    pub shared: bool,
    pub crosshairs: Option<CrosshairsOptions>,
    pub fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrosshairsOptions {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegendOptions {
    pub visible: bool,
    pub position: String,
}

/// Per-element data labels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelOptions {
    pub visible: bool,
    pub position: Option<String>,
    pub style: ShapeStyle,
}

/// Point markers stacked on top of a line geometry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PointMarkerOptions {
    pub visible: bool,
    pub size: Option<f64>,
    pub shape: Option<String>,
    pub style: Option<ShapeStyle>,
}

/// Declarative annotation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnnotationOptions {
    Text {
        position: [AnnotationAnchor; 2],
        content: String,
        #[serde(default)]
        style: ShapeStyle,
    },
    Line {
        start: [AnnotationAnchor; 2],
        end: [AnnotationAnchor; 2],
        #[serde(default)]
        style: ShapeStyle,
    },
    Region {
        start: [AnnotationAnchor; 2],
        end: [AnnotationAnchor; 2],
        #[serde(default)]
        style: ShapeStyle,
    },
}

/// Position along one scale: a data value, a percentage (`"50%"`) or a
/// keyword the engine resolves (`"min"`, `"max"`, `"median"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationAnchor {
    Value(f64),
    Keyword(String),
}

impl AnnotationAnchor {
    #[must_use]
    pub fn keyword(keyword: &str) -> Self {
        Self::Keyword(keyword.to_owned())
    }
}

impl From<f64> for AnnotationAnchor {
    fn from(value: f64) -> Self {
        Self::Value(value)
    }
}

impl From<&FieldValue> for AnnotationAnchor {
    fn from(value: &FieldValue) -> Self {
        match value.as_f64() {
            Some(number) => Self::Value(number),
            None => Self::Keyword(value.to_label()),
        }
    }
}

/// Four-way divider overlay for point charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuadrantOptions {
    pub visible: bool,
    pub x_baseline: f64,
    pub y_baseline: f64,
    pub line_style: ShapeStyle,
    pub region_style: Vec<ShapeStyle>,
    pub label: Option<QuadrantLabelOptions>,
}

impl Default for QuadrantOptions {
    fn default() -> Self {
        Self {
            visible: true,
            x_baseline: 0.0,
            y_baseline: 0.0,
            line_style: ShapeStyle::default(),
            region_style: Vec::new(),
            label: None,
        }
    }
}

/// Labels in quadrant order: top-left, top-right, bottom-left, bottom-right.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuadrantLabelOptions {
    pub text: Vec<String>,
    pub style: ShapeStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegressionKind {
    #[default]
    Linear,
    Exp,
    Log,
    Pow,
    Quad,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrendlineOptions {
    pub visible: bool,
    #[serde(rename = "type")]
    pub kind: RegressionKind,
    pub style: ShapeStyle,
    pub show_confidence: bool,
    pub confidence_style: ShapeStyle,
}

impl Default for TrendlineOptions {
    fn default() -> Self {
        Self {
            visible: true,
            kind: RegressionKind::Linear,
            style: ShapeStyle::default(),
            show_confidence: false,
            confidence_style: ShapeStyle::default(),
        }
    }
}
