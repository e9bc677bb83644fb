use chrono::DateTime;
use tracing::{debug, warn};

use crate::core::{
    FieldValue, GeometryDescriptor, GeometryKind, PlotOptions, Record, ShapeStyle, StyleSource,
    TrendlineOptions, field,
};
use crate::error::{PlotError, PlotResult};
use crate::render::{EngineView, GeometryId};

use super::regression::fit;
use super::{ComponentKind, PlotComponent};

const TRENDLINE_ID: &str = "trendline";
const SAMPLE_STEPS: usize = 50;
/// Two-sided 95% normal quantile.
const CONFIDENCE_Z: f64 = 1.96;

/// Regression line over the view's `(xField, yField)` points, with an
/// optional confidence band drawn as an area of `[low, high]` ranges.
#[derive(Debug, Clone)]
pub struct Trendline {
    options: TrendlineOptions,
    geometries: Vec<GeometryId>,
}

impl Trendline {
    #[must_use]
    pub fn new(options: TrendlineOptions) -> Self {
        Self {
            options,
            geometries: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.geometries.is_empty()
    }
}

impl PlotComponent for Trendline {
    fn id(&self) -> &str {
        TRENDLINE_ID
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Trendline
    }

    fn attach(&mut self, view: &mut dyn EngineView, options: &PlotOptions) -> PlotResult<()> {
        if self.is_attached() {
            return Ok(());
        }
        let x_field = options
            .x_field
            .as_deref()
            .ok_or(PlotError::MissingField { field: "xField" })?;
        let y_field = options
            .y_field
            .as_deref()
            .ok_or(PlotError::MissingField { field: "yField" })?;

        let points: Vec<(f64, f64)> = view
            .data()
            .iter()
            .filter_map(|record| {
                Some((field(record, x_field).as_f64()?, field(record, y_field).as_f64()?))
            })
            .collect();
        let Some(model) = fit(self.options.kind, &points) else {
            warn!(
                kind = ?self.options.kind,
                points = points.len(),
                "not enough data to fit trendline; skipping"
            );
            return Ok(());
        };
        let (x_min, x_max) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), (x, _)| {
                (min.min(*x), max.max(*x))
            });
        let samples = model.sample(x_min, x_max, SAMPLE_STEPS);
        let time_x = view
            .data()
            .iter()
            .any(|record| matches!(field(record, x_field), FieldValue::Time(_)));
        let x_sample = |x: f64| {
            if time_x {
                DateTime::from_timestamp_millis(x.round() as i64)
                    .map_or(FieldValue::Number(x), FieldValue::Time)
            } else {
                FieldValue::Number(x)
            }
        };

        let line_data: Vec<Record> = samples
            .iter()
            .map(|(x, y)| sample_record(x_field, x_sample(*x), y_field, FieldValue::Number(*y)))
            .collect();
        let line_style = ShapeStyle::stroke("#9BA29A")
            .with_line_width(1.0)
            .overlay(&self.options.style);
        let mut line = GeometryDescriptor::new(GeometryKind::Line, TRENDLINE_ID, [x_field, y_field])
            .with_style(StyleSource::Static(line_style))
            .with_data(line_data)
            .owned_by(TRENDLINE_ID);
        line.animate = false;

        if self.options.show_confidence {
            let margin = CONFIDENCE_Z * model.residual_std_error;
            let band_data: Vec<Record> = samples
                .iter()
                .map(|(x, y)| {
                    sample_record(
                        x_field,
                        x_sample(*x),
                        y_field,
                        FieldValue::Range(y - margin, y + margin),
                    )
                })
                .collect();
            let band_style = ShapeStyle::fill("#CCCCCC")
                .with_opacity(0.3)
                .overlay(&self.options.confidence_style);
            let mut band = GeometryDescriptor::new(
                GeometryKind::Area,
                "trendline-confidence",
                [x_field, y_field],
            )
            .with_style(StyleSource::Static(band_style))
            .with_data(band_data)
            .owned_by(TRENDLINE_ID);
            band.animate = false;
            self.geometries.push(view.add_geometry(band));
        }
        self.geometries.push(view.add_geometry(line));

        debug!(
            kind = ?self.options.kind,
            r_squared = model.r_squared,
            geometries = self.geometries.len(),
            "trendline attached"
        );
        Ok(())
    }

    fn detach(&mut self, view: &mut dyn EngineView) {
        for id in self.geometries.drain(..) {
            view.remove_geometry(id);
        }
    }
}

fn sample_record(x_field: &str, x: FieldValue, y_field: &str, y: FieldValue) -> Record {
    let mut record = Record::new();
    record.insert(x_field.to_owned(), x);
    record.insert(y_field.to_owned(), y);
    record
}
