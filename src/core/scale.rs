use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::callbacks::LabelFormatterFn;
use crate::error::{PlotError, PlotResult};

/// Scale family understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleKind {
    #[serde(rename = "cat", alias = "category")]
    Category,
    #[serde(rename = "time", alias = "timeCat")]
    Time,
    #[serde(rename = "linear")]
    Linear,
}

/// Engine-facing scale configuration for one field.
///
/// `kind: None` lets the engine infer the family from data. The formatter
/// only affects label text; scale positions always use raw values.
#[derive(Clone)]
pub struct ScaleDefinition {
    pub field: String,
    pub kind: Option<ScaleKind>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub nice: bool,
    pub tick_count: Option<usize>,
    pub tick_interval: Option<f64>,
    pub alias: Option<String>,
    pub formatter: Option<LabelFormatterFn>,
}

impl ScaleDefinition {
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: None,
            min: None,
            max: None,
            nice: true,
            tick_count: None,
            tick_interval: None,
            alias: None,
            formatter: None,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ScaleKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn has_formatter(&self) -> bool {
        self.formatter.is_some()
    }
}

impl fmt::Debug for ScaleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaleDefinition")
            .field("field", &self.field)
            .field("kind", &self.kind)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("nice", &self.nice)
            .field("tick_count", &self.tick_count)
            .field("tick_interval", &self.tick_interval)
            .field("alias", &self.alias)
            .field("formatter", &self.formatter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

pub const DEFAULT_TICK_COUNT: usize = 5;
/// Upper bound on ticks generated for one axis.
pub const MAX_TICKS: usize = 10_000;

/// Continuous domain used for numeric and time positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> PlotResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start > domain_end {
            return Err(PlotError::InvalidData(
                "scale domain must be finite and ordered".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Maps a domain value into `[0, 1]`.
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        if span == 0.0 {
            return 0.5;
        }
        (value - self.domain_start) / span
    }

    /// Extends the domain outward to multiples of a 1/2/5 step.
    #[must_use]
    pub fn nice(self, tick_count: usize) -> Self {
        let step = nice_step(self.domain_end - self.domain_start, tick_count);
        if step == 0.0 {
            return self;
        }
        Self {
            domain_start: (self.domain_start / step).floor() * step,
            domain_end: (self.domain_end / step).ceil() * step,
        }
    }

    /// Tick values at a 1/2/5 step inside the domain.
    #[must_use]
    pub fn nice_ticks(self, tick_count: usize) -> Vec<f64> {
        let step = nice_step(self.domain_end - self.domain_start, tick_count.min(MAX_TICKS));
        self.interval_ticks(step).unwrap_or_else(|| vec![self.domain_start])
    }

    /// `tick_count` evenly spaced values including both domain ends.
    ///
    /// Counts above `MAX_TICKS` are clamped.
    #[must_use]
    pub fn even_ticks(self, tick_count: usize) -> Vec<f64> {
        if tick_count <= 1 || self.domain_start == self.domain_end {
            return vec![self.domain_start];
        }
        let tick_count = tick_count.min(MAX_TICKS);
        let span = self.domain_end - self.domain_start;
        (0..tick_count)
            .map(|index| {
                let ratio = (index as f64) / ((tick_count - 1) as f64);
                clean_float(self.domain_start + span * ratio)
            })
            .collect()
    }

    /// Ticks starting at the first multiple of `interval` inside the domain.
    ///
    /// A non-positive interval, or one yielding more than `MAX_TICKS` ticks,
    /// falls back to `nice_ticks(DEFAULT_TICK_COUNT)`.
    #[must_use]
    pub fn ticks_with_interval(self, interval: f64) -> Vec<f64> {
        if self.domain_start == self.domain_end {
            return vec![self.domain_start];
        }
        self.interval_ticks(interval).unwrap_or_else(|| self.nice_ticks(DEFAULT_TICK_COUNT))
    }

    fn interval_ticks(self, interval: f64) -> Option<Vec<f64>> {
        if !interval.is_finite() || interval <= 0.0 {
            return None;
        }
        if self.domain_start == self.domain_end {
            return Some(vec![self.domain_start]);
        }
        let first = (self.domain_start / interval).ceil();
        let last = (self.domain_end / interval).floor();
        let count = last - first + 1.0;
        if !count.is_finite() || count > MAX_TICKS as f64 {
            return None;
        }
        if count < 1.0 {
            return Some(Vec::new());
        }
        Some(
            (0..count as usize)
                .map(|index| clean_float((first + index as f64) * interval))
                .collect(),
        )
    }
}

/// Step of the form `{1, 2, 5} × 10^n` yielding roughly `tick_count` ticks.
#[must_use]
pub fn nice_step(span: f64, tick_count: usize) -> f64 {
    if !span.is_finite() || span <= 0.0 {
        return 0.0;
    }
    let raw = span / tick_count.max(1) as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}

fn clean_float(value: f64) -> f64 {
    let rounded = (value * 1e10).round() / 1e10;
    if rounded == 0.0 { 0.0 } else { rounded }
}
