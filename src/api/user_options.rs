use std::sync::Arc;

use serde_json::{Map, Value};

use crate::core::{FieldValue, PlotCallbacks, PlotEvent, Record, ShapeStyle};
use crate::error::{PlotError, PlotResult};

use super::config_merger::deep_merge_into;

/// User-supplied options: the declarative JSON document plus typed callbacks.
///
/// Callbacks cannot live in JSON, so formatters, per-element style functions,
/// color/shape mappings and event handlers ride alongside the document.
#[derive(Debug, Clone, Default)]
pub struct UserOptions {
    pub value: Value,
    pub callbacks: PlotCallbacks,
}

impl UserOptions {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self {
            value,
            callbacks: PlotCallbacks::default(),
        }
    }

    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| PlotError::InvalidOptions(format!("failed to parse options json: {e}")))?;
        Ok(Self::new(value))
    }

    #[must_use]
    pub fn with_x_axis_formatter(
        mut self,
        formatter: impl Fn(&FieldValue) -> String + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.x_axis_formatter = Some(Arc::new(formatter));
        self
    }

    #[must_use]
    pub fn with_y_axis_formatter(
        mut self,
        formatter: impl Fn(&FieldValue) -> String + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.y_axis_formatter = Some(Arc::new(formatter));
        self
    }

    /// Per-element style, evaluated lazily for every rendered record.
    #[must_use]
    pub fn with_style(
        mut self,
        style: impl Fn(&Record) -> ShapeStyle + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.style = Some(Arc::new(style));
        self
    }

    #[must_use]
    pub fn with_color_mapping(
        mut self,
        color: impl Fn(&Record) -> String + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.color = Some(Arc::new(color));
        self
    }

    #[must_use]
    pub fn with_shape_mapping(
        mut self,
        shape: impl Fn(&Record) -> String + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.shape = Some(Arc::new(shape));
        self
    }

    /// Registers a handler under a semantic event name such as `onBarClick`.
    #[must_use]
    pub fn on(
        mut self,
        event: impl Into<String>,
        handler: impl Fn(&PlotEvent) + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.events.insert(event.into(), Arc::new(handler));
        self
    }

    /// Deep-merges `patch` on top of these options, right-biased.
    pub(crate) fn overlay(&mut self, patch: UserOptions) {
        if patch.value.is_object() {
            if !self.value.is_object() {
                self.value = Value::Object(Map::new());
            }
            deep_merge_into(&mut self.value, &patch.value);
        }
        self.callbacks.overlay(patch.callbacks);
    }
}

impl From<Value> for UserOptions {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
