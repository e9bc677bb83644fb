//! plot-rs: declarative plot layers compiled onto a grammar-of-graphics view.
//!
//! A [`PlotLayer`] merges global, chart-type and user options, runs a fixed
//! sequence of configuration stages (scale, coordinate, geometry, annotation,
//! animation, event parsing) against an [`render::EngineView`], renders it and
//! then attaches add-on components such as quadrants and trendlines.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod render;
pub mod telemetry;

pub use api::{ChartKind, LayerState, PlotLayer, UserOptions};
pub use error::{PlotError, PlotResult};
