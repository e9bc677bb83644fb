//! Add-on components that attach their own guides and geometries to a view.

mod quadrant;
pub mod regression;
mod trendline;

use serde::{Deserialize, Serialize};

use crate::core::PlotOptions;
use crate::error::PlotResult;
use crate::render::EngineView;

pub use quadrant::Quadrant;
pub use regression::{RegressionFit, fit};
pub use trendline::Trendline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Quadrant,
    Trendline,
    Custom,
}

/// Self-contained unit owning a set of view elements.
///
/// Components only touch the view through the elements they added themselves:
/// everything created in `attach` must be removed in `detach`, and `detach`
/// on a detached component is a no-op.
pub trait PlotComponent {
    fn id(&self) -> &str;

    fn kind(&self) -> ComponentKind {
        ComponentKind::Custom
    }

    fn attach(&mut self, view: &mut dyn EngineView, options: &PlotOptions) -> PlotResult<()>;

    fn detach(&mut self, view: &mut dyn EngineView);
}
