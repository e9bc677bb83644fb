use thiserror::Error;

use crate::api::LayerState;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("required field selector `{field}` is missing")]
    MissingField { field: &'static str },

    #[error("`{operation}` is not valid while the layer is {state:?}")]
    Lifecycle {
        operation: &'static str,
        state: LayerState,
    },

    #[error("component with id `{id}` is already attached")]
    DuplicateComponent { id: String },

    #[error("engine view failure: {0}")]
    Engine(String),
}
