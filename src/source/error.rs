use crate::grid::axis::AxisKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to open remote dataset {url}")]
    Open {
        url: String,
        #[source]
        source: netcdf::Error,
    },

    #[error("Dataset {url} has no variable '{variable}'")]
    MissingVariable { url: String, variable: String },

    #[error("Variable '{variable}' in {url} has {found} dimensions, expected time, lat and lon")]
    Dimensions {
        url: String,
        variable: String,
        found: usize,
    },

    #[error("Failed to read window {window} of '{variable}' from {url}")]
    Read {
        url: String,
        variable: String,
        window: String,
        #[source]
        source: netcdf::Error,
    },

    #[error("Window {window} of {url} returned {found} values")]
    Shape {
        url: String,
        window: String,
        found: usize,
        #[source]
        source: ndarray::ShapeError,
    },

    #[error("Value {value} does not fall on the {axis} axis")]
    IndexOutOfRange { axis: AxisKind, value: f64 },

    #[error("Requested window {0} selects no cells")]
    EmptySlice(String),
}
