use crate::composer::error::ReportError;
use crate::grid::axis::AxisKind;
use crate::source::error::FetchError;
use crate::types::data_source::UnknownVariable;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimGridError {
    #[error("Invalid list of variables")]
    InvalidConfiguration(#[source] UnknownVariable),

    #[error("{operation}: Invalid parameters")]
    InvalidParameters { operation: String },

    #[error("Invalid {axis} parameters: Values must be min <= lo < hi <= max")]
    InvalidWindow { axis: AxisKind },

    #[error("Malformed job request")]
    MalformedRequest(#[source] serde_json::Error),

    #[error(transparent)]
    DataFetch(#[from] FetchError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ClimGridError {
    pub(crate) fn invalid_parameters(operation: impl Into<String>) -> Self {
        ClimGridError::InvalidParameters {
            operation: operation.into(),
        }
    }

    /// `true` when the request itself was at fault, as opposed to the remote
    /// source or the output destination.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ClimGridError::InvalidConfiguration(_)
                | ClimGridError::InvalidParameters { .. }
                | ClimGridError::InvalidWindow { .. }
                | ClimGridError::MalformedRequest(_)
        )
    }
}
