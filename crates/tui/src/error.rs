use crate::service_error::RawServiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FacadeError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("{0} is not configured")]
    MissingCollaborator(&'static str),

    #[error("table has no bound data source: {0}")]
    MissingDataSource(String),

    #[error("service request failed: {0}")]
    Service(RawServiceError),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("export failed: {0}")]
    Export(String),
}

impl From<RawServiceError> for FacadeError {
    fn from(error: RawServiceError) -> Self {
        FacadeError::Service(error)
    }
}
