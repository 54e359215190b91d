use thiserror::Error;

use crate::mcr::validation::ValidationError;
use crate::megaport::MegaportError;

/// Errors surfaced by router lifecycle operations
#[derive(Error, Debug)]
pub enum McrError {
    #[error("Invalid order: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] MegaportError),

    #[error("Failed to serialize order: {0}")]
    SerializationError(#[source] serde_json::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("MCR was not ready after {attempts} status checks")]
    ProvisionTimeoutExceeded { attempts: u32 },
}

impl McrError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, McrError::ProvisionTimeoutExceeded { .. })
    }
}
