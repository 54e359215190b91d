use poem::http::StatusCode;
use poem::Error as PoemError;
use thiserror::Error;

use crate::mcr::McrError;
use crate::megaport::MegaportError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Timed out: {0}")]
    GatewayTimeout(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<McrError> for AppError {
    fn from(err: McrError) -> Self {
        match err {
            McrError::Validation(e) => AppError::BadRequest(e.to_string()),
            McrError::Api(MegaportError::NotFound(msg)) => AppError::NotFound(msg),
            // Remote rejections of the request itself are the caller's to fix
            McrError::Api(MegaportError::ApiError { status, message }) if (400..500).contains(&status) => {
                AppError::BadRequest(message)
            }
            McrError::Api(e) => AppError::Upstream(e.to_string()),
            McrError::MalformedResponse(msg) => AppError::Upstream(msg),
            e @ McrError::ProvisionTimeoutExceeded { .. } => AppError::GatewayTimeout(e.to_string()),
            McrError::SerializationError(e) => AppError::Internal(anyhow::Error::from(e)),
        }
    }
}

impl From<AppError> for PoemError {
    fn from(err: AppError) -> Self {
        PoemError::from_string(err.to_string(), err.status_code())
    }
}
