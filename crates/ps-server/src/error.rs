use ps_core::{ListKindParseError, PageQueryError};
use warp::http::StatusCode;

/// Errors surfaced by route handlers as warp rejections.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl warp::reject::Reject for ApiError {}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Classifies a use-case or store error. Invalid queries are the
    /// caller's fault; everything else is a store failure.
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        if let Some(e) = err.downcast_ref::<PageQueryError>() {
            return ApiError::BadRequest(e.to_string());
        }
        ApiError::Internal(format!("{:#}", err))
    }
}

impl From<ListKindParseError> for ApiError {
    fn from(err: ListKindParseError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
