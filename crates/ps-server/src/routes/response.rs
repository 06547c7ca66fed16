use std::convert::Infallible;

use ps_core::wire::ApiResponse;
use serde::Serialize;
use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::error::ApiError;

/// Wraps `data` in a success envelope.
pub(crate) fn success<T: Serialize>(data: T) -> warp::reply::Response {
    warp::reply::json(&ApiResponse::success(data)).into_response()
}

fn failure(status: StatusCode, message: impl Into<String>) -> warp::reply::Response {
    warp::reply::with_status(
        warp::reply::json(&ApiResponse::<()>::error(message)),
        status,
    )
    .into_response()
}

/// Renders every rejection as an error envelope.
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let response = if err.is_not_found() {
        failure(StatusCode::NOT_FOUND, "Not found")
    } else if let Some(e) = err.find::<ApiError>() {
        if e.status().is_server_error() {
            warn!(error = %e, "request failed");
        }
        failure(e.status(), e.to_string())
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        failure(StatusCode::BAD_REQUEST, e.to_string())
    } else if let Some(e) = err.find::<warp::body::BodyDeserializeError>() {
        failure(StatusCode::BAD_REQUEST, e.to_string())
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        failure(StatusCode::LENGTH_REQUIRED, "Content-Length required")
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        failure(StatusCode::PAYLOAD_TOO_LARGE, "Payload too large")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        failure(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else {
        warn!(rejection = ?err, "unhandled rejection");
        failure(StatusCode::INTERNAL_SERVER_ERROR, "Unhandled rejection")
    };
    Ok(response)
}
