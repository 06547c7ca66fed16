use std::sync::Arc;

use ps_core::wire::InsertBatchRequest;
use ps_core::{RecordId, RecordPatch};
use serde_json::json;
use tracing::{debug, info};
use warp::{Filter, Rejection};

use super::response::success;
use super::{with_state, ApiState};
use crate::error::ApiError;

const MAX_BODY_BYTES: u64 = 4 * 1024 * 1024;

/// `POST /records/batch`
pub fn insert_batch(
    state: Arc<ApiState>,
) -> impl Filter<Extract = (warp::reply::Response,), Error = Rejection> + Clone {
    warp::path!("records" / "batch")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<InsertBatchRequest>())
        .and(with_state(state))
        .and_then(handle_insert_batch)
}

/// `PATCH /records/{id}`
pub fn update(
    state: Arc<ApiState>,
) -> impl Filter<Extract = (warp::reply::Response,), Error = Rejection> + Clone {
    warp::path!("records" / String)
        .and(warp::patch())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<RecordPatch>())
        .and(with_state(state))
        .and_then(handle_update)
}

/// `DELETE /records/{id}`
pub fn delete(
    state: Arc<ApiState>,
) -> impl Filter<Extract = (warp::reply::Response,), Error = Rejection> + Clone {
    warp::path!("records" / String)
        .and(warp::delete())
        .and(with_state(state))
        .and_then(handle_delete)
}

async fn handle_insert_batch(
    request: InsertBatchRequest,
    state: Arc<ApiState>,
) -> Result<warp::reply::Response, Rejection> {
    let count = request.records.len();
    state
        .store
        .insert_batch(&request.records)
        .await
        .map_err(ApiError::from_anyhow)?;

    info!(count, "inserted record batch");
    Ok(success(json!({ "inserted": count })))
}

async fn handle_update(
    id: String,
    patch: RecordPatch,
    state: Arc<ApiState>,
) -> Result<warp::reply::Response, Rejection> {
    let id = RecordId::from(id);
    if patch.is_empty() {
        debug!(record_id = %id, "empty patch");
    } else {
        state
            .store
            .update_fields(&id, &patch)
            .await
            .map_err(ApiError::from_anyhow)?;
    }
    Ok(success(json!({ "id": id })))
}

async fn handle_delete(
    id: String,
    state: Arc<ApiState>,
) -> Result<warp::reply::Response, Rejection> {
    let id = RecordId::from(id);
    state
        .store
        .delete_one(&id)
        .await
        .map_err(ApiError::from_anyhow)?;

    debug!(record_id = %id, "deleted record");
    Ok(success(json!({ "id": id })))
}
