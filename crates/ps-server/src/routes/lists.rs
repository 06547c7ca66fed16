use std::sync::Arc;

use ps_core::wire::{DeletedCount, ListRecordsParams};
use ps_core::{InsertionOrder, ListKind, PageQuery};
use tracing::info;
use warp::{Filter, Rejection};

use super::response::success;
use super::{with_state, ApiState};
use crate::error::ApiError;

/// `GET /lists/{list}/records?q=&cursor=&limit=`
pub fn list_records(
    state: Arc<ApiState>,
) -> impl Filter<Extract = (warp::reply::Response,), Error = Rejection> + Clone {
    warp::path!("lists" / String / "records")
        .and(warp::get())
        .and(warp::query::<ListRecordsParams>())
        .and(with_state(state))
        .and_then(handle_list_records)
}

/// `DELETE /lists/{list}/records`
pub fn clear_list(
    state: Arc<ApiState>,
) -> impl Filter<Extract = (warp::reply::Response,), Error = Rejection> + Clone {
    warp::path!("lists" / String / "records")
        .and(warp::delete())
        .and(with_state(state))
        .and_then(handle_clear_list)
}

async fn handle_list_records(
    list: String,
    params: ListRecordsParams,
    state: Arc<ApiState>,
) -> Result<warp::reply::Response, Rejection> {
    let list: ListKind = list.parse().map_err(ApiError::from)?;
    let query = PageQuery {
        list,
        text_filter: params.q.unwrap_or_default(),
        cursor: params.cursor.map(InsertionOrder),
        limit: params.limit.unwrap_or(state.default_limit),
    };

    let page = state
        .query_records
        .execute(&query)
        .await
        .map_err(ApiError::from_anyhow)?;
    Ok(success(page))
}

async fn handle_clear_list(
    list: String,
    state: Arc<ApiState>,
) -> Result<warp::reply::Response, Rejection> {
    let list: ListKind = list.parse().map_err(ApiError::from)?;
    let deleted = state
        .store
        .delete_all_in_list(list)
        .await
        .map_err(ApiError::from_anyhow)?;

    info!(list = %list, deleted, "cleared list");
    Ok(success(DeletedCount { deleted }))
}
