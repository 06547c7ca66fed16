//! HTTP routes of the record service.
//! 记录服务的 HTTP 路由。

mod health;
mod lists;
mod records;
mod response;

pub use response::handle_rejection;

use std::convert::Infallible;
use std::sync::Arc;

use ps_app::usecases::QueryRecords;
use ps_core::ports::RecordStorePort;
use warp::Filter;

/// Shared handler state.
pub struct ApiState {
    pub store: Arc<dyn RecordStorePort>,
    pub query_records: QueryRecords,
    /// Limit used when a list request carries none.
    pub default_limit: usize,
}

impl ApiState {
    pub fn new(store: Arc<dyn RecordStorePort>, default_limit: usize) -> Arc<Self> {
        Arc::new(Self {
            query_records: QueryRecords::from_arc(Arc::clone(&store)),
            store,
            default_limit,
        })
    }
}

/// 注入共享状态
fn with_state(
    state: Arc<ApiState>,
) -> impl Filter<Extract = (Arc<ApiState>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&state))
}

/// All routes, with rejections rendered as error envelopes.
pub fn api(
    state: Arc<ApiState>,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    health::route()
        .or(lists::list_records(Arc::clone(&state)))
        .or(lists::clear_list(Arc::clone(&state)))
        .or(records::insert_batch(Arc::clone(&state)))
        .or(records::update(Arc::clone(&state)))
        .or(records::delete(state))
        .recover(handle_rejection)
        .with(warp::trace::request())
}
