use serde_json::json;
use warp::Filter;

use super::response::success;

pub fn route() -> impl Filter<Extract = (warp::reply::Response,), Error = warp::Rejection> + Clone {
    warp::path!("health")
        .and(warp::get())
        .map(|| success(json!({ "status": "ok" })))
}
