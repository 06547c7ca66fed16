//! Route tests through `warp::test`, plus a client/server round trip.
//! 路由测试。

use std::sync::Arc;

use ps_core::ports::RecordStorePort;
use ps_core::wire::{ApiResponse, DeletedCount, InsertBatchRequest};
use ps_core::{ListKind, Page, PageQuery, PreviewLinks, Record, RecordId, RecordPatch};
use ps_infra::{HttpRecordStore, InMemoryRecordStore};
use ps_server::bootstrap::{bind_server, ServerConfig};
use ps_server::routes::{api, ApiState};
use serde::de::DeserializeOwned;
use warp::http::StatusCode;

fn record(id: &str, text: &str, list: ListKind) -> Record {
    let mut r = Record::new(text, list, 0);
    r.id = RecordId::from(id);
    r
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> ApiResponse<T> {
    serde_json::from_slice(body).expect("body is an envelope")
}

async fn state_with(records: &[Record]) -> (Arc<ApiState>, Arc<InMemoryRecordStore>) {
    let store = Arc::new(InMemoryRecordStore::new());
    for r in records.iter().rev() {
        store.insert_batch(std::slice::from_ref(r)).await.unwrap();
    }
    (ApiState::new(store.clone(), 50), store)
}

#[tokio::test]
async fn test_health() {
    let (state, _) = state_with(&[]).await;
    let resp = warp::test::request()
        .method("GET")
        .path("/health")
        .reply(&api(state))
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: ApiResponse<serde_json::Value> = decode(resp.body());
    assert!(body.success);
}

#[tokio::test]
async fn test_list_records_pages_with_cursor_and_filter() {
    let (state, _) = state_with(&[
        record("c", "gamma cat", ListKind::Generated),
        record("b", "beta dog", ListKind::Generated),
        record("a", "alpha cat", ListKind::Generated),
        record("s", "saved cat", ListKind::Saved),
    ])
    .await;
    let routes = api(state);

    let resp = warp::test::request()
        .path("/lists/generated/records?limit=2")
        .reply(&routes)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let first: Page = decode(resp.body()).into_result().unwrap();
    let ids: Vec<_> = first.items.iter().map(|r| r.id.as_str().to_string()).collect();
    assert_eq!(ids, ["c", "b"]);
    assert_eq!(first.total, 3);

    let cursor = first.next_cursor.unwrap().value();
    let resp = warp::test::request()
        .path(&format!("/lists/generated/records?limit=2&cursor={cursor}"))
        .reply(&routes)
        .await;
    let second: Page = decode(resp.body()).into_result().unwrap();
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].id.as_str(), "a");

    let resp = warp::test::request()
        .path("/lists/generated/records?q=CAT")
        .reply(&routes)
        .await;
    let filtered: Page = decode(resp.body()).into_result().unwrap();
    assert_eq!(filtered.total, 2);
}

#[tokio::test]
async fn test_bad_requests_use_error_envelope() {
    let (state, _) = state_with(&[]).await;
    let routes = api(state);

    for path in [
        "/lists/archived/records",
        "/lists/saved/records?limit=0",
        "/lists/saved/records?limit=1001",
        "/lists/saved/records?cursor=abc",
    ] {
        let resp = warp::test::request().path(path).reply(&routes).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{path}");
        let body: ApiResponse<serde_json::Value> = decode(resp.body());
        assert!(!body.success);
        assert!(body.error.is_some());
    }

    let resp = warp::test::request().path("/nope").reply(&routes).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_insert_patch_delete_round_trip() {
    let (state, store) = state_with(&[]).await;
    let routes = api(state);

    let batch = InsertBatchRequest {
        records: vec![
            record("n2", "newer", ListKind::Saved),
            record("n1", "older", ListKind::Saved),
        ],
    };
    let resp = warp::test::request()
        .method("POST")
        .path("/records/batch")
        .json(&batch)
        .reply(&routes)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let page = store
        .query(&PageQuery::first(ListKind::Saved, "", 10))
        .await
        .unwrap();
    assert_eq!(page.items[0].id.as_str(), "n2");

    let links = PreviewLinks::from_parts(vec!["https://img/1".into()], Some("https://img/1".into()));
    let resp = warp::test::request()
        .method("PATCH")
        .path("/records/n1")
        .json(&RecordPatch::preview_links(links.clone()))
        .reply(&routes)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(store.get(&RecordId::from("n1")).unwrap().preview_links, links);

    let resp = warp::test::request()
        .method("DELETE")
        .path("/records/n2")
        .reply(&routes)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(store.get(&RecordId::from("n2")).is_none());

    let resp = warp::test::request()
        .method("DELETE")
        .path("/lists/saved/records")
        .reply(&routes)
        .await;
    let deleted: DeletedCount = decode(resp.body()).into_result().unwrap();
    assert_eq!(deleted.deleted, 1);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_malformed_batch_body_is_rejected() {
    let (state, _) = state_with(&[]).await;
    let resp = warp::test::request()
        .method("POST")
        .path("/records/batch")
        .header("content-type", "application/json")
        .body(r#"{"records": "not a list"}"#)
        .reply(&api(state))
        .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_http_store_against_running_server() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        port: 0,
        data_dir: dir.path().to_path_buf(),
        default_page_size: 50,
    };
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let (addr, server) = bind_server(&config, async move {
        let _ = shutdown_rx.await;
    })
    .unwrap();
    let server = tokio::spawn(server);

    let client = HttpRecordStore::new(format!("http://{addr}")).unwrap();
    client
        .insert_batch(&[
            record("x2", "second", ListKind::Generated),
            record("x1", "first", ListKind::Generated),
        ])
        .await
        .unwrap();

    let page = client
        .query(&PageQuery::first(ListKind::Generated, "", 1))
        .await
        .unwrap();
    assert_eq!(page.items[0].id.as_str(), "x2");
    assert_eq!(page.total, 2);

    let rest = client
        .query(&PageQuery::first(ListKind::Generated, "", 10).after(page.next_cursor))
        .await
        .unwrap();
    assert_eq!(rest.items[0].id.as_str(), "x1");

    client.delete_one(&RecordId::from("x1")).await.unwrap();
    assert_eq!(client.delete_all_in_list(ListKind::Generated).await.unwrap(), 1);

    let err = client
        .query(&PageQuery::first(ListKind::Generated, "", 0))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Invalid limit"));

    shutdown_tx.send(()).unwrap();
    server.await.unwrap();
}
