//! SQLite record store tests
//! SQLite 记录存储测试

use std::sync::Arc;

use ps_core::ports::RecordStorePort;
use ps_core::{InsertionOrder, ListKind, PageQuery, PreviewLinks, Record, RecordId, RecordPatch};
use ps_infra::db::mappers::RecordRowMapper;
use ps_infra::db::pool::{init_db_pool, DbPool};
use ps_infra::db::ports::DbExecutor;
use ps_infra::db::repositories::DieselRecordStore;
use tempfile::TempDir;

/// File-backed test executor; every pooled connection sees the same database.
struct TestDbExecutor {
    pool: Arc<DbPool>,
    _dir: TempDir,
}

impl TestDbExecutor {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("test.db");
        let pool = Arc::new(
            init_db_pool(path.to_str().unwrap()).expect("Failed to create test DB pool"),
        );
        Self { pool, _dir: dir }
    }
}

impl DbExecutor for TestDbExecutor {
    fn run<T>(
        &self,
        f: impl FnOnce(&mut diesel::SqliteConnection) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        let mut conn = self.pool.get()?;
        f(&mut conn)
    }
}

type Store = DieselRecordStore<TestDbExecutor, RecordRowMapper, RecordRowMapper>;

fn new_store() -> Store {
    DieselRecordStore::new(TestDbExecutor::new(), RecordRowMapper, RecordRowMapper)
}

fn record(id: &str, text: &str, list: ListKind) -> Record {
    let mut r = Record::new(text, list, 0);
    r.id = RecordId::from(id);
    r
}

/// Inserts g1..=g{n} one by one so g{n} is newest.
async fn seed_generated(store: &Store, n: usize) {
    for i in 1..=n {
        store
            .insert_batch(&[record(&format!("g{i}"), &format!("text {i}"), ListKind::Generated)])
            .await
            .unwrap();
    }
}

fn ids(page: &ps_core::Page) -> Vec<String> {
    page.items.iter().map(|r| r.id.to_string()).collect()
}

#[tokio::test]
async fn test_pages_follow_cursor_newest_first() {
    let store = new_store();
    seed_generated(&store, 12).await;

    let first = store
        .query(&PageQuery::first(ListKind::Generated, "", 5))
        .await
        .unwrap();
    assert_eq!(ids(&first), ["g12", "g11", "g10", "g9", "g8"]);
    assert_eq!(first.total, 12);
    assert_eq!(first.next_cursor, first.items[4].insertion_order);

    let second = store
        .query(&PageQuery::first(ListKind::Generated, "", 5).after(first.next_cursor))
        .await
        .unwrap();
    assert_eq!(ids(&second), ["g7", "g6", "g5", "g4", "g3"]);
    assert_eq!(second.total, 12);

    let third = store
        .query(&PageQuery::first(ListKind::Generated, "", 5).after(second.next_cursor))
        .await
        .unwrap();
    assert_eq!(ids(&third), ["g2", "g1"]);

    let past_end = store
        .query(&PageQuery::first(ListKind::Generated, "", 5).after(third.next_cursor))
        .await
        .unwrap();
    assert!(past_end.items.is_empty());
    assert_eq!(past_end.next_cursor, None);
    assert_eq!(past_end.total, 12);
}

#[tokio::test]
async fn test_batch_head_gets_highest_order_and_lists_are_separate() {
    let store = new_store();
    store
        .insert_batch(&[
            record("a", "top", ListKind::Generated),
            record("b", "bottom", ListKind::Generated),
        ])
        .await
        .unwrap();
    store
        .insert_batch(&[record("s", "saved one", ListKind::Saved)])
        .await
        .unwrap();

    let generated = store
        .query(&PageQuery::first(ListKind::Generated, "", 10))
        .await
        .unwrap();
    assert_eq!(ids(&generated), ["a", "b"]);
    assert!(generated.items[0].insertion_order > generated.items[1].insertion_order);

    let saved = store
        .query(&PageQuery::first(ListKind::Saved, "", 10))
        .await
        .unwrap();
    assert_eq!(ids(&saved), ["s"]);
    assert_eq!(saved.total, 1);
}

#[tokio::test]
async fn test_duplicate_id_rolls_back_whole_batch() {
    let store = new_store();
    store
        .insert_batch(&[record("dup", "x", ListKind::Generated)])
        .await
        .unwrap();

    let result = store
        .insert_batch(&[
            record("fresh", "y", ListKind::Generated),
            record("dup", "z", ListKind::Generated),
        ])
        .await;
    assert!(result.is_err());

    let page = store
        .query(&PageQuery::first(ListKind::Generated, "", 10))
        .await
        .unwrap();
    assert_eq!(ids(&page), ["dup"]);
}

#[tokio::test]
async fn test_text_filter_is_case_insensitive_and_literal() {
    let store = new_store();
    store
        .insert_batch(&[
            record("1", "A Red Fox", ListKind::Saved),
            record("2", "blue whale", ListKind::Saved),
            record("3", "100% red", ListKind::Saved),
            record("4", "1000 reds", ListKind::Saved),
            record("5", "Éclair au chocolat", ListKind::Saved),
        ])
        .await
        .unwrap();

    let red = store
        .query(&PageQuery::first(ListKind::Saved, "RED", 10))
        .await
        .unwrap();
    assert_eq!(red.total, 3);

    let eclair = store
        .query(&PageQuery::first(ListKind::Saved, "éCLAIR", 10))
        .await
        .unwrap();
    assert_eq!(ids(&eclair), ["5"]);

    let spaced = store
        .query(&PageQuery::first(ListKind::Saved, "fox ", 10))
        .await
        .unwrap();
    assert_eq!(spaced.total, 0);

    let percent = store
        .query(&PageQuery::first(ListKind::Saved, "0% r", 10))
        .await
        .unwrap();
    assert_eq!(ids(&percent), ["3"]);
    assert_eq!(percent.total, 1);
}

#[tokio::test]
async fn test_deletes_leave_gaps_and_never_reuse_orders() {
    let store = new_store();
    seed_generated(&store, 3).await;
    store.delete_one(&RecordId::from("g3")).await.unwrap();
    store.delete_one(&RecordId::from("missing")).await.unwrap();
    store
        .insert_batch(&[record("g4", "text 4", ListKind::Generated)])
        .await
        .unwrap();

    let page = store
        .query(&PageQuery::first(ListKind::Generated, "", 10))
        .await
        .unwrap();
    assert_eq!(ids(&page), ["g4", "g2", "g1"]);
    assert_eq!(page.items[0].insertion_order, Some(InsertionOrder(4)));
}

#[tokio::test]
async fn test_update_fields_and_delete_all_in_list() {
    let store = new_store();
    seed_generated(&store, 2).await;
    store
        .insert_batch(&[record("s1", "keep me", ListKind::Saved)])
        .await
        .unwrap();

    let links = PreviewLinks::from_parts(vec!["a".into(), "b".into()], Some("b".into()));
    store
        .update_fields(&RecordId::from("g1"), &RecordPatch::preview_links(links.clone()))
        .await
        .unwrap();
    store
        .update_fields(&RecordId::from("nope"), &RecordPatch::preview_links(links.clone()))
        .await
        .unwrap();

    let page = store
        .query(&PageQuery::first(ListKind::Generated, "", 10))
        .await
        .unwrap();
    let g1 = page.items.iter().find(|r| r.id.as_str() == "g1").unwrap();
    assert_eq!(g1.preview_links, links);

    assert_eq!(store.delete_all_in_list(ListKind::Generated).await.unwrap(), 2);
    let saved = store
        .query(&PageQuery::first(ListKind::Saved, "", 10))
        .await
        .unwrap();
    assert_eq!(saved.total, 1);
}

#[tokio::test]
async fn test_invalid_limit_is_rejected() {
    let store = new_store();
    assert!(store
        .query(&PageQuery::first(ListKind::Generated, "", 0))
        .await
        .is_err());
}
