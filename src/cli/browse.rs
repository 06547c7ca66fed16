use std::sync::Arc;

use anyhow::Result;
use ps_app::{ListController, ListSession, ListSettings};
use ps_core::{ListKind, Record};
use ps_infra::HttpRecordStore;

fn print_record(index: usize, record: &Record) {
    let order = record
        .insertion_order
        .map(|o| o.to_string())
        .unwrap_or_else(|| "-".to_string());
    match record.preview_links.default_link() {
        Some(link) => println!("{index:>5} #{order:<6} {}  [{link}]", record.text),
        None => println!("{index:>5} #{order:<6} {}", record.text),
    }
}

/// Pages through `list` by scrolling a headless window one viewport at a
/// time, printing each record the first time it is materialized.
pub async fn run_browse(
    list: ListKind,
    query: String,
    max: Option<usize>,
    server: String,
) -> Result<()> {
    let settings = ListSettings::default();
    let store = Arc::new(HttpRecordStore::new(server)?);
    let controller = ListController::new(list, store, settings.page_size);
    let mut session = ListSession::new(controller, &settings);
    let limit = max.unwrap_or(usize::MAX);

    let mut layout = session.set_query(&query).await;
    let mut printed = 0usize;
    loop {
        let snapshot = session.controller().snapshot();
        let end = layout
            .last_rendered_index
            .map_or(0, |last| last + 1)
            .min(limit);
        for (index, record) in snapshot.items.iter().enumerate().take(end).skip(printed) {
            print_record(index, record);
        }
        printed = printed.max(end);

        if printed >= limit || (!snapshot.has_more && printed >= snapshot.items.len()) {
            println!("-- {} of {} shown", printed, snapshot.total);
            return Ok(());
        }

        let before = session.window().scroll_offset();
        layout = session.scroll_by(settings.viewport_height as i64).await;
        let stuck = session.window().scroll_offset() == before
            && session.controller().snapshot().items.len() == snapshot.items.len();
        if stuck {
            // Fetch failed and nothing is left to scroll.
            println!("-- stopped after {} of {} (fetch failed)", printed, snapshot.total);
            return Ok(());
        }
    }
}
