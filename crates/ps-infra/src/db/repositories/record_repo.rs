use anyhow::Result;
use diesel::dsl::count_star;
use diesel::prelude::*;
use ps_core::ports::RecordStorePort;
use ps_core::{fold_case, ListKind, Page, PageQuery, Record, RecordId, RecordPatch};
use tracing::debug;

use crate::db::mappers::RecordRowMapper;
use crate::db::models::{NewRecordRow, RecordRow};
use crate::db::ports::{DbExecutor, InsertMapper, RowMapper};
use crate::db::schema::records;

/// Case-folds the filter and escapes `%`, `_` and the escape character
/// itself so user text is matched literally inside a LIKE pattern.
pub(crate) fn like_pattern(filter: &str) -> Option<String> {
    if filter.is_empty() {
        return None;
    }
    let folded = fold_case(filter);
    let mut pattern = String::with_capacity(folded.len() + 2);
    pattern.push('%');
    for c in folded.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

/// SQLite-backed [`RecordStorePort`].
/// 基于 SQLite 的记录存储。
///
/// Insertion order is the `seq` rowid; pages are `seq < cursor` ordered by
/// `seq DESC`. Text filtering runs `LIKE` against the stored `text_folded`
/// column with an equally folded pattern.
pub struct DieselRecordStore<E, IM, RM> {
    executor: E,
    insert_mapper: IM,
    row_mapper: RM,
}

impl<E, IM, RM> DieselRecordStore<E, IM, RM> {
    pub fn new(executor: E, insert_mapper: IM, row_mapper: RM) -> Self {
        Self {
            executor,
            insert_mapper,
            row_mapper,
        }
    }
}

#[async_trait::async_trait]
impl<E, IM, RM> RecordStorePort for DieselRecordStore<E, IM, RM>
where
    E: DbExecutor,
    IM: InsertMapper<Record, NewRecordRow>,
    RM: RowMapper<RecordRow, Record>,
{
    async fn query(&self, query: &PageQuery) -> Result<Page> {
        query.validate()?;
        let list = query.list.as_str();
        let pattern = like_pattern(&query.text_filter);

        self.executor.run(|conn| {
            let mut items_q = records::table
                .filter(records::list.eq(list))
                .select(RecordRow::as_select())
                .into_boxed();
            let mut count_q = records::table
                .filter(records::list.eq(list))
                .select(count_star())
                .into_boxed();
            if let Some(pattern) = &pattern {
                items_q = items_q.filter(records::text_folded.like(pattern).escape('\\'));
                count_q = count_q.filter(records::text_folded.like(pattern).escape('\\'));
            }
            if let Some(cursor) = query.cursor {
                items_q = items_q.filter(records::seq.lt(cursor.value()));
            }

            let rows = items_q
                .order(records::seq.desc())
                .limit(query.limit as i64)
                .load::<RecordRow>(conn)?;
            let total: i64 = count_q.get_result(conn)?;

            let items = rows
                .iter()
                .map(|row| self.row_mapper.to_domain(row))
                .collect::<Result<Vec<_>>>()?;
            debug!(list, returned = items.len(), total, "queried records");
            Ok(Page::new(items, total.max(0) as u64))
        })
    }

    async fn insert_batch(&self, batch: &[Record]) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let rows = batch
            .iter()
            .map(|r| self.insert_mapper.to_row(r))
            .collect::<Result<Vec<_>>>()?;

        self.executor.run(|conn| {
            // Oldest first, so records[0] receives the highest seq.
            conn.transaction(|conn| {
                for row in rows.iter().rev() {
                    diesel::insert_into(records::table)
                        .values(row)
                        .execute(conn)?;
                }
                Ok::<_, diesel::result::Error>(())
            })?;
            Ok(())
        })
    }

    async fn update_fields(&self, id: &RecordId, patch: &RecordPatch) -> Result<()> {
        let Some(links) = patch.preview_links.as_ref() else {
            return Ok(());
        };
        let changeset = RecordRowMapper::to_changeset(links)?;

        self.executor.run(|conn| {
            let updated = diesel::update(records::table.filter(records::id.eq(id.as_str())))
                .set(&changeset)
                .execute(conn)?;
            if updated == 0 {
                debug!(record_id = %id, "update for unknown record ignored");
            }
            Ok(())
        })
    }

    async fn delete_one(&self, id: &RecordId) -> Result<()> {
        self.executor.run(|conn| {
            diesel::delete(records::table.filter(records::id.eq(id.as_str()))).execute(conn)?;
            Ok(())
        })
    }

    async fn delete_all_in_list(&self, list: ListKind) -> Result<u64> {
        self.executor.run(|conn| {
            let deleted =
                diesel::delete(records::table.filter(records::list.eq(list.as_str())))
                    .execute(conn)?;
            Ok(deleted as u64)
        })
    }
}
