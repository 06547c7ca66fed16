use anyhow::{Context, Result};
use ps_core::{fold_case, InsertionOrder, ListKind, PreviewLinks, Record, RecordId};

use crate::db::models::{NewRecordRow, PreviewLinksChangeset, RecordRow};
use crate::db::ports::{InsertMapper, RowMapper};

pub struct RecordRowMapper;

impl RecordRowMapper {
    pub fn to_changeset(links: &PreviewLinks) -> Result<PreviewLinksChangeset> {
        Ok(PreviewLinksChangeset {
            preview_links: serde_json::to_string(links.links())
                .context("Failed to encode preview links")?,
            default_preview_link: links.default_link().map(str::to_string),
        })
    }
}

impl InsertMapper<Record, NewRecordRow> for RecordRowMapper {
    fn to_row(&self, domain: &Record) -> Result<NewRecordRow> {
        let links = Self::to_changeset(&domain.preview_links)?;
        Ok(NewRecordRow {
            id: domain.id.to_string(),
            list: domain.list.as_str().to_string(),
            text: domain.text.clone(),
            text_folded: fold_case(&domain.text),
            created_at_ms: domain.created_at_ms,
            preview_links: links.preview_links,
            default_preview_link: links.default_preview_link,
        })
    }
}

impl RowMapper<RecordRow, Record> for RecordRowMapper {
    fn to_domain(&self, row: &RecordRow) -> Result<Record> {
        let list: ListKind = row
            .list
            .parse()
            .with_context(|| format!("Corrupt list column for record {}", row.id))?;
        let links: Vec<String> = serde_json::from_str(&row.preview_links)
            .with_context(|| format!("Corrupt preview links for record {}", row.id))?;

        Ok(Record {
            id: RecordId::from(row.id.clone()),
            text: row.text.clone(),
            list,
            created_at_ms: row.created_at_ms,
            insertion_order: Some(InsertionOrder(row.seq)),
            preview_links: PreviewLinks::from_parts(links, row.default_preview_link.clone()),
        })
    }
}
