use diesel::prelude::*;

use crate::db::schema::records;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecordRow {
    pub seq: i64,
    pub id: String,
    pub list: String,
    pub text: String,
    pub created_at_ms: i64,
    /// JSON array of links, oldest first.
    pub preview_links: String,
    pub default_preview_link: Option<String>,
}

/// Insert row. `seq` is left to SQLite.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = records)]
pub struct NewRecordRow {
    pub id: String,
    pub list: String,
    pub text: String,
    /// Search key matched by text filters.
    pub text_folded: String,
    pub created_at_ms: i64,
    pub preview_links: String,
    pub default_preview_link: Option<String>,
}

/// Changeset for the only mutable fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = records)]
#[diesel(treat_none_as_null = true)]
pub struct PreviewLinksChangeset {
    pub preview_links: String,
    pub default_preview_link: Option<String>,
}
