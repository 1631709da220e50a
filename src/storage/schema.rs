//! Database schema definitions

/// Database schema version
pub const SCHEMA_VERSION: u32 = 1;

/// SQL for creating the docs table
pub const CREATE_DOCS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS docs (
    id INTEGER PRIMARY KEY,
    source TEXT NOT NULL,
    heading TEXT NOT NULL DEFAULT '',
    chunk TEXT NOT NULL,
    embedding BLOB NOT NULL
);
"#;

/// SQL for creating the metadata table
pub const CREATE_METADATA_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// SQL for creating the source index on the docs table
pub const CREATE_DOCS_INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_source ON docs(source);
"#;
