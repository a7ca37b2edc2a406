use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stored message row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DbMessage {
    pub id: i64,
    pub sender: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

/// Fields supplied by a visitor; `id` and `created` are assigned on insert.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub sender: String,
    pub content: String,
}
