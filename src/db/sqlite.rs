use crate::db::models::{DbMessage, NewMessage};
use crate::db::schema::SQLITE_INIT;
use crate::error::RelayError;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct MessageStorage {
    pool: SqlitePool,
}

impl MessageStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` and apply the schema.
    pub async fn connect(database_url: &str) -> Result<Self, RelayError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), RelayError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert one message, stamping it with the current time. Returns the stored row.
    pub async fn insert(&self, message: NewMessage) -> Result<DbMessage, RelayError> {
        let created = Utc::now();
        let result = sqlx::query("INSERT INTO messages (sender, content, created) VALUES (?, ?, ?)")
            .bind(&message.sender)
            .bind(&message.content)
            .bind(created.to_rfc3339())
            .execute(&self.pool)
            .await?;

        Ok(DbMessage {
            id: result.last_insert_rowid(),
            sender: message.sender,
            content: message.content,
            created,
        })
    }

    /// Every stored message, oldest first.
    pub async fn list_all(&self) -> Result<Vec<DbMessage>, RelayError> {
        let rows = sqlx::query("SELECT id, sender, content, created FROM messages ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    pub async fn count(&self) -> Result<i64, RelayError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    fn row_to_model(row: SqliteRow) -> Result<DbMessage, RelayError> {
        let id: i64 = row.try_get("id")?;
        let sender: String = row.try_get("sender")?;
        let content: String = row.try_get("content")?;
        let created_str: String = row.try_get("created")?;

        let created: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_str)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
            .with_timezone(&Utc);

        Ok(DbMessage {
            id,
            sender,
            content,
            created,
        })
    }
}
