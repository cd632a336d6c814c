//! Read-only view of a newsboat cache database (SQLite via sqlx).
//!
//! Lists feed items that are not soft-deleted, sorted by author then title.
//! The file is opened read-write to match newsboat's own access mode, but
//! nothing is ever written.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Row, Sqlite};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the path to newsboat's `cache.db`.
pub const FEED_DB_ENV: &str = "NEWSBOAT_DB_FILE";

const LIST_ITEMS_SQL: &str =
    "SELECT author, title, url FROM rss_item WHERE deleted = 0 ORDER BY author, title ASC";

#[derive(Debug, Error)]
pub enum FeedDbError {
    #[error("NEWSBOAT_DB_FILE env var is not set")]
    MissingEnv,
    #[error("open feed database {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },
    #[error("query feed items: {0}")]
    Query(#[from] sqlx::Error),
}

/// One subscription entry. Author and title may be NULL in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub author: Option<String>,
    pub title: Option<String>,
    pub url: String,
}

impl fmt::Display for FeedItem {
    /// `<url> - <author> - <title>`, NULLs shown as empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {}",
            self.url,
            self.author.as_deref().unwrap_or_default(),
            self.title.as_deref().unwrap_or_default()
        )
    }
}

/// Path from the process environment (`NEWSBOAT_DB_FILE`).
pub fn db_path_from_env() -> Result<PathBuf, FeedDbError> {
    db_path_from(std::env::var_os(FEED_DB_ENV))
}

/// Unset and empty values are both treated as missing.
pub fn db_path_from(value: Option<OsString>) -> Result<PathBuf, FeedDbError> {
    value
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .ok_or(FeedDbError::MissingEnv)
}

/// Handle to an existing newsboat database.
#[derive(Clone)]
pub struct FeedDb {
    pool: Pool<Sqlite>,
}

impl FeedDb {
    /// Open an existing database file for read-write access. The file is never created.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, FeedDbError> {
        let path = path.as_ref();
        let opts = SqliteConnectOptions::new()
            .filename(path)
            .read_only(false)
            .create_if_missing(false);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await
            .map_err(|source| FeedDbError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "opened feed database");
        Ok(FeedDb { pool })
    }

    /// All non-deleted items, ordered by author then title.
    pub async fn list_items(&self) -> Result<Vec<FeedItem>, FeedDbError> {
        let rows = sqlx::query(LIST_ITEMS_SQL).fetch_all(&self.pool).await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(FeedItem {
                author: row.try_get("author")?,
                title: row.try_get("title")?,
                url: row.try_get("url")?,
            });
        }
        tracing::debug!(count = out.len(), "listed feed items");
        Ok(out)
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
