//! `subs` – list non-deleted newsboat items as `<url> - <author> - <title>`.

use anyhow::Result;
use clap::Parser;
use grabkit_core::feed_db::{self, FeedDb, FeedItem};
use std::io::{self, Write};

#[derive(Debug, Parser)]
#[command(name = "subs", version)]
#[command(
    about = "List newsboat items sorted by author and title",
    long_about = "List newsboat items sorted by author and title.\n\n\
                  The database path is read from the NEWSBOAT_DB_FILE environment variable."
)]
pub struct SubsCli {}

pub async fn run_from_args() -> Result<()> {
    let _cli = SubsCli::parse();
    let path = feed_db::db_path_from_env()?;
    let db = FeedDb::open(&path).await?;
    let items = db.list_items().await?;
    db.close().await;
    print_items(&items, io::stdout().lock())
}

/// Write one line per item, in query order.
pub fn print_items<W: Write>(items: &[FeedItem], mut out: W) -> Result<()> {
    for item in items {
        writeln!(out, "{item}")?;
    }
    out.flush()?;
    Ok(())
}
