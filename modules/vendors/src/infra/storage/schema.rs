//! Table definition for `vendors`, one dialect per engine.

use db::{DbEngine, DbHandle};
use tracing::info;

const POSTGRES: &[&str] = &[r#"
CREATE TABLE IF NOT EXISTS vendors (
    id          BIGSERIAL PRIMARY KEY,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL,
    mobile      TEXT NOT NULL,
    service     TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
)"#];

// AUTOINCREMENT keeps ids from being reused after deletes.
const SQLITE: &[&str] = &[r#"
CREATE TABLE IF NOT EXISTS vendors (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL,
    mobile      TEXT NOT NULL,
    service     TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
)"#];

pub fn statements(engine: DbEngine) -> &'static [&'static str] {
    match engine {
        DbEngine::Postgres => POSTGRES,
        DbEngine::Sqlite => SQLITE,
    }
}

/// Create the `vendors` table when it does not exist yet.
pub async fn ensure_schema(db: &DbHandle) -> anyhow::Result<()> {
    db.execute_batch(statements(db.engine())).await?;
    info!(engine = ?db.engine(), "vendors table ready");
    Ok(())
}
