//! Pool handle behaviour against in-memory SQLite.

use std::time::Duration;

use anyhow::Result;
use db::{DbConnConfig, DbEngine, DbHandle, PoolCfg};

async fn memory_handle() -> Result<DbHandle> {
    let cfg = DbConnConfig {
        url: Some("sqlite::memory:".into()),
        ..Default::default()
    };
    Ok(DbHandle::connect(&cfg).await?)
}

#[tokio::test]
async fn connect_and_ping_memory() -> Result<()> {
    let db = memory_handle().await?;
    assert_eq!(db.engine(), DbEngine::Sqlite);
    assert_eq!(db.dsn(), "sqlite::memory:");
    assert!(db.sqlx_sqlite().is_some());
    assert!(db.sqlx_postgres().is_none());
    db.ping().await?;
    Ok(())
}

#[tokio::test]
async fn memory_database_survives_across_statements() -> Result<()> {
    let db = memory_handle().await?;
    db.execute_batch(&[
        "CREATE TABLE notes (id INTEGER PRIMARY KEY AUTOINCREMENT, body TEXT NOT NULL)",
        "INSERT INTO notes (body) VALUES ('first')",
    ])
    .await?;

    let inserted = db::with_pool!(db, pool => {
        sqlx::query_scalar::<_, i64>("INSERT INTO notes (body) VALUES ($1) RETURNING id")
            .bind("second")
            .fetch_one(pool)
            .await
    })?;
    assert_eq!(inserted, 2);

    let count = db::with_pool!(db, pool => {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM notes")
            .fetch_one(pool)
            .await
    })?;
    assert_eq!(count, 2);
    Ok(())
}

#[tokio::test]
async fn positional_placeholders_bind_in_order() -> Result<()> {
    let db = memory_handle().await?;
    db.execute_batch(&["CREATE TABLE pairs (a TEXT NOT NULL, b TEXT NOT NULL)"])
        .await?;

    let (a, b) = db::with_pool!(db, pool => {
        sqlx::query_as::<_, (String, String)>(
            "INSERT INTO pairs (a, b) VALUES ($1, $2) RETURNING a, b",
        )
        .bind("left")
        .bind("right")
        .fetch_one(pool)
        .await
    })?;
    assert_eq!((a.as_str(), b.as_str()), ("left", "right"));
    Ok(())
}

#[tokio::test]
async fn file_database_is_created() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("buildezy.db");
    let cfg = DbConnConfig {
        url: Some(format!("sqlite://{}", path.display())),
        pool: PoolCfg {
            max_conns: Some(2),
            ..Default::default()
        },
        ..Default::default()
    };
    let db = DbHandle::connect(&cfg).await?;
    assert!(path.exists());
    db.close().await;
    Ok(())
}

#[tokio::test]
async fn lazy_pool_tolerates_unreachable_server() {
    let cfg = DbConnConfig {
        host: Some("127.0.0.1".into()),
        port: Some(1),
        user: Some("nobody".into()),
        dbname: Some("nothing".into()),
        pool: PoolCfg {
            acquire_timeout: Some(Duration::from_secs(2)),
            ..Default::default()
        },
        ..Default::default()
    };

    let db = DbHandle::connect_lazy(&cfg).expect("lazy pool must not connect");
    assert_eq!(db.engine(), DbEngine::Postgres);
    assert!(db.ping().await.is_err());
}
