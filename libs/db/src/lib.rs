//! Database access for the Buildezy backend.
//!
//! One [`DbHandle`] owns one sqlx pool and is shared by every request handler.
//! PostgreSQL is the deployment engine; SQLite backs local `--mock` runs and
//! the test suites. Statements are written once with `$N` placeholders, which
//! both engines accept, and dispatched through [`with_pool!`].
//!
//! # Example
//! ```rust,no_run
//! # async fn demo() -> db::Result<()> {
//! use db::{DbConnConfig, DbHandle};
//!
//! let db = DbHandle::connect_lazy(&DbConnConfig::in_memory())?;
//! let one = db::with_pool!(db, pool => {
//!     sqlx::query_scalar::<_, i64>("SELECT CAST(1 AS BIGINT)").fetch_one(pool).await
//! })?;
//! assert_eq!(one, 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod options;

pub use config::{DbConnConfig, PoolCfg};
pub use options::{
    build_connect_options, expand_env_vars, redact_credentials_in_dsn, DbConnectOptions,
};

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{PgPool, SqlitePool};
use thiserror::Error;

/// Library-local result type.
pub type Result<T> = std::result::Result<T, DbError>;

/// Typed error for the DB handle and helpers.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unknown DSN: {0}")]
    UnknownDsn(String),

    #[error("environment variable not found: {0}")]
    EnvVar(String),

    #[error("Invalid connection parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Supported engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DbEngine {
    Postgres,
    Sqlite,
}

/// One concrete sqlx pool.
#[derive(Clone, Debug)]
pub enum DbPool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

/// Run the same sqlx expression against whichever pool the handle holds.
///
/// The body is expanded once per engine with `$pool` bound to `&PgPool` or
/// `&SqlitePool`, so `query_as::<_, Row>` infers the database from the
/// executor in each arm.
#[macro_export]
macro_rules! with_pool {
    ($db:expr, $pool:ident => $body:expr) => {
        match $db.pool() {
            $crate::DbPool::Postgres($pool) => $body,
            $crate::DbPool::Sqlite($pool) => $body,
        }
    };
}

/// Shared pool handle.
#[derive(Debug)]
pub struct DbHandle {
    engine: DbEngine,
    pool: DbPool,
    dsn: String,
}

impl DbHandle {
    /// Detect engine by DSN.
    ///
    /// Only the scheme prefix is inspected; credentials are never touched.
    pub fn detect(dsn: &str) -> Result<DbEngine> {
        let s = dsn.trim_start();

        if s.starts_with("postgres://") || s.starts_with("postgresql://") {
            Ok(DbEngine::Postgres)
        } else if s.starts_with("sqlite:") {
            Ok(DbEngine::Sqlite)
        } else {
            Err(DbError::UnknownDsn(redact_credentials_in_dsn(Some(dsn))))
        }
    }

    /// Build the pool without opening a connection.
    ///
    /// Connections are established on first use, so an unreachable database
    /// shows up as per-query failures instead of a startup failure.
    pub fn connect_lazy(cfg: &DbConnConfig) -> Result<Self> {
        let options = build_connect_options(cfg)?;
        let dsn = options.to_string();
        let handle = match options {
            DbConnectOptions::Postgres(opts) => Self {
                engine: DbEngine::Postgres,
                pool: DbPool::Postgres(
                    cfg.pool.apply(PgPoolOptions::new()).connect_lazy_with(opts),
                ),
                dsn,
            },
            DbConnectOptions::Sqlite { opts, in_memory } => Self {
                engine: DbEngine::Sqlite,
                pool: DbPool::Sqlite(
                    cfg.pool
                        .apply_sqlite(SqlitePoolOptions::new(), in_memory)
                        .connect_lazy_with(opts),
                ),
                dsn,
            },
        };
        tracing::debug!(engine = ?handle.engine, target = %handle.dsn, "database pool created");
        Ok(handle)
    }

    /// Build the pool and verify one connection up front.
    pub async fn connect(cfg: &DbConnConfig) -> Result<Self> {
        let handle = Self::connect_lazy(cfg)?;
        handle.ping().await?;
        Ok(handle)
    }

    /// Check out a connection and run a trivial statement.
    pub async fn ping(&self) -> Result<()> {
        with_pool!(self, pool => {
            sqlx::query_scalar::<_, i64>("SELECT CAST(1 AS BIGINT)")
                .fetch_one(pool)
                .await
        })?;
        Ok(())
    }

    /// Execute a batch of statements with no parameters (schema bootstrap).
    pub async fn execute_batch(&self, statements: &[&str]) -> Result<()> {
        for &stmt in statements {
            with_pool!(self, pool => {
                sqlx::query(stmt).execute(pool).await.map(|_| ())
            })?;
        }
        Ok(())
    }

    /// Graceful pool close. Dropping the pool also closes it; this just makes it explicit.
    pub async fn close(&self) {
        match &self.pool {
            DbPool::Postgres(p) => p.close().await,
            DbPool::Sqlite(p) => p.close().await,
        }
    }

    pub fn engine(&self) -> DbEngine {
        self.engine
    }

    /// Redacted connection target, safe to log.
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn sqlx_postgres(&self) -> Option<&PgPool> {
        match self.pool {
            DbPool::Postgres(ref p) => Some(p),
            DbPool::Sqlite(_) => None,
        }
    }

    pub fn sqlx_sqlite(&self) -> Option<&SqlitePool> {
        match self.pool {
            DbPool::Sqlite(ref p) => Some(p),
            DbPool::Postgres(_) => None,
        }
    }
}
