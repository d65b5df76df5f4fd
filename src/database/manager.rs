use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;
use tracing::info;

use crate::config::{Backend, DatabaseConfig};

/// Errors from DatabaseManager and the repositories built on it
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// True when the store could not hand out a connection at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            DatabaseError::Sqlx(
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_)
            )
        )
    }
}

/// Connection pool for one of the supported backends
#[derive(Clone, Debug)]
pub enum DbPool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

/// Run the same statement against whichever pool is configured.
///
/// The body is expanded once per backend, so queries, binds and row decoding
/// are checked against each driver's own types.
macro_rules! with_pool {
    ($pool:expr, $conn:ident => $body:expr) => {
        match $pool {
            $crate::database::manager::DbPool::Postgres($conn) => $body,
            $crate::database::manager::DbPool::Sqlite($conn) => $body,
        }
    };
}
pub(crate) use with_pool;

/// Owns the connection pool for the configured backing store.
///
/// Constructed once at startup and handed to the router through `AppState`;
/// cloning shares the same pool.
#[derive(Clone)]
pub struct DatabaseManager {
    pool: DbPool,
    backend: Backend,
}

impl DatabaseManager {
    /// Open a pool against `config.url`.
    ///
    /// In-memory SQLite databases live and die with their connection, so the
    /// pool is pinned to a single connection that is never recycled.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let acquire_timeout = Duration::from_secs(config.connection_timeout);

        let pool = match config.backend {
            Backend::Postgres => {
                let pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .acquire_timeout(acquire_timeout)
                    .connect(&config.url)
                    .await?;
                DbPool::Postgres(pool)
            }
            Backend::Sqlite => {
                let connect_options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);
                let mut options = SqlitePoolOptions::new()
                    .max_connections(config.max_connections)
                    .acquire_timeout(acquire_timeout);

                if Self::is_in_memory(&config.url) {
                    options = options
                        .max_connections(1)
                        .min_connections(1)
                        .idle_timeout(None::<Duration>)
                        .max_lifetime(None::<Duration>);
                }

                DbPool::Sqlite(options.connect_with(connect_options).await?)
            }
        };
        info!("Created {:?} database pool (max {} connections)", config.backend, config.max_connections);

        Ok(Self {
            pool,
            backend: config.backend,
        })
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        with_pool!(&self.pool, pool => sqlx::query("SELECT 1").execute(pool).await.map(|_| ()))?;
        Ok(())
    }

    /// Create the `movie` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        let ddl = Self::movie_table_ddl(self.backend);
        with_pool!(&self.pool, pool => sqlx::query(ddl).execute(pool).await.map(|_| ()))?;
        info!("Schema ready: table movie");
        Ok(())
    }

    fn movie_table_ddl(backend: Backend) -> &'static str {
        match backend {
            Backend::Postgres => {
                "CREATE TABLE IF NOT EXISTS movie (
                    id BIGSERIAL PRIMARY KEY,
                    name TEXT NOT NULL CHECK (char_length(name) <= 255),
                    description TEXT CHECK (char_length(description) <= 255),
                    price DOUBLE PRECISION NOT NULL,
                    inventory_quantity BIGINT NOT NULL,
                    image TEXT CHECK (char_length(image) <= 255)
                )"
            }
            Backend::Sqlite => {
                "CREATE TABLE IF NOT EXISTS movie (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL CHECK (length(name) <= 255),
                    description TEXT CHECK (length(description) <= 255),
                    price REAL NOT NULL,
                    inventory_quantity INTEGER NOT NULL,
                    image TEXT CHECK (length(image) <= 255)
                )"
            }
        }
    }

    fn is_in_memory(url: &str) -> bool {
        url.contains(":memory:") || url.contains("mode=memory")
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close(&self) {
        with_pool!(&self.pool, pool => pool.close().await);
        info!("Closed database pool");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_in_memory_sqlite() {
        assert!(DatabaseManager::is_in_memory("sqlite::memory:"));
        assert!(DatabaseManager::is_in_memory("sqlite://file:movies?mode=memory&cache=shared"));
        assert!(!DatabaseManager::is_in_memory("sqlite://movies.db"));
    }

    #[test]
    fn ddl_matches_backend_dialect() {
        let pg = DatabaseManager::movie_table_ddl(Backend::Postgres);
        assert!(pg.contains("BIGSERIAL"));
        assert!(pg.contains("char_length(name) <= 255"));

        let lite = DatabaseManager::movie_table_ddl(Backend::Sqlite);
        assert!(lite.contains("AUTOINCREMENT"));
        assert!(lite.contains("inventory_quantity INTEGER NOT NULL"));
    }

    #[test]
    fn pool_errors_are_unavailable() {
        assert!(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut).is_unavailable());
        assert!(!DatabaseError::Sqlx(sqlx::Error::RowNotFound).is_unavailable());
        assert!(!DatabaseError::NotFound("movie 1".into()).is_unavailable());
    }

    #[tokio::test]
    async fn in_memory_sqlite_keeps_its_schema() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".into(),
            backend: Backend::Sqlite,
            max_connections: 5,
            connection_timeout: 5,
        };
        let database = DatabaseManager::connect(&config).await.unwrap();
        assert!(matches!(database.pool(), DbPool::Sqlite(_)));

        database.ensure_schema().await.unwrap();
        database.ensure_schema().await.unwrap();
        database.health_check().await.unwrap();
        database.close().await;
    }
}
