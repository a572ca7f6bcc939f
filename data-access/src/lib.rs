use std::{str::FromStr, sync::Arc};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tokio::sync::OnceCell;

/// Shared handle to the user store.
///
/// The pool is created on first use and then reused by every clone of the
/// handle. A failed connect leaves the handle empty so a later call retries.
pub struct DataAccess {
    inner: Arc<Inner>,
}

struct Inner {
    options: SqliteConnectOptions,
    pool: OnceCell<SqlitePool>,
}

impl DataAccess {
    pub fn new(database_url: &str) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(database_url).map_err(Error::InvalidUrl)?;
        Ok(Self::with_options(options))
    }

    pub fn with_options(options: SqliteConnectOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                options,
                pool: OnceCell::new(),
            }),
        }
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            inner: Arc::new(Inner {
                options: pool.connect_options().as_ref().clone(),
                pool: OnceCell::new_with(Some(pool)),
            }),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.inner.pool.initialized()
    }

    pub async fn connect(&self) -> Result<&SqlitePool, Error> {
        self.inner
            .pool
            .get_or_try_init(|| async {
                let pool = SqlitePoolOptions::new()
                    .connect_with(self.inner.options.clone())
                    .await
                    .map_err(Error::Connect)?;

                #[cfg(feature = "tracing")]
                tracing::info!(
                    "connected to user store :: {}",
                    self.inner.options.get_filename().display()
                );

                Ok::<_, Error>(pool)
            })
            .await
    }

    pub async fn read<'conn, V, Fut>(
        &'conn self,
        query: impl FnOnce(&'conn SqlitePool) -> Fut,
    ) -> Result<V, Error>
    where
        Fut: Future<Output = Result<V, sqlx::Error>>,
    {
        let pool = self.connect().await?;
        query(pool).await.map_err(Error::Query)
    }
}

impl Clone for DataAccess {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid database url :: {0}")]
    InvalidUrl(#[source] sqlx::Error),

    #[error("connect :: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("query :: {0}")]
    Query(#[source] sqlx::Error),
}
