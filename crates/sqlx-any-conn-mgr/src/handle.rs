//! Pool handle opened from a driver name and connection string

use std::sync::Arc;

use sqlx::{AnyPool, Connection};
use tracing::debug;

use crate::Result;
use crate::config::ConnectConfig;
use crate::driver::Driver;

/// Cheaply clonable handle to one SQLx `Any` connection pool.
///
/// Clones share the same pool. The pool stays open until [`DbHandle::close`]
/// is called or the last clone is dropped.
///
/// # Example
///
/// ```no_run
/// use sqlx_any_conn_mgr::DbHandle;
///
/// # async fn example() -> Result<(), sqlx_any_conn_mgr::Error> {
/// let handle = DbHandle::connect("mysql", "app:secret@localhost/app", None).await?;
///
/// let rows = sqlx::query("SELECT id FROM users")
///     .fetch_all(handle.pool())
///     .await?;
///
/// handle.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DbHandle {
   inner: Arc<HandleInner>,
}

#[derive(Debug)]
struct HandleInner {
   driver: Driver,
   pool: AnyPool,
}

impl DbHandle {
   /// Open a pool for the named driver
   ///
   /// # Arguments
   ///
   /// * `driver` - Driver name such as `mysql`, `postgres` or `sqlite`
   /// * `connection_string` - A URL for that driver, or the part after its scheme
   /// * `custom_config` - Optional pool options. Pass `None` to use defaults
   ///   (10 max connections, 30 second idle timeout).
   pub async fn connect(
      driver: &str,
      connection_string: &str,
      custom_config: Option<ConnectConfig>,
   ) -> Result<Self> {
      let driver: Driver = driver.parse()?;
      Self::connect_with(driver, connection_string, custom_config).await
   }

   /// Open a pool for an already parsed [`Driver`]
   pub async fn connect_with(
      driver: Driver,
      connection_string: &str,
      custom_config: Option<ConnectConfig>,
   ) -> Result<Self> {
      let config = custom_config.unwrap_or_default();
      let url = driver.connection_url(connection_string)?;

      // Idempotent; registers the compiled-in drivers with the Any backend
      sqlx::any::install_default_drivers();

      let pool = config.pool_options().connect(&url).await?;
      debug!(
         "Opened {} pool (max_connections={})",
         driver, config.max_connections
      );

      Ok(Self {
         inner: Arc::new(HandleInner { driver, pool }),
      })
   }

   /// Driver this handle was opened with
   pub fn driver(&self) -> Driver {
      self.inner.driver
   }

   /// Underlying pool, usable directly as a sqlx executor
   pub fn pool(&self) -> &AnyPool {
      &self.inner.pool
   }

   /// Check that a connection can be acquired and answers a ping
   pub async fn ping(&self) -> Result<()> {
      let mut conn = self.inner.pool.acquire().await?;
      conn.ping().await?;
      Ok(())
   }

   /// Close the pool
   ///
   /// Waits for checked-out connections to be returned. Every clone of this
   /// handle observes the closed pool; further acquires fail with
   /// `sqlx::Error::PoolClosed`.
   pub async fn close(&self) {
      if self.inner.pool.is_closed() {
         return;
      }
      self.inner.pool.close().await;
      debug!("Closed {} pool", self.inner.driver);
   }

   /// Returns true once [`DbHandle::close`] has been called
   pub fn is_closed(&self) -> bool {
      self.inner.pool.is_closed()
   }

   /// Returns true if both handles share the same pool
   pub fn ptr_eq(a: &Self, b: &Self) -> bool {
      Arc::ptr_eq(&a.inner, &b.inner)
   }
}
