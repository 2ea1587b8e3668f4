//! Master/slave handle registry and the connection selector

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value as JsonValue;
use sqlx::any::AnyRow;
use sqlx::{Any, FromRow, Transaction};
use sqlx_any_conn_mgr::{ConnectConfig, DbHandle};
use tracing::{debug, trace};

use crate::ops::{self, ExecResult};
use crate::{Error, Purpose, Result};

/// Holds at most one master and one slave handle and routes each operation to
/// one of them.
///
/// Reads (`get`, `select`, `query`, `select_maps`) go to the slave when one is
/// connected and to the master otherwise. Writes and transactions always go to
/// the master. An operation whose handle is missing fails with
/// [`Error::NoConnection`].
///
/// The process-wide registry behind the free functions is available from
/// [`registry()`](crate::registry); independent registries can be created with
/// [`Registry::new`] and passed around explicitly.
///
/// # Example
///
/// ```no_run
/// use easydb::Registry;
/// use serde_json::json;
///
/// # async fn example() -> easydb::Result<()> {
/// let registry = Registry::new();
/// registry.connect_master("mysql", "app:secret@primary/app").await?;
/// registry.connect_slave("mysql", "app:secret@replica/app").await?;
///
/// // Served by the replica
/// let (count,): (i64,) = registry.get("SELECT COUNT(*) FROM users", vec![]).await?;
///
/// // Served by the primary
/// registry
///    .exec("UPDATE users SET seen = ? WHERE id = ?", vec![json!(count), json!(1)])
///    .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Registry {
   master: RwLock<Option<DbHandle>>,
   slave: RwLock<Option<DbHandle>>,
}

impl Registry {
   pub fn new() -> Self {
      Self::default()
   }

   /// Open a pool and install it as the master.
   ///
   /// A master that was already connected is replaced but not closed. Calls
   /// that resolved it earlier keep working, and its pool shuts down once the
   /// last clone of it is dropped. If the new pool cannot be opened the
   /// previous master stays in place.
   pub async fn connect_master(&self, driver: &str, connection_string: &str) -> Result<()> {
      self
         .connect_master_with(driver, connection_string, None)
         .await
   }

   /// [`connect_master`](Self::connect_master) with custom pool options
   pub async fn connect_master_with(
      &self,
      driver: &str,
      connection_string: &str,
      custom_config: Option<ConnectConfig>,
   ) -> Result<()> {
      let handle = DbHandle::connect(driver, connection_string, custom_config).await?;
      if let Some(previous) = self.set_master(handle) {
         debug!("Replaced master {} pool", previous.driver());
      }
      Ok(())
   }

   /// Open a pool and install it as the slave.
   ///
   /// Same replacement rules as [`connect_master`](Self::connect_master).
   pub async fn connect_slave(&self, driver: &str, connection_string: &str) -> Result<()> {
      self
         .connect_slave_with(driver, connection_string, None)
         .await
   }

   /// [`connect_slave`](Self::connect_slave) with custom pool options
   pub async fn connect_slave_with(
      &self,
      driver: &str,
      connection_string: &str,
      custom_config: Option<ConnectConfig>,
   ) -> Result<()> {
      let handle = DbHandle::connect(driver, connection_string, custom_config).await?;
      if let Some(previous) = self.set_slave(handle) {
         debug!("Replaced slave {} pool", previous.driver());
      }
      Ok(())
   }

   /// Install an already opened handle as the master, returning the one it replaced.
   ///
   /// The replaced handle is left open.
   pub fn set_master(&self, handle: DbHandle) -> Option<DbHandle> {
      self.master.write().replace(handle)
   }

   /// Install an already opened handle as the slave, returning the one it replaced.
   ///
   /// The replaced handle is left open.
   pub fn set_slave(&self, handle: DbHandle) -> Option<DbHandle> {
      self.slave.write().replace(handle)
   }

   pub fn master(&self) -> Option<DbHandle> {
      self.master.read().clone()
   }

   pub fn slave(&self) -> Option<DbHandle> {
      self.slave.read().clone()
   }

   /// Pick the handle for `purpose`.
   ///
   /// `Select` gets the slave when one is connected; everything else, and
   /// `Select` without a slave, gets the master, which may be absent.
   pub fn choose_connection(&self, purpose: Purpose) -> Option<DbHandle> {
      if purpose == Purpose::Select
         && let Some(slave) = self.slave()
      {
         trace!("Routing select to slave");
         return Some(slave);
      }

      trace!("Routing {:?} to master", purpose);
      self.master()
   }

   fn resolve(&self, purpose: Purpose) -> Result<DbHandle> {
      self.choose_connection(purpose).ok_or(Error::NoConnection)
   }

   /// Fetch exactly one row decoded into `T`.
   ///
   /// Zero rows surfaces as `sqlx::Error::RowNotFound`.
   pub async fn get<T>(&self, query: &str, values: Vec<JsonValue>) -> Result<T>
   where
      T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
   {
      let handle = self.resolve(Purpose::Select)?;
      ops::get(&handle, query, values).await
   }

   /// Fetch all rows decoded into `T`.
   pub async fn select<T>(&self, query: &str, values: Vec<JsonValue>) -> Result<Vec<T>>
   where
      T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
   {
      let handle = self.resolve(Purpose::Select)?;
      ops::select(&handle, query, values).await
   }

   /// Fetch raw rows.
   pub async fn query(&self, query: &str, values: Vec<JsonValue>) -> Result<Vec<AnyRow>> {
      let handle = self.resolve(Purpose::Select)?;
      ops::query(&handle, query, values).await
   }

   /// Fetch all rows as ordered column-name → JSON maps.
   pub async fn select_maps(
      &self,
      query: &str,
      values: Vec<JsonValue>,
   ) -> Result<Vec<IndexMap<String, JsonValue>>> {
      let handle = self.resolve(Purpose::Select)?;
      ops::select_maps(&handle, query, values).await
   }

   /// Execute a statement with `:name` parameters bound from the fields of `arg`.
   pub async fn named_exec<A>(&self, query: &str, arg: &A) -> Result<ExecResult>
   where
      A: Serialize + ?Sized,
   {
      let handle = self.resolve(Purpose::Update)?;
      ops::named_exec(&handle, query, arg).await
   }

   /// Execute a statement with positional parameters.
   pub async fn exec(&self, query: &str, values: Vec<JsonValue>) -> Result<ExecResult> {
      let handle = self.resolve(Purpose::Update)?;
      ops::exec(&handle, query, values).await
   }

   /// Open a transaction on the master.
   ///
   /// The caller commits or rolls back; dropping it rolls back.
   pub async fn begin(&self) -> Result<Transaction<'static, Any>> {
      let handle = self.resolve(Purpose::Update)?;
      ops::begin(&handle).await
   }

   /// Ping the master.
   pub async fn ping(&self) -> Result<()> {
      let handle = self.resolve(Purpose::Update)?;
      ops::ping(&handle).await
   }

   /// Remove both handles and close their pools.
   ///
   /// Later operations fail with [`Error::NoConnection`] until a handle is
   /// connected again.
   pub async fn close(&self) {
      let master = self.master.write().take();
      let slave = self.slave.write().take();

      for handle in [master, slave].into_iter().flatten() {
         handle.close().await;
      }
   }
}
