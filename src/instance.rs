use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;
use sqlx::any::AnyRow;
use sqlx::{Any, FromRow, Transaction};
use sqlx_any_conn_mgr::{ConnectConfig, DbHandle};
use tracing::warn;

use crate::ops::{self, ExecResult};
use crate::{Error, Result, Role};

/// A single pool bound to a fixed [`Role`], independent of the global registry.
///
/// Reads are always allowed. `query`, `named_exec`, `exec` and `begin` are
/// write-class and fail with [`Error::WrongInstance`] on a slave instance
/// without touching the database.
///
/// # Example
///
/// ```no_run
/// use easydb::Instance;
///
/// # async fn example() -> easydb::Result<()> {
/// let replica = Instance::connect("postgres", "reader@replica/app", "slave").await?;
/// let names: Vec<(String,)> = replica.select("SELECT name FROM users", vec![]).await?;
///
/// // Rejected before reaching the database
/// assert!(replica.exec("DELETE FROM users", vec![]).await.is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
   role: Role,
   handle: DbHandle,
}

impl Instance {
   /// Validate `mode` and then open a pool.
   ///
   /// `mode` must be exactly `"master"` or `"slave"`; anything else fails with
   /// [`Error::WrongMode`] before any connection is attempted.
   pub async fn connect(driver: &str, connection_string: &str, mode: &str) -> Result<Self> {
      let role: Role = mode.parse()?;
      Self::connect_with(driver, connection_string, role, None).await
   }

   /// Open a pool for an already validated role, with optional pool options.
   pub async fn connect_with(
      driver: &str,
      connection_string: &str,
      role: Role,
      custom_config: Option<ConnectConfig>,
   ) -> Result<Self> {
      let handle = DbHandle::connect(driver, connection_string, custom_config).await?;
      Ok(Self::new(handle, role))
   }

   /// Wrap an existing handle.
   pub fn new(handle: DbHandle, role: Role) -> Self {
      Self { role, handle }
   }

   pub fn role(&self) -> Role {
      self.role
   }

   pub fn handle(&self) -> &DbHandle {
      &self.handle
   }

   fn writable(&self) -> Result<&DbHandle> {
      if self.role.is_writable() {
         return Ok(&self.handle);
      }
      warn!("Write operation rejected on {} instance", self.role);
      Err(Error::WrongInstance)
   }

   pub async fn get<T>(&self, query: &str, values: Vec<JsonValue>) -> Result<T>
   where
      T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
   {
      ops::get(&self.handle, query, values).await
   }

   pub async fn select<T>(&self, query: &str, values: Vec<JsonValue>) -> Result<Vec<T>>
   where
      T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
   {
      ops::select(&self.handle, query, values).await
   }

   pub async fn select_maps(
      &self,
      query: &str,
      values: Vec<JsonValue>,
   ) -> Result<Vec<IndexMap<String, JsonValue>>> {
      ops::select_maps(&self.handle, query, values).await
   }

   /// Raw rows. Write-class on an instance: only a master may run it.
   pub async fn query(&self, query: &str, values: Vec<JsonValue>) -> Result<Vec<AnyRow>> {
      ops::query(self.writable()?, query, values).await
   }

   pub async fn named_exec<A>(&self, query: &str, arg: &A) -> Result<ExecResult>
   where
      A: Serialize + ?Sized,
   {
      ops::named_exec(self.writable()?, query, arg).await
   }

   pub async fn exec(&self, query: &str, values: Vec<JsonValue>) -> Result<ExecResult> {
      ops::exec(self.writable()?, query, values).await
   }

   pub async fn begin(&self) -> Result<Transaction<'static, Any>> {
      ops::begin(self.writable()?).await
   }

   pub async fn ping(&self) -> Result<()> {
      ops::ping(&self.handle).await
   }

   /// Close the instance's pool.
   pub async fn close(self) {
      self.handle.close().await;
   }
}
