//! Free functions over the process-wide [`Registry`]

use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;
use sqlx::any::AnyRow;
use sqlx::{Any, FromRow, Transaction};
use sqlx_any_conn_mgr::{ConnectConfig, DbHandle};

use crate::{ExecResult, Purpose, Registry, Result};

static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// The process-wide registry used by the free functions of this crate.
pub fn registry() -> &'static Registry {
   &REGISTRY
}

/// Open a pool and install it as the process-wide master.
pub async fn connect_master(driver: &str, connection_string: &str) -> Result<()> {
   REGISTRY.connect_master(driver, connection_string).await
}

pub async fn connect_master_with(
   driver: &str,
   connection_string: &str,
   custom_config: Option<ConnectConfig>,
) -> Result<()> {
   REGISTRY
      .connect_master_with(driver, connection_string, custom_config)
      .await
}

/// Open a pool and install it as the process-wide slave.
pub async fn connect_slave(driver: &str, connection_string: &str) -> Result<()> {
   REGISTRY.connect_slave(driver, connection_string).await
}

pub async fn connect_slave_with(
   driver: &str,
   connection_string: &str,
   custom_config: Option<ConnectConfig>,
) -> Result<()> {
   REGISTRY
      .connect_slave_with(driver, connection_string, custom_config)
      .await
}

/// See [`Registry::choose_connection`].
pub fn choose_connection(purpose: Purpose) -> Option<DbHandle> {
   REGISTRY.choose_connection(purpose)
}

/// Fetch exactly one row decoded into `T`, preferring the slave.
///
/// ```no_run
/// # async fn example() -> easydb::Result<()> {
/// use serde_json::json;
///
/// #[derive(sqlx::FromRow)]
/// struct User {
///    id: i64,
///    name: String,
/// }
///
/// let user: User = easydb::get("SELECT id, name FROM users WHERE id = ?", vec![json!(1)]).await?;
/// # Ok(())
/// # }
/// ```
pub async fn get<T>(query: &str, values: Vec<JsonValue>) -> Result<T>
where
   T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
{
   REGISTRY.get(query, values).await
}

/// Fetch all rows decoded into `T`, preferring the slave.
pub async fn select<T>(query: &str, values: Vec<JsonValue>) -> Result<Vec<T>>
where
   T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
{
   REGISTRY.select(query, values).await
}

/// Fetch raw rows, preferring the slave.
pub async fn query(query: &str, values: Vec<JsonValue>) -> Result<Vec<AnyRow>> {
   REGISTRY.query(query, values).await
}

pub async fn select_maps(
   query: &str,
   values: Vec<JsonValue>,
) -> Result<Vec<IndexMap<String, JsonValue>>> {
   REGISTRY.select_maps(query, values).await
}

/// Execute a statement with `:name` parameters on the master.
///
/// ```no_run
/// # async fn example() -> easydb::Result<()> {
/// #[derive(serde::Serialize)]
/// struct NewUser<'a> {
///    name: &'a str,
///    email: &'a str,
/// }
///
/// easydb::named_exec(
///    "INSERT INTO users (name, email) VALUES (:name, :email)",
///    &NewUser { name: "Alice", email: "alice@example.com" },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn named_exec<A>(query: &str, arg: &A) -> Result<ExecResult>
where
   A: Serialize + ?Sized,
{
   REGISTRY.named_exec(query, arg).await
}

/// Execute a statement with positional parameters on the master.
pub async fn exec(query: &str, values: Vec<JsonValue>) -> Result<ExecResult> {
   REGISTRY.exec(query, values).await
}

/// Open a transaction on the master.
pub async fn begin() -> Result<Transaction<'static, Any>> {
   REGISTRY.begin().await
}

pub async fn ping() -> Result<()> {
   REGISTRY.ping().await
}

/// Remove and close both process-wide handles.
pub async fn close() {
   REGISTRY.close().await
}
