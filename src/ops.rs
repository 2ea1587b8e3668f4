//! Operations shared by [`Registry`](crate::Registry) and [`Instance`](crate::Instance)
//! once a handle has been chosen.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::any::{AnyQueryResult, AnyRow};
use sqlx::{Any, FromRow, Transaction};
use sqlx_any_conn_mgr::DbHandle;

use crate::named::NamedQuery;
use crate::{Result, bind_values, decode};

/// Result returned from write operations (e.g. INSERT, UPDATE, DELETE).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecResult {
   /// The number of rows affected by the write operation.
   pub rows_affected: u64,
   /// The last inserted row ID, when the backend reports one.
   ///
   /// MySQL and SQLite report it; PostgreSQL never does (use `RETURNING`).
   pub last_insert_id: Option<i64>,
}

impl From<AnyQueryResult> for ExecResult {
   fn from(result: AnyQueryResult) -> Self {
      Self {
         rows_affected: result.rows_affected(),
         last_insert_id: result.last_insert_id(),
      }
   }
}

pub(crate) async fn get<T>(handle: &DbHandle, query: &str, values: Vec<JsonValue>) -> Result<T>
where
   T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
{
   let args = bind_values(values)?;
   Ok(sqlx::query_as_with::<_, T, _>(query, args)
      .fetch_one(handle.pool())
      .await?)
}

pub(crate) async fn select<T>(
   handle: &DbHandle,
   query: &str,
   values: Vec<JsonValue>,
) -> Result<Vec<T>>
where
   T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
{
   let args = bind_values(values)?;
   Ok(sqlx::query_as_with::<_, T, _>(query, args)
      .fetch_all(handle.pool())
      .await?)
}

pub(crate) async fn query(
   handle: &DbHandle,
   query: &str,
   values: Vec<JsonValue>,
) -> Result<Vec<AnyRow>> {
   let args = bind_values(values)?;
   Ok(sqlx::query_with(query, args)
      .fetch_all(handle.pool())
      .await?)
}

pub(crate) async fn select_maps(
   handle: &DbHandle,
   sql: &str,
   values: Vec<JsonValue>,
) -> Result<Vec<IndexMap<String, JsonValue>>> {
   query(handle, sql, values)
      .await?
      .iter()
      .map(decode::row_to_map)
      .collect()
}

pub(crate) async fn exec(
   handle: &DbHandle,
   query: &str,
   values: Vec<JsonValue>,
) -> Result<ExecResult> {
   let args = bind_values(values)?;
   let result = sqlx::query_with(query, args)
      .execute(handle.pool())
      .await?;
   Ok(result.into())
}

pub(crate) async fn named_exec<A>(handle: &DbHandle, query: &str, arg: &A) -> Result<ExecResult>
where
   A: Serialize + ?Sized,
{
   let compiled = NamedQuery::compile(query, handle.driver().into());
   let values = compiled.bind_from(arg)?;
   exec(handle, compiled.sql(), values).await
}

pub(crate) async fn begin(handle: &DbHandle) -> Result<Transaction<'static, Any>> {
   Ok(handle.pool().begin().await?)
}

pub(crate) async fn ping(handle: &DbHandle) -> Result<()> {
   Ok(handle.ping().await?)
}
