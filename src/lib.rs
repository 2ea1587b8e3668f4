//! Master/slave SQL pools with read/write routing on top of SQLx.
//!
//! easydb keeps two process-wide pools, a writable **master** and a read-only
//! **slave**, and routes every call to one of them:
//!
//! - [`get`], [`select`], [`query`] and [`select_maps`] read from the slave when one
//!   is connected, otherwise from the master
//! - [`exec`], [`named_exec`] and [`begin`] always use the master
//! - any call whose pool is not connected fails with [`Error::NoConnection`]
//!
//! The same operations exist on [`Registry`] for callers that prefer to own the
//! registry instead of using the global one, and on [`Instance`], which wraps a
//! single pool with a fixed [`Role`] and refuses writes on a slave.
//!
//! Pooling, networking and SQL execution are delegated to SQLx's `Any` backend
//! through [`sqlx_any_conn_mgr`].
//!
//! # Example
//!
//! ```no_run
//! use serde_json::json;
//!
//! # async fn example() -> easydb::Result<()> {
//! easydb::connect_master("mysql", "app:secret@primary:3306/app").await?;
//! easydb::connect_slave("mysql", "app:secret@replica:3306/app").await?;
//!
//! // Read from the replica
//! let query = easydb::condition("SELECT id, name FROM users /*condition*/", "WHERE active = ?");
//! let users: Vec<(i64, String)> = easydb::select(&query, vec![json!(true)]).await?;
//!
//! // Write to the primary
//! let result = easydb::exec("UPDATE users SET active = ? WHERE id = ?", vec![json!(false), json!(users[0].0)]).await?;
//! assert_eq!(result.rows_affected, 1);
//!
//! // Transactions are owned by the caller
//! let mut tx = easydb::begin().await?;
//! sqlx::query_with("DELETE FROM sessions WHERE user_id = ?", easydb::bind_values(vec![json!(1)])?)
//!    .execute(&mut *tx)
//!    .await?;
//! tx.commit().await?;
//! # Ok(())
//! # }
//! ```

mod bind;
pub mod decode;
mod error;
mod global;
mod instance;
mod named;
mod ops;
mod registry;
mod role;
mod template;

pub use bind::{bind_value, bind_values};
pub use error::{Error, Result};
pub use global::{
   begin, choose_connection, close, connect_master, connect_master_with, connect_slave,
   connect_slave_with, exec, get, named_exec, ping, query, registry, select, select_maps,
};
pub use instance::Instance;
pub use named::{NamedQuery, PlaceholderStyle};
pub use ops::ExecResult;
pub use registry::Registry;
pub use role::{Purpose, Role};
pub use template::{CONDITION_PLACEHOLDER, condition};

// Re-export commonly used types from dependencies
pub use sqlx_any_conn_mgr::{ConnectConfig, DbHandle, Driver};
