//! Configuration for connection pools opened by [`DbHandle`](crate::DbHandle)

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::any::AnyPoolOptions;

/// Pool options passed through to SQLx when a handle is opened
///
/// # Examples
///
/// ```
/// use sqlx_any_conn_mgr::ConnectConfig;
///
/// // Use defaults
/// let config = ConnectConfig::default();
///
/// // Override just one field
/// let config = ConnectConfig {
///     max_connections: 4,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectConfig {
   /// Maximum number of connections the pool may open
   ///
   /// Default: 10
   pub max_connections: u32,

   /// Idle timeout for pooled connections (in seconds)
   ///
   /// Connections that remain idle for this duration are closed by SQLx.
   ///
   /// Default: 30
   pub idle_timeout_secs: u64,
}

impl Default for ConnectConfig {
   fn default() -> Self {
      Self {
         max_connections: 10,
         idle_timeout_secs: 30,
      }
   }
}

impl ConnectConfig {
   pub(crate) fn pool_options(&self) -> AnyPoolOptions {
      AnyPoolOptions::new()
         .max_connections(self.max_connections)
         .min_connections(0)
         .idle_timeout(Some(Duration::from_secs(self.idle_timeout_secs)))
   }
}
