//! # sqlx-any-conn-mgr
//!
//! A minimal wrapper around SQLx's `Any` backend that opens connection pools from a
//! driver name and a connection string.
//!
//! ## Core Types
//!
//! - **[`DbHandle`]**: Clonable handle to one pool plus the driver it was opened with
//! - **[`Driver`]**: Supported backends (`mysql`, `postgres`, `sqlite`)
//! - **[`ConnectConfig`]**: Pool options passed through to SQLx
//! - **[`Error`]**: Error type for opening and using handles
//!
//! ## Usage
//!
//! ```no_run
//! use sqlx_any_conn_mgr::DbHandle;
//!
//! #[tokio::main]
//! async fn main() -> sqlx_any_conn_mgr::Result<()> {
//!     let handle = DbHandle::connect("sqlite", "app.db?mode=rwc", None).await?;
//!
//!     sqlx::query("CREATE TABLE IF NOT EXISTS users (name TEXT)")
//!         .execute(handle.pool())
//!         .await?;
//!
//!     handle.ping().await?;
//!     handle.close().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Design Principles
//!
//! - Uses sqlx's `AnyPoolOptions` for all pool configuration
//! - Minimal custom logic - delegates to sqlx wherever possible
//! - No reconnect, retry or health-check policy
//!
mod config;
mod driver;
mod error;
mod handle;

// Re-export public types
pub use config::ConnectConfig;
pub use driver::Driver;
pub use error::Error;
pub use handle::DbHandle;

/// A type alias for Results with our custom Error type
pub type Result<T> = std::result::Result<T, Error>;
