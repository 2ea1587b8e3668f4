//! Error types for sqlx-any-conn-mgr

use thiserror::Error;

use crate::Driver;

/// Errors that may occur when opening or using a pool handle
#[derive(Error, Debug)]
pub enum Error {
   /// Error from the sqlx library. Connection failures surface here unchanged.
   #[error(transparent)]
   Sqlx(#[from] sqlx::Error),

   /// The driver name does not match any compiled-in driver
   #[error("unsupported driver: {0}")]
   UnsupportedDriver(String),

   /// The connection URL names a scheme that belongs to another driver
   #[error("connection string scheme '{scheme}' does not match driver {driver}")]
   DriverMismatch { driver: Driver, scheme: String },

   /// An empty connection string was provided
   #[error("connection string cannot be empty")]
   EmptyConnectionString,
}
