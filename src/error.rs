/// Result type alias for easydb operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for easydb.
///
/// Three conditions are raised by easydb itself (`NoConnection`, `WrongMode`,
/// `WrongInstance`); everything the database or driver reports is passed
/// through unchanged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
   /// The selected pool handle has not been connected.
   #[error("no connection to database")]
   NoConnection,

   /// Instance role other than `master` or `slave`.
   #[error("wrong mode for instance: {0:?} (expected \"master\" or \"slave\")")]
   WrongMode(String),

   /// Write-class operation issued against a slave instance.
   #[error("wrong instance selected: slave instances do not support write operations")]
   WrongInstance,

   /// Error from SQLx operations.
   #[error(transparent)]
   Sqlx(#[from] sqlx::Error),

   /// Error from the connection manager (including connection failures).
   #[error(transparent)]
   ConnectionManager(#[from] sqlx_any_conn_mgr::Error),

   /// Named query references a parameter the argument does not provide.
   #[error("named parameter :{0} not found in arguments")]
   MissingNamedArg(String),

   /// Named query arguments did not serialize to an object.
   #[error("invalid named arguments: {0}")]
   InvalidNamedArgs(String),

   /// Serializing named arguments failed.
   #[error("json error: {0}")]
   Json(#[from] serde_json::Error),

   /// Column type that cannot be mapped to JSON.
   #[error("unsupported datatype: {0}")]
   UnsupportedDatatype(String),
}

impl Error {
   /// Extract a structured error code from the error type.
   ///
   /// This provides machine-readable error codes for error handling.
   pub fn error_code(&self) -> String {
      match self {
         Error::NoConnection => "NO_CONNECTION".to_string(),
         Error::WrongMode(_) => "WRONG_MODE".to_string(),
         Error::WrongInstance => "WRONG_INSTANCE".to_string(),
         Error::Sqlx(e) => sqlx_error_code(e),
         Error::ConnectionManager(sqlx_any_conn_mgr::Error::Sqlx(e)) => match e
            .as_database_error()
            .and_then(|db_err| db_err.code())
         {
            Some(code) => format!("DB_{}", code),
            None => "CONNECTION_ERROR".to_string(),
         },
         Error::ConnectionManager(_) => "CONNECTION_ERROR".to_string(),
         Error::MissingNamedArg(_) => "MISSING_NAMED_ARG".to_string(),
         Error::InvalidNamedArgs(_) => "INVALID_NAMED_ARGS".to_string(),
         Error::Json(_) => "JSON_ERROR".to_string(),
         Error::UnsupportedDatatype(_) => "UNSUPPORTED_DATATYPE".to_string(),
      }
   }
}

fn sqlx_error_code(e: &sqlx::Error) -> String {
   if let Some(code) = e.as_database_error().and_then(|db_err| db_err.code()) {
      return format!("DB_{}", code);
   }
   "SQLX_ERROR".to_string()
}
