use serde_json::Value as JsonValue;
use sqlx::Arguments;
use sqlx::any::AnyArguments;

/// Bind JSON values, in order, as positional query arguments.
///
/// The result can be passed to `sqlx::query_with` / `sqlx::query_as_with`, which
/// is how callers bind values inside a transaction from [`begin`](crate::begin).
///
/// # Example
///
/// ```no_run
/// # async fn example() -> easydb::Result<()> {
/// use serde_json::json;
///
/// let mut tx = easydb::begin().await?;
/// let args = easydb::bind_values(vec![json!("Alice"), json!(30)])?;
/// sqlx::query_with("INSERT INTO users (name, age) VALUES (?, ?)", args)
///     .execute(&mut *tx)
///     .await?;
/// tx.commit().await?;
/// # Ok(())
/// # }
/// ```
pub fn bind_values<'q>(values: Vec<JsonValue>) -> Result<AnyArguments<'q>, sqlx::Error> {
   let mut args = AnyArguments::default();
   for value in values {
      bind_value(&mut args, value)?;
   }
   Ok(args)
}

/// Helper function to bind a JSON value to SQLx `Any` arguments
pub fn bind_value(args: &mut AnyArguments<'_>, value: JsonValue) -> Result<(), sqlx::Error> {
   let bound = match value {
      JsonValue::Null => args.add(None::<String>),
      JsonValue::Bool(b) => args.add(b),
      JsonValue::String(s) => args.add(s),
      JsonValue::Number(number) => {
         // Preserve integer precision by binding as i64 when possible
         if let Some(int_val) = number.as_i64() {
            args.add(int_val)
         } else if let Some(uint_val) = number.as_u64() {
            // as_i64 already failed, so this is above i64::MAX; use f64 (will lose precision)
            args.add(uint_val as f64)
         } else {
            // Not an integer, bind as f64
            args.add(number.as_f64().unwrap_or_default())
         }
      }
      // Arrays and objects are stored as their JSON text
      value @ (JsonValue::Array(_) | JsonValue::Object(_)) => args.add(value.to_string()),
   };

   bound.map_err(sqlx::Error::Encode)
}
