use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use sqlx::any::{AnyRow, AnyValueRef};
use sqlx::{Column, Row, TypeInfo, Value, ValueRef};

use crate::Error;

/// Convert every column of a row into an ordered column-name → JSON map.
pub fn row_to_map(row: &AnyRow) -> Result<IndexMap<String, JsonValue>, Error> {
   let mut map = IndexMap::with_capacity(row.columns().len());
   for (i, column) in row.columns().iter().enumerate() {
      let value = row.try_get_raw(i)?;
      map.insert(column.name().to_string(), to_json(value)?);
   }
   Ok(map)
}

/// Convert an `Any` value to a JSON value.
///
/// The `Any` backend normalizes every driver's column types to a small set
/// (`BOOLEAN`, `SMALLINT`, `INTEGER`, `BIGINT`, `REAL`, `DOUBLE`, `TEXT`, `BLOB`).
///
/// Note: BLOB values are returned as base64-encoded strings since JSON
/// has no native binary type.
pub fn to_json(value: AnyValueRef<'_>) -> Result<JsonValue, Error> {
   if value.is_null() {
      return Ok(JsonValue::Null);
   }

   let type_name = value.type_info().name().to_string();
   let owned = ValueRef::to_owned(&value);

   let result = match type_name.as_str() {
      "BOOLEAN" => match owned.try_decode::<bool>() {
         Ok(v) => JsonValue::Bool(v),
         Err(_) => JsonValue::Null,
      },

      "SMALLINT" => match owned.try_decode::<i16>() {
         Ok(v) => JsonValue::from(v),
         Err(_) => JsonValue::Null,
      },

      "INTEGER" => match owned.try_decode::<i32>() {
         Ok(v) => JsonValue::from(v),
         Err(_) => JsonValue::Null,
      },

      "BIGINT" => match owned.try_decode::<i64>() {
         Ok(v) => JsonValue::from(v),
         Err(_) => JsonValue::Null,
      },

      "REAL" => match owned.try_decode::<f32>() {
         Ok(v) => JsonValue::from(f64::from(v)),
         Err(_) => JsonValue::Null,
      },

      "DOUBLE" => match owned.try_decode::<f64>() {
         Ok(v) => JsonValue::from(v),
         Err(_) => JsonValue::Null,
      },

      "TEXT" => match owned.try_decode::<String>() {
         Ok(v) => JsonValue::String(v),
         Err(_) => JsonValue::Null,
      },

      "BLOB" => match owned.try_decode::<Vec<u8>>() {
         // Encode binary data as base64 for JSON serialization
         Ok(blob) => JsonValue::String(base64_encode(&blob)),
         Err(_) => JsonValue::Null,
      },

      "NULL" => JsonValue::Null,

      _ => {
         // For unknown types, try to decode as text
         if let Ok(text) = owned.try_decode::<String>() {
            JsonValue::String(text)
         } else {
            return Err(Error::UnsupportedDatatype(format!(
               "Unknown column type: {}",
               type_name
            )));
         }
      }
   };

   Ok(result)
}

fn base64_encode(data: &[u8]) -> String {
   use base64::Engine;
   base64::engine::general_purpose::STANDARD.encode(data)
}
