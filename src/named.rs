//! `:name` parameters compiled to positional placeholders

use serde::Serialize;
use serde_json::Value as JsonValue;
use sqlx_any_conn_mgr::Driver;

use crate::{Error, Result};

/// Placeholder syntax a compiled query is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
   /// `?` (MySQL, SQLite)
   Question,
   /// `$1`, `$2`, ... (PostgreSQL)
   Dollar,
}

impl From<Driver> for PlaceholderStyle {
   fn from(driver: Driver) -> Self {
      if driver.numbered_placeholders() {
         PlaceholderStyle::Dollar
      } else {
         PlaceholderStyle::Question
      }
   }
}

/// A query whose `:name` parameters have been replaced by positional placeholders.
///
/// Parameters are `:` followed by a letter or `_` and then letters, digits, `_`
/// or `.`; dotted names address nested fields. `::` (a PostgreSQL cast) is never
/// a parameter, and nothing inside quotes or comments is rewritten.
///
/// # Example
///
/// ```
/// use easydb::{NamedQuery, PlaceholderStyle};
/// use serde_json::json;
///
/// let compiled = NamedQuery::compile(
///    "UPDATE users SET name = :name WHERE id = :id",
///    PlaceholderStyle::Dollar,
/// );
/// assert_eq!(compiled.sql(), "UPDATE users SET name = $1 WHERE id = $2");
///
/// let values = compiled.bind_from(&json!({"id": 7, "name": "Bob"})).unwrap();
/// assert_eq!(values, vec![json!("Bob"), json!(7)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedQuery {
   sql: String,
   names: Vec<String>,
}

#[derive(Clone, Copy)]
enum State {
   Normal,
   Quoted(u8),
   LineComment,
   BlockComment,
}

fn is_name_start(b: u8) -> bool {
   b.is_ascii_alphabetic() || b == b'_'
}

fn is_name_char(b: u8) -> bool {
   b.is_ascii_alphanumeric() || b == b'_' || b == b'.'
}

impl NamedQuery {
   pub fn compile(query: &str, style: PlaceholderStyle) -> Self {
      let bytes = query.as_bytes();
      let mut sql = String::with_capacity(query.len());
      let mut names = Vec::new();
      let mut state = State::Normal;
      let mut copied = 0;
      let mut idx = 0;

      while idx < bytes.len() {
         let b = bytes[idx];
         match state {
            State::Normal => match b {
               b'\'' | b'"' | b'`' => state = State::Quoted(b),
               b'-' if bytes.get(idx + 1) == Some(&b'-') => {
                  state = State::LineComment;
                  idx += 1;
               }
               b'/' if bytes.get(idx + 1) == Some(&b'*') => {
                  state = State::BlockComment;
                  idx += 1;
               }
               b':' if bytes.get(idx + 1) == Some(&b':') => {
                  idx += 1;
               }
               b':' if bytes.get(idx + 1).is_some_and(|&n| is_name_start(n)) => {
                  let start = idx + 1;
                  let mut end = start;
                  while end < bytes.len() && is_name_char(bytes[end]) {
                     end += 1;
                  }
                  while bytes[end - 1] == b'.' {
                     end -= 1;
                  }

                  sql.push_str(&query[copied..idx]);
                  names.push(query[start..end].to_string());
                  match style {
                     PlaceholderStyle::Question => sql.push('?'),
                     PlaceholderStyle::Dollar => {
                        sql.push('$');
                        sql.push_str(&names.len().to_string());
                     }
                  }
                  copied = end;
                  idx = end;
                  continue;
               }
               _ => {}
            },
            State::Quoted(quote) => {
               if b == quote {
                  // A doubled quote is an escaped quote inside the literal
                  if bytes.get(idx + 1) == Some(&quote) {
                     idx += 1;
                  } else {
                     state = State::Normal;
                  }
               }
            }
            State::LineComment => {
               if b == b'\n' {
                  state = State::Normal;
               }
            }
            State::BlockComment => {
               if b == b'*' && bytes.get(idx + 1) == Some(&b'/') {
                  state = State::Normal;
                  idx += 1;
               }
            }
         }
         idx += 1;
      }

      sql.push_str(&query[copied..]);
      Self { sql, names }
   }

   /// Query text with positional placeholders.
   pub fn sql(&self) -> &str {
      &self.sql
   }

   /// Parameter names in placeholder order (repeats included).
   pub fn names(&self) -> &[String] {
      &self.names
   }

   /// Look up each parameter in `arg`, returning values in placeholder order.
   ///
   /// `arg` must serialize to a JSON object, e.g. a struct or a map.
   pub fn bind_from<A>(&self, arg: &A) -> Result<Vec<JsonValue>>
   where
      A: Serialize + ?Sized,
   {
      let value = serde_json::to_value(arg)?;
      if !value.is_object() {
         return Err(Error::InvalidNamedArgs(format!(
            "expected a struct or map, got {}",
            json_kind(&value)
         )));
      }

      self
         .names
         .iter()
         .map(|name| {
            lookup(&value, name)
               .cloned()
               .ok_or_else(|| Error::MissingNamedArg(name.clone()))
         })
         .collect()
   }
}

fn lookup<'v>(value: &'v JsonValue, name: &str) -> Option<&'v JsonValue> {
   name
      .split('.')
      .try_fold(value, |current, field| current.as_object()?.get(field))
}

fn json_kind(value: &JsonValue) -> &'static str {
   match value {
      JsonValue::Null => "null",
      JsonValue::Bool(_) => "a boolean",
      JsonValue::Number(_) => "a number",
      JsonValue::String(_) => "a string",
      JsonValue::Array(_) => "an array",
      JsonValue::Object(_) => "an object",
   }
}
