//! Driver names and connection URL normalization

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// SQL backend a handle talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
   MySql,
   Postgres,
   Sqlite,
}

impl Driver {
   /// Canonical driver name, also used as the URL scheme.
   pub fn as_str(&self) -> &'static str {
      match self {
         Driver::MySql => "mysql",
         Driver::Postgres => "postgres",
         Driver::Sqlite => "sqlite",
      }
   }

   /// Whether statements use numbered `$N` placeholders instead of `?`.
   pub fn numbered_placeholders(&self) -> bool {
      matches!(self, Driver::Postgres)
   }

   fn accepts_scheme(&self, scheme: &str) -> bool {
      match self {
         Driver::MySql => scheme == "mysql" || scheme == "mariadb",
         Driver::Postgres => scheme == "postgres" || scheme == "postgresql",
         Driver::Sqlite => scheme == "sqlite",
      }
   }

   /// Build the URL SQLx connects to from a connection string.
   ///
   /// Full URLs are passed through after checking that their scheme belongs to
   /// this driver. Anything else is treated as the part after the scheme, so
   /// `user:pw@localhost/app` becomes `mysql://user:pw@localhost/app` and
   /// `:memory:` becomes `sqlite::memory:`.
   pub fn connection_url(&self, connection_string: &str) -> Result<String, Error> {
      let connection_string = connection_string.trim();
      if connection_string.is_empty() {
         return Err(Error::EmptyConnectionString);
      }

      if let Some(scheme) = url_scheme(connection_string) {
         if self.accepts_scheme(scheme) {
            return Ok(connection_string.to_string());
         }
         return Err(Error::DriverMismatch {
            driver: *self,
            scheme: scheme.to_string(),
         });
      }

      Ok(match self {
         Driver::Sqlite => format!("sqlite:{connection_string}"),
         _ => format!("{}://{}", self.as_str(), connection_string),
      })
   }
}

/// Extract the scheme of `s` if it is written as a URL.
///
/// `sqlite:` URLs have no authority part, so the bare `sqlite:` prefix counts too.
fn url_scheme(s: &str) -> Option<&str> {
   if let Some((scheme, _)) = s.split_once("://") {
      let valid = !scheme.is_empty()
         && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.');
      return valid.then_some(scheme);
   }
   s.starts_with("sqlite:").then_some("sqlite")
}

impl FromStr for Driver {
   type Err = Error;

   fn from_str(name: &str) -> Result<Self, Self::Err> {
      match name {
         "mysql" => Ok(Driver::MySql),
         "postgres" | "postgresql" | "pgx" => Ok(Driver::Postgres),
         "sqlite" | "sqlite3" => Ok(Driver::Sqlite),
         other => Err(Error::UnsupportedDriver(other.to_string())),
      }
   }
}

impl fmt::Display for Driver {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(self.as_str())
   }
}
