//! Query intent and instance roles

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// What a caller intends to do with a connection.
///
/// Only [`Purpose::Select`] may be served by the slave pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Purpose {
   /// Read-only work
   Select,
   /// Writes, transactions and anything else
   Update,
}

impl From<&str> for Purpose {
   /// `"select"` is the only read tag; every other tag means update.
   fn from(tag: &str) -> Self {
      if tag == "select" {
         Purpose::Select
      } else {
         Purpose::Update
      }
   }
}

/// Declared role of an [`Instance`](crate::Instance), fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
   /// Read/write
   Master,
   /// Read-only
   Slave,
}

impl Role {
   pub fn as_str(&self) -> &'static str {
      match self {
         Role::Master => "master",
         Role::Slave => "slave",
      }
   }

   /// Whether write-class operations are allowed.
   pub fn is_writable(&self) -> bool {
      matches!(self, Role::Master)
   }
}

impl FromStr for Role {
   type Err = Error;

   fn from_str(mode: &str) -> Result<Self, Self::Err> {
      match mode {
         "master" => Ok(Role::Master),
         "slave" => Ok(Role::Slave),
         other => Err(Error::WrongMode(other.to_string())),
      }
   }
}

impl fmt::Display for Role {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(self.as_str())
   }
}
