//! # Values and Keys
//!
//! The tagged union stored inside dynamic tables.
//!
//! Absence is modelled as `Option<Value>::None` everywhere. There is no null
//! variant, so a table can never hold an explicit "stored nil".

use crate::domain::bignum::BigNum;
use crate::domain::table::Table;
use std::fmt;

// =============================================================================
// VALUE
// =============================================================================

/// A value held by a table slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// Native 64-bit integer.
    Int(i64),
    /// Any other number, kept as its exact decimal source text.
    Number(String),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Str(String),
    /// Nested table (owned by the parent slot).
    Table(Table),
}

impl Value {
    /// Returns the integer if this is an `Int`.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string slice if this is a `Str`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this is a `Bool`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the nested table if this is a `Table`.
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Mutable access to a nested table.
    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Consumes the value, returning the table if this is a `Table`.
    #[must_use]
    pub fn into_table(self) -> Option<Table> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Name of the variant, used in diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Str(_) => "string",
            Self::Table(_) => "table",
        }
    }
}

/// Scalars render the way the VM's `tostring` does; tables render as `table`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Number(s) | Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Table(_) => f.write_str("table"),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Table> for Value {
    fn from(t: Table) -> Self {
        Self::Table(t)
    }
}

/// Big numbers cross into tables as their canonical decimal string.
impl From<&BigNum> for Value {
    fn from(n: &BigNum) -> Self {
        Self::Str(n.to_string())
    }
}

// =============================================================================
// TABLE KEY
// =============================================================================

/// Key of a sparse-store entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableKey {
    /// Integer index that fell outside the dense run.
    Int(i64),
    /// String key written through the map view.
    Str(String),
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TableKey {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for TableKey {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for TableKey {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

// =============================================================================
// TESTS
// =============================================================================
