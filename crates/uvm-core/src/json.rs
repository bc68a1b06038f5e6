//! # JSON Boundary
//!
//! Encoding between JSON text and table values, mirroring the VM's `json`
//! module.
//!
//! ## Decoding (`loads`)
//!
//! | JSON | Value |
//! |------|-------|
//! | object | table written through the map view, key order preserved, `null` members dropped |
//! | array | table written to the dense run, `null` elements kept as holes |
//! | integer in `i64` range | `Int` |
//! | any other number | `Number` with the exact source text |
//! | `null` / empty text | absent |
//!
//! ## Encoding (`dumps`)
//!
//! A table whose sparse part is empty and whose dense run is not encodes as
//! an array (holes become `null`). Every other table, the empty one included,
//! encodes as an object: dense indices first as decimal keys, then sparse
//! keys in insertion order. When two keys spell the same text the later one
//! wins.

use crate::domain::table::Table;
use crate::domain::value::Value;
use crate::errors::JsonError;
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as Json};
use tracing::debug;

/// Parses JSON text into a value. Empty text and `null` decode to `None`.
///
/// # Errors
///
/// Returns `JsonError::Syntax` for malformed text.
pub fn loads(text: &str) -> Result<Option<Value>, JsonError> {
    if text.is_empty() {
        return Ok(None);
    }
    let parsed: Json = serde_json::from_str(text).map_err(|err| {
        debug!(error = %err, "rejecting malformed json");
        JsonError::from(err)
    })?;
    Ok(from_json(parsed))
}

/// Parses JSON text that must decode to a table.
///
/// Returns `Ok(None)` when the text decodes to a scalar or to nothing.
///
/// # Errors
///
/// Returns `JsonError::Syntax` for malformed text.
pub fn loads_table(text: &str) -> Result<Option<Table>, JsonError> {
    Ok(loads(text)?.and_then(Value::into_table))
}

/// Encodes a value as compact JSON text.
///
/// # Errors
///
/// Returns `JsonError::InvalidNumber` if a `Number` holds text that is not a
/// JSON number.
pub fn dumps(value: &Value) -> Result<String, JsonError> {
    Ok(serde_json::to_string(&to_json(value)?)?)
}

/// Encodes a possibly absent value; absence encodes as `null`.
///
/// # Errors
///
/// Same as [`dumps`].
pub fn dumps_opt(value: Option<&Value>) -> Result<String, JsonError> {
    match value {
        Some(v) => dumps(v),
        None => Ok("null".to_owned()),
    }
}

/// Encodes a table as compact JSON text.
///
/// # Errors
///
/// Same as [`dumps`].
pub fn dumps_table(table: &Table) -> Result<String, JsonError> {
    Ok(serde_json::to_string(&table_to_json(table)?)?)
}

fn from_json(json: Json) -> Option<Value> {
    match json {
        Json::Null => None,
        Json::Bool(b) => Some(Value::Bool(b)),
        Json::Number(n) => Some(n.as_i64().map_or_else(|| Value::Number(n.to_string()), Value::Int)),
        Json::String(s) => Some(Value::Str(s)),
        Json::Array(items) => {
            let mut table = Table::new();
            for item in items {
                table.dense_push(from_json(item));
            }
            Some(Value::Table(table))
        }
        Json::Object(members) => {
            let mut table = Table::new();
            let mut map = table.as_map_mut();
            for (key, member) in members {
                map.set(key, from_json(member));
            }
            Some(Value::Table(table))
        }
    }
}

fn to_json(value: &Value) -> Result<Json, JsonError> {
    Ok(match value {
        Value::Int(n) => Json::from(*n),
        Value::Number(text) => Json::Number(
            serde_json::from_str::<JsonNumber>(text)
                .map_err(|_| JsonError::InvalidNumber(text.clone()))?,
        ),
        Value::Bool(b) => Json::Bool(*b),
        Value::Str(s) => Json::String(s.clone()),
        Value::Table(table) => table_to_json(table)?,
    })
}

fn table_to_json(table: &Table) -> Result<Json, JsonError> {
    if table.sparse_len() == 0 && table.dense_len() > 0 {
        let items = table
            .dense_slots()
            .map(|slot| slot.map_or(Ok(Json::Null), to_json))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Json::Array(items));
    }

    let mut members = JsonMap::new();
    for (pos, slot) in table.dense_slots().enumerate() {
        if let Some(value) = slot {
            members.insert((pos + 1).to_string(), to_json(value)?);
        }
    }
    for (key, value) in table.sparse_entries() {
        members.insert(key.to_string(), to_json(value)?);
    }
    Ok(Json::Object(members))
}

// =============================================================================
// TESTS
// =============================================================================
