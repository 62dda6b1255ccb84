//! Positional-argument binding
//!
//! The pipeline emits `serde_json::Value` arguments; rusqlite wants its
//! own value type. Scalars map directly; nested arrays/objects are stored
//! as JSON text, matching the JSON-in-TEXT convention used elsewhere in
//! the schema.

use crate::error::{SqliteError, SqliteResult};
use cardstock_query::ValueMap;
use rusqlite::types::Value as SqlValue;
use serde_json::Value;

/// Build a pipeline input map from literal pairs
pub(crate) fn value_map<const N: usize>(pairs: [(&str, Value); N]) -> ValueMap {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Convert rendered pipeline arguments into bindable SQLite values
pub fn to_sql_values(args: &[Value]) -> SqliteResult<Vec<SqlValue>> {
    args.iter().map(to_sql_value).collect()
}

fn to_sql_value(value: &Value) -> SqliteResult<SqlValue> {
    match value {
        Value::Null => Ok(SqlValue::Null),
        Value::Bool(b) => Ok(SqlValue::Integer(i64::from(*b))),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(SqlValue::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(SqlValue::Real(f))
            } else {
                Err(SqliteError::Serialization(format!(
                    "number out of bindable range: {n}"
                )))
            }
        }
        Value::String(s) => Ok(SqlValue::Text(s.clone())),
        other => serde_json::to_string(other)
            .map(SqlValue::Text)
            .map_err(|e| SqliteError::Serialization(e.to_string())),
    }
}
