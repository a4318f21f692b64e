use rusqlite::types::{Value as SqlValue, ValueRef};
use serde_json::{Number, Value};

/// Convert a JSON bind value to its SQLite counterpart
pub fn to_sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(flag) => SqlValue::Integer(i64::from(*flag)),
        Value::Number(number) => number_to_sql(number),
        Value::String(text) => SqlValue::Text(text.clone()),
        Value::Array(_) | Value::Object(_) => SqlValue::Text(value.to_string()),
    }
}

/// Integers past `i64::MAX` have no exact SQLite form and are bound as text
fn number_to_sql(number: &Number) -> SqlValue {
    if let Some(integer) = number.as_i64() {
        return SqlValue::Integer(integer);
    }

    match number.as_f64() {
        Some(real) if number.is_f64() => SqlValue::Real(real),
        _ => SqlValue::Text(number.to_string()),
    }
}

/// Convert a column value read from SQLite to JSON
pub fn from_sql_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(integer) => Value::from(integer),
        // NaN and infinities have no JSON form
        ValueRef::Real(real) => Number::from_f64(real).map_or(Value::Null, Value::Number),
        ValueRef::Text(text) => Value::String(String::from_utf8_lossy(text).into_owned()),
        ValueRef::Blob(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
    }
}
