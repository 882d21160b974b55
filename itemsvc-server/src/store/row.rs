//! MySQL row → JSON object conversion
//!
//! `SELECT *` means the column set is only known at runtime, so each column
//! is classified by its reported type name and decoded accordingly. Output
//! shapes follow what Node's `mysql` driver produces with default settings:
//! DECIMAL and JSON as strings, dates as ISO-8601 UTC strings, binary data
//! as `{"type":"Buffer","data":[...]}`. TIME keeps its full signed range
//! (`-838:59:59` to `838:59:59`) as text. Zero or otherwise invalid dates
//! become `null` instead of failing the row.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{json, Map, Number, Value};
use sqlx::mysql::types::MySqlTime;
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

use super::Item;

/// How a column's value is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    SignedInt,
    UnsignedInt,
    Float,
    Double,
    /// Anything whose wire form is text: CHAR/VARCHAR/TEXT, ENUM, SET, DECIMAL, JSON
    Text,
    Date,
    DateTime,
    Time,
    Bytes,
    Null,
}

impl ColumnKind {
    /// Classify a MySQL type name as reported by sqlx (`"INT UNSIGNED"`, `"VARCHAR"`, ...).
    pub fn from_type_name(name: &str) -> Self {
        if name.ends_with(" UNSIGNED") {
            return Self::UnsignedInt;
        }

        match name {
            "BOOLEAN" | "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => {
                Self::SignedInt
            }
            "FLOAT" => Self::Float,
            "DOUBLE" => Self::Double,
            "DECIMAL" | "JSON" | "CHAR" | "VARCHAR" | "TINYTEXT" | "TEXT" | "MEDIUMTEXT"
            | "LONGTEXT" | "ENUM" | "SET" => Self::Text,
            "DATE" => Self::Date,
            "DATETIME" | "TIMESTAMP" => Self::DateTime,
            "TIME" => Self::Time,
            "NULL" => Self::Null,
            // BINARY, VARBINARY, *BLOB, BIT, GEOMETRY and unknowns
            _ => Self::Bytes,
        }
    }
}

/// Convert one row into an [`Item`], preserving column order.
pub fn row_to_item(row: &MySqlRow) -> Result<Item, sqlx::Error> {
    let mut columns = Map::with_capacity(row.columns().len());

    for column in row.columns() {
        let idx = column.ordinal();
        let kind = ColumnKind::from_type_name(column.type_info().name());
        let value = if row.try_get_raw(idx)?.is_null() {
            Value::Null
        } else {
            decode_column(row, idx, kind)?
        };
        columns.insert(column.name().to_owned(), value);
    }

    Ok(Item::new(columns))
}

fn decode_column(row: &MySqlRow, idx: usize, kind: ColumnKind) -> Result<Value, sqlx::Error> {
    // Unchecked: the kind already comes from the column type, and DECIMAL
    // and JSON only decode as text this way.
    let value = match kind {
        ColumnKind::SignedInt => Value::from(row.try_get_unchecked::<i64, _>(idx)?),
        ColumnKind::UnsignedInt => Value::from(row.try_get_unchecked::<u64, _>(idx)?),
        ColumnKind::Float => {
            let v: f32 = row.try_get_unchecked(idx)?;
            // Go through the shortest decimal form so 1.1f32 stays 1.1
            float_value(v.to_string().parse().unwrap_or(f64::NAN))
        }
        ColumnKind::Double => float_value(row.try_get_unchecked::<f64, _>(idx)?),
        ColumnKind::Text => Value::String(row.try_get_unchecked::<String, _>(idx)?),
        ColumnKind::Date => null_if_undecodable(row.try_get_unchecked::<NaiveDate, _>(idx), |date| {
            datetime_value(date.and_time(NaiveTime::MIN))
        })?,
        ColumnKind::DateTime => {
            null_if_undecodable(row.try_get_unchecked::<NaiveDateTime, _>(idx), datetime_value)?
        }
        ColumnKind::Time => time_value(&row.try_get_unchecked::<MySqlTime, _>(idx)?),
        ColumnKind::Bytes => bytes_value(row.try_get_unchecked::<Vec<u8>, _>(idx)?),
        ColumnKind::Null => Value::Null,
    };

    Ok(value)
}

/// Non-finite floats have no JSON form and become `null`.
pub fn float_value(v: f64) -> Value {
    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}

/// `YYYY-MM-DDTHH:MM:SS.mmmZ`, the stored value taken as UTC.
pub fn datetime_value(dt: NaiveDateTime) -> Value {
    Value::String(dt.and_utc().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}

/// `[-]HH:MM:SS[.ffffff]`, hours padded to two digits but never capped.
pub fn time_value(time: &MySqlTime) -> Value {
    let sign = if time.is_negative() { "-" } else { "" };
    let mut text = format!(
        "{sign}{:02}:{:02}:{:02}",
        time.hours(),
        time.minutes(),
        time.seconds()
    );
    if time.microseconds() != 0 {
        text.push_str(&format!(".{:06}", time.microseconds()));
    }
    Value::String(text)
}

pub fn bytes_value(bytes: Vec<u8>) -> Value {
    json!({ "type": "Buffer", "data": bytes })
}

/// A value chrono cannot represent (`0000-00-00`, `2024-02-30`) is `null`.
/// Errors other than decoding still fail the row.
fn null_if_undecodable<T>(
    decoded: Result<T, sqlx::Error>,
    render: impl FnOnce(T) -> Value,
) -> Result<Value, sqlx::Error> {
    match decoded {
        Ok(v) => Ok(render(v)),
        Err(sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_)) => Ok(Value::Null),
        Err(e) => Err(e),
    }
}
