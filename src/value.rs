//! Parameter values bound into fixture SQL.

use serde::{Deserialize, Serialize};

/// A single SQL parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
	/// SQL NULL.
	Null,
	/// Boolean value.
	Bool(bool),
	/// 64-bit integer value.
	Int(i64),
	/// Double-precision float value.
	Float(f64),
	/// Text value.
	Text(String),
	/// Raw byte value.
	Bytes(Vec<u8>),
	/// UTC timestamp value.
	Timestamp(chrono::DateTime<chrono::Utc>),
}

impl From<&str> for FieldValue {
	fn from(s: &str) -> Self {
		FieldValue::Text(s.to_string())
	}
}

impl From<String> for FieldValue {
	fn from(s: String) -> Self {
		FieldValue::Text(s)
	}
}

impl From<i64> for FieldValue {
	fn from(i: i64) -> Self {
		FieldValue::Int(i)
	}
}

impl From<i32> for FieldValue {
	fn from(i: i32) -> Self {
		FieldValue::Int(i as i64)
	}
}

impl From<f64> for FieldValue {
	fn from(f: f64) -> Self {
		FieldValue::Float(f)
	}
}

impl From<bool> for FieldValue {
	fn from(b: bool) -> Self {
		FieldValue::Bool(b)
	}
}

impl From<Vec<u8>> for FieldValue {
	fn from(bytes: Vec<u8>) -> Self {
		FieldValue::Bytes(bytes)
	}
}

impl From<chrono::DateTime<chrono::Utc>> for FieldValue {
	fn from(dt: chrono::DateTime<chrono::Utc>) -> Self {
		FieldValue::Timestamp(dt)
	}
}

impl<T> From<Option<T>> for FieldValue
where
	T: Into<FieldValue>,
{
	fn from(opt: Option<T>) -> Self {
		match opt {
			Some(v) => v.into(),
			None => FieldValue::Null,
		}
	}
}

impl From<serde_json::Value> for FieldValue {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => FieldValue::Null,
			serde_json::Value::Bool(b) => FieldValue::Bool(b),
			serde_json::Value::Number(n) => {
				if let Some(i) = n.as_i64() {
					FieldValue::Int(i)
				} else {
					FieldValue::Float(n.as_f64().unwrap_or(0.0))
				}
			}
			serde_json::Value::String(s) => FieldValue::Text(s),
			// Nested structures are stored as their JSON text
			other => FieldValue::Text(other.to_string()),
		}
	}
}
