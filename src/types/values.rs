//! Runtime value types

use crate::errors::{self, ErrorInfo};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as JsonValue};
use std::collections::HashMap;
use std::fmt;

/// Runtime value type
///
/// The currency of a drive: computations finish with a `Val`, futures
/// fulfill with one, and combined collections produce a `List` or `Obj`
/// of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum Val {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    List(Vec<Val>),
    Obj(HashMap<String, Val>),
    /// Error value with code and message
    Error(ErrorInfo),
}

impl fmt::Display for Val {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Val::Null => write!(f, "null"),
            Val::Bool(b) => write!(f, "{}", b),
            Val::Num(n) => write!(f, "{}", n),
            Val::Str(s) => write!(f, "{:?}", s),
            Val::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Val::Obj(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Val::Error(err) => write!(f, "{}", err),
        }
    }
}

impl From<bool> for Val {
    fn from(v: bool) -> Self {
        Val::Bool(v)
    }
}

impl From<f64> for Val {
    fn from(v: f64) -> Self {
        Val::Num(v)
    }
}

impl From<i32> for Val {
    fn from(v: i32) -> Self {
        Val::Num(v as f64)
    }
}

impl From<&str> for Val {
    fn from(v: &str) -> Self {
        Val::Str(v.to_string())
    }
}

impl From<String> for Val {
    fn from(v: String) -> Self {
        Val::Str(v)
    }
}

impl From<Vec<Val>> for Val {
    fn from(v: Vec<Val>) -> Self {
        Val::List(v)
    }
}

impl From<HashMap<String, Val>> for Val {
    fn from(v: HashMap<String, Val>) -> Self {
        Val::Obj(v)
    }
}

/// Convert a JSON value into a runtime value
pub fn json_to_val(json: &JsonValue) -> Result<Val, ErrorInfo> {
    match json {
        JsonValue::Null => Ok(Val::Null),
        JsonValue::Bool(b) => Ok(Val::Bool(*b)),
        JsonValue::Number(n) => n.as_f64().map(Val::Num).ok_or_else(|| {
            ErrorInfo::new(
                errors::TYPE_ERROR,
                format!("Number not representable as f64: {}", n),
            )
        }),
        JsonValue::String(s) => Ok(Val::Str(s.clone())),
        JsonValue::Array(items) => {
            let vals = items.iter().map(json_to_val).collect::<Result<_, _>>()?;
            Ok(Val::List(vals))
        }
        JsonValue::Object(map) => {
            let mut obj = HashMap::with_capacity(map.len());
            for (key, value) in map {
                obj.insert(key.clone(), json_to_val(value)?);
            }
            Ok(Val::Obj(obj))
        }
    }
}

/// Convert a runtime value back to JSON
///
/// Non-finite numbers have no JSON form and fail the conversion.
pub fn val_to_json(val: &Val) -> Result<JsonValue, ErrorInfo> {
    match val {
        Val::Null => Ok(JsonValue::Null),
        Val::Bool(b) => Ok(JsonValue::Bool(*b)),
        Val::Num(n) => Number::from_f64(*n).map(JsonValue::Number).ok_or_else(|| {
            ErrorInfo::new(
                errors::TYPE_ERROR,
                format!("Non-finite number has no JSON representation: {}", n),
            )
        }),
        Val::Str(s) => Ok(JsonValue::String(s.clone())),
        Val::List(items) => {
            let values = items.iter().map(val_to_json).collect::<Result<_, _>>()?;
            Ok(JsonValue::Array(values))
        }
        Val::Obj(map) => {
            let mut obj = serde_json::Map::with_capacity(map.len());
            for (key, value) in map {
                obj.insert(key.clone(), val_to_json(value)?);
            }
            Ok(JsonValue::Object(obj))
        }
        Val::Error(err) => Ok(serde_json::json!({
            "code": err.code,
            "message": err.message,
        })),
    }
}
