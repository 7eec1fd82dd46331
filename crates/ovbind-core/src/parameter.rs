//! Parameter binding and the values parameters carry.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::handle::{Handle, ParameterKind};
use crate::native::NativeApi;
use crate::object::{NativeObject, NativeWrapper};

/// Value behind a parameter handle.
///
/// Untagged, so YAML and JSON literals map straight onto a variant. Only
/// scalars and flat-or-nested lists are carried; richer native types are not
/// marshalled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ParamValue>),
}

impl ParamValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Floats, and integers widened to float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::String(s) => f.write_str(s),
            ParamValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::String(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::String(v)
    }
}

/// Owned handle to a value returned by a native metric or config query.
#[derive(Debug)]
pub struct Parameter {
    obj: NativeObject<ParameterKind>,
}

impl Parameter {
    pub fn from_handle(api: Arc<dyn NativeApi>, handle: Handle<ParameterKind>) -> Self {
        Self {
            obj: NativeObject::from_handle(api, handle),
        }
    }

    /// Read the value from the native layer.
    pub fn value(&self) -> Result<ParamValue> {
        self.obj.api().parameter_value(self.obj.addr())
    }
}

impl NativeWrapper for Parameter {
    type Kind = ParameterKind;

    fn object(&self) -> &NativeObject<ParameterKind> {
        &self.obj
    }

    fn into_object(self) -> NativeObject<ParameterKind> {
        self.obj
    }
}
