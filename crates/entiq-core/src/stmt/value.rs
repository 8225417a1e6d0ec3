use super::{Record, Type};
use crate::{Error, Result};

use std::hash::{Hash, Hasher};

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit floating point number
    F64(f64),

    /// String value
    String(String),

    /// A list of values of the same type
    List(Vec<Value>),

    /// A tuple of values, used for composite keys and rows
    Record(Record),

    /// Null value
    #[default]
    Null,
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn record_from_vec(fields: Vec<Self>) -> Self {
        Self::Record(Record::from_vec(fields))
    }

    pub fn list_from_vec(items: Vec<Self>) -> Self {
        Self::List(items)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Infer the type of the value. Lists are typed by their first non-null
    /// item.
    pub fn infer_ty(&self) -> Type {
        match self {
            Self::Bool(_) => Type::Bool,
            Self::I32(_) => Type::I32,
            Self::I64(_) => Type::I64,
            Self::F64(_) => Type::F64,
            Self::String(_) => Type::String,
            Self::List(items) => Type::list(
                items
                    .iter()
                    .find(|item| !item.is_null())
                    .map(Value::infer_ty)
                    .unwrap_or(Type::Null),
            ),
            Self::Record(record) => Type::Record(record.iter().map(Value::infer_ty).collect()),
            Self::Null => Type::Null,
        }
    }

    /// Returns `true` if the value may be stored in a column of type `ty`.
    pub fn is_a(&self, ty: &Type) -> bool {
        ty.accepts(&self.infer_ty())
    }

    pub fn to_bool(self) -> Result<bool> {
        self.try_into()
    }

    pub fn to_i64(self) -> Result<i64> {
        self.try_into()
    }

    pub fn to_string(self) -> Result<String> {
        self.try_into()
    }

    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

// Hash and Eq compare floats by bit pattern so values can be used as parts of
// an entity identity.
impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::Bool(v) => v.hash(state),
            Self::I32(v) => v.hash(state),
            Self::I64(v) => v.hash(state),
            Self::F64(v) => v.to_bits().hash(state),
            Self::String(v) => v.hash(state),
            Self::List(items) => items.hash(state),
            Self::Record(record) => record.hash(state),
            Self::Null => {}
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I32(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<&i64> for Value {
    fn from(src: &i64) -> Self {
        Self::I64(*src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<Record> for Value {
    fn from(src: Record) -> Self {
        Self::Record(src)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(src: Vec<T>) -> Self {
        Self::List(src.into_iter().map(Into::into).collect())
    }
}

impl<T1: Into<Value>, T2: Into<Value>> From<(T1, T2)> for Value {
    fn from(src: (T1, T2)) -> Self {
        Self::record_from_vec(vec![src.0.into(), src.1.into()])
    }
}

fn conversion_error(value: &Value, to: Type) -> Error {
    Error::type_mismatch("value", to, value.infer_ty())
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            _ => Err(conversion_error(&value, Type::Bool)),
        }
    }
}

impl TryFrom<Value> for i32 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::I32(v) => Ok(v),
            Value::I64(v) => i32::try_from(v).map_err(|_| conversion_error(&value, Type::I32)),
            _ => Err(conversion_error(&value, Type::I32)),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::I32(v) => Ok(v.into()),
            Value::I64(v) => Ok(v),
            _ => Err(conversion_error(&value, Type::I64)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::F64(v) => Ok(v),
            Value::I32(v) => Ok(v.into()),
            Value::I64(v) => Ok(v as f64),
            _ => Err(conversion_error(&value, Type::F64)),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            _ => Err(conversion_error(&value, Type::String)),
        }
    }
}
