use crate::Result;

use entiq_core::stmt;

/// A Rust type that maps onto a column type.
pub trait Primitive: Sized {
    /// The column type. `Type::Null` accepts a column of any type; the check
    /// is then made against the values compared with it.
    const TYPE: stmt::Type;

    fn load(value: stmt::Value) -> Result<Self>;

    /// Returns `true` if the primitive represents a nullable type (e.g. `Option`).
    fn nullable() -> bool {
        false
    }
}

impl Primitive for bool {
    const TYPE: stmt::Type = stmt::Type::Bool;

    fn load(value: stmt::Value) -> Result<Self> {
        value.try_into()
    }
}

impl Primitive for i32 {
    const TYPE: stmt::Type = stmt::Type::I32;

    fn load(value: stmt::Value) -> Result<Self> {
        value.try_into()
    }
}

impl Primitive for i64 {
    const TYPE: stmt::Type = stmt::Type::I64;

    fn load(value: stmt::Value) -> Result<Self> {
        value.try_into()
    }
}

impl Primitive for f64 {
    const TYPE: stmt::Type = stmt::Type::F64;

    fn load(value: stmt::Value) -> Result<Self> {
        value.try_into()
    }
}

impl Primitive for String {
    const TYPE: stmt::Type = stmt::Type::String;

    fn load(value: stmt::Value) -> Result<Self> {
        value.try_into()
    }
}

impl Primitive for stmt::Value {
    const TYPE: stmt::Type = stmt::Type::Null;

    fn load(value: stmt::Value) -> Result<Self> {
        Ok(value)
    }
}

impl<T: Primitive> Primitive for Option<T> {
    const TYPE: stmt::Type = T::TYPE;

    fn load(value: stmt::Value) -> Result<Self> {
        Ok(match value {
            stmt::Value::Null => None,
            value => Some(T::load(value)?),
        })
    }

    fn nullable() -> bool {
        true
    }
}

/// A numeric primitive that can be summed. Integer sums widen to `i64`.
pub trait Summable: Primitive {
    type Sum: Primitive;
}

impl Summable for i32 {
    type Sum = i64;
}

impl Summable for i64 {
    type Sum = i64;
}

impl Summable for f64 {
    type Sum = f64;
}

impl<T: Summable> Summable for Option<T> {
    type Sum = Option<T::Sum>;
}
