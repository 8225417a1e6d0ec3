/// The type of a column, a literal, or a projected expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boolean value
    Bool,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// 64-bit floating point number
    F64,

    /// String
    String,

    /// A list of values of the same type
    List(Box<Type>),

    /// A fixed-arity tuple, used for composite keys
    Record(Vec<Type>),

    /// The type of the `NULL` literal. Compatible with every type.
    Null,
}

impl Type {
    pub fn list(ty: impl Into<Self>) -> Self {
        Self::List(Box::new(ty.into()))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::I32 | Self::I64 | Self::F64)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if a value of type `other` may be compared with, or
    /// assigned to, a column declared as `self`.
    ///
    /// Numeric types are mutually comparable; `Null` is comparable with
    /// everything.
    pub fn accepts(&self, other: &Type) -> bool {
        match (self, other) {
            (_, Self::Null) | (Self::Null, _) => true,
            (lhs, rhs) if lhs.is_numeric() && rhs.is_numeric() => true,
            (Self::List(lhs), Self::List(rhs)) => lhs.accepts(rhs),
            (Self::Record(lhs), Self::Record(rhs)) => {
                lhs.len() == rhs.len() && lhs.iter().zip(rhs).all(|(l, r)| l.accepts(r))
            }
            (lhs, rhs) => lhs == rhs,
        }
    }

    /// Whether a set operation may combine a column of `self` with one of
    /// `other`. Types must be identical; `Null` matches anything.
    pub fn unifies_with(&self, other: &Type) -> bool {
        match (self, other) {
            (_, Self::Null) | (Self::Null, _) => true,
            (Self::List(lhs), Self::List(rhs)) => lhs.unifies_with(rhs),
            (Self::Record(lhs), Self::Record(rhs)) => {
                lhs.len() == rhs.len() && lhs.iter().zip(rhs).all(|(l, r)| l.unifies_with(r))
            }
            (lhs, rhs) => lhs == rhs,
        }
    }

    /// The type an aggregate over `self` evaluates to.
    pub fn averaged(&self) -> Type {
        if self.is_numeric() {
            Type::F64
        } else {
            self.clone()
        }
    }

    /// The type a `sum` over `self` evaluates to.
    pub fn summed(&self) -> Type {
        match self {
            Type::I32 | Type::I64 => Type::I64,
            other => other.clone(),
        }
    }
}
