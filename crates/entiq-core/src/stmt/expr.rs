use super::*;

use std::fmt;

/// A node in a compiled expression tree.
///
/// Expressions are plain data: they carry no reference to the query context
/// that recorded them and can be compared structurally. Grouping validation
/// relies on that equality.
#[derive(Clone, PartialEq)]
pub enum Expr {
    /// Aggregate function over a column or `*`
    Aggregate(ExprAggregate),

    /// AND a set of expressions
    And(ExprAnd),

    /// Binary expression
    BinaryOp(ExprBinaryOp),

    /// `CASE WHEN .. THEN .. ELSE .. END`
    Case(ExprCase),

    /// References a column of a table participating in the query
    Column(ExprColumn),

    /// Whether a correlated subquery returns any rows
    Exists(ExprExists),

    /// In list
    InList(ExprInList),

    /// The expression is contained by the given subquery
    InSubquery(ExprInSubquery),

    /// Whether an expression is (or is not) null. This is different from a
    /// binary expression because of how databases treat null comparisons.
    IsNull(ExprIsNull),

    /// Pattern match against a string with `%` wildcards
    Like(ExprLike),

    /// Negates a boolean expression
    Not(ExprNot),

    /// OR a set of expressions
    Or(ExprOr),

    /// A literal value
    Value(Value),
}

impl Expr {
    pub fn null() -> Self {
        Self::Value(Value::Null)
    }

    pub fn is_value_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Self::Value(Value::Bool(true)))
    }

    pub fn is_false(&self) -> bool {
        matches!(self, Self::Value(Value::Bool(false)))
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::Aggregate(_))
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` if the expression does not reference any column.
    pub fn is_const(&self) -> bool {
        let mut found = false;
        visit::for_each_expr(self, |expr| {
            if matches!(expr, Expr::Column(_) | Expr::Exists(_) | Expr::InSubquery(_)) {
                found = true;
            }
        });
        !found
    }

    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl Default for Expr {
    fn default() -> Self {
        Self::Value(Value::default())
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aggregate(e) => e.fmt(f),
            Self::And(e) => e.fmt(f),
            Self::BinaryOp(e) => e.fmt(f),
            Self::Case(e) => e.fmt(f),
            Self::Column(e) => e.fmt(f),
            Self::Exists(e) => e.fmt(f),
            Self::InList(e) => e.fmt(f),
            Self::InSubquery(e) => e.fmt(f),
            Self::IsNull(e) => e.fmt(f),
            Self::Like(e) => e.fmt(f),
            Self::Not(e) => e.fmt(f),
            Self::Or(e) => e.fmt(f),
            Self::Value(e) => e.fmt(f),
        }
    }
}
