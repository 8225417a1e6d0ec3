use crate::recorder::{self, Slot};

use entiq_core::stmt;

/// A recorded boolean statement.
///
/// Combining predicates with [`and`](Predicate::and) or
/// [`or`](Predicate::or) absorbs both operand statements into a single
/// statement placed where the left operand was recorded.
pub struct Predicate {
    slot: Option<Slot>,
    expr: stmt::Expr,
}

/// What a predicate closure may return: nothing, or the predicate it built
/// last.
pub trait PredicateOutput {
    fn finish(self);
}

impl Predicate {
    pub(crate) fn record(expr: impl Into<stmt::Expr>) -> Predicate {
        let expr = expr.into();
        Predicate {
            slot: recorder::record_predicate(expr.clone()),
            expr,
        }
    }

    pub fn and(self, rhs: Predicate) -> Predicate {
        self.combine(rhs, stmt::Expr::and)
    }

    pub fn or(self, rhs: Predicate) -> Predicate {
        self.combine(rhs, stmt::Expr::or)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Predicate {
        let expr = stmt::Expr::not(self.expr);

        match self.slot {
            Some(slot) => {
                recorder::replace(slot, expr.clone());
                Predicate {
                    slot: Some(slot),
                    expr,
                }
            }
            None => Predicate::record(expr),
        }
    }

    fn combine(self, rhs: Predicate, f: fn(stmt::Expr, stmt::Expr) -> stmt::Expr) -> Predicate {
        if let Some(slot) = rhs.slot {
            recorder::take(slot);
        }

        let expr = f(self.expr, rhs.expr);

        match self.slot {
            Some(slot) => {
                recorder::replace(slot, expr.clone());
                Predicate {
                    slot: Some(slot),
                    expr,
                }
            }
            None => Predicate::record(expr),
        }
    }

    pub fn expr(&self) -> &stmt::Expr {
        &self.expr
    }

    /// Remove the statement from the clause and return its expression, for
    /// use as an operand of another expression.
    pub(crate) fn detach(self) -> stmt::Expr {
        if let Some(slot) = self.slot {
            recorder::take(slot);
        }
        self.expr
    }
}

impl PredicateOutput for () {
    fn finish(self) {}
}

impl PredicateOutput for Predicate {
    fn finish(self) {}
}
