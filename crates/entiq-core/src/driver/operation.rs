mod transaction;
pub use transaction::Transaction;

use crate::stmt::{QueryPlan, Update};

use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum Operation {
    /// Run a compiled query
    Query(Arc<QueryPlan>),

    /// Update a record by the primary key
    Update(Update),

    /// Execute a transaction lifecycle op
    Transaction(Transaction),
}

impl Operation {
    pub fn as_query(&self) -> Option<&QueryPlan> {
        match self {
            Operation::Query(plan) => Some(plan),
            _ => None,
        }
    }

    pub fn as_update(&self) -> Option<&Update> {
        match self {
            Operation::Update(update) => Some(update),
            _ => None,
        }
    }

    pub fn is_transaction(&self) -> bool {
        matches!(self, Operation::Transaction(_))
    }
}

impl From<Arc<QueryPlan>> for Operation {
    fn from(value: Arc<QueryPlan>) -> Operation {
        Operation::Query(value)
    }
}

impl From<QueryPlan> for Operation {
    fn from(value: QueryPlan) -> Operation {
        Operation::Query(Arc::new(value))
    }
}

impl From<Update> for Operation {
    fn from(value: Update) -> Operation {
        Operation::Update(value)
    }
}
