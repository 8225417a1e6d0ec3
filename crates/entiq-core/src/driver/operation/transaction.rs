use super::Operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    /// Start a transaction
    Begin,

    /// Commit a transaction
    Commit,

    /// Rollback a transaction
    Rollback,
}

impl From<Transaction> for Operation {
    fn from(value: Transaction) -> Operation {
        Operation::Transaction(value)
    }
}
