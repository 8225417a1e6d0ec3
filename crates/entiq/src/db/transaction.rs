use super::Handle;
use crate::Result;

use entiq_core::driver::operation::Transaction as TransactionOp;

/// An open transaction. Finish it with [`commit`](Transaction::commit) or
/// [`rollback`](Transaction::rollback).
pub struct Transaction {
    handle: Handle,
    finished: bool,
}

impl Transaction {
    pub(super) fn new(handle: Handle) -> Transaction {
        Transaction {
            handle,
            finished: false,
        }
    }

    pub async fn commit(mut self) -> Result<()> {
        self.finished = true;
        self.handle.exec(TransactionOp::Commit.into()).await?;
        Ok(())
    }

    pub async fn rollback(mut self) -> Result<()> {
        self.finished = true;
        self.handle.exec(TransactionOp::Rollback.into()).await?;
        Ok(())
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!("transaction dropped without commit or rollback");
        }
    }
}
