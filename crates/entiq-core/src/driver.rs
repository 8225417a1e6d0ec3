mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::{async_trait, Schema};

use std::{fmt::Debug, sync::Arc};

/// The boundary to physical storage.
///
/// Drivers receive fully compiled operations. They render and execute them
/// and report rows or counts back; the core never interprets or retries a
/// driver error.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Execute a database operation
    async fn exec(&self, schema: &Arc<Schema>, op: Operation) -> crate::Result<Response>;
}
