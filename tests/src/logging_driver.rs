use entiq_core::{
    async_trait,
    driver::{Driver, Operation, Response},
    Result, Schema,
};

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

/// A driver that records every operation and answers from a script.
///
/// Responses pushed with [`Script::push`] are returned in order. Once the
/// script is exhausted, queries return no rows and updates report one
/// affected row.
#[derive(Debug, Default)]
pub struct LoggingDriver {
    /// Log of all operations executed through this driver
    /// Using Arc<Mutex> for thread-safe access from tests
    ops_log: Arc<Mutex<Vec<DriverOp>>>,

    script: Arc<Mutex<VecDeque<Result<Response>>>>,
}

#[derive(Debug)]
pub struct DriverOp {
    pub operation: Operation,
    pub response: Option<Response>,
}

/// Handle for queuing driver responses.
#[derive(Debug, Clone)]
pub struct Script {
    responses: Arc<Mutex<VecDeque<Result<Response>>>>,
}

impl LoggingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a handle to access the operations log
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<DriverOp>>> {
        self.ops_log.clone()
    }

    pub fn script(&self) -> Script {
        Script {
            responses: self.script.clone(),
        }
    }
}

impl Script {
    pub fn push(&self, response: Response) -> &Self {
        self.responses
            .lock()
            .expect("Failed to acquire script lock")
            .push_back(Ok(response));
        self
    }

    pub fn push_err(&self, err: entiq_core::Error) -> &Self {
        self.responses
            .lock()
            .expect("Failed to acquire script lock")
            .push_back(Err(err));
        self
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

fn default_response(operation: &Operation) -> Response {
    match operation {
        Operation::Query(_) => Response::empty_values(),
        Operation::Update(_) => Response::count(1),
        Operation::Transaction(_) => Response::count(0),
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    async fn exec(&self, _schema: &Arc<Schema>, operation: Operation) -> Result<Response> {
        let scripted = self
            .script
            .lock()
            .expect("Failed to acquire script lock")
            .pop_front();

        let response = scripted.unwrap_or_else(|| Ok(default_response(&operation)));

        let driver_op = DriverOp {
            operation,
            response: response.as_ref().ok().cloned(),
        };

        self.ops_log
            .lock()
            .expect("Failed to acquire ops log lock")
            .push(driver_op);

        response
    }
}
