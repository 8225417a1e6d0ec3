
pub use exec_log::ExecLog;

mod logging_driver;
pub use logging_driver::{DriverOp, LoggingDriver, Script};

pub mod models;


pub use entiq;

use entiq::{db, Db};

/// A database handle over a [`LoggingDriver`], with every fixture entity
/// registered.
pub struct TestDb {
    pub db: Db,

    /// Operations the driver received
    pub log: ExecLog,

    /// Responses the driver will return
    pub script: Script,
}

impl TestDb {
    pub fn new() -> TestDb {
        TestDb::with(|_| {})
    }

    /// Build with additional settings applied to the builder.
    pub fn with(configure: impl FnOnce(&mut db::Builder)) -> TestDb {
        init_tracing();

        let mut builder = models!(
            models::Blog,
            models::Topic,
            models::Comment,
            models::Tag,
            models::BlogTag,
            models::SysUser
        );
        configure(&mut builder);

        let driver = LoggingDriver::new();
        let log = ExecLog::new(driver.ops_log_handle());
        let script = driver.script();

        let db = builder.build(driver).expect("fixture schema is valid");

        TestDb { db, log, script }
    }
}

impl Default for TestDb {
    fn default() -> Self {
        TestDb::new()
    }
}

/// Route `tracing` output to the test harness. Set `RUST_LOG` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
