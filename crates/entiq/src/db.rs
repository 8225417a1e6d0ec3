mod builder;
pub use builder::Builder;

mod transaction;
pub use transaction::Transaction;

use crate::{
    cx::QueryOptions,
    tracking::{ActiveScope, EntityKey, TrackManager, TrackingGuard, Updatable},
    Entity, Error, Query, Result,
};

use entiq_core::{
    driver::{operation, Driver, Operation, Response, Rows},
    stmt, Schema,
};

use std::{fmt, sync::Arc};

/// Shared state between all `Db` clones.
pub(crate) struct Shared {
    pub(crate) schema: Arc<Schema>,
    pub(crate) driver: Arc<dyn Driver>,
    pub(crate) options: QueryOptions,
}

/// A database handle.
///
/// Clones share the schema and the driver. Tracking scopes belong to the
/// thread that entered them, so flows sharing one `Db` never observe each
/// other's snapshots. Each clone also starts with its own scopes.
pub struct Db {
    handle: Handle,
}

/// What queries and updates keep of the `Db` that built them.
#[derive(Clone)]
pub(crate) struct Handle {
    shared: Arc<Shared>,
    tracker: Arc<TrackManager>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub(crate) fn new(shared: Shared) -> Db {
        Db {
            handle: Handle {
                shared: Arc::new(shared),
                tracker: Arc::new(TrackManager::default()),
            },
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        self.handle.schema()
    }

    /// Start a query over `E`.
    pub fn query<E: Entity>(&self) -> Query<E> {
        Query::root(self.handle.clone())
    }

    /// Enter a tracking scope. The scope is left when the guard drops.
    pub fn begin_tracking(&self) -> TrackingGuard {
        TrackingGuard::new(&self.handle.tracker)
    }

    pub fn track_manager(&self) -> &TrackManager {
        &self.handle.tracker
    }

    /// Snapshot an in-memory entity. Fails with `TrackingNotActive` outside
    /// of a tracking scope.
    pub fn add_tracking<E: Entity>(&self, entity: &E) -> Result<()> {
        let metadata = self.schema().resolve(E::NAME)?;
        let record = entity.record();
        let key = EntityKey::from_record(metadata, &record)?;

        self.handle.tracker.capture(key, record, "add_tracking")
    }

    /// Snapshot every entity of `entities`. Fails with `TrackingNotActive`
    /// outside of a tracking scope, before anything is captured.
    pub fn add_tracking_all<'a, E, I>(&self, entities: I) -> Result<()>
    where
        E: Entity + 'a,
        I: IntoIterator<Item = &'a E>,
    {
        let scope = self.handle.tracker.require_active("add_tracking")?;
        let metadata = self.schema().resolve(E::NAME)?;

        for entity in entities {
            let record = entity.record();
            let key = EntityKey::from_record(metadata, &record)?;
            scope.capture(key, record, "add_tracking")?;
        }

        Ok(())
    }

    /// Prepare a change-set update of `entity`.
    pub fn updatable<'a, E: Entity>(&self, entity: &'a E) -> Updatable<'a, E> {
        Updatable::new(self.handle.clone(), entity)
    }

    /// Begin a transaction.
    pub async fn transaction(&self) -> Result<Transaction> {
        self.handle
            .exec(operation::Transaction::Begin.into())
            .await?;
        Ok(Transaction::new(self.handle.clone()))
    }
}

impl Clone for Db {
    fn clone(&self) -> Self {
        Db {
            handle: Handle {
                shared: self.handle.shared.clone(),
                tracker: Arc::new(TrackManager::default()),
            },
        }
    }
}

impl fmt::Debug for Db {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Db")
            .field("entities", &self.schema().entities().len())
            .field("driver", &self.handle.shared.driver)
            .field("tracker", &self.handle.tracker)
            .finish()
    }
}

impl Handle {
    pub(crate) fn schema(&self) -> &Arc<Schema> {
        &self.shared.schema
    }

    pub(crate) fn query_options(&self) -> QueryOptions {
        self.shared.options
    }

    pub(crate) fn tracker(&self) -> &Arc<TrackManager> {
        &self.tracker
    }

    pub(crate) async fn exec(&self, op: Operation) -> Result<Response> {
        self.shared.driver.exec(&self.shared.schema, op).await
    }

    pub(crate) async fn fetch_records(&self, plan: Arc<stmt::QueryPlan>) -> Result<Vec<stmt::Record>> {
        self.exec(Operation::Query(plan)).await?.rows.into_values()
    }

    /// Run a count plan. Drivers may answer with a count or with a single
    /// row holding the count.
    pub(crate) async fn fetch_count(&self, plan: Arc<stmt::QueryPlan>) -> Result<u64> {
        match self.exec(Operation::Query(plan)).await?.rows {
            Rows::Count(count) => Ok(count),
            Rows::Values(records) => {
                let Some(value) = records.into_iter().next().and_then(|record| record.into_iter().next())
                else {
                    return Ok(0);
                };

                let count = value.to_i64()?;
                u64::try_from(count).map_err(|_| {
                    Error::driver_response(format!("driver returned a negative count: {count}"))
                })
            }
        }
    }

    /// Run `plan` and load each row as `E`, snapshotting the rows into
    /// `tracking` when given.
    pub(crate) async fn load_all<E: Entity>(
        &self,
        plan: Arc<stmt::QueryPlan>,
        tracking: Option<ActiveScope>,
    ) -> Result<Vec<E>> {
        let records = self.fetch_records(plan).await?;
        self.load_records(records, tracking)
    }

    /// Load full-width rows as `E`.
    pub(crate) fn load_records<E: Entity>(
        &self,
        records: Vec<stmt::Record>,
        tracking: Option<ActiveScope>,
    ) -> Result<Vec<E>> {
        let metadata = self.schema().resolve(E::NAME)?;

        let mut entities = Vec::with_capacity(records.len());

        for record in records {
            if record.len() != metadata.columns.len() {
                return Err(Error::driver_response(format!(
                    "expected {} columns for `{}`, driver returned {}",
                    metadata.columns.len(),
                    E::NAME,
                    record.len()
                )));
            }

            if let Some(scope) = &tracking {
                let key = EntityKey::from_record(metadata, &record)?;
                scope.capture(key, record.clone(), "as_tracking")?;
            }

            entities.push(E::load(record)?);
        }

        Ok(entities)
    }
}
