use super::{ActiveScope, ChangeMode, ChangeSet, EntityKey};
use crate::{db::Handle, Entity, Result};

use entiq_core::{driver::Operation, stmt};

use std::future::Future;

/// An entity instance prepared for a change-set update.
///
/// The change set is computed each time it is asked for, so running
/// [`execute_rows`](Updatable::execute_rows) again after a successful run
/// sees an empty diff.
pub struct Updatable<'a, E: Entity> {
    handle: Handle,
    entity: &'a E,
}

struct Prepared {
    key: EntityKey,
    record: stmt::Record,
    scope: Option<ActiveScope>,
    update: Option<stmt::Update>,
}

impl<'a, E: Entity> Updatable<'a, E> {
    pub(crate) fn new(handle: Handle, entity: &'a E) -> Self {
        Self { handle, entity }
    }

    /// The columns an update would write right now.
    pub fn change_set(&self) -> Result<ChangeSet> {
        let metadata = self.handle.schema().resolve(E::NAME)?;
        let record = self.entity.record();
        let key = EntityKey::from_record(metadata, &record)?;
        let snapshot = self
            .handle
            .tracker()
            .active_scope()
            .and_then(|scope| scope.snapshot(&key));

        ChangeSet::compute(metadata, &record, snapshot.as_ref())
    }

    /// The update statement, or `None` when nothing changed.
    pub fn compile(&self) -> Result<Option<stmt::Update>> {
        Ok(self.prepare()?.update)
    }

    fn prepare(&self) -> Result<Prepared> {
        let metadata = self.handle.schema().resolve(E::NAME)?;
        let change_set = self.change_set()?;

        Ok(Prepared {
            key: change_set.key().clone(),
            record: self.entity.record(),
            scope: match change_set.mode() {
                ChangeMode::Diff => self.handle.tracker().active_scope(),
                ChangeMode::Full => None,
            },
            update: (!change_set.is_empty()).then(|| change_set.to_update(metadata)),
        })
    }

    /// Write the change set and return the affected row count. An empty
    /// change set returns `0` without reaching the driver. On success the
    /// snapshot of a tracked entity is replaced by its current values.
    pub fn execute_rows(&self) -> impl Future<Output = Result<u64>> + Send + 'static {
        let prepared = self.prepare();
        let handle = self.handle.clone();

        async move {
            let Prepared {
                key,
                record,
                scope,
                update,
            } = prepared?;

            let Some(update) = update else {
                return Ok(0);
            };

            let response = handle.exec(Operation::Update(update)).await?;
            let rows = response.rows.into_count();

            if let Some(scope) = scope {
                scope.refresh(&key, record);
            }

            Ok(rows)
        }
    }
}
