//! Change tracking: snapshots of loaded entities, diffed on update.

mod change_set;
pub use change_set::{Change, ChangeMode, ChangeSet};

mod updatable;
pub use updatable::Updatable;

use crate::{Error, Result};

use entiq_core::{schema, stmt};

use std::{
    cell::RefCell,
    collections::HashMap,
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
};

/// The identity of an entity instance: its entity name and primary key.
/// Composite keys are a record of the key columns in key order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityKey {
    entity: String,
    key: stmt::Value,
}

/// The column values of an entity captured when it was tracked.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    key: EntityKey,
    record: stmt::Record,
}

/// Tracking scopes of one `Db` handle.
///
/// Scopes belong to the thread that entered them: two threads using the same
/// handle each see their own depth and snapshots. `begin` increments the
/// depth and `release` decrements it. Snapshots live until the depth returns
/// to zero.
pub struct TrackManager {
    id: u64,
}

type Scope = Arc<Mutex<TrackState>>;

#[derive(Default)]
struct TrackState {
    depth: usize,
    snapshots: HashMap<EntityKey, Snapshot>,
}

/// The scope a terminal operation was started in. Snapshots taken by its
/// future land here even if the future resumes on another thread.
#[derive(Clone)]
pub(crate) struct ActiveScope {
    state: Scope,
}

/// Releases one level of a tracking scope when dropped.
#[must_use = "the tracking scope ends when the guard is dropped"]
pub struct TrackingGuard {
    manager: u64,
    scope: Scope,
}

static NEXT_MANAGER_ID: AtomicU64 = AtomicU64::new(0);

thread_local! {
    /// Scopes entered on this thread, by manager.
    static SCOPES: RefCell<HashMap<u64, Scope>> = RefCell::new(HashMap::new());
}

fn lock(scope: &Scope) -> MutexGuard<'_, TrackState> {
    scope.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Leave one level of `scope`. At depth zero the snapshots are dropped and
/// the scope is detached from this thread.
fn release_scope(manager: u64, scope: &Scope) {
    {
        let mut state = lock(scope);

        if state.depth == 0 {
            tracing::warn!("release called on an inactive tracking scope");
            return;
        }

        state.depth -= 1;

        if state.depth > 0 {
            return;
        }

        tracing::trace!(snapshots = state.snapshots.len(), "tracking scope closed");
        state.snapshots.clear();
    }

    // The thread-local may already be gone during thread teardown.
    let _ = SCOPES.try_with(|scopes| {
        let mut scopes = scopes.borrow_mut();
        if scopes.get(&manager).is_some_and(|current| Arc::ptr_eq(current, scope)) {
            scopes.remove(&manager);
        }
    });
}

impl EntityKey {
    pub fn new(entity: impl Into<String>, key: impl Into<stmt::Value>) -> EntityKey {
        EntityKey {
            entity: entity.into(),
            key: key.into(),
        }
    }

    /// The key of the entity whose column values are `record`.
    pub fn from_record(entity: &schema::Entity, record: &stmt::Record) -> Result<EntityKey> {
        let mut fields = Vec::with_capacity(entity.primary_key.len());

        for &index in &entity.primary_key {
            let value = record.get(index).cloned().ok_or_else(|| {
                Error::invalid_statement(format!(
                    "record of `{}` has {} fields; the primary key needs field {index}",
                    entity.name,
                    record.len()
                ))
            })?;
            fields.push(value);
        }

        let key = match <[stmt::Value; 1]>::try_from(fields) {
            Ok([value]) => value,
            Err(fields) => stmt::Value::record_from_vec(fields),
        };

        Ok(EntityKey::new(&entity.name, key))
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn key(&self) -> &stmt::Value {
        &self.key
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.entity, self.key)
    }
}

impl Snapshot {
    pub fn key(&self) -> &EntityKey {
        &self.key
    }

    pub fn record(&self) -> &stmt::Record {
        &self.record
    }
}

impl TrackManager {
    pub fn new() -> TrackManager {
        TrackManager {
            id: NEXT_MANAGER_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// The scope of this manager entered on the current thread.
    fn current(&self) -> Option<Scope> {
        SCOPES.with(|scopes| scopes.borrow().get(&self.id).cloned())
    }

    fn enter(&self) -> Scope {
        let scope = SCOPES.with(|scopes| scopes.borrow_mut().entry(self.id).or_default().clone());

        let mut state = lock(&scope);
        state.depth += 1;
        tracing::trace!(depth = state.depth, "tracking scope entered");
        drop(state);

        scope
    }

    /// Enter one level of tracking scope on the current thread.
    pub fn begin(&self) {
        self.enter();
    }

    /// Leave one level of tracking scope. Leaving the outermost level drops
    /// every snapshot. Releasing an inactive scope does nothing.
    pub fn release(&self) {
        match self.current() {
            Some(scope) => release_scope(self.id, &scope),
            None => tracing::warn!("release called on an inactive tracking scope"),
        }
    }

    pub fn is_active(&self) -> bool {
        self.depth() > 0
    }

    pub fn depth(&self) -> usize {
        match self.current() {
            Some(scope) => {
                let depth = lock(&scope).depth;
                depth
            }
            None => 0,
        }
    }

    /// The active scope of the current thread, if any.
    pub(crate) fn active_scope(&self) -> Option<ActiveScope> {
        self.current()
            .filter(|scope| lock(scope).depth > 0)
            .map(|state| ActiveScope { state })
    }

    /// Like [`active_scope`](TrackManager::active_scope), failing with
    /// `TrackingNotActive` on behalf of `operation`.
    pub(crate) fn require_active(&self, operation: &str) -> Result<ActiveScope> {
        self.active_scope()
            .ok_or_else(|| Error::tracking_not_active(operation))
    }

    /// Capture `record` as the snapshot of `key`, replacing any earlier one.
    pub(crate) fn capture(&self, key: EntityKey, record: stmt::Record, operation: &str) -> Result<()> {
        self.require_active(operation)?.capture(key, record, operation)
    }

    pub fn snapshot(&self, key: &EntityKey) -> Option<Snapshot> {
        let scope = self.current()?;
        let snapshot = lock(&scope).snapshots.get(key).cloned();
        snapshot
    }

    pub fn is_tracked(&self, key: &EntityKey) -> bool {
        self.snapshot(key).is_some()
    }
}

impl Default for TrackManager {
    fn default() -> Self {
        TrackManager::new()
    }
}

impl fmt::Debug for TrackManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackManager")
            .field("id", &self.id)
            .field("depth", &self.depth())
            .finish()
    }
}

impl ActiveScope {
    pub(crate) fn capture(&self, key: EntityKey, record: stmt::Record, operation: &str) -> Result<()> {
        let mut state = lock(&self.state);

        // The scope may have been closed while the query was running.
        if state.depth == 0 {
            return Err(Error::tracking_not_active(operation));
        }

        tracing::trace!(%key, "captured snapshot");
        state.snapshots.insert(key.clone(), Snapshot { key, record });
        Ok(())
    }

    /// Replace the snapshot of `key` if it is tracked.
    pub(crate) fn refresh(&self, key: &EntityKey, record: stmt::Record) {
        let mut state = lock(&self.state);

        if let Some(snapshot) = state.snapshots.get_mut(key) {
            tracing::trace!(%key, "refreshed snapshot");
            snapshot.record = record;
        }
    }

    pub(crate) fn snapshot(&self, key: &EntityKey) -> Option<Snapshot> {
        lock(&self.state).snapshots.get(key).cloned()
    }
}

impl TrackingGuard {
    pub(crate) fn new(manager: &TrackManager) -> TrackingGuard {
        TrackingGuard {
            manager: manager.id,
            scope: manager.enter(),
        }
    }

    /// Depth of the scope this guard belongs to.
    pub fn depth(&self) -> usize {
        lock(&self.scope).depth
    }
}

impl Drop for TrackingGuard {
    fn drop(&mut self) {
        release_scope(self.manager, &self.scope);
    }
}
