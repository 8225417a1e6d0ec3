use super::{EntityKey, Snapshot};
use crate::{Error, Result};

use entiq_core::{
    schema,
    stmt::{self, Assignments, ExprColumn, TableAlias},
};

/// How a change set was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeMode {
    /// Against the snapshot of a tracked entity: only changed columns.
    Diff,

    /// For an untracked entity: every updatable column.
    Full,
}

/// One column assignment of a change set.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    /// Index of the column in declaration order
    pub column: usize,
    pub name: String,
    pub value: stmt::Value,
}

/// The columns an update writes. Primary-key and logical-delete columns are
/// never part of a change set.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSet {
    key: EntityKey,
    mode: ChangeMode,
    changes: Vec<Change>,
}

impl ChangeSet {
    /// Compare `record`, the current values of an instance of `entity`, with
    /// its snapshot. Without a snapshot every updatable column is included.
    pub(crate) fn compute(
        entity: &schema::Entity,
        record: &stmt::Record,
        snapshot: Option<&Snapshot>,
    ) -> Result<ChangeSet> {
        if record.len() != entity.columns.len() {
            return Err(Error::invalid_statement(format!(
                "record of `{}` has {} fields, expected {}",
                entity.name,
                record.len(),
                entity.columns.len()
            )));
        }

        let key = EntityKey::from_record(entity, record)?;
        let logical_delete = entity.logical_delete_index();

        let mode = match snapshot {
            Some(_) => ChangeMode::Diff,
            None => ChangeMode::Full,
        };

        let changes: Vec<_> = entity
            .columns
            .iter()
            .enumerate()
            .filter(|(index, _)| !entity.is_primary_key(*index) && logical_delete != Some(*index))
            .filter(|(index, _)| match snapshot {
                Some(snapshot) => !snapshot
                    .record()
                    .get(*index)
                    .is_some_and(|before| unchanged(before, &record[*index])),
                None => true,
            })
            .map(|(index, column)| Change {
                column: index,
                name: column.name.clone(),
                value: record[index].clone(),
            })
            .collect();

        tracing::debug!(
            %key,
            mode = ?mode,
            columns = changes.len(),
            "computed change set"
        );

        Ok(ChangeSet { key, mode, changes })
    }

    pub fn key(&self) -> &EntityKey {
        &self.key
    }

    pub fn mode(&self) -> ChangeMode {
        self.mode
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Change> {
        self.changes.iter()
    }

    /// Names of the changed columns, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.changes.iter().map(|change| change.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&stmt::Value> {
        self.changes
            .iter()
            .find(|change| change.name == name)
            .map(|change| &change.value)
    }

    /// The update statement writing this change set, filtered on the
    /// entity's primary key.
    pub(crate) fn to_update(&self, entity: &schema::Entity) -> stmt::Update {
        let mut assignments = Assignments::with_capacity(self.changes.len());
        for change in &self.changes {
            assignments.set(change.column, &change.name, change.value.clone());
        }

        let key_values = match (entity.primary_key.len(), self.key.key()) {
            (1, value) => vec![value.clone()],
            (_, stmt::Value::Record(record)) => record.to_vec(),
            (_, value) => vec![value.clone()],
        };

        let filter = stmt::Expr::and_from_vec(
            entity
                .primary_key
                .iter()
                .zip(key_values)
                .map(|(&index, value)| stmt::Expr::eq(ExprColumn::new(TableAlias::BASE, index), value))
                .collect(),
        );

        stmt::Update {
            entity: entity.name.clone(),
            table_name: entity.table_name.clone(),
            assignments,
            filter,
        }
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

/// Value equality, except that floats compare by bit pattern so a `NaN`
/// read back from its snapshot is not a change.
fn unchanged(before: &stmt::Value, after: &stmt::Value) -> bool {
    use stmt::Value;

    match (before, after) {
        (Value::F64(before), Value::F64(after)) => before.to_bits() == after.to_bits(),
        (Value::List(before), Value::List(after)) => {
            before.len() == after.len() && before.iter().zip(after).all(|(b, a)| unchanged(b, a))
        }
        (Value::Record(before), Value::Record(after)) => {
            before.len() == after.len() && before.iter().zip(after.iter()).all(|(b, a)| unchanged(b, a))
        }
        _ => before == after,
    }
}
