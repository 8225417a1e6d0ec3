use std::fmt;

/// Identifies one table occurrence inside a query.
///
/// Alias `0` is always the base table. Explicit and implicit joins receive
/// consecutive aliases in first-reference order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableAlias(pub usize);

impl TableAlias {
    pub const BASE: TableAlias = TableAlias(0);

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TableAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

impl fmt::Debug for TableAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
