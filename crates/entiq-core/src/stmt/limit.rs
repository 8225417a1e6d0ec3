/// Row window applied after ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limit {
    /// Number of rows to skip
    pub offset: Option<u64>,

    /// Maximum number of rows to return
    pub limit: Option<u64>,
}

impl Limit {
    pub fn new(offset: Option<u64>, limit: Option<u64>) -> Self {
        Self { offset, limit }
    }

    /// The window for 1-based page `index` of `size` rows.
    pub fn page(index: u64, size: u64) -> Self {
        Self {
            offset: Some((index - 1) * size),
            limit: Some(size),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.offset.is_none() && self.limit.is_none()
    }
}
