use super::QueryState;
use crate::{compile, cx::QueryCx, Error, Result};

use entiq_core::stmt::QueryPlan;

/// The two plans of a page request.
#[derive(Debug, Clone)]
pub struct PagePlan {
    /// Counts every matching row. No ordering and no pagination.
    pub count: QueryPlan,

    /// Loads the rows of the page.
    pub data: QueryPlan,

    pub(crate) page_size: usize,
}

/// One page of a query's results.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    /// Number of rows matching the query, across all pages
    pub total: u64,

    /// Rows of the requested page
    pub items: Vec<T>,
}

impl PagePlan {
    pub(crate) fn compile(
        cx: &QueryCx,
        state: &QueryState,
        page_index: i64,
        page_size: i64,
    ) -> Result<PagePlan> {
        let invalid = || Error::invalid_page_request(page_index, page_size);

        if page_index < 1 || page_size < 1 {
            return Err(invalid());
        }

        let index = u64::try_from(page_index).map_err(|_| invalid())?;
        let size = u64::try_from(page_size).map_err(|_| invalid())?;
        let offset = (index - 1).checked_mul(size).ok_or_else(invalid)?;
        let page_size = usize::try_from(page_size).map_err(|_| invalid())?;

        let count = compile::compile_count(cx, state)?;

        let mut data_state = state.clone();
        data_state.offset = Some(offset);
        data_state.limit = Some(size);
        let data = compile::compile(cx, &data_state, None, None)?;

        Ok(PagePlan {
            count,
            data,
            page_size,
        })
    }
}

impl<T> PageResult<T> {
    pub(crate) fn new(total: u64, items: Vec<T>) -> Self {
        Self { total, items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
