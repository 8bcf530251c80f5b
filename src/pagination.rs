//! Display helpers for the pagination envelope.

use std::fmt::{Display, Formatter};

use crate::models::Paginated;

/// 1-based inclusive range of the rows currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRange {
    pub start: u64,
    pub end: u64,
    pub total: u64,
}

impl DisplayRange {
    /// `(page-1)*limit+1 .. min(page*limit, total)`. An empty result, or a page past the
    /// last row, shows no rows: `0 to 0 of <total>`.
    pub fn compute(page: u32, limit: u32, total: u64) -> Self {
        if total == 0 || limit == 0 {
            return Self { start: 0, end: 0, total };
        }
        let page = u64::from(page.max(1));
        let limit = u64::from(limit);
        let start = (page - 1) * limit + 1;
        if start > total {
            return Self { start: 0, end: 0, total };
        }
        let end = (page * limit).min(total);
        Self { start, end, total }
    }
}

impl Display for DisplayRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {} of {}", self.start, self.end, self.total)
    }
}

/// Derived paging state for a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub range: DisplayRange,
    pub has_prev: bool,
    pub has_next: bool,
}

impl<T> Paginated<T> {
    pub fn display_range(&self) -> DisplayRange { DisplayRange::compute(self.page, self.limit, self.total) }

    pub fn page_info(&self) -> PageInfo {
        PageInfo { range: self.display_range(), has_prev: self.page > 1, has_next: self.page < self.total_pages }
    }
}
