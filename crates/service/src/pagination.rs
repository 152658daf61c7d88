//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct, helpers to normalize inputs and
//! the `Page` envelope returned by list operations.

use serde::{Deserialize, Serialize};

/// Pagination parameters
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Clamp to sane defaults and convert to `u64`
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as u64, per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

/// One page of results plus the total row count.
#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, opts: Pagination, total: u64) -> Self {
        let (idx, per_page) = opts.normalize();
        Self { items, page: idx as u32 + 1, per_page: per_page as u32, total }
    }

    /// Slice an already-filtered list.
    pub fn from_vec(all: Vec<T>, opts: Pagination) -> Self {
        let (idx, per_page) = opts.normalize();
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip((idx * per_page) as usize)
            .take(per_page as usize)
            .collect();
        Self::new(items, opts, total)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page { items: self.items.into_iter().map(f).collect(), page: self.page, per_page: self.per_page, total: self.total }
    }
}
