//! Result pages and pagination arithmetic.

use serde::Serialize;
use store::Restaurant;

/// Fixed page size for restaurant search results.
pub const PAGE_SIZE: u32 = 10;

/// One page of search results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageEnvelope {
    pub data: Vec<Restaurant>,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
}

impl PageEnvelope {
    /// The envelope returned for a city with no restaurants at all.
    ///
    /// Note the metadata shape differs from a filtered-to-zero result:
    /// here `pages` is 1, while [`PageEnvelope::new`] reports 0 pages
    /// for an empty total.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            page: 1,
            pages: 1,
        }
    }

    pub fn new(data: Vec<Restaurant>, total: u64, page: u32) -> Self {
        Self {
            data,
            total,
            page,
            pages: pages_for(total),
        }
    }
}

fn pages_for(total: u64) -> u32 {
    let pages = total.div_ceil(u64::from(PAGE_SIZE));
    u32::try_from(pages).unwrap_or(u32::MAX)
}
