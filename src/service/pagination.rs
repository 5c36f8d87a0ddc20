//! Page arithmetic: clamps a requested page into range and derives offset and metadata.

use crate::schema::Record;
use serde::Serialize;

/// Computed window for one page. Pure metadata; the store is queried with `offset`/`page_size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub page: u64,
    pub total_pages: u64,
    #[serde(skip)]
    pub offset: u64,
    pub page_size: u64,
    pub count: u64,
}

/// One page of records with its metadata.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T = Record> {
    pub items: Vec<T>,
    pub page: u64,
    pub total_pages: u64,
    pub page_size: u64,
    pub count: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, window: PageWindow) -> Self {
        Page {
            items,
            page: window.page,
            total_pages: window.total_pages,
            page_size: window.page_size,
            count: window.count,
        }
    }
}

/// Clamp `requested_page` to `[1, max(total_pages, 1)]` and compute the row offset.
///
/// Panics when `page_size` is zero.
pub fn paginate(requested_page: i64, count: u64, page_size: u64) -> PageWindow {
    assert!(page_size > 0, "page size must be at least 1");
    let total_pages = count.div_ceil(page_size);
    let mut page = if requested_page < 1 { 1 } else { requested_page as u64 };
    if page > total_pages {
        page = total_pages;
    }
    if page < 1 {
        page = 1;
    }
    PageWindow {
        page,
        total_pages,
        offset: (page - 1) * page_size,
        page_size,
        count,
    }
}
