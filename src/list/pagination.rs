use crate::api::Params;
use crate::models::page::PageInfo;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

const PAGE_KEY: &str = "page";
const SIZE_KEY: &str = "size";

/// Zero-based page index and page size, plus the totals last reported by
/// the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    current_page: u32,
    page_size: u32,
    default_size: u32,
    total_elements: u64,
    total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(default_size: u32) -> Self {
        let default_size = default_size.max(1);
        Self {
            current_page: 0,
            page_size: default_size,
            default_size,
            total_elements: 0,
            total_pages: 0,
        }
    }

    /// Start from the `page` and `size` of a location's query string.
    pub fn from_query(query: &Params, default_size: u32) -> Self {
        let mut pagination = Self::new(default_size);
        pagination.sync_from_query(query);
        pagination
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 0
    }

    /// `page` and `size` request parameters.
    pub fn params(&self) -> Params {
        let mut params = Params::new();
        params.insert(PAGE_KEY.to_string(), self.current_page.to_string());
        params.insert(SIZE_KEY.to_string(), self.page_size.to_string());
        params
    }

    /// Move to `page`; pages outside the known range are ignored.
    /// Returns whether the page changed.
    pub fn go_to_page(&mut self, page: u32) -> bool {
        if page >= self.total_pages || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.has_next() && self.go_to_page(self.current_page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.has_prev() && self.go_to_page(self.current_page - 1)
    }

    /// Change the page size and go back to the first page.
    pub fn change_page_size(&mut self, size: u32) -> bool {
        let size = size.max(1);
        let changed = size != self.page_size || self.current_page != 0;
        self.page_size = size;
        self.current_page = 0;
        changed
    }

    /// Back to the first page without touching the size.
    pub fn rewind(&mut self) {
        self.current_page = 0;
    }

    /// Record the server's totals. When the current page is past the last
    /// page it is clamped to the last one and `true` is returned.
    pub fn set_page_data(&mut self, info: PageInfo) -> bool {
        self.total_elements = info.total_elements;
        self.total_pages = info.total_pages;
        if self.total_pages > 0 && self.current_page >= self.total_pages {
            self.current_page = self.total_pages - 1;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.default_size);
    }

    /// Write the state into a query string: page 0 and the default size are
    /// left out.
    pub fn to_query(&self, query: &mut Params) {
        if self.current_page > 0 {
            query.insert(PAGE_KEY.to_string(), self.current_page.to_string());
        } else {
            query.remove(PAGE_KEY);
        }
        if self.page_size != self.default_size {
            query.insert(SIZE_KEY.to_string(), self.page_size.to_string());
        } else {
            query.remove(SIZE_KEY);
        }
    }

    /// Follow a changed query string (back/forward navigation). Unparseable
    /// values fall back to the defaults. Returns whether anything changed.
    pub fn sync_from_query(&mut self, query: &Params) -> bool {
        let page = query
            .get(PAGE_KEY)
            .and_then(|p| p.parse::<u32>().ok())
            .unwrap_or(0);
        let size = query
            .get(SIZE_KEY)
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|s| *s > 0)
            .unwrap_or(self.default_size);
        let changed = page != self.current_page || size != self.page_size;
        self.current_page = page;
        self.page_size = size;
        changed
    }
}
