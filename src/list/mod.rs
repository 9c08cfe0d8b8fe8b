//! Paged list state shared by the list views.

pub mod loader;
pub mod pagination;

pub use loader::{FetchFn, FetchFuture, ListLoader};
pub use pagination::{Pagination, DEFAULT_PAGE_SIZE};
