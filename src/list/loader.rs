use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::debug;

use super::Pagination;
use crate::api::Params;
use crate::gateway::{ApiError, RequestOptions};
use crate::models::Page;

pub type FetchFuture<T> = BoxFuture<'static, Result<Page<T>, ApiError>>;
pub type FetchFn<T> = Box<dyn Fn(Params, RequestOptions) -> FetchFuture<T> + Send + Sync>;

/// Loads one page of a list at a time. Failures are never shown to the
/// user from here: the list is emptied and the error returned.
pub struct ListLoader<T> {
    fetch: FetchFn<T>,
    pagination: Pagination,
    items: Vec<T>,
    filters: Params,
    loading: bool,
}

impl<T> ListLoader<T> {
    pub fn new<F, Fut>(pagination: Pagination, fetch: F) -> Self
    where
        F: Fn(Params, RequestOptions) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Page<T>, ApiError>> + Send + 'static,
    {
        Self {
            fetch: Box::new(move |params, options| fetch(params, options).boxed()),
            pagination,
            items: Vec::new(),
            filters: Params::new(),
            loading: false,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn filters(&self) -> &Params {
        &self.filters
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetch the current page with the active filters and `additional`
    /// parameters on top. If the server reports fewer pages than the
    /// current index, the index is clamped and the page fetched again.
    pub async fn load(&mut self, additional: &Params) -> Result<(), ApiError> {
        loop {
            let mut params = self.pagination.params();
            params.extend(self.filters.clone());
            params.extend(additional.clone());

            self.loading = true;
            let result = (self.fetch)(
                params,
                RequestOptions {
                    skip_error_modal: true,
                    ..RequestOptions::default()
                },
            )
            .await;
            self.loading = false;

            match result {
                Ok(page) => {
                    let info = page.info();
                    self.items = page.content;
                    if self.pagination.set_page_data(info) {
                        debug!(
                            "Page index past the last page; reloading page {}",
                            self.pagination.current_page()
                        );
                        continue;
                    }
                    return Ok(());
                }
                Err(e) => {
                    debug!("List load failed: {}", e);
                    self.items.clear();
                    return Err(e);
                }
            }
        }
    }

    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        self.load(&Params::new()).await
    }

    /// Replace the filters and start over from the first page.
    pub async fn apply_filters(&mut self, filters: Params) -> Result<(), ApiError> {
        self.filters = filters;
        self.pagination.rewind();
        self.refresh().await
    }

    pub async fn clear_filters(&mut self) -> Result<(), ApiError> {
        self.apply_filters(Params::new()).await
    }

    /// Move to `page` and load it. Out-of-range pages do nothing.
    pub async fn go_to_page(&mut self, page: u32) -> Result<(), ApiError> {
        if self.pagination.go_to_page(page) {
            return self.refresh().await;
        }
        Ok(())
    }

    pub async fn change_page_size(&mut self, size: u32) -> Result<(), ApiError> {
        if self.pagination.change_page_size(size) {
            return self.refresh().await;
        }
        Ok(())
    }
}
