use crate::gateway::{ApiError, ApiRequest, Gateway, RequestOptions, ServiceClient};
use crate::models::product::{Product, ProductRequest, ProductSearch};
use crate::models::Page;

use super::Params;

#[derive(Clone)]
pub struct ProductApi {
    client: ServiceClient,
}

impl ProductApi {
    pub fn new(gateway: &Gateway) -> Self {
        Self {
            client: gateway.product(),
        }
    }

    pub async fn list(
        &self,
        params: &Params,
        options: RequestOptions,
    ) -> Result<Page<Product>, ApiError> {
        self.client
            .fetch(
                ApiRequest::get("/api/v1/products")
                    .queries(params.clone())
                    .options(options),
            )
            .await
    }

    pub async fn get(&self, product_id: i64) -> Result<Product, ApiError> {
        self.client
            .fetch(ApiRequest::get(format!("/api/v1/products/{}", product_id)))
            .await
    }

    pub async fn search(
        &self,
        search: &ProductSearch,
        params: &Params,
    ) -> Result<Page<Product>, ApiError> {
        self.client
            .fetch(
                ApiRequest::get("/api/v1/products/search")
                    .queries(search.to_query())
                    .queries(params.clone()),
            )
            .await
    }

    pub async fn create(&self, request: &ProductRequest) -> Result<Product, ApiError> {
        self.client
            .fetch(ApiRequest::post("/api/v1/admin/products").json(request))
            .await
    }

    pub async fn admin_list(
        &self,
        params: &Params,
        options: RequestOptions,
    ) -> Result<Page<Product>, ApiError> {
        self.client
            .fetch(
                ApiRequest::get("/api/v1/admin/products")
                    .queries(params.clone())
                    .options(options),
            )
            .await
    }

    pub async fn update(&self, product_id: i64, request: &ProductRequest) -> Result<Product, ApiError> {
        self.client
            .fetch(ApiRequest::put(format!("/api/v1/admin/products/{}", product_id)).json(request))
            .await
    }

    pub async fn delete(&self, product_id: i64) -> Result<(), ApiError> {
        self.client
            .execute(ApiRequest::delete(format!("/api/v1/admin/products/{}", product_id)))
            .await
            .map(|_| ())
    }
}
