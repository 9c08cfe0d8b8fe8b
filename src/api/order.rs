use serde::Serialize;
use serde_json::Value;

use crate::gateway::{ApiError, ApiRequest, Gateway, RequestOptions, ServiceClient};
use crate::models::order::{Order, OrderCreateRequest, OrderStatus};
use crate::models::Page;

use super::Params;

#[derive(Clone)]
pub struct OrderApi {
    client: ServiceClient,
}

impl OrderApi {
    pub fn new(gateway: &Gateway) -> Self {
        Self {
            client: gateway.order(),
        }
    }

    pub async fn create(&self, request: &OrderCreateRequest) -> Result<Order, ApiError> {
        self.client
            .fetch(ApiRequest::post("/api/v1/orders").json(request))
            .await
    }

    pub async fn my_orders(
        &self,
        params: &Params,
        options: RequestOptions,
    ) -> Result<Page<Order>, ApiError> {
        self.client
            .fetch(
                ApiRequest::get("/api/v1/orders/my")
                    .queries(params.clone())
                    .options(options),
            )
            .await
    }

    pub async fn get(&self, order_id: i64) -> Result<Order, ApiError> {
        self.client
            .fetch(ApiRequest::get(format!("/api/v1/orders/{}", order_id)))
            .await
    }

    pub async fn cancel(&self, order_id: i64) -> Result<Order, ApiError> {
        self.client
            .fetch(ApiRequest::patch(format!("/api/v1/orders/{}/cancel", order_id)))
            .await
    }

    pub async fn process_payment<P: Serialize + ?Sized>(
        &self,
        order_id: i64,
        payment: &P,
    ) -> Result<Value, ApiError> {
        self.client
            .fetch(ApiRequest::post(format!("/api/v1/orders/{}/payment", order_id)).json(payment))
            .await
    }

    pub async fn admin_orders(
        &self,
        params: &Params,
        options: RequestOptions,
    ) -> Result<Page<Order>, ApiError> {
        self.client
            .fetch(
                ApiRequest::get("/api/v1/admin/orders")
                    .queries(params.clone())
                    .options(options),
            )
            .await
    }

    pub async fn admin_order(&self, order_id: i64) -> Result<Order, ApiError> {
        self.client
            .fetch(ApiRequest::get(format!("/api/v1/admin/orders/{}", order_id)))
            .await
    }

    pub async fn update_status(&self, order_id: i64, status: OrderStatus) -> Result<Order, ApiError> {
        self.client
            .fetch(
                ApiRequest::patch(format!("/api/v1/admin/orders/{}/status", order_id))
                    .query("status", status.as_str()),
            )
            .await
    }

    /// Aggregates are free-form; they are returned as raw JSON.
    pub async fn statistics(&self, params: &Params) -> Result<Value, ApiError> {
        self.client
            .fetch(ApiRequest::get("/api/v1/admin/orders/statistics").queries(params.clone()))
            .await
    }
}
