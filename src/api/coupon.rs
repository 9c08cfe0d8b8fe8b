use tracing::debug;

use crate::gateway::{ApiError, ApiRequest, Gateway, RequestOptions, ServiceClient};
use crate::models::coupon::{Coupon, CouponIssueRequest, CouponTemplate, CouponTemplateRequest};
use crate::models::Page;

use super::Params;

#[derive(Clone)]
pub struct CouponApi {
    client: ServiceClient,
}

impl CouponApi {
    pub fn new(gateway: &Gateway) -> Self {
        Self {
            client: gateway.coupon(),
        }
    }

    pub async fn templates(&self) -> Result<Vec<CouponTemplate>, ApiError> {
        self.client
            .fetch(ApiRequest::get("/api/v1/coupons/templates"))
            .await
    }

    /// Issue a coupon from a template. A missing template id is rejected
    /// before anything is sent.
    pub async fn issue(&self, template_id: i64) -> Result<Coupon, ApiError> {
        if template_id <= 0 {
            return Err(ApiError::Request("templateId is required".to_string()));
        }
        debug!("Issuing coupon from template {}", template_id);
        self.client
            .fetch(ApiRequest::post("/api/v1/coupons/issue").json(&CouponIssueRequest { template_id }))
            .await
    }

    pub async fn my_coupons(
        &self,
        params: &Params,
        options: RequestOptions,
    ) -> Result<Page<Coupon>, ApiError> {
        self.client
            .fetch(
                ApiRequest::get("/api/v1/coupons/my")
                    .queries(params.clone())
                    .options(options),
            )
            .await
    }

    pub async fn my_available(&self) -> Result<Vec<Coupon>, ApiError> {
        self.client
            .fetch(ApiRequest::get("/api/v1/coupons/my/available"))
            .await
    }

    pub async fn use_coupon(&self, coupon_id: i64) -> Result<Coupon, ApiError> {
        self.client
            .fetch(ApiRequest::patch(format!("/api/v1/coupons/{}/use", coupon_id)))
            .await
    }

    pub async fn get(&self, coupon_id: i64) -> Result<Coupon, ApiError> {
        self.client
            .fetch(ApiRequest::get(format!("/api/v1/coupons/{}", coupon_id)))
            .await
    }

    pub async fn create_template(
        &self,
        request: &CouponTemplateRequest,
    ) -> Result<CouponTemplate, ApiError> {
        self.client
            .fetch(ApiRequest::post("/api/v1/admin/coupons/templates").json(request))
            .await
    }

    pub async fn admin_templates(
        &self,
        params: &Params,
        options: RequestOptions,
    ) -> Result<Page<CouponTemplate>, ApiError> {
        self.client
            .fetch(
                ApiRequest::get("/api/v1/admin/coupons/templates")
                    .queries(params.clone())
                    .options(options),
            )
            .await
    }

    pub async fn admin_template(&self, template_id: i64) -> Result<CouponTemplate, ApiError> {
        self.client
            .fetch(ApiRequest::get(format!(
                "/api/v1/admin/coupons/templates/{}",
                template_id
            )))
            .await
    }

    pub async fn update_template(
        &self,
        template_id: i64,
        request: &CouponTemplateRequest,
    ) -> Result<CouponTemplate, ApiError> {
        self.client
            .fetch(
                ApiRequest::put(format!("/api/v1/admin/coupons/templates/{}", template_id))
                    .json(request),
            )
            .await
    }

    pub async fn delete_template(&self, template_id: i64) -> Result<(), ApiError> {
        self.client
            .execute(ApiRequest::delete(format!(
                "/api/v1/admin/coupons/templates/{}",
                template_id
            )))
            .await
            .map(|_| ())
    }

    pub async fn admin_issued(
        &self,
        params: &Params,
        options: RequestOptions,
    ) -> Result<Page<Coupon>, ApiError> {
        self.client
            .fetch(
                ApiRequest::get("/api/v1/admin/coupons/issued")
                    .queries(params.clone())
                    .options(options),
            )
            .await
    }
}
