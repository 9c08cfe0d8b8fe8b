use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    Percent,
    FixedAmount,
}

impl DiscountType {
    /// Human readable discount, e.g. "10%" or "5000 KRW".
    pub fn format(&self, value: i64) -> String {
        match self {
            DiscountType::Percent => format!("{}%", value),
            DiscountType::FixedAmount => format!("{} KRW", value),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CouponTemplate {
    pub id: i64,
    pub title: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    #[serde(default)]
    pub discount_display: Option<String>,
    #[serde(default)]
    pub started_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub finished_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub is_limited: bool,
    #[serde(default)]
    pub total_quantity: Option<i64>,
    #[serde(default)]
    pub issued_count: Option<i64>,
    #[serde(default)]
    pub is_sold_out: bool,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub is_expired: bool,
    #[serde(default)]
    pub is_deleted: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: i64,
    pub template_id: i64,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub is_used: bool,
    #[serde(default)]
    pub used_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub issued_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub can_use: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub discount_type: Option<DiscountType>,
    #[serde(default)]
    pub discount_value: Option<i64>,
    #[serde(default)]
    pub started_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub finished_at: Option<NaiveDateTime>,
}

/// Body of the admin template create/update endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CouponTemplateRequest {
    pub title: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub started_at: NaiveDateTime,
    pub finished_at: NaiveDateTime,
    #[serde(default)]
    pub is_limited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_quantity: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CouponIssueRequest {
    pub template_id: i64,
}
