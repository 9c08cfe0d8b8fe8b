use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    Trans,
    VirtualAccount,
    Phone,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    PaymentCompleted,
    Preparing,
    Shipping,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Wire name, as used in the `status` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::PaymentCompleted => "PAYMENT_COMPLETED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Shipping => "SHIPPING",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateRequest {
    pub orderer_name: String,
    pub shipping_address: String,
    pub product_id: i64,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_coupon_id: Option<i64>,
    pub payment_method: PaymentMethod,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub orderer_name: String,
    #[serde(default)]
    pub shipping_address: String,
    pub product_id: i64,
    #[serde(default)]
    pub product_snapshot_name: Option<String>,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub applied_coupon_id: Option<i64>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    pub status: OrderStatus,
    #[serde(default)]
    pub ordered_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub cancelled_at: Option<NaiveDateTime>,
}

fn one() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_create_request_wire_shape() {
        let request = OrderCreateRequest {
            orderer_name: "Hong".to_string(),
            shipping_address: "Seoul".to_string(),
            product_id: 3,
            quantity: 2,
            applied_coupon_id: None,
            payment_method: PaymentMethod::VirtualAccount,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "ordererName": "Hong",
                "shippingAddress": "Seoul",
                "productId": 3,
                "quantity": 2,
                "paymentMethod": "VIRTUAL_ACCOUNT"
            })
        );
    }

    #[test]
    fn test_order_parses_server_timestamps() {
        let order: Order = serde_json::from_value(json!({
            "id": 10,
            "productId": 3,
            "status": "SHIPPING",
            "orderedAt": "2024-05-01T12:30:00"
        }))
        .unwrap();
        assert_eq!(order.status, OrderStatus::Shipping);
        assert_eq!(order.quantity, 1);
        assert!(order.ordered_at.is_some());
    }
}
