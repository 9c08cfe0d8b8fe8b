use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: i64,
    pub image_url: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub seller_id: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

/// Body of the admin create/update endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductRequest {
    pub name: String,
    pub price: f64,
}

/// Optional filters of the product search endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

impl ProductSearch {
    /// Query pairs for the filters that are set.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(keyword) = &self.keyword {
            query.push(("keyword".to_string(), keyword.clone()));
        }
        if let Some(seller_id) = &self.seller_id {
            query.push(("sellerId".to_string(), seller_id.clone()));
        }
        if let Some(min) = self.min_price {
            query.push(("minPrice".to_string(), min.to_string()));
        }
        if let Some(max) = self.max_price {
            query.push(("maxPrice".to_string(), max.to_string()));
        }
        query
    }
}
