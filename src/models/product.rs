// src/models/product.rs

use serde::{Deserialize, Serialize};

use super::serde_helpers::null_as_default;
use super::Identified;
use crate::types::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub specifications: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub base_price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sell_price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub discount: f64,
    #[serde(default = "default_currency", deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shipping_cost: f64,
    #[serde(default, deserialize_with = "super::serde_helpers::string_or_number")]
    pub delivery_estimate_days: Option<String>,
    /// ISO date (`YYYY-MM-DD`) or timestamp as sent by the backend
    #[serde(default)]
    pub delivery_min_date: Option<String>,
    #[serde(default)]
    pub delivery_max_date: Option<String>,
    #[serde(default)]
    pub variants: Option<String>,
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default, deserialize_with = "super::serde_helpers::string_or_number")]
    pub external_id: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    /// Category id; `0` means unset
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: EntityId,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            details: None,
            specifications: None,
            keywords: None,
            base_price: 0.0,
            original_price: 0.0,
            sell_price: 0.0,
            discount: 0.0,
            currency: default_currency(),
            shipping_cost: 0.0,
            delivery_estimate_days: None,
            delivery_min_date: None,
            delivery_max_date: None,
            variants: None,
            seller_name: None,
            external_id: None,
            source_url: None,
            category: 0,
        }
    }
}

impl Identified for Product {
    fn entity_id(&self) -> Option<EntityId> {
        self.id
    }
}

/// Body of `POST /products/admin/import`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub url: String,
    pub category_id: EntityId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_sparse_product() {
        let json = r#"{
            "id": 3,
            "name": "Trail Shoe",
            "sellPrice": 59.9,
            "category": 2,
            "deliveryMinDate": null,
            "deliveryEstimateDays": 7,
            "shippingCost": null,
            "someFutureField": true
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, Some(3));
        assert_eq!(product.sell_price, 59.9);
        assert_eq!(product.currency, "USD");
        assert_eq!(product.shipping_cost, 0.0);
        assert_eq!(product.delivery_estimate_days.as_deref(), Some("7"));
        assert!(product.delivery_min_date.is_none());
    }

    #[test]
    fn test_serialize_uses_camel_case_and_nulls() {
        let product = Product {
            name: "Lamp".to_string(),
            sell_price: 10.0,
            category: 1,
            ..Product::default()
        };

        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["sellPrice"], 10.0);
        assert!(value["deliveryMinDate"].is_null());
        assert!(value["deliveryMaxDate"].is_null());
    }
}
