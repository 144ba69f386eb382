// src/forms/product.rs

use crate::config::ClientConfig;
use crate::forms::{optional_text, EntityForm, FieldRule, FieldValue, FormMode, Validated};
use crate::models::Product;
use crate::types::EntityId;

const RULES: &[FieldRule] = &[
    FieldRule::required("name", "Name is required"),
    FieldRule::required("sellPrice", "Sell price is required"),
    FieldRule::required("category", "Category is required"),
];

/// Editable copy of a product. Text fields hold raw input; dates are
/// `YYYY-MM-DD` or empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub id: Option<EntityId>,
    pub name: String,
    pub details: String,
    pub specifications: String,
    pub keywords: String,
    pub base_price: f64,
    pub original_price: f64,
    pub sell_price: Option<f64>,
    pub discount: f64,
    pub currency: String,
    pub shipping_cost: f64,
    pub delivery_estimate_days: String,
    pub delivery_min_date: String,
    pub delivery_max_date: String,
    pub variants: String,
    pub seller_name: String,
    pub external_id: String,
    pub source_url: String,
    pub category: EntityId,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::edit(&Product::default())
    }
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(product: &Product) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            id: product.id,
            name: product.name.clone(),
            details: text(&product.details),
            specifications: text(&product.specifications),
            keywords: text(&product.keywords),
            base_price: product.base_price,
            original_price: product.original_price,
            sell_price: (product.id.is_some() || product.sell_price != 0.0)
                .then_some(product.sell_price),
            discount: product.discount,
            currency: product.currency.clone(),
            shipping_cost: product.shipping_cost,
            delivery_estimate_days: text(&product.delivery_estimate_days),
            delivery_min_date: date_part(product.delivery_min_date.as_deref()),
            delivery_max_date: date_part(product.delivery_max_date.as_deref()),
            variants: text(&product.variants),
            seller_name: text(&product.seller_name),
            external_id: text(&product.external_id),
            source_url: text(&product.source_url),
            category: product.category,
        }
    }
}

/// `2024-05-01T00:00:00Z` -> `2024-05-01`
fn date_part(value: Option<&str>) -> String {
    value
        .map(|v| v.split('T').next().unwrap_or_default().trim().to_string())
        .unwrap_or_default()
}

impl Validated for ProductForm {
    fn rules(&self) -> &'static [FieldRule] {
        RULES
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(&self.name),
            "sellPrice" => FieldValue::Number(self.sell_price),
            _ => FieldValue::Id(self.category),
        }
    }

    fn mode(&self) -> FormMode {
        FormMode::for_id(self.id)
    }
}

impl EntityForm for ProductForm {
    type Entity = Product;

    fn build(&self, _image_path: Option<String>, _config: &ClientConfig) -> Product {
        let currency = optional_text(&self.currency).unwrap_or_else(|| Product::default().currency);
        Product {
            id: self.id,
            name: self.name.trim().to_string(),
            details: optional_text(&self.details),
            specifications: optional_text(&self.specifications),
            keywords: optional_text(&self.keywords),
            base_price: self.base_price,
            original_price: self.original_price,
            sell_price: self.sell_price.unwrap_or_default(),
            discount: self.discount,
            currency,
            shipping_cost: self.shipping_cost,
            delivery_estimate_days: optional_text(&self.delivery_estimate_days),
            delivery_min_date: optional_text(&self.delivery_min_date),
            delivery_max_date: optional_text(&self.delivery_max_date),
            variants: optional_text(&self.variants),
            seller_name: optional_text(&self.seller_name),
            external_id: optional_text(&self.external_id),
            source_url: optional_text(&self.source_url),
            category: self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::validate;

    #[test]
    fn test_required_fields() {
        let errors = validate(&ProductForm::new());
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["name", "sellPrice", "category"]
        );

        let form = ProductForm {
            sell_price: Some(f64::NAN),
            ..ProductForm::new()
        };
        assert!(validate(&form).get("sellPrice").is_some());
    }

    #[test]
    fn test_dates_are_truncated_on_load() {
        let product = Product {
            id: Some(9),
            delivery_min_date: Some("2024-05-01T00:00:00Z".to_string()),
            delivery_max_date: Some("2024-05-09".to_string()),
            ..Product::default()
        };
        let form = ProductForm::edit(&product);
        assert_eq!(form.delivery_min_date, "2024-05-01");
        assert_eq!(form.delivery_max_date, "2024-05-09");
        assert_eq!(form.mode(), FormMode::Update);
    }

    #[test]
    fn test_empty_optionals_submit_as_null_and_reload_the_same() {
        let form = ProductForm {
            name: "Lamp".to_string(),
            sell_price: Some(12.0),
            category: 3,
            ..ProductForm::new()
        };
        assert!(validate(&form).is_empty());

        let sent = form.build(None, &ClientConfig::default());
        let wire = serde_json::to_value(&sent).unwrap();
        assert!(wire["deliveryMinDate"].is_null());
        assert!(wire["deliveryMaxDate"].is_null());
        assert!(wire["details"].is_null());

        // backend echoes the stored record
        let reloaded: Product = serde_json::from_value(wire).unwrap();
        assert_eq!(reloaded, sent);

        let mut again = ProductForm::edit(&reloaded);
        again.id = None;
        assert_eq!(again, form);
    }
}
