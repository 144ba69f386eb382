// src/forms/actions.rs - Inputs of one-shot backend jobs

use crate::error::Result;
use crate::forms::{validate, FieldRule, FieldValue, Validated};
use crate::types::EntityId;

const IMPORT_RULES: &[FieldRule] = &[
    FieldRule::required("url", "Product URL is required"),
    FieldRule::required("categoryId", "Select a category"),
];

/// Import a product from a marketplace listing URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportForm {
    pub url: String,
    pub category_id: EntityId,
}

impl ImportForm {
    pub fn new(url: impl Into<String>, category_id: EntityId) -> Self {
        Self {
            url: url.into(),
            category_id,
        }
    }

    pub fn check(&self) -> Result<()> {
        validate(self).into_result()
    }
}

impl Validated for ImportForm {
    fn rules(&self) -> &'static [FieldRule] {
        IMPORT_RULES
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "url" => FieldValue::Text(&self.url),
            _ => FieldValue::Id(self.category_id),
        }
    }
}

const SCRAPE_RULES: &[FieldRule] = &[
    FieldRule::required("trackingNumber", "Tracking number is required"),
    FieldRule::required("orderId", "Order ID is required"),
];

/// Ask the backend to scrape a carrier for one tracking number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeForm {
    pub tracking_number: String,
    pub order_id: String,
}

impl ScrapeForm {
    pub fn new(tracking_number: impl Into<String>, order_id: impl Into<String>) -> Self {
        Self {
            tracking_number: tracking_number.into(),
            order_id: order_id.into(),
        }
    }

    pub fn check(&self) -> Result<()> {
        validate(self).into_result()
    }
}

impl Validated for ScrapeForm {
    fn rules(&self) -> &'static [FieldRule] {
        SCRAPE_RULES
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "trackingNumber" => FieldValue::Text(&self.tracking_number),
            _ => FieldValue::Text(&self.order_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_needs_url_and_category() {
        let errors = validate(&ImportForm::new(" ", 0));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["url", "categoryId"]);
        assert!(ImportForm::new("https://shop.example/item/1", 2).check().is_ok());
    }

    #[test]
    fn test_scrape_needs_both_ids() {
        assert!(ScrapeForm::new("LP123", "").check().is_err());
        assert!(ScrapeForm::new("LP123", "42").check().is_ok());
    }
}
