// src/views.rs

//! Pure derivations over store snapshots: the product filter, the dashboard
//! aggregate and small lookups used when printing lists.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::models::{Category, Order, Product, ProductImage};
use crate::types::EntityId;

/// Product list filter. Every criterion is optional; an unset criterion
/// matches everything and the criteria are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<EntityId>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a filter from raw text inputs. Blank or malformed values
    /// (including `NaN`) leave the criterion unset.
    pub fn from_inputs(search: &str, category: &str, min_price: &str, max_price: &str) -> Self {
        Self::new()
            .with_search(search)
            .with_category(parse_category(category))
            .with_min_price(parse_price(min_price))
            .with_max_price(parse_price(max_price))
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = (!search.is_empty()).then(|| search.to_lowercase());
        self
    }

    pub fn with_category(mut self, category: Option<EntityId>) -> Self {
        self.category = category.filter(|id| *id != 0);
        self
    }

    pub fn with_min_price(mut self, min: Option<f64>) -> Self {
        self.min_price = min.filter(|v| v.is_finite());
        self
    }

    pub fn with_max_price(mut self, max: Option<f64>) -> Self {
        self.max_price = max.filter(|v| v.is_finite());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product)
            && self.matches_category(product)
            && self.matches_price(product)
    }

    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }

    fn matches_search(&self, product: &Product) -> bool {
        let Some(needle) = &self.search else {
            return true;
        };
        product.name.to_lowercase().contains(needle.as_str())
            || product
                .details
                .as_deref()
                .map(|d| d.to_lowercase().contains(needle.as_str()))
                .unwrap_or(false)
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.category.map_or(true, |id| product.category == id)
    }

    // inclusive on both ends
    fn matches_price(&self, product: &Product) -> bool {
        let price = product.sell_price;
        self.min_price.map_or(true, |min| price >= min)
            && self.max_price.map_or(true, |max| price <= max)
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_category(raw: &str) -> Option<EntityId> {
    raw.trim().parse::<EntityId>().ok().filter(|id| *id != 0)
}

/// Dashboard aggregate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub products_count: usize,
    /// Paid plus pending
    pub orders_count: usize,
    pub pending_orders: usize,
    /// Sum of `total` over everything the paid listing returned
    pub total_revenue: f64,
}

impl DashboardStats {
    pub fn compute(products: &[Product], paid: &[Order], pending: &[Order]) -> Self {
        Self {
            products_count: products.len(),
            orders_count: paid.len() + pending.len(),
            pending_orders: pending.len(),
            total_revenue: paid.iter().map(|o| o.total).sum(),
        }
    }

    pub fn formatted_revenue(&self) -> String {
        format!("{:.2}", self.total_revenue)
    }
}

/// Name of a product's category, falling back to the numeric id
pub fn category_name(categories: &[Category], category_id: EntityId) -> String {
    categories
        .iter()
        .find(|c| c.id == Some(category_id))
        .map(|c| c.name.clone())
        .unwrap_or_else(|| category_id.to_string())
}

/// Absolute display URL of every product that has a primary image
pub fn image_url_map(
    config: &ClientConfig,
    images: &[(EntityId, Option<ProductImage>)],
) -> HashMap<EntityId, String> {
    images
        .iter()
        .filter_map(|(id, image)| {
            let path = image.as_ref()?.image_url.as_deref()?;
            (!path.is_empty()).then(|| (*id, config.image_url(path)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;

    fn product(id: EntityId, name: &str, details: Option<&str>, price: f64, category: EntityId) -> Product {
        Product {
            id: Some(id),
            name: name.to_string(),
            details: details.map(str::to_string),
            sell_price: price,
            category,
            ..Product::default()
        }
    }

    fn order(id: EntityId, total: f64, status: OrderStatus) -> Order {
        Order {
            id,
            user_id: 1,
            total,
            created_at: None,
            status,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Trail Shoe", Some("Grippy outsole"), 59.9, 2),
            product(2, "Road Shoe", None, 89.0, 2),
            product(3, "Desk Lamp", Some("Warm light, shoe-box sized"), 19.5, 5),
            product(4, "Sock Pack", Some("Three pairs"), 9.0, 2),
        ]
    }

    fn ids(products: Vec<&Product>) -> Vec<EntityId> {
        products.iter().filter_map(|p| p.id).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_details() {
        let products = catalog();
        let filter = ProductFilter::new().with_search("SHOE");
        assert_eq!(ids(filter.apply(&products)), vec![1, 2, 3]);
    }

    #[test]
    fn test_unset_filter_matches_everything() {
        let products = catalog();
        let filter = ProductFilter::from_inputs("", "", "", "");
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&products).len(), products.len());
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let products = catalog();
        let filter = ProductFilter::from_inputs("", "", "9", "59.9");
        assert_eq!(ids(filter.apply(&products)), vec![1, 3, 4]);
    }

    #[test]
    fn test_malformed_numbers_are_ignored() {
        let filter = ProductFilter::from_inputs("", "abc", "NaN", "ten");
        assert!(filter.is_empty());

        let filter = ProductFilter::from_inputs("", "0", "inf", "");
        assert!(filter.is_empty());
    }

    #[test]
    fn test_criteria_commute() {
        let products = catalog();
        let a = ProductFilter::new()
            .with_search("shoe")
            .with_category(Some(2))
            .with_min_price(Some(50.0))
            .with_max_price(Some(100.0));
        let b = ProductFilter::new()
            .with_max_price(Some(100.0))
            .with_min_price(Some(50.0))
            .with_category(Some(2))
            .with_search("shoe");

        assert_eq!(a, b);
        assert_eq!(ids(a.apply(&products)), vec![1, 2]);

        // sequential application equals the conjunction
        let step: Vec<Product> = ProductFilter::new()
            .with_category(Some(2))
            .apply(&products)
            .into_iter()
            .cloned()
            .collect();
        let step = ProductFilter::new().with_search("shoe").with_min_price(Some(50.0)).apply(&step);
        assert_eq!(ids(step), vec![1, 2]);
    }

    #[test]
    fn test_dashboard_stats() {
        let products = vec![product(1, "p1", None, 1.0, 1), product(2, "p2", None, 2.0, 1)];
        let paid = vec![order(1, 10.0, OrderStatus::Paid), order(2, 5.0, OrderStatus::Paid)];
        let pending = vec![order(3, 99.0, OrderStatus::Pending)];

        let stats = DashboardStats::compute(&products, &paid, &pending);
        assert_eq!(stats.products_count, 2);
        assert_eq!(stats.orders_count, 3);
        assert_eq!(stats.pending_orders, 1);
        assert_eq!(stats.formatted_revenue(), "15.00");
    }

    #[test]
    fn test_category_name_falls_back_to_id() {
        let categories = vec![Category {
            id: Some(2),
            name: "Shoes".to_string(),
            logo: String::new(),
        }];
        assert_eq!(category_name(&categories, 2), "Shoes");
        assert_eq!(category_name(&categories, 9), "9");
    }

    #[test]
    fn test_image_url_map_skips_missing() {
        let config = ClientConfig::default();
        let images = vec![
            (1, Some(ProductImage { image_url: Some("/uploads/products/a.png".to_string()) })),
            (2, Some(ProductImage::default())),
            (3, None),
        ];

        let map = image_url_map(&config, &images);
        assert_eq!(map.len(), 1);
        assert_eq!(map[&1], "http://localhost:3001/uploads/products/a.png");
    }

    #[test]
    fn test_search_text_is_matched_verbatim() {
        let products = catalog();

        let trailing = ProductFilter::from_inputs("shoe ", "", "", "");
        assert!(trailing.apply(&products).is_empty());

        let blank = ProductFilter::from_inputs(" ", "", "", "");
        assert!(!blank.is_empty());
        assert_eq!(blank.apply(&products).len(), 4);

        assert!(ProductFilter::from_inputs("", "", "", "").is_empty());
    }

    #[test]
    fn test_revenue_sums_the_paid_listing_as_returned() {
        let paid = vec![order(1, 10.0, OrderStatus::Paid), order(2, 7.5, OrderStatus::Processing)];
        let stats = DashboardStats::compute(&[], &paid, &[]);
        assert_eq!(stats.total_revenue, 17.5);
        assert_eq!(stats.orders_count, 2);
    }
}
