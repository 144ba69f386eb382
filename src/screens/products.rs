// src/screens/products.rs

use std::collections::HashMap;

use futures::future::join_all;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::forms::ImportForm;
use crate::models::{Category, Product};
use crate::screens::{ScreenContext, ScreenState};
use crate::store::RemoteCollectionStore;
use crate::types::EntityId;
use crate::views::{category_name, image_url_map, ProductFilter};

/// One line of the product table
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub product: Product,
    pub category_name: String,
    pub image_url: Option<String>,
}

#[derive(Debug)]
pub struct ProductsScreen {
    state: ScreenState,
    products: RemoteCollectionStore<Product>,
    categories: RemoteCollectionStore<Category>,
    images: RwLock<HashMap<EntityId, String>>,
    filter: RwLock<ProductFilter>,
}

impl ProductsScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        let notifier = ctx.notifier.clone();
        Self {
            state: ScreenState::new("products", ctx),
            products: RemoteCollectionStore::new("products", notifier.clone()),
            categories: RemoteCollectionStore::new("categories", notifier),
            images: RwLock::new(HashMap::new()),
            filter: RwLock::new(ProductFilter::default()),
        }
    }

    pub async fn load(&self) -> Result<()> {
        let _busy = self.state.begin()?;
        self.refresh().await
    }

    /// Products and categories together, then one primary-image lookup per product
    async fn refresh(&self) -> Result<()> {
        let client = self.state.client();
        let (products_api, categories_api) = (client.products(), client.categories());

        let (products, _) = futures::try_join!(
            self.products.load(&products_api),
            self.categories.load(&categories_api)
        )?;

        let lookups = products.iter().filter_map(|p| p.id).map(|id| {
            let api = products_api.clone();
            async move {
                match api.primary_image(id).await {
                    Ok(image) => (id, Some(image)),
                    Err(e) => {
                        tracing::debug!(product = id, error = %e, "no primary image");
                        (id, None)
                    }
                }
            }
        });
        let images = join_all(lookups).await;

        *self.images.write().await = image_url_map(client.config(), &images);
        Ok(())
    }

    pub async fn set_filter(&self, filter: ProductFilter) {
        *self.filter.write().await = filter;
    }

    pub async fn filter(&self) -> ProductFilter {
        self.filter.read().await.clone()
    }

    /// Current snapshot through the current filter
    pub async fn rows(&self) -> Vec<ProductRow> {
        let filter = self.filter.read().await.clone();
        let categories = self.categories.snapshot().await;
        let images = self.images.read().await;

        self.products
            .snapshot()
            .await
            .into_iter()
            .filter(|p| filter.matches(p))
            .map(|product| ProductRow {
                category_name: category_name(&categories, product.category),
                image_url: product.id.and_then(|id| images.get(&id).cloned()),
                product,
            })
            .collect()
    }

    pub async fn categories(&self) -> Vec<Category> {
        self.categories.snapshot().await
    }

    pub async fn delete(&self, id: EntityId) -> Result<()> {
        let _busy = self.state.begin()?;
        let result = self.state.client().products().delete(id).await;
        self.state
            .report(result, "Product deleted", "Failed to delete product")?;
        self.refresh().await
    }

    pub async fn import(&self, form: &ImportForm) -> Result<()> {
        let _busy = self.state.begin()?;
        form.check()?;

        let result = self
            .state
            .client()
            .products()
            .import(&form.url, form.category_id)
            .await;
        self.state.report(
            result,
            "Product imported successfully",
            "Import failed. Please check the URL and try again.",
        )?;
        self.refresh().await
    }

    /// Starts the backend re-scrape job; nothing to reload until it finishes
    pub async fn trigger_scrape_update(&self) -> Result<()> {
        let _busy = self.state.begin()?;
        let result = self.state.client().products().trigger_scrape_update().await;
        self.state.report(
            result,
            "Async update started successfully. This may take a while.",
            "Failed to start async update",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notifier;
    use crate::platform::HttpMethod;
    use crate::testing::MockNetwork;
    use serde_json::json;

    fn seeded() -> MockNetwork {
        let network = MockNetwork::new();
        network.respond_json(
            HttpMethod::Get,
            "/products/admin/all",
            json!([
                {"id": 1, "name": "Trail Shoe", "sellPrice": 59.9, "category": 2},
                {"id": 2, "name": "Desk Lamp", "sellPrice": 19.5, "category": 5}
            ]),
        );
        network.respond_json(
            HttpMethod::Get,
            "/categories/get/all",
            json!([{"id": 2, "name": "Shoes", "logo": "/images/logo/shoes.png"}]),
        );
        network.respond_json(
            HttpMethod::Post,
            "/products-images/get-image/home/1",
            json!({"imageUrl": "/uploads/products/shoe.png"}),
        );
        network.respond(HttpMethod::Post, "/products-images/get-image/home/2", 500, "");
        network
    }

    fn screen(network: &MockNetwork) -> ProductsScreen {
        ProductsScreen::new(ScreenContext::new(network.client(), Notifier::new()))
    }

    #[tokio::test]
    async fn test_load_builds_rows() {
        let network = seeded();
        let screen = screen(&network);
        screen.load().await.unwrap();

        let rows = screen.rows().await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category_name, "Shoes");
        assert_eq!(
            rows[0].image_url.as_deref(),
            Some("http://localhost:3001/uploads/products/shoe.png")
        );
        assert_eq!(rows[1].category_name, "5");
        assert_eq!(rows[1].image_url, None);

        screen.set_filter(ProductFilter::from_inputs("lamp", "", "", "")).await;
        let rows = screen.rows().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product.id, Some(2));
    }

    #[tokio::test]
    async fn test_delete_reloads_everything() {
        let network = seeded();
        network.respond(HttpMethod::Delete, "/products/admin/admin/delete/2", 200, "");
        let screen = screen(&network);

        screen.load().await.unwrap();
        screen.delete(2).await.unwrap();

        assert_eq!(network.calls_to(HttpMethod::Delete, "/products/admin/admin/delete/2"), 1);
        assert_eq!(network.calls_to(HttpMethod::Get, "/products/admin/all"), 2);
        assert_eq!(network.calls_to(HttpMethod::Get, "/categories/get/all"), 2);
    }

    #[tokio::test]
    async fn test_import_validation_skips_network() {
        let network = seeded();
        let screen = screen(&network);

        let err = screen.import(&ImportForm::new("", 0)).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(network.request_count(), 0);
    }

    #[tokio::test]
    async fn test_import_posts_body() {
        let network = seeded();
        network.respond(HttpMethod::Post, "/products/admin/import", 200, "");
        let screen = screen(&network);

        screen
            .import(&ImportForm::new("https://shop.example/item/9", 2))
            .await
            .unwrap();

        let request = network.last_request(HttpMethod::Post, "/products/admin/import").unwrap();
        assert_eq!(
            request.json_body().unwrap(),
            json!({"url": "https://shop.example/item/9", "categoryId": 2})
        );
        assert_eq!(network.calls_to(HttpMethod::Get, "/products/admin/all"), 1);
    }

    #[tokio::test]
    async fn test_busy_screen_rejects_second_action() {
        let network = seeded();
        let screen = screen(&network);

        let _held = screen.state.begin().unwrap();
        let err = screen.trigger_scrape_update().await.unwrap_err();
        assert!(matches!(err.kind, crate::error::ErrorKind::Busy { .. }));
        assert_eq!(network.request_count(), 0);
    }
}
