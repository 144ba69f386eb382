// src/screens/product_editor.rs

use crate::error::Result;
use crate::forms::{self, FormMode, ProductForm, Validated};
use crate::models::{Category, Product};
use crate::screens::{ScreenContext, ScreenState};
use crate::store::RemoteCollectionStore;
use crate::types::EntityId;

#[derive(Debug)]
pub struct ProductEditorScreen {
    state: ScreenState,
    categories: RemoteCollectionStore<Category>,
}

impl ProductEditorScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        let notifier = ctx.notifier.clone();
        Self {
            state: ScreenState::new("product_editor", ctx),
            categories: RemoteCollectionStore::new("categories", notifier),
        }
    }

    /// Loads the category choices and, when editing, the product itself
    pub async fn open(&self, id: Option<EntityId>) -> Result<ProductForm> {
        let _busy = self.state.begin()?;
        let client = self.state.client();
        let categories_api = client.categories();

        let Some(id) = id else {
            self.categories.load(&categories_api).await?;
            return Ok(ProductForm::new());
        };

        let products = client.products();
        let (_, product) = futures::try_join!(self.categories.load(&categories_api), async {
            products
                .get(id)
                .await
                .map_err(|e| self.state.fail(e, "Failed to load product details"))
        })?;
        Ok(ProductForm::edit(&product))
    }

    /// Absolute URLs of every image attached to a product
    pub async fn gallery(&self, id: EntityId) -> Result<Vec<String>> {
        let client = self.state.client();
        let images = client
            .products()
            .images(id)
            .await
            .map_err(|e| self.state.fail(e, "Failed to load product images"))?;
        Ok(images
            .into_iter()
            .filter_map(|image| image.image_url)
            .map(|path| client.config().image_url(&path))
            .collect())
    }

    pub async fn categories(&self) -> Vec<Category> {
        self.categories.snapshot().await
    }

    pub async fn submit(&self, form: &ProductForm) -> Result<Product> {
        let _busy = self.state.begin()?;
        let client = self.state.client();
        let success = match form.mode() {
            FormMode::Create => "Product created successfully",
            FormMode::Update => "Product updated successfully",
        };

        let result = forms::submit(form, &client.products(), &client.uploads()).await;
        self.state.report(result, success, "Failed to save product")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notifier;
    use crate::platform::HttpMethod;
    use crate::testing::MockNetwork;
    use serde_json::json;

    fn screen(network: &MockNetwork) -> ProductEditorScreen {
        ProductEditorScreen::new(ScreenContext::new(network.client(), Notifier::new()))
    }

    #[tokio::test]
    async fn test_open_existing_truncates_dates() {
        let network = MockNetwork::new();
        network.respond_json(HttpMethod::Get, "/categories/get/all", json!([{"id": 2, "name": "Shoes"}]));
        network.respond_json(
            HttpMethod::Get,
            "/products/admin/4",
            json!({"id": 4, "name": "Boot", "sellPrice": 80, "category": 2,
                   "deliveryMinDate": "2024-06-01T00:00:00", "deliveryMaxDate": null}),
        );
        let screen = screen(&network);

        let form = screen.open(Some(4)).await.unwrap();
        assert_eq!(form.delivery_min_date, "2024-06-01");
        assert_eq!(form.delivery_max_date, "");
        assert_eq!(form.sell_price, Some(80.0));
        assert_eq!(screen.categories().await.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_product_never_sent() {
        let network = MockNetwork::new();
        let screen = screen(&network);

        let form = ProductForm {
            name: "No price".to_string(),
            category: 2,
            ..ProductForm::new()
        };
        let err = screen.submit(&form).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(network.request_count(), 0);
    }

    #[tokio::test]
    async fn test_update_uses_put_with_nulls() {
        let network = MockNetwork::new();
        network.respond(HttpMethod::Put, "/products/admin/update", 200, "");
        let screen = screen(&network);

        let form = ProductForm {
            id: Some(4),
            name: "Boot".to_string(),
            sell_price: Some(80.0),
            category: 2,
            ..ProductForm::new()
        };
        screen.submit(&form).await.unwrap();

        let body = network
            .last_request(HttpMethod::Put, "/products/admin/update")
            .and_then(|r| r.json_body())
            .unwrap();
        assert_eq!(body["id"], 4);
        assert!(body["deliveryMinDate"].is_null());
        assert_eq!(network.calls_to(HttpMethod::Post, "/products/admin/save"), 0);
    }

    #[tokio::test]
    async fn test_gallery_resolves_against_image_origin() {
        let network = MockNetwork::new();
        network.respond_json(
            HttpMethod::Post,
            "/products-images/get-image/5",
            json!([{"imageUrl": "/uploads/products/a.jpg"}, {"imageUrl": null}]),
        );
        let screen = screen(&network);

        let urls = screen.gallery(5).await.unwrap();
        assert_eq!(urls.len(), 1);
        assert!(urls[0].ends_with("/uploads/products/a.jpg"));
    }
}
