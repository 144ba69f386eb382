// src/screens/best_products.rs - Home page "best products" shelf

use crate::error::Result;
use crate::models::Product;
use crate::screens::{ScreenContext, ScreenState};
use crate::store::RemoteCollectionStore;
use crate::types::EntityId;

#[derive(Debug)]
pub struct BestProductsScreen {
    state: ScreenState,
    shelf: RemoteCollectionStore<Product>,
}

impl BestProductsScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        let notifier = ctx.notifier.clone();
        Self {
            state: ScreenState::new("best_products", ctx),
            shelf: RemoteCollectionStore::new("best products", notifier),
        }
    }

    pub async fn load(&self) -> Result<Vec<Product>> {
        let _busy = self.state.begin()?;
        self.shelf.load(&self.state.client().best_products()).await
    }

    pub async fn products(&self) -> Vec<Product> {
        self.shelf.snapshot().await
    }

    pub async fn add(&self, product_id: EntityId) -> Result<()> {
        let _busy = self.state.begin()?;
        let api = self.state.client().best_products();

        let result = api.add(product_id).await;
        self.state
            .report(result, "Product added to best products", "Failed to add product")?;
        self.shelf.invalidate_and_refetch(&api).await?;
        Ok(())
    }

    pub async fn remove(&self, product_id: EntityId) -> Result<()> {
        let _busy = self.state.begin()?;
        let api = self.state.client().best_products();

        let result = api.remove(product_id).await;
        self.state.report(
            result,
            "Product removed from best products",
            "Failed to remove product",
        )?;
        self.shelf.invalidate_and_refetch(&api).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notifier;
    use crate::platform::HttpMethod;
    use crate::testing::MockNetwork;
    use serde_json::json;

    #[tokio::test]
    async fn test_add_and_remove_reload_shelf() {
        let network = MockNetwork::new();
        network.respond(HttpMethod::Post, "/best/admin/set-products/4", 200, "");
        network.respond(HttpMethod::Post, "/best/admin/delete/4", 200, "");
        network.respond_json(HttpMethod::Get, "/best/get-products", json!([{"id": 4, "name": "Boot"}]));
        network.respond_json(HttpMethod::Get, "/best/get-products", json!([]));
        let screen = BestProductsScreen::new(ScreenContext::new(network.client(), Notifier::new()));

        screen.add(4).await.unwrap();
        assert_eq!(screen.products().await.len(), 1);

        screen.remove(4).await.unwrap();
        assert!(screen.products().await.is_empty());
        assert_eq!(network.calls_to(HttpMethod::Get, "/best/get-products"), 2);
    }
}
