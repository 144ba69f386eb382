// src/screens/categories.rs

use crate::error::Result;
use crate::forms::{self, CategoryForm};
use crate::models::Category;
use crate::screens::{ScreenContext, ScreenState};
use crate::store::RemoteCollectionStore;
use crate::types::EntityId;

#[derive(Debug)]
pub struct CategoriesScreen {
    state: ScreenState,
    categories: RemoteCollectionStore<Category>,
}

impl CategoriesScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        let notifier = ctx.notifier.clone();
        Self {
            state: ScreenState::new("categories", ctx),
            categories: RemoteCollectionStore::new("categories", notifier),
        }
    }

    pub async fn load(&self) -> Result<Vec<Category>> {
        let _busy = self.state.begin()?;
        self.categories.load(&self.state.client().categories()).await
    }

    pub async fn categories(&self) -> Vec<Category> {
        self.categories.snapshot().await
    }

    /// Display URL of a category logo
    pub fn logo_url(&self, category: &Category) -> Option<String> {
        (!category.logo.is_empty()).then(|| self.state.client().config().image_url(&category.logo))
    }

    pub async fn create(&self, form: &CategoryForm) -> Result<Category> {
        let _busy = self.state.begin()?;
        let client = self.state.client();
        let categories = client.categories();

        let result = forms::submit(form, &categories, &client.uploads()).await;
        let created = self
            .state
            .report(result, "Category created successfully", "Failed to create category")?;
        self.categories.invalidate_and_refetch(&categories).await?;
        Ok(created)
    }

    pub async fn delete(&self, id: EntityId) -> Result<()> {
        let _busy = self.state.begin()?;
        let categories = self.state.client().categories();

        let result = categories.delete(id).await;
        self.state
            .report(result, "Category deleted", "Failed to delete category")?;
        self.categories.invalidate_and_refetch(&categories).await?;
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

    fn screen(network: &MockNetwork) -> CategoriesScreen {
        CategoriesScreen::new(ScreenContext::new(network.client(), Notifier::new()))
    }

    #[tokio::test]
    async fn test_create_stores_logo_path() {
        let network = MockNetwork::new();
        network.respond(HttpMethod::Post, "/categories/admin/save", 200, "");
        network.respond_json(
            HttpMethod::Get,
            "/categories/get/all",
            json!([{"id": 1, "name": "Shoes", "logo": "/images/logo/shoes.png"}]),
        );
        let screen = screen(&network);

        let created = screen.create(&CategoryForm::new("Shoes", "shoes.png")).await.unwrap();
        assert_eq!(created.logo, "/images/logo/shoes.png");

        let body = network
            .last_request(HttpMethod::Post, "/categories/admin/save")
            .and_then(|r| r.json_body())
            .unwrap();
        assert_eq!(body["logo"], "/images/logo/shoes.png");
        assert_eq!(body["name"], "Shoes");

        let stored = screen.categories().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(
            screen.logo_url(&stored[0]).as_deref(),
            Some("http://localhost:3001/images/logo/shoes.png")
        );
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected_locally() {
        let network = MockNetwork::new();
        let screen = screen(&network);

        assert!(screen.create(&CategoryForm::new(" ", "x.png")).await.is_err());
        assert_eq!(network.request_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_list() {
        let network = MockNetwork::new();
        network.respond_json(HttpMethod::Get, "/categories/get/all", json!([{"id": 1, "name": "Shoes"}]));
        network.respond(HttpMethod::Delete, "/categories/admin/delete/1", 409, "in use");
        let screen = screen(&network);

        screen.load().await.unwrap();
        let err = screen.delete(1).await.unwrap_err();
        assert_eq!(err.status_code(), Some(409));
        assert_eq!(screen.categories().await.len(), 1);
        assert_eq!(network.calls_to(HttpMethod::Get, "/categories/get/all"), 1);
    }
}
