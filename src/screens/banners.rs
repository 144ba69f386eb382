// src/screens/banners.rs

use crate::error::Result;
use crate::forms::{self, BannerForm, FormMode, Validated};
use crate::models::Banner;
use crate::screens::{ScreenContext, ScreenState};
use crate::store::RemoteCollectionStore;
use crate::types::EntityId;

#[derive(Debug)]
pub struct BannersScreen {
    state: ScreenState,
    banners: RemoteCollectionStore<Banner>,
}

impl BannersScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        let notifier = ctx.notifier.clone();
        Self {
            state: ScreenState::new("banners", ctx),
            banners: RemoteCollectionStore::new("banners", notifier),
        }
    }

    pub async fn load(&self) -> Result<Vec<Banner>> {
        let _busy = self.state.begin()?;
        self.banners.load(&self.state.client().banners()).await
    }

    pub async fn banners(&self) -> Vec<Banner> {
        self.banners.snapshot().await
    }

    pub fn image_url(&self, banner: &Banner) -> Option<String> {
        (!banner.image_url.is_empty()).then(|| self.state.client().config().image_url(&banner.image_url))
    }

    /// Creates or updates depending on whether the form carries an id
    pub async fn save(&self, form: &BannerForm) -> Result<Banner> {
        let _busy = self.state.begin()?;
        let client = self.state.client();
        let banners = client.banners();
        let success = match form.mode() {
            FormMode::Create => "Banner created successfully",
            FormMode::Update => "Banner updated successfully",
        };

        let result = forms::submit(form, &banners, &client.uploads()).await;
        let saved = self.state.report(
            result,
            success,
            "Failed to save the banner. Please try again.",
        )?;
        self.banners.invalidate_and_refetch(&banners).await?;
        Ok(saved)
    }

    pub async fn delete(&self, id: EntityId) -> Result<()> {
        let _busy = self.state.begin()?;
        let banners = self.state.client().banners();

        let result = banners.delete(id).await;
        self.state
            .report(result, "Banner deleted", "Failed to delete the banner")?;
        self.banners.invalidate_and_refetch(&banners).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::forms::{ImageRef, LocalImage};
    use crate::notify::Notifier;
    use crate::platform::HttpMethod;
    use crate::testing::MockNetwork;
    use serde_json::json;

    fn screen(network: &MockNetwork) -> BannersScreen {
        BannersScreen::new(ScreenContext::new(network.client(), Notifier::new()))
    }

    fn form() -> BannerForm {
        BannerForm {
            title: "Summer sale".to_string(),
            description: "Up to 40% off".to_string(),
            link_url: "https://shop.example/sale".to_string(),
            link_name: "Shop now".to_string(),
            image: Some(ImageRef::Pending(LocalImage::new("sale.png", vec![7, 7]))),
            ..BannerForm::new()
        }
    }

    #[tokio::test]
    async fn test_bad_link_url_is_one_error_and_no_request() {
        let network = MockNetwork::new();
        let screen = screen(&network);

        let bad = BannerForm {
            link_url: "ftp://x".to_string(),
            ..form()
        };
        let err = screen.save(&bad).await.unwrap_err();
        match err.kind {
            ErrorKind::Validation { field, rules } => {
                assert_eq!(field.as_deref(), Some("linkUrl"));
                assert_eq!(rules.len(), 1);
            }
            other => panic!("unexpected kind {:?}", other),
        }
        assert_eq!(network.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_uploads_then_writes_then_reloads() {
        let network = MockNetwork::new();
        network.respond_json(
            HttpMethod::Post,
            "/api/upload/image",
            json!({"success": true, "data": {"filename": "1700-sale.png"}}),
        );
        network.respond(HttpMethod::Post, "/home-banners/admin/create", 201, "");
        network.respond_json(HttpMethod::Get, "/home-banners/get", json!([{"id": 1, "title": "Summer sale"}]));
        let screen = screen(&network);

        let saved = screen.save(&form()).await.unwrap();
        assert_eq!(saved.image_url, "/uploads/products/1700-sale.png");

        let paths: Vec<HttpMethod> = network.requests().iter().map(|r| r.method).collect();
        assert_eq!(paths, vec![HttpMethod::Post, HttpMethod::Post, HttpMethod::Get]);

        let body = network
            .last_request(HttpMethod::Post, "/home-banners/admin/create")
            .and_then(|r| r.json_body())
            .unwrap();
        assert_eq!(body["imageUrl"], "/uploads/products/1700-sale.png");
        assert_eq!(screen.banners().await.len(), 1);
    }

    #[tokio::test]
    async fn test_upload_failure_aborts_write() {
        let network = MockNetwork::new();
        network.respond(HttpMethod::Post, "/api/upload/image", 500, "disk full");
        let screen = screen(&network);

        let err = screen.save(&form()).await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Upload { .. }));
        assert_eq!(network.calls_to(HttpMethod::Post, "/home-banners/admin/create"), 0);
        assert_eq!(network.request_count(), 1);
    }

    #[tokio::test]
    async fn test_edit_without_new_image_skips_upload() {
        let network = MockNetwork::new();
        network.respond(HttpMethod::Put, "/home-banners/admin/update", 200, "");
        network.respond_json(HttpMethod::Get, "/home-banners/get", json!([]));
        let screen = screen(&network);

        let banner = Banner {
            id: Some(5),
            title: "Old".to_string(),
            description: "Kept".to_string(),
            image_url: "/uploads/products/old.png".to_string(),
            ..Banner::default()
        };
        screen.save(&BannerForm::edit(&banner)).await.unwrap();

        assert_eq!(network.calls_to(HttpMethod::Post, "/api/upload/image"), 0);
        let body = network
            .last_request(HttpMethod::Put, "/home-banners/admin/update")
            .and_then(|r| r.json_body())
            .unwrap();
        assert_eq!(body["id"], 5);
        assert_eq!(body["imageUrl"], "/uploads/products/old.png");
    }
}
