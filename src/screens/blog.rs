// src/screens/blog.rs

use crate::error::Result;
use crate::forms::{self, BlogForm, FormMode, Validated};
use crate::models::BlogPost;
use crate::screens::{ScreenContext, ScreenState};
use crate::store::RemoteCollectionStore;
use crate::types::EntityId;

#[derive(Debug)]
pub struct BlogScreen {
    state: ScreenState,
    posts: RemoteCollectionStore<BlogPost>,
}

impl BlogScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        let notifier = ctx.notifier.clone();
        Self {
            state: ScreenState::new("blog", ctx),
            posts: RemoteCollectionStore::new("posts", notifier),
        }
    }

    pub async fn load(&self) -> Result<Vec<BlogPost>> {
        let _busy = self.state.begin()?;
        self.posts.load(&self.state.client().blog()).await
    }

    pub async fn posts(&self) -> Vec<BlogPost> {
        self.posts.snapshot().await
    }

    /// Full post for editing; the list endpoint may omit the content
    pub async fn open(&self, id: EntityId) -> Result<BlogForm> {
        let _busy = self.state.begin()?;
        let post = self
            .state
            .client()
            .blog()
            .get(id)
            .await
            .map_err(|e| self.state.fail(e, "Failed to load the post"))?;
        Ok(BlogForm::edit(&post))
    }

    pub async fn save(&self, form: &BlogForm) -> Result<BlogPost> {
        let _busy = self.state.begin()?;
        let client = self.state.client();
        let blog = client.blog();
        let success = match form.mode() {
            FormMode::Create => "Post created successfully",
            FormMode::Update => "Post updated successfully",
        };

        let result = forms::submit(form, &blog, &client.uploads()).await;
        let saved = self
            .state
            .report(result, success, "Failed to save the post. Please try again.")?;
        self.posts.invalidate_and_refetch(&blog).await?;
        Ok(saved)
    }

    pub async fn delete(&self, id: EntityId) -> Result<()> {
        let _busy = self.state.begin()?;
        let blog = self.state.client().blog();

        let result = blog.delete(id).await;
        self.state
            .report(result, "Post deleted", "Failed to delete the post")?;
        self.posts.invalidate_and_refetch(&blog).await?;
        Ok(())
    }
}
