// src/forms/blog.rs

use crate::config::ClientConfig;
use crate::forms::{EntityForm, FieldRule, FieldValue, FormMode, ImageRef, Validated};
use crate::models::BlogPost;
use crate::types::EntityId;

// An existing image URL satisfies the image rule, so it also covers
// creating a post from a copy that already has one.
const RULES: &[FieldRule] = &[
    FieldRule::required("title", "Title is required"),
    FieldRule::required("slug", "Slug is required"),
    FieldRule::required("excerpt", "Excerpt is required"),
    FieldRule::required("content", "Content is required"),
    FieldRule::required("image", "Image is required").on_create(),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogForm {
    pub id: Option<EntityId>,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    /// Comma-separated
    pub tags: String,
    /// Raw minutes input
    pub read_time: String,
    pub image: Option<ImageRef>,
    pub date: Option<String>,
}

impl BlogForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(post: &BlogPost) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            author: post.author.clone(),
            tags: post.tags.clone(),
            read_time: post.read_time.to_string(),
            image: ImageRef::existing(&post.image_url),
            date: post.date.clone(),
        }
    }

    /// Non-numeric or negative input counts as zero minutes
    pub fn read_time_minutes(&self) -> u32 {
        let raw = self.read_time.trim();
        let digits: &str = raw
            .find(|c: char| !c.is_ascii_digit())
            .map_or(raw, |end| &raw[..end]);
        digits.parse().unwrap_or(0)
    }
}

impl Validated for BlogForm {
    fn rules(&self) -> &'static [FieldRule] {
        RULES
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "title" => FieldValue::Text(&self.title),
            "slug" => FieldValue::Text(&self.slug),
            "excerpt" => FieldValue::Text(&self.excerpt),
            "content" => FieldValue::Text(&self.content),
            "author" => FieldValue::Text(&self.author),
            "tags" => FieldValue::Text(&self.tags),
            _ => FieldValue::Image(self.image.as_ref()),
        }
    }

    fn mode(&self) -> FormMode {
        FormMode::for_id(self.id)
    }
}

impl EntityForm for BlogForm {
    type Entity = BlogPost;

    fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    fn build(&self, image_path: Option<String>, _config: &ClientConfig) -> BlogPost {
        BlogPost {
            id: self.id,
            title: self.title.trim().to_string(),
            slug: self.slug.trim().to_string(),
            excerpt: self.excerpt.trim().to_string(),
            content: self.content.clone(),
            author: self.author.trim().to_string(),
            tags: self.tags.trim().to_string(),
            read_time: self.read_time_minutes(),
            image_url: image_path.unwrap_or_default(),
            date: self.date.clone(),
        }
    }
}
