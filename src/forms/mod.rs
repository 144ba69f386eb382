// src/forms/mod.rs

//! Form validation and submission
//!
//! Each editable resource describes its checks as a static [`FieldRule`]
//! table; [`validate`] runs any table against any form. [`submit`] is the
//! shared write path: validate, upload a pending image, then issue exactly
//! one create or update call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::{BannersApi, BlogApi, CategoriesApi, ProductsApi, UploadApi};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::{Banner, BlogPost, Category, Product};
use crate::types::EntityId;

pub mod actions;
pub mod banner;
pub mod blog;
pub mod category;
pub mod image;
pub mod product;
pub mod settings;

pub use actions::{ImportForm, ScrapeForm};
pub use banner::BannerForm;
pub use blog::BlogForm;
pub use category::CategoryForm;
pub use image::{ImageRef, LocalImage};
pub use product::ProductForm;
pub use settings::ProfitMarginForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormMode {
    Create,
    Update,
}

impl FormMode {
    pub fn for_id(id: Option<EntityId>) -> Self {
        if id.is_some() {
            Self::Update
        } else {
            Self::Create
        }
    }
}

/// Current value of one form field as seen by the validator
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(Option<f64>),
    Id(EntityId),
    Image(Option<&'a ImageRef>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Non-blank text, a finite number, a non-zero id or an image
    Required,
    /// Empty, or starts with `http://` / `https://` (any case)
    HttpUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applies {
    Always,
    OnCreate,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub check: Check,
    pub applies: Applies,
    pub message: &'static str,
}

impl FieldRule {
    pub const fn required(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            check: Check::Required,
            applies: Applies::Always,
            message,
        }
    }

    pub const fn on_create(mut self) -> Self {
        self.applies = Applies::OnCreate;
        self
    }

    pub const fn http_url(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            check: Check::HttpUrl,
            applies: Applies::Always,
            message,
        }
    }

    fn passes(&self, value: FieldValue<'_>) -> bool {
        match (self.check, value) {
            (Check::Required, FieldValue::Text(text)) => !text.trim().is_empty(),
            (Check::Required, FieldValue::Number(number)) => number.map_or(false, f64::is_finite),
            (Check::Required, FieldValue::Id(id)) => id != 0,
            (Check::Required, FieldValue::Image(image)) => image.map_or(false, ImageRef::is_present),
            (Check::HttpUrl, FieldValue::Text(text)) => is_http_url(text),
            (Check::HttpUrl, _) => true,
        }
    }
}

fn is_http_url(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return true;
    }
    let lower = text.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field-scoped validation failures, in rule order. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{} field(s) invalid: {}", .errors.len(), join_errors(.errors))]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first message per field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if self.get(&field).is_none() {
            self.errors.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.field.as_str())
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into())
        }
    }
}

/// A form the generic validator can check
pub trait Validated {
    fn rules(&self) -> &'static [FieldRule];

    fn field(&self, name: &str) -> FieldValue<'_>;

    fn mode(&self) -> FormMode {
        FormMode::Create
    }
}

pub fn validate<F: Validated + ?Sized>(form: &F) -> FieldErrors {
    let mode = form.mode();
    let mut errors = FieldErrors::new();

    for rule in form.rules() {
        if rule.applies == Applies::OnCreate && mode == FormMode::Update {
            continue;
        }
        if !rule.passes(form.field(rule.field)) {
            errors.add(rule.field, rule.message);
        }
    }

    errors
}

/// A form that produces one entity for one write call
pub trait EntityForm: Validated {
    type Entity: Send + Sync;

    fn image(&self) -> Option<&ImageRef> {
        None
    }

    /// Final payload; `image_path` is the committed path of the image field
    fn build(&self, image_path: Option<String>, config: &ClientConfig) -> Self::Entity;
}

/// Create/update endpoint pair of one resource
#[async_trait]
pub trait EntityWriter<T: Send + Sync>: Send + Sync {
    async fn write(&self, entity: &T, mode: FormMode) -> Result<()>;
}

/// Validates, resolves the image and performs the single entity write.
///
/// Validation failures never reach the network. A failed upload aborts
/// before the write. The caller reloads its store on success.
pub async fn submit<F, W>(form: &F, writer: &W, uploads: &UploadApi) -> Result<F::Entity>
where
    F: EntityForm + Sync,
    W: EntityWriter<F::Entity> + ?Sized,
{
    validate(form).into_result()?;

    let image_path = match form.image() {
        Some(image) => Some(image.resolve(uploads).await?),
        None => None,
    };

    let entity = form.build(image_path, uploads.config());
    writer.write(&entity, form.mode()).await?;
    Ok(entity)
}

#[async_trait]
impl EntityWriter<Banner> for BannersApi {
    async fn write(&self, entity: &Banner, mode: FormMode) -> Result<()> {
        match mode {
            FormMode::Create => self.create(entity).await,
            FormMode::Update => self.update(entity).await,
        }
    }
}

#[async_trait]
impl EntityWriter<BlogPost> for BlogApi {
    async fn write(&self, entity: &BlogPost, mode: FormMode) -> Result<()> {
        match mode {
            FormMode::Create => self.create(entity).await,
            FormMode::Update => self.update(entity).await,
        }
    }
}

#[async_trait]
impl EntityWriter<Product> for ProductsApi {
    async fn write(&self, entity: &Product, mode: FormMode) -> Result<()> {
        match mode {
            FormMode::Create => self.create(entity).await,
            FormMode::Update => self.update(entity).await,
        }
    }
}

#[async_trait]
impl EntityWriter<Category> for CategoriesApi {
    async fn write(&self, entity: &Category, mode: FormMode) -> Result<()> {
        match mode {
            FormMode::Create => self.create(entity).await,
            // the backend has no category update route
            FormMode::Update => Err(Error::validation("id", "Categories cannot be edited")),
        }
    }
}

/// Lenient number input: blank or malformed becomes `None`
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Optional text input: blank becomes `None`
pub fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
