// src/forms/category.rs

use crate::config::ClientConfig;
use crate::forms::{EntityForm, FieldRule, FieldValue, Validated};
use crate::models::Category;

const RULES: &[FieldRule] = &[FieldRule::required("name", "Category name is required")];

/// New category; the logo is a bare filename already present on the
/// asset server under the logo directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub logo_filename: String,
}

impl CategoryForm {
    pub fn new(name: impl Into<String>, logo_filename: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logo_filename: logo_filename.into(),
        }
    }
}

impl Validated for CategoryForm {
    fn rules(&self) -> &'static [FieldRule] {
        RULES
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "logo" => FieldValue::Text(&self.logo_filename),
            _ => FieldValue::Text(&self.name),
        }
    }
}

impl EntityForm for CategoryForm {
    type Entity = Category;

    fn build(&self, _image_path: Option<String>, config: &ClientConfig) -> Category {
        Category {
            id: None,
            name: self.name.trim().to_string(),
            logo: config.category_logo_path(&self.logo_filename),
        }
    }
}
