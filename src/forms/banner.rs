// src/forms/banner.rs

use crate::config::ClientConfig;
use crate::forms::{EntityForm, FieldRule, FieldValue, FormMode, ImageRef, Validated};
use crate::models::Banner;
use crate::types::EntityId;

const RULES: &[FieldRule] = &[
    FieldRule::required("title", "Title is required"),
    FieldRule::required("description", "Description is required"),
    FieldRule::required("image", "Image is required").on_create(),
    FieldRule::http_url("linkUrl", "URL must start with http:// or https://"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerForm {
    pub id: Option<EntityId>,
    pub title: String,
    pub description: String,
    pub link_url: String,
    pub link_name: String,
    pub image: Option<ImageRef>,
}

impl BannerForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(banner: &Banner) -> Self {
        Self {
            id: banner.id,
            title: banner.title.clone(),
            description: banner.description.clone(),
            link_url: banner.link_url.clone(),
            link_name: banner.link_name.clone(),
            image: ImageRef::existing(&banner.image_url),
        }
    }
}

impl Validated for BannerForm {
    fn rules(&self) -> &'static [FieldRule] {
        RULES
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "title" => FieldValue::Text(&self.title),
            "description" => FieldValue::Text(&self.description),
            "linkUrl" => FieldValue::Text(&self.link_url),
            "linkName" => FieldValue::Text(&self.link_name),
            _ => FieldValue::Image(self.image.as_ref()),
        }
    }

    fn mode(&self) -> FormMode {
        FormMode::for_id(self.id)
    }
}

impl EntityForm for BannerForm {
    type Entity = Banner;

    fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    fn build(&self, image_path: Option<String>, _config: &ClientConfig) -> Banner {
        Banner {
            id: self.id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            image_url: image_path.unwrap_or_default(),
            link_url: self.link_url.trim().to_string(),
            link_name: self.link_name.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{validate, LocalImage};

    fn filled() -> BannerForm {
        BannerForm {
            title: "Summer sale".to_string(),
            description: "Up to 40% off".to_string(),
            image: Some(ImageRef::Pending(LocalImage::new("sale.png", vec![1]))),
            ..BannerForm::new()
        }
    }

    #[test]
    fn test_bad_link_scheme_is_the_only_error() {
        let form = BannerForm {
            link_url: "ftp://x".to_string(),
            ..filled()
        };
        let errors = validate(&form);
        assert_eq!(errors.len(), 1);
        assert!(errors.get("linkUrl").is_some());
    }

    #[test]
    fn test_image_required_only_on_create() {
        let mut form = BannerForm {
            image: None,
            ..filled()
        };
        assert!(validate(&form).get("image").is_some());

        form.id = Some(3);
        assert!(validate(&form).is_empty());
    }

    #[test]
    fn test_edit_keeps_stored_image() {
        let banner = Banner {
            id: Some(1),
            title: "t".to_string(),
            description: "d".to_string(),
            image_url: "/uploads/products/b.png".to_string(),
            link_url: String::new(),
            link_name: String::new(),
        };
        let form = BannerForm::edit(&banner);
        assert_eq!(form.mode(), FormMode::Update);
        assert_eq!(
            form.image,
            Some(ImageRef::Committed("/uploads/products/b.png".to_string()))
        );
        assert_eq!(form.build(Some(banner.image_url.clone()), &ClientConfig::default()), banner);
    }
}
