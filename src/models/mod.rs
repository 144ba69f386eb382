// src/models/mod.rs - Wire types of the storefront backend

pub mod banner;
pub mod blog;
pub mod category;
pub mod image;
pub mod order;
pub mod product;
pub mod serde_helpers;
pub mod settings;
pub mod tracking;

pub use banner::Banner;
pub use blog::BlogPost;
pub use category::Category;
pub use image::{ProductImage, UploadData, UploadResponse};
pub use order::{Order, OrderStatus, StatusUpdate};
pub use product::{ImportRequest, Product};
pub use settings::ProfitMargin;
pub use tracking::{ScrapeRequest, TrackingRecord};

/// Anything that lives in a remote collection and carries a backend id
pub trait Identified {
    fn entity_id(&self) -> Option<crate::types::EntityId>;
}
