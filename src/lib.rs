// src/lib.rs

//! Storefront Admin - typed admin client for the storefront REST backend
//!
//! Screens own per-page collection stores that mirror server state, refresh
//! them wholesale after every mutation and report outcomes on a shared
//! notification channel.

#![deny(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::result_large_err)]
#![allow(clippy::large_enum_variant)]

#[macro_use]
pub mod logging;

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod notify;
pub mod platform;
pub mod screens;
pub mod store;
pub mod types;
pub mod views;
pub mod workflow;

#[cfg(test)]
pub mod testing;

pub use api::ApiClient;
pub use config::{AdminConfig, ClientConfig, ConfigManager};
pub use error::{Error, ErrorKind, Result, ResultExt};
pub use notify::{Notification, NotificationType, Notifier};
pub use screens::ScreenContext;
pub use store::RemoteCollectionStore;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
