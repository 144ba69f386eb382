// src/screens/mod.rs

//! Screen controllers
//!
//! A screen owns the stores of one admin page, a busy flag and the page's
//! actions. Only one action runs per screen at a time; a second one fails
//! with a busy error before touching the network. Outcomes are returned to
//! the caller and published on the shared [`Notifier`].

use std::sync::atomic::{AtomicBool, Ordering};

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::logging::Logger;
use crate::notify::Notifier;

pub mod banners;
pub mod best_products;
pub mod blog;
pub mod categories;
pub mod dashboard;
pub mod orders;
pub mod product_editor;
pub mod products;
pub mod settings;
pub mod tracking;

pub use banners::BannersScreen;
pub use best_products::BestProductsScreen;
pub use blog::BlogScreen;
pub use categories::CategoriesScreen;
pub use dashboard::DashboardScreen;
pub use orders::OrdersScreen;
pub use product_editor::ProductEditorScreen;
pub use products::{ProductRow, ProductsScreen};
pub use settings::SettingsScreen;
pub use tracking::TrackingScreen;

/// What every screen needs from the process: the API client and the
/// notification channel
#[derive(Debug, Clone)]
pub struct ScreenContext {
    pub client: ApiClient,
    pub notifier: Notifier,
}

impl ScreenContext {
    pub fn new(client: ApiClient, notifier: Notifier) -> Self {
        Self { client, notifier }
    }
}

/// Busy flag, logger and reporting shared by all screens
#[derive(Debug)]
pub(crate) struct ScreenState {
    name: &'static str,
    busy: AtomicBool,
    ctx: ScreenContext,
    logger: Logger,
}

/// Clears the busy flag on drop
#[derive(Debug)]
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl ScreenState {
    pub(crate) fn new(name: &'static str, ctx: ScreenContext) -> Self {
        Self {
            name,
            busy: AtomicBool::new(false),
            logger: Logger::new(format!("screen.{}", name)),
            ctx,
        }
    }

    pub(crate) fn client(&self) -> &ApiClient {
        &self.ctx.client
    }

    pub(crate) fn notifier(&self) -> &Notifier {
        &self.ctx.notifier
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub(crate) fn begin(&self) -> Result<BusyGuard<'_>> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            log_debug!(self.logger, "rejected: request already in flight");
            return Err(Error::busy(self.name).source(self.name));
        }
        Ok(BusyGuard { flag: &self.busy })
    }

    /// Publishes the outcome of one remote action. The original error is
    /// logged and returned; the operator sees `failure`.
    pub(crate) fn report<T>(&self, result: Result<T>, success: &str, failure: &str) -> Result<T> {
        match result {
            Ok(value) => {
                log_info!(self.logger, "{}", success);
                self.ctx.notifier.success(self.name, success);
                Ok(value)
            }
            Err(e) => Err(self.fail(e, failure)),
        }
    }

    pub(crate) fn fail(&self, error: Error, message: &str) -> Error {
        if error.is_validation() {
            log_debug!(self.logger, "validation failed: {}", error.message);
            return error;
        }
        log_error!(self.logger, "{}: {}", message, error);
        self.ctx.notifier.failure(self.name, message, &error);
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::notify::NotificationType;
    use crate::testing::MockNetwork;

    fn state() -> (ScreenState, Notifier) {
        let notifier = Notifier::new();
        let ctx = ScreenContext::new(MockNetwork::new().client(), notifier.clone());
        (ScreenState::new("banners", ctx), notifier)
    }

    #[test]
    fn test_busy_guard() {
        let (state, _) = state();
        let guard = state.begin().unwrap();
        assert!(state.is_busy());

        let err = state.begin().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Busy { .. }));

        drop(guard);
        assert!(!state.is_busy());
        assert!(state.begin().is_ok());
    }

    #[tokio::test]
    async fn test_report_publishes_generic_message() {
        let (state, notifier) = state();
        let mut rx = notifier.subscribe();

        let result: Result<()> = Err(Error::http(500, "/home-banners/admin/create", "HTTP 500: stack trace"));
        let err = state.report(result, "Banner saved", "Failed to save banner").unwrap_err();
        assert_eq!(err.status_code(), Some(500));

        let notification = rx.recv().await.unwrap();
        assert_eq!(notification.notification_type, NotificationType::Error);
        assert_eq!(notification.message, "Failed to save banner");
    }

    #[tokio::test]
    async fn test_validation_errors_stay_local() {
        let (state, notifier) = state();
        let mut rx = notifier.subscribe();

        let result: Result<()> = Err(Error::validation("title", "Title is required"));
        assert!(state.report(result, "ok", "failed").is_err());
        assert!(rx.try_recv().is_err());
    }
}
