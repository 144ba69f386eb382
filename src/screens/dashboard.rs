// src/screens/dashboard.rs

use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::{Order, OrderStatus, Product};
use crate::screens::{ScreenContext, ScreenState};
use crate::store::{FailurePolicy, OrdersWithStatus, RemoteCollectionStore};
use crate::views::DashboardStats;

#[derive(Debug)]
pub struct DashboardScreen {
    state: ScreenState,
    products: RemoteCollectionStore<Product>,
    paid: RemoteCollectionStore<Order>,
    pending: RemoteCollectionStore<Order>,
    stats: RwLock<DashboardStats>,
}

impl DashboardScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        let notifier = ctx.notifier.clone();
        Self {
            state: ScreenState::new("dashboard", ctx),
            products: RemoteCollectionStore::new("products", notifier.clone()),
            paid: RemoteCollectionStore::new("paid orders", notifier.clone())
                .with_failure_policy(FailurePolicy::Clear),
            pending: RemoteCollectionStore::new("pending orders", notifier)
                .with_failure_policy(FailurePolicy::Clear),
            stats: RwLock::new(DashboardStats::default()),
        }
    }

    /// Products and paid orders are fetched together, pending orders after
    pub async fn load(&self) -> Result<DashboardStats> {
        let _busy = self.state.begin()?;
        let client = self.state.client();
        let products_api = client.products();
        let paid_source = OrdersWithStatus {
            api: client.orders(),
            status: OrderStatus::Paid,
        };
        let pending_source = OrdersWithStatus {
            api: client.orders(),
            status: OrderStatus::Pending,
        };

        let (products, paid) = futures::try_join!(
            self.products.load(&products_api),
            self.paid.load(&paid_source)
        )?;
        let pending = self.pending.load(&pending_source).await?;

        let stats = DashboardStats::compute(&products, &paid, &pending);
        *self.stats.write().await = stats;
        Ok(stats)
    }

    pub async fn stats(&self) -> DashboardStats {
        *self.stats.read().await
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_busy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notifier;
    use crate::platform::HttpMethod;
    use crate::testing::MockNetwork;
    use serde_json::json;

    #[tokio::test]
    async fn test_dashboard_aggregate() {
        let network = MockNetwork::new();
        network.respond_json(
            HttpMethod::Get,
            "/products/admin/all",
            json!([{"id": 1, "name": "p1", "sellPrice": 1}, {"id": 2, "name": "p2", "sellPrice": 2}]),
        );
        network.respond_json(
            HttpMethod::Get,
            "/orders/admin/status/PAID",
            json!([
                {"id": 1, "userId": 1, "total": 10, "status": "PAID"},
                {"id": 2, "userId": 1, "total": 5, "status": "PAID"}
            ]),
        );
        network.respond_json(
            HttpMethod::Get,
            "/orders/admin/status/PENDING",
            json!([{"id": 3, "userId": 2, "total": 40, "status": "PENDING"}]),
        );

        let screen = DashboardScreen::new(ScreenContext::new(network.client(), Notifier::new()));
        let stats = screen.load().await.unwrap();

        assert_eq!(stats.products_count, 2);
        assert_eq!(stats.orders_count, 3);
        assert_eq!(stats.pending_orders, 1);
        assert_eq!(stats.formatted_revenue(), "15.00");
        assert_eq!(screen.stats().await, stats);
        assert_eq!(network.request_count(), 3);
    }

    #[tokio::test]
    async fn test_failed_fetch_skips_pending() {
        let network = MockNetwork::new();
        network.respond_json(HttpMethod::Get, "/products/admin/all", json!([]));
        network.respond(HttpMethod::Get, "/orders/admin/status/PAID", 500, "");

        let screen = DashboardScreen::new(ScreenContext::new(network.client(), Notifier::new()));
        assert!(screen.load().await.is_err());
        assert_eq!(network.calls_to(HttpMethod::Get, "/orders/admin/status/PENDING"), 0);
        assert!(!screen.is_loading());
    }
}
