// src/screens/orders.rs

use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::models::{Order, OrderStatus, StatusUpdate};
use crate::screens::{ScreenContext, ScreenState};
use crate::store::{FailurePolicy, OrdersWithStatus, RemoteCollectionStore};
use crate::types::EntityId;
use crate::workflow::{check_delete, check_transition, next_action};

/// Orders listed one status tab at a time
#[derive(Debug)]
pub struct OrdersScreen {
    state: ScreenState,
    orders: RemoteCollectionStore<Order>,
    selected: RwLock<OrderStatus>,
}

impl OrdersScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        let notifier = ctx.notifier.clone();
        Self {
            state: ScreenState::new("orders", ctx),
            orders: RemoteCollectionStore::new("orders", notifier)
                .with_failure_policy(FailurePolicy::Clear),
            selected: RwLock::new(OrderStatus::default()),
        }
    }

    pub async fn selected_status(&self) -> OrderStatus {
        *self.selected.read().await
    }

    pub async fn select(&self, status: OrderStatus) -> Result<Vec<Order>> {
        let _busy = self.state.begin()?;
        *self.selected.write().await = status;
        self.reload().await
    }

    pub async fn load(&self) -> Result<Vec<Order>> {
        let _busy = self.state.begin()?;
        self.reload().await
    }

    pub async fn orders(&self) -> Vec<Order> {
        self.orders.snapshot().await
    }

    /// Reloads the selected tab, so a moved order drops out of view
    async fn reload(&self) -> Result<Vec<Order>> {
        let source = OrdersWithStatus {
            api: self.state.client().orders(),
            status: *self.selected.read().await,
        };
        self.orders.invalidate_and_refetch(&source).await
    }

    /// Listed orders come from the snapshot; anything else is fetched so
    /// the gate always sees a server-side status
    async fn find(&self, order_id: EntityId) -> Result<Order> {
        if let Some(order) = self.orders.find(order_id).await {
            return Ok(order);
        }
        self.state
            .client()
            .orders()
            .get(order_id)
            .await
            .map_err(|e| self.state.fail(e, "Failed to load order"))
    }

    /// Moves an order to `target`. The gate is checked against the listed
    /// status before any request is made.
    pub async fn transition(
        &self,
        order_id: EntityId,
        target: OrderStatus,
        note: Option<String>,
    ) -> Result<()> {
        let _busy = self.state.begin()?;
        let order = self.find(order_id).await?;
        check_transition(order.status, target)?;
        self.apply(order_id, target, note).await
    }

    /// Applies the single forward action offered for the order's status
    pub async fn advance(&self, order_id: EntityId, note: Option<String>) -> Result<OrderStatus> {
        let _busy = self.state.begin()?;
        let order = self.find(order_id).await?;
        let action = next_action(order.status)
            .ok_or_else(|| Error::workflow(order.status.as_str(), "advance").source("orders"))?;
        self.apply(order_id, action.target, note).await?;
        Ok(action.target)
    }

    async fn apply(&self, order_id: EntityId, target: OrderStatus, note: Option<String>) -> Result<()> {
        let update = StatusUpdate::new(target, note);
        let result = self.state.client().orders().update_status(order_id, &update).await;
        self.state.report(
            result,
            &format!("Order #{} moved to {}", order_id, target),
            "Failed to update status",
        )?;
        self.reload().await?;
        Ok(())
    }

    pub async fn delete(&self, order_id: EntityId) -> Result<()> {
        let _busy = self.state.begin()?;
        let order = self.find(order_id).await?;
        check_delete(order.status)?;

        let result = self.state.client().orders().delete(order_id).await;
        self.state
            .report(result, "Order deleted", "Failed to delete order")?;
        self.reload().await?;
        Ok(())
    }
}
