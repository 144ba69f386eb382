// src/workflow.rs - Order status gate

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::OrderStatus;

/// Forward action offered for an order in a given status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderAction {
    pub target: OrderStatus,
    pub label: &'static str,
}

/// The one forward action offered from `status`, if any.
///
/// Shipped, delivered and cancelled orders cannot be moved from here;
/// the backend owns everything past shipping.
pub fn next_action(status: OrderStatus) -> Option<OrderAction> {
    let (target, label) = match status {
        OrderStatus::Pending => (OrderStatus::Paid, "Mark as Paid"),
        OrderStatus::Paid => (OrderStatus::Processing, "Process Order"),
        OrderStatus::Processing => (OrderStatus::Shipped, "Ship Order"),
        OrderStatus::Shipped | OrderStatus::Delivered | OrderStatus::Cancelled => return None,
    };
    Some(OrderAction { target, label })
}

/// Orders that entered the payment pipeline are never deleted
pub fn can_delete(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::Pending | OrderStatus::Cancelled)
}

pub fn check_transition(from: OrderStatus, target: OrderStatus) -> Result<OrderAction> {
    next_action(from)
        .filter(|action| action.target == target)
        .ok_or_else(|| Error::workflow(from.as_str(), format!("move to {}", target)).source("workflow"))
}

pub fn check_delete(status: OrderStatus) -> Result<()> {
    if can_delete(status) {
        Ok(())
    } else {
        Err(Error::workflow(status.as_str(), "delete").source("workflow"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_gate_table() {
        let expected = [
            (OrderStatus::Pending, Some((OrderStatus::Paid, "Mark as Paid")), true),
            (OrderStatus::Paid, Some((OrderStatus::Processing, "Process Order")), false),
            (OrderStatus::Processing, Some((OrderStatus::Shipped, "Ship Order")), false),
            (OrderStatus::Shipped, None, false),
            (OrderStatus::Delivered, None, false),
            (OrderStatus::Cancelled, None, true),
        ];

        for (status, action, deletable) in expected {
            assert_eq!(
                next_action(status).map(|a| (a.target, a.label)),
                action,
                "forward action for {}",
                status
            );
            assert_eq!(can_delete(status), deletable, "delete for {}", status);
        }
    }

    #[test]
    fn test_every_status_is_covered() {
        let with_action = OrderStatus::ALL.iter().filter(|s| next_action(**s).is_some()).count();
        assert_eq!(with_action, 3);
    }

    #[test]
    fn test_check_transition() {
        let action = tokio_test::assert_ok!(check_transition(OrderStatus::Pending, OrderStatus::Paid));
        assert_eq!(action.label, "Mark as Paid");

        let err = tokio_test::assert_err!(check_transition(OrderStatus::Pending, OrderStatus::Shipped));
        assert!(matches!(err.kind, ErrorKind::Workflow { .. }));

        tokio_test::assert_err!(check_transition(OrderStatus::Delivered, OrderStatus::Cancelled));
    }

    #[test]
    fn test_check_delete() {
        assert!(check_delete(OrderStatus::Cancelled).is_ok());
        assert!(check_delete(OrderStatus::Shipped).is_err());
    }
}
