// src/models/order.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::serde_helpers::null_as_default;
use super::Identified;
use crate::error::Error;
use crate::types::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Display order of the status tabs
    pub const ALL: [OrderStatus; 6] = [
        Self::Pending,
        Self::Paid,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Processing => "PROCESSING",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::validation("status", format!("unknown order status '{}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    pub status: OrderStatus,
}

impl Order {
    /// Calendar date of `created_at`; accepts RFC 3339, zone-less timestamps and plain dates
    pub fn created_date(&self) -> Option<NaiveDate> {
        let raw = self.created_at.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt.date());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}

impl Identified for Order {
    fn entity_id(&self) -> Option<EntityId> {
        Some(self.id)
    }
}

/// Body of `PATCH /orders/admin/{id}/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
    pub notes: String,
}

impl StatusUpdate {
    pub fn new(status: OrderStatus, notes: Option<String>) -> Self {
        let notes = notes
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("Status updated to {}", status));
        Self { status, notes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_as_upper_case() {
        let json = serde_json::to_string(&OrderStatus::Processing).unwrap();
        assert_eq!(json, "\"PROCESSING\"");
        assert_eq!("shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert!("LOST".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_created_date_formats() {
        let mut order: Order = serde_json::from_str(
            r#"{"id": 7, "userId": 2, "total": 10.5, "createdAt": "2024-03-01T09:30:00", "status": "PENDING"}"#,
        )
        .unwrap();
        assert_eq!(order.created_date(), NaiveDate::from_ymd_opt(2024, 3, 1));

        order.created_at = Some("2024-03-02T23:00:00Z".to_string());
        assert_eq!(order.created_date(), NaiveDate::from_ymd_opt(2024, 3, 2));

        order.created_at = Some("garbage".to_string());
        assert_eq!(order.created_date(), None);
    }

    #[test]
    fn test_default_note() {
        let update = StatusUpdate::new(OrderStatus::Paid, None);
        assert_eq!(update.notes, "Status updated to PAID");

        let update = StatusUpdate::new(OrderStatus::Paid, Some("wire received".to_string()));
        assert_eq!(update.notes, "wire received");
    }
}
