use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an order as reported by the backend.
///
/// Values the dashboard does not know are kept verbatim in `Unrecognized` so a
/// newer backend never breaks deserialization; they simply offer no actions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    ReadyForPickup,
    OutForDelivery,
    Delivered,
    Cancelled,
    Unrecognized(String),
}

impl OrderStatus {
    /// The seven statuses the workflow table knows about.
    pub const KNOWN: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::ReadyForPickup,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Wire representation, e.g. `READY_FOR_PICKUP`.
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::ReadyForPickup => "READY_FOR_PICKUP",
            OrderStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Unrecognized(raw) => raw,
        }
    }

    /// Human label used on buttons and badges (`READY FOR PICKUP`).
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, OrderStatus::Unrecognized(_))
    }

    /// Counted as "active" by the order dashboards.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending
                | OrderStatus::Confirmed
                | OrderStatus::Preparing
                | OrderStatus::ReadyForPickup
                | OrderStatus::OutForDelivery
        )
    }

    /// Badge colour name used by the order tables.
    pub fn badge_color(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "warning",
            OrderStatus::Confirmed => "info",
            OrderStatus::Preparing => "purple",
            OrderStatus::ReadyForPickup => "success",
            OrderStatus::OutForDelivery => "indigo",
            OrderStatus::Delivered => "success",
            OrderStatus::Cancelled => "failure",
            OrderStatus::Unrecognized(_) => "gray",
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "PENDING" => OrderStatus::Pending,
            "CONFIRMED" => OrderStatus::Confirmed,
            "PREPARING" => OrderStatus::Preparing,
            "READY_FOR_PICKUP" => OrderStatus::ReadyForPickup,
            "OUT_FOR_DELIVERY" => OrderStatus::OutForDelivery,
            "DELIVERED" => OrderStatus::Delivered,
            "CANCELLED" => OrderStatus::Cancelled,
            other => OrderStatus::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match OrderStatus::from(raw.as_str()) {
            OrderStatus::Unrecognized(_) => OrderStatus::Unrecognized(raw),
            known => known,
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_statuses() {
        for status in OrderStatus::KNOWN {
            assert_eq!(OrderStatus::from(status.as_str()), status);
        }
    }

    #[test]
    fn unrecognized_status_survives_json() {
        let status: OrderStatus = serde_json::from_str("\"ON_HOLD\"").unwrap();
        assert_eq!(status, OrderStatus::Unrecognized("ON_HOLD".to_string()));
        assert!(!status.is_known());
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"ON_HOLD\"");
    }

    #[test]
    fn label_replaces_every_underscore() {
        assert_eq!(OrderStatus::ReadyForPickup.label(), "READY FOR PICKUP");
    }

    #[test]
    fn terminal_statuses_are_not_active() {
        assert!(!OrderStatus::Delivered.is_active());
        assert!(!OrderStatus::Cancelled.is_active());
        assert!(OrderStatus::OutForDelivery.is_active());
    }
}
