//! Domain records: users and the orders they own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

pub type UserId = i64;
pub type OrderId = i64;

// ============================================================
// ENUMERATED FIELDS
// ============================================================

/// Order size. Serialized as SCREAMING_SNAKE_CASE, stored as the same text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSize {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl OrderSize {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderSize::Small => "SMALL",
            OrderSize::Medium => "MEDIUM",
            OrderSize::Large => "LARGE",
            OrderSize::ExtraLarge => "EXTRA_LARGE",
        }
    }
}

/// Delivery status. Any value may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    InTransit,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::InTransit => "IN_TRANSIT",
            OrderStatus::Delivered => "DELIVERED",
        }
    }
}

/// Text that is not one of the enumerated values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} value: {value}")]
pub struct UnknownVariant {
    pub field: &'static str,
    pub value: String,
}

impl FromStr for OrderSize {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SMALL" => Ok(OrderSize::Small),
            "MEDIUM" => Ok(OrderSize::Medium),
            "LARGE" => Ok(OrderSize::Large),
            "EXTRA_LARGE" => Ok(OrderSize::ExtraLarge),
            other => Err(UnknownVariant {
                field: "size",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "IN_TRANSIT" => Ok(OrderStatus::InTransit),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            other => Err(UnknownVariant {
                field: "order_status",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for OrderSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================
// RECORDS
// ============================================================

/// User account
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// argon2 PHC string
    pub password_hash: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Persisted order
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub size: OrderSize,
    pub quantity: i32,
    pub flavour: String,
    pub order_status: OrderStatus,
    pub user_id: UserId,
    pub date_created: DateTime<Utc>,
}

/// Fields needed to insert an order. Status always starts at PENDING.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub size: OrderSize,
    pub quantity: i32,
    pub flavour: String,
    pub user_id: UserId,
}

/// The client-editable part of an order (PUT)
#[derive(Debug, Clone)]
pub struct OrderChanges {
    pub size: OrderSize,
    pub quantity: i32,
    pub flavour: String,
}

impl Order {
    pub fn apply(&mut self, changes: OrderChanges) {
        self.size = changes.size;
        self.quantity = changes.quantity;
        self.flavour = changes.flavour;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_text_round_trips_through_db_form() {
        for size in [
            OrderSize::Small,
            OrderSize::Medium,
            OrderSize::Large,
            OrderSize::ExtraLarge,
        ] {
            assert_eq!(size.as_str().parse::<OrderSize>().unwrap(), size);
        }
    }

    #[test]
    fn test_status_serde_uses_screaming_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InTransit).unwrap(),
            "\"IN_TRANSIT\""
        );
        let s: OrderStatus = serde_json::from_str("\"DELIVERED\"").unwrap();
        assert_eq!(s, OrderStatus::Delivered);
        assert!(serde_json::from_str::<OrderStatus>("\"in_transit\"").is_err());
        assert!(serde_json::from_str::<OrderStatus>("\"CANCELLED\"").is_err());
    }

    #[test]
    fn test_size_serde_extra_large() {
        let s: OrderSize = serde_json::from_str("\"EXTRA_LARGE\"").unwrap();
        assert_eq!(s, OrderSize::ExtraLarge);
        assert!(serde_json::from_str::<OrderSize>("\"HUGE\"").is_err());
    }

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_unknown_variant_message() {
        let err = "SHIPPED".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown order_status value: SHIPPED");
    }

    #[test]
    fn test_apply_changes_keeps_status_and_owner() {
        let mut order = Order {
            id: 7,
            size: OrderSize::Small,
            quantity: 1,
            flavour: "pepperoni".to_string(),
            order_status: OrderStatus::Delivered,
            user_id: 3,
            date_created: Utc::now(),
        };
        order.apply(OrderChanges {
            size: OrderSize::Large,
            quantity: 4,
            flavour: "margherita".to_string(),
        });
        assert_eq!(order.size, OrderSize::Large);
        assert_eq!(order.quantity, 4);
        assert_eq!(order.flavour, "margherita");
        assert_eq!(order.order_status, OrderStatus::Delivered);
        assert_eq!(order.user_id, 3);
    }
}
