//! Order DTOs and their mapping to domain records
//!
//! - `OrderPayload`: POST/PUT body
//! - `OrderStatusPayload`: PATCH status body
//! - `OrderView`: response representation of an order

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{
    NewOrder, Order, OrderChanges, OrderId, OrderSize, OrderStatus, UserId,
};

// ============================================================================
// Request bodies
// ============================================================================

/// Order body for create and update.
///
/// Unknown fields (`id`, `order_status`, ...) are ignored.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderPayload {
    /// SMALL | MEDIUM | LARGE | EXTRA_LARGE
    #[schema(example = "MEDIUM")]
    pub size: OrderSize,
    #[schema(example = 2)]
    pub quantity: i32,
    #[schema(example = "vanilla")]
    pub flavour: String,
}

impl OrderPayload {
    pub fn into_new_order(self, user_id: UserId) -> NewOrder {
        NewOrder {
            size: self.size,
            quantity: self.quantity,
            flavour: self.flavour,
            user_id,
        }
    }

    pub fn into_changes(self) -> OrderChanges {
        OrderChanges {
            size: self.size,
            quantity: self.quantity,
            flavour: self.flavour,
        }
    }
}

/// Status transition body
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderStatusPayload {
    /// PENDING | IN_TRANSIT | DELIVERED
    #[schema(example = "IN_TRANSIT")]
    pub order_status: OrderStatus,
}

// ============================================================================
// Response body
// ============================================================================

/// Order as returned by every order endpoint
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrderView {
    #[schema(example = 1)]
    pub id: OrderId,
    pub size: OrderSize,
    #[schema(example = 2)]
    pub quantity: i32,
    #[schema(example = "vanilla")]
    pub flavour: String,
    pub order_status: OrderStatus,
    #[schema(example = 1)]
    pub user_id: UserId,
    pub date_created: DateTime<Utc>,
}

impl From<&Order> for OrderView {
    fn from(o: &Order) -> Self {
        Self {
            id: o.id,
            size: o.size,
            quantity: o.quantity,
            flavour: o.flavour.clone(),
            order_status: o.order_status,
            user_id: o.user_id,
            date_created: o.date_created,
        }
    }
}

impl From<Order> for OrderView {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            size: o.size,
            quantity: o.quantity,
            flavour: o.flavour,
            order_status: o.order_status,
            user_id: o.user_id,
            date_created: o.date_created,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_payload_ignores_unknown_fields() {
        let p: OrderPayload = serde_json::from_value(json!({
            "id": 99,
            "size": "EXTRA_LARGE",
            "quantity": 3,
            "flavour": "strawberry",
            "order_status": "DELIVERED"
        }))
        .unwrap();
        let new_order = p.into_new_order(4);
        assert_eq!(new_order.size, OrderSize::ExtraLarge);
        assert_eq!(new_order.quantity, 3);
        assert_eq!(new_order.flavour, "strawberry");
        assert_eq!(new_order.user_id, 4);
    }

    #[test]
    fn test_payload_requires_all_fields() {
        let missing_flavour = serde_json::from_value::<OrderPayload>(json!({
            "size": "SMALL",
            "quantity": 1
        }));
        assert!(missing_flavour.is_err());

        let bad_size = serde_json::from_value::<OrderPayload>(json!({
            "size": "TINY",
            "quantity": 1,
            "flavour": "x"
        }));
        assert!(bad_size.is_err());

        let string_quantity = serde_json::from_value::<OrderPayload>(json!({
            "size": "SMALL",
            "quantity": "two",
            "flavour": "x"
        }));
        assert!(string_quantity.is_err());
    }

    #[test]
    fn test_payload_accepts_non_positive_quantity() {
        let p: OrderPayload = serde_json::from_value(json!({
            "size": "SMALL",
            "quantity": -1,
            "flavour": ""
        }))
        .unwrap();
        let changes = p.into_changes();
        assert_eq!(changes.quantity, -1);
        assert_eq!(changes.flavour, "");
    }

    #[test]
    fn test_status_payload_closed_set() {
        for (text, status) in [
            ("PENDING", OrderStatus::Pending),
            ("IN_TRANSIT", OrderStatus::InTransit),
            ("DELIVERED", OrderStatus::Delivered),
        ] {
            let p: OrderStatusPayload =
                serde_json::from_value(json!({ "order_status": text })).unwrap();
            assert_eq!(p.order_status, status);
        }
        assert!(
            serde_json::from_value::<OrderStatusPayload>(json!({"order_status": "LOST"}))
                .is_err()
        );
        assert!(serde_json::from_value::<OrderStatusPayload>(json!({})).is_err());
    }

    #[test]
    fn test_view_serialization() {
        let order = Order {
            id: 12,
            size: OrderSize::Medium,
            quantity: 2,
            flavour: "vanilla".to_string(),
            order_status: OrderStatus::InTransit,
            user_id: 3,
            date_created: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };
        let value = serde_json::to_value(OrderView::from(&order)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 12,
                "size": "MEDIUM",
                "quantity": 2,
                "flavour": "vanilla",
                "order_status": "IN_TRANSIT",
                "user_id": 3,
                "date_created": "2024-05-01T12:00:00Z"
            })
        );
        assert_eq!(OrderView::from(order.clone()), OrderView::from(&order));
    }
}
