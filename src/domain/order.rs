use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::timestamp;

/// Fulfillment stage of an order.
///
/// The variants form a strict progression; [`OrderStatus::next`] is the only
/// way to move forward and there is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Placed,
    Confirmed,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Placed,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    /// The single legal successor, or `None` once delivered.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Placed => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// Human readable label, e.g. "Order Placed".
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Placed => "Order Placed",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a customer order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub status: OrderStatus,
    pub items: Vec<String>,
    pub total: f64,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "timestamp::serialize")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// The order every session starts with.
    pub fn seed(now: DateTime<Utc>) -> Self {
        Self {
            id: "ORD-001".to_string(),
            customer_name: "Sarah Johnson".to_string(),
            customer_phone: "+1 (555) 123-4567".to_string(),
            customer_email: "sarah.johnson@email.com".to_string(),
            status: OrderStatus::Placed,
            items: vec!["Wireless Headphones".to_string(), "Phone Case".to_string()],
            total: 129.99,
            created_at: now,
            updated_at: now,
        }
    }
}
