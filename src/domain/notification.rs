use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::order::{Order, OrderStatus};
use super::timestamp;

/// Outbound channel of a simulated notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    Sms,
    Email,
}

impl NotificationChannel {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationChannel::Sms => "sms",
            NotificationChannel::Email => "email",
        }
    }
}

impl fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A simulated SMS or email tied to one status change. Never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub order_id: String,
    #[serde(rename = "type")]
    pub channel: NotificationChannel,
    pub status: OrderStatus,
    pub message: String,
    #[serde(serialize_with = "timestamp::serialize")]
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// Builds the SMS + email pair for `order` having just reached its
    /// current status. Both entries share the order's `updated_at` as their
    /// event time.
    pub fn pair_for(order: &Order, sms: String, email: String) -> [Notification; 2] {
        let at = order.updated_at;
        let event_id = format!("{}-{}-{}", order.id, order.status, at.timestamp_millis());
        let build = |channel: NotificationChannel, message: String| Notification {
            id: format!("{}-{}", event_id, channel),
            order_id: order.id.clone(),
            channel,
            status: order.status,
            message,
            timestamp: at,
        };
        [
            build(NotificationChannel::Sms, sms),
            build(NotificationChannel::Email, email),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_shares_order_status_and_time() {
        let mut order = Order::seed(Utc::now());
        order.status = OrderStatus::Shipped;

        let [sms, email] = Notification::pair_for(&order, "s".into(), "e".into());

        assert_eq!(sms.channel, NotificationChannel::Sms);
        assert_eq!(email.channel, NotificationChannel::Email);
        assert_eq!(sms.order_id, email.order_id);
        assert_eq!(sms.status, OrderStatus::Shipped);
        assert_eq!(sms.timestamp, email.timestamp);
        assert_ne!(sms.id, email.id);
        assert!(sms.id.starts_with("ORD-001-shipped-"));
        assert!(email.id.ends_with("-email"));
    }

    #[test]
    fn channel_serializes_under_type_key() {
        let order = Order::seed(Utc::now());
        let [sms, _] = Notification::pair_for(&order, "hello".into(), "world".into());
        let value = serde_json::to_value(&sms).unwrap();
        assert_eq!(value["type"], "sms");
        assert_eq!(value["orderId"], "ORD-001");
        assert_eq!(value["message"], "hello");
    }
}
