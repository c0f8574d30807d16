use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{NotificationChannel, OrderStatus};
use crate::store::DashboardState;

/// Headline counters, always derived from the current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_orders: usize,
    pub total_notifications: usize,
    pub delivered_orders: usize,
    pub revenue: f64,
    pub sms_count: usize,
    pub email_count: usize,
    pub orders_by_status: BTreeMap<OrderStatus, usize>,
    pub notifications_by_status: BTreeMap<OrderStatus, usize>,
}

impl DashboardSummary {
    pub fn from_state(state: &DashboardState) -> Self {
        let orders = state.orders.orders();
        let notifications = state.notifications.entries();

        let mut orders_by_status = zeroed();
        for order in orders {
            *orders_by_status.entry(order.status).or_default() += 1;
        }
        let mut notifications_by_status = zeroed();
        for notification in notifications {
            *notifications_by_status.entry(notification.status).or_default() += 1;
        }

        let count_channel =
            |channel: NotificationChannel| notifications.iter().filter(|n| n.channel == channel).count();

        Self {
            total_orders: orders.len(),
            total_notifications: notifications.len(),
            delivered_orders: orders_by_status[&OrderStatus::Delivered],
            revenue: orders.iter().map(|order| order.total).sum(),
            sms_count: count_channel(NotificationChannel::Sms),
            email_count: count_channel(NotificationChannel::Email),
            orders_by_status,
            notifications_by_status,
        }
    }
}

fn zeroed() -> BTreeMap<OrderStatus, usize> {
    OrderStatus::ALL.iter().map(|status| (*status, 0)).collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::OrderForm;

    #[test]
    fn empty_session_reports_seed_only() {
        let summary = DashboardSummary::from_state(&DashboardState::seeded(Utc::now()));
        assert_eq!(summary.total_orders, 1);
        assert_eq!(summary.total_notifications, 0);
        assert_eq!(summary.delivered_orders, 0);
        assert_eq!(summary.revenue, 129.99);
        assert_eq!(summary.orders_by_status.len(), 4);
        assert_eq!(summary.orders_by_status[&OrderStatus::Placed], 1);
        assert_eq!(summary.notifications_by_status[&OrderStatus::Delivered], 0);
    }

    #[test]
    fn counts_follow_transitions() {
        let now = Utc::now();
        let (mut state, _) = DashboardState::seeded(now)
            .create_order(OrderForm::new("Ann", "ann@example.com").with_total("20"), now)
            .unwrap();
        for _ in 0..3 {
            state = state.advance("ORD-001", Utc::now()).unwrap().state;
        }
        state = state.advance("ORD-002", Utc::now()).unwrap().state;

        let summary = DashboardSummary::from_state(&state);
        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.total_notifications, 8);
        assert_eq!(summary.sms_count, 4);
        assert_eq!(summary.email_count, 4);
        assert_eq!(summary.delivered_orders, 1);
        assert_eq!(summary.orders_by_status[&OrderStatus::Confirmed], 1);
        assert_eq!(summary.notifications_by_status[&OrderStatus::Confirmed], 4);
        assert!((summary.revenue - 149.99).abs() < 1e-9);
    }
}
