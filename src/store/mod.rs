//! In-memory dashboard state and the pure functions that evolve it.

pub mod notification_log;
pub mod order_store;

pub use notification_log::*;
pub use order_store::*;

use chrono::{DateTime, Utc};

use crate::domain::{Notification, Order, OrderForm, OrderStatus};
use crate::error::OrderError;
use crate::webhook::{WebhookCall, WebhookHistory};

/// Everything the dashboard knows. Owned by exactly one task and replaced
/// wholesale on every change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub orders: OrderStore,
    pub notifications: NotificationLog,
    pub webhooks: WebhookHistory,
}

/// Outcome of applying a status change to [`DashboardState`].
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub state: DashboardState,
    pub order: Order,
    pub notifications: Vec<Notification>,
}

impl DashboardState {
    /// Session start: the seed order and nothing else.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self {
            orders: OrderStore::seeded(now),
            ..Self::default()
        }
    }

    pub fn create_order(
        &self,
        form: OrderForm,
        now: DateTime<Utc>,
    ) -> Result<(DashboardState, Order), OrderError> {
        let (orders, order) = self.orders.create_order(form, now)?;
        let state = DashboardState {
            orders,
            ..self.clone()
        };
        Ok((state, order))
    }

    pub fn transition(
        &self,
        id: &str,
        target: OrderStatus,
        now: DateTime<Utc>,
    ) -> Result<StatusChange, OrderError> {
        let transition = self.orders.transition(id, target, now)?;
        Ok(self.apply(transition))
    }

    pub fn advance(&self, id: &str, now: DateTime<Utc>) -> Result<StatusChange, OrderError> {
        let transition = self.orders.advance(id, now)?;
        Ok(self.apply(transition))
    }

    pub fn record_webhook(&self, call: WebhookCall) -> DashboardState {
        DashboardState {
            webhooks: self.webhooks.record(call),
            ..self.clone()
        }
    }

    /// Files the automatic deliveries for freshly sent notifications.
    pub fn record_deliveries(&self, deliveries: Vec<WebhookCall>) -> DashboardState {
        DashboardState {
            webhooks: self.webhooks.record_deliveries(deliveries),
            ..self.clone()
        }
    }

    fn apply(&self, transition: Transition) -> StatusChange {
        let notifications = transition.notifications.to_vec();
        let state = DashboardState {
            orders: transition.store,
            notifications: self.notifications.append(transition.notifications),
            webhooks: self.webhooks.clone(),
        };
        StatusChange {
            state,
            order: transition.order,
            notifications,
        }
    }
}
