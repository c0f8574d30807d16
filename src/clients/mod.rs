use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::domain::{Notification, Order, OrderForm, OrderStatus};
use crate::error::OrderError;
use crate::export::ExportSnapshot;
use crate::messages::{DashboardRequest, StatusChangeReceipt};
use crate::summary::DashboardSummary;
use crate::webhook::{WebhookCall, WebhookEndpoint};

#[macro_use]
mod macros;

// =============================================================================
// Dashboard Client
// =============================================================================

/// Handle to the dashboard actor. Cheap to clone; every clone talks to the
/// same state.
#[derive(Clone)]
pub struct DashboardClient {
    sender: mpsc::Sender<DashboardRequest>,
}

impl DashboardClient {
    pub fn new(sender: mpsc::Sender<DashboardRequest>) -> Self {
        Self { sender }
    }

    /// Manual method for special cases (no response needed)
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), OrderError> {
        debug!("Sending shutdown request");
        self.sender
            .send(DashboardRequest::Shutdown)
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(DashboardClient => fn create_order(form: OrderForm) -> Order as DashboardRequest::CreateOrder, Error = OrderError);
client_method!(DashboardClient => fn get_order(id: String) -> Option<Order> as DashboardRequest::GetOrder, Error = OrderError);
client_method!(DashboardClient => fn list_orders() -> Vec<Order> as DashboardRequest::ListOrders, Error = OrderError);
client_method!(DashboardClient => fn transition_order(id: String, status: OrderStatus) -> StatusChangeReceipt as DashboardRequest::TransitionOrder, Error = OrderError);
client_method!(DashboardClient => fn advance_order(id: String) -> StatusChangeReceipt as DashboardRequest::AdvanceOrder, Error = OrderError);
client_method!(DashboardClient => fn list_notifications() -> Vec<Notification> as DashboardRequest::ListNotifications, Error = OrderError);
client_method!(DashboardClient => fn recent_notifications(limit: usize) -> Vec<Notification> as DashboardRequest::RecentNotifications, Error = OrderError);
client_method!(DashboardClient => fn order_notifications(order_id: String) -> Vec<Notification> as DashboardRequest::OrderNotifications, Error = OrderError);
client_method!(DashboardClient => fn summary() -> DashboardSummary as DashboardRequest::Summary, Error = OrderError);
client_method!(DashboardClient => fn export_snapshot() -> ExportSnapshot as DashboardRequest::Export, Error = OrderError);
client_method!(DashboardClient => fn test_webhook(endpoint: WebhookEndpoint) -> WebhookCall as DashboardRequest::TestWebhook, Error = OrderError);
client_method!(DashboardClient => fn webhook_history() -> Vec<WebhookCall> as DashboardRequest::WebhookHistory, Error = OrderError);
