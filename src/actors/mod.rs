use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use crate::clients::DashboardClient;
use crate::domain::{Order, OrderForm};
use crate::error::OrderError;
use crate::export::ExportSnapshot;
use crate::messages::{DashboardRequest, ServiceResponse, StatusChangeReceipt};
use crate::simulation::SimulationProvider;
use crate::store::{DashboardState, StatusChange};
use crate::summary::DashboardSummary;
use crate::webhook::{WebhookCall, WebhookEndpoint};

// =============================================================================
// DASHBOARD SERVICE
// =============================================================================

/// Sole owner of [`DashboardState`].
///
/// Handlers compute a new state with the pure functions in
/// [`crate::store`] and swap it in; nothing else ever touches the state.
pub struct DashboardService {
    receiver: mpsc::Receiver<DashboardRequest>,
    // Weak so that background tasks can report back without keeping the
    // channel open after every client is gone.
    follow_up: mpsc::WeakSender<DashboardRequest>,
    state: DashboardState,
    simulation: Arc<dyn SimulationProvider>,
}

impl DashboardService {
    pub fn new(
        buffer_size: usize,
        state: DashboardState,
        simulation: Arc<dyn SimulationProvider>,
    ) -> (Self, DashboardClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            follow_up: sender.downgrade(),
            state,
            simulation,
        };
        let client = DashboardClient::new(sender);
        (service, client)
    }

    #[instrument(name = "dashboard_service", skip(self))]
    pub async fn run(mut self) {
        info!(orders = self.state.orders.len(), "DashboardService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                DashboardRequest::CreateOrder { form, respond_to } => {
                    self.handle_create_order(form, respond_to);
                }
                DashboardRequest::GetOrder { id, respond_to } => {
                    self.handle_get_order(id, respond_to);
                }
                DashboardRequest::ListOrders { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.orders.orders().to_vec()));
                }
                DashboardRequest::TransitionOrder { id, status, respond_to } => {
                    let result = self.state.transition(&id, status, Utc::now());
                    self.handle_status_change(id, result, respond_to);
                }
                DashboardRequest::AdvanceOrder { id, respond_to } => {
                    let result = self.state.advance(&id, Utc::now());
                    self.handle_status_change(id, result, respond_to);
                }
                DashboardRequest::ListNotifications { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.notifications.newest_first()));
                }
                DashboardRequest::RecentNotifications { limit, respond_to } => {
                    let _ = respond_to.send(Ok(self.state.notifications.recent(limit)));
                }
                DashboardRequest::OrderNotifications { order_id, respond_to } => {
                    let _ = respond_to.send(Ok(self.state.notifications.for_order(&order_id)));
                }
                DashboardRequest::Summary { respond_to } => {
                    self.handle_summary(respond_to);
                }
                DashboardRequest::Export { respond_to } => {
                    let snapshot = ExportSnapshot::capture(&self.state, Utc::now());
                    let _ = respond_to.send(Ok(snapshot));
                }
                DashboardRequest::TestWebhook { endpoint, respond_to } => {
                    self.handle_test_webhook_background(endpoint, respond_to);
                }
                DashboardRequest::WebhookHistory { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.webhooks.calls().to_vec()));
                }
                DashboardRequest::RecordWebhookCall { call } => {
                    debug!(call_id = %call.id, success = call.success, "Recording webhook call");
                    self.state = self.state.record_webhook(call);
                }
                DashboardRequest::Shutdown => {
                    info!("DashboardService shutting down");
                    break;
                }
            }
        }
        info!("DashboardService stopped");
    }

    #[instrument(fields(customer = %form.customer_name), skip(self, form, respond_to))]
    fn handle_create_order(&mut self, form: OrderForm, respond_to: ServiceResponse<Order, OrderError>) {
        debug!("Processing create_order request");

        let result = match self.state.create_order(form, Utc::now()) {
            Ok((state, order)) => {
                self.state = state;
                info!(order_id = %order.id, total = order.total, "Order created");
                Ok(order)
            }
            Err(e) => {
                warn!(error = %e, "Order rejected");
                Err(e)
            }
        };

        let _ = respond_to.send(result);
    }

    #[instrument(fields(order_id = %id), skip(self, respond_to))]
    fn handle_get_order(&self, id: String, respond_to: ServiceResponse<Option<Order>, OrderError>) {
        debug!("Processing get_order request");
        let order = self.state.orders.get(&id).cloned();
        if order.is_none() {
            debug!("Order not found");
        }
        let _ = respond_to.send(Ok(order));
    }

    #[instrument(fields(order_id = %id), skip(self, result, respond_to))]
    fn handle_status_change(
        &mut self,
        id: String,
        result: Result<StatusChange, OrderError>,
        respond_to: ServiceResponse<StatusChangeReceipt, OrderError>,
    ) {
        let result = match result {
            Ok(change) => {
                let deliveries: Vec<WebhookCall> = change
                    .notifications
                    .iter()
                    .map(|notification| {
                        WebhookCall::delivery(notification, self.simulation.deliver_notification(notification))
                    })
                    .collect();
                let failed = deliveries.iter().filter(|call| !call.success).count();
                if failed > 0 {
                    warn!(failed, "Notification delivery failed");
                }
                self.state = change.state.record_deliveries(deliveries);
                info!(
                    status = %change.order.status,
                    label = change.order.status.label(),
                    notification_count = change.notifications.len(),
                    "Order status updated"
                );
                Ok(StatusChangeReceipt {
                    order: change.order,
                    notifications: change.notifications,
                })
            }
            Err(e) => {
                error!(error = %e, "Status change refused");
                Err(e)
            }
        };

        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_summary(&self, respond_to: ServiceResponse<DashboardSummary, OrderError>) {
        let summary = DashboardSummary::from_state(&self.state);
        debug!(
            orders = summary.total_orders,
            notifications = summary.total_notifications,
            "Summary computed"
        );
        let _ = respond_to.send(Ok(summary));
    }

    /// The simulated round-trip runs in its own task so the actor keeps
    /// serving; the finished call is recorded through a follow-up message
    /// before the caller is answered.
    #[instrument(fields(endpoint = %endpoint), skip(self, respond_to))]
    fn handle_test_webhook_background(
        &self,
        endpoint: WebhookEndpoint,
        respond_to: ServiceResponse<WebhookCall, OrderError>,
    ) {
        debug!("Processing test_webhook request");
        let simulation = Arc::clone(&self.simulation);
        let follow_up = self.follow_up.clone();

        tokio::spawn(async move {
            let outcome = simulation.deliver_webhook(endpoint).await;
            let call = WebhookCall::test(endpoint, outcome, Utc::now());

            if call.success {
                info!(call_id = %call.id, response_time_ms = call.response_time_ms, "Webhook test successful");
            } else {
                warn!(call_id = %call.id, "Webhook test failed - check endpoint configuration");
            }

            let recorded = match follow_up.upgrade() {
                Some(sender) => sender
                    .send(DashboardRequest::RecordWebhookCall { call: call.clone() })
                    .await
                    .is_ok(),
                None => false,
            };
            if !recorded {
                warn!(call_id = %call.id, "Dashboard gone; webhook call not recorded");
            }

            let _ = respond_to.send(Ok(call));
        });
    }
}
