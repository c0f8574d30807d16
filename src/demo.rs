//! Scripted session used by the binary: the same clicks a visitor would make.

use tracing::{info, instrument};

use crate::clients::DashboardClient;
use crate::domain::{Order, OrderForm};
use crate::error::OrderError;
use crate::summary::DashboardSummary;
use crate::webhook::{WebhookCall, WebhookEndpoint};

#[derive(Debug, Clone, PartialEq)]
pub struct WalkthroughReport {
    pub created: Order,
    pub transitions: usize,
    pub webhook: WebhookCall,
    pub summary: DashboardSummary,
}

/// Presses "Advance" on `order_id` until it is delivered. Returns how many
/// transitions were applied (zero when it already was).
#[instrument(skip(client))]
pub async fn advance_to_delivered(client: &DashboardClient, order_id: &str) -> Result<usize, OrderError> {
    let order = client
        .get_order(order_id.to_string())
        .await?
        .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

    let mut status = order.status;
    let mut steps = 0;
    while status.next().is_some() {
        let receipt = client.advance_order(order_id.to_string()).await?;
        status = receipt.order.status;
        steps += 1;
        info!(status = %status, label = status.label(), "Advanced");
    }
    Ok(steps)
}

/// Adds a second order, delivers every order, and fires one webhook test.
#[instrument(skip(client))]
pub async fn run_walkthrough(client: &DashboardClient) -> Result<WalkthroughReport, OrderError> {
    let form = OrderForm::new("Marcus McKinney", "marcus.mckinney@email.com")
        .with_phone("+1 (555) 987-6543")
        .with_items("Smart Watch, Charging Dock")
        .with_total("249.50");
    let created = client.create_order(form).await?;
    info!(order_id = %created.id, "Order created");

    let mut transitions = 0;
    for order in client.list_orders().await? {
        transitions += advance_to_delivered(client, &order.id).await?;
    }

    let endpoint = WebhookEndpoint::OrderStatus;
    info!(endpoint_name = endpoint.name(), url = %endpoint.url(), "Testing webhook endpoint");
    let webhook = client.test_webhook(endpoint).await?;
    info!(
        endpoint = %webhook.endpoint,
        response = webhook.status_line(),
        response_time_ms = webhook.response_time_ms,
        "Webhook test finished"
    );

    let summary = client.summary().await?;
    Ok(WalkthroughReport {
        created,
        transitions,
        webhook,
        summary,
    })
}
