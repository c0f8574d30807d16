//! # Mock Framework
//!
//! Utilities for testing code that drives a [`DashboardClient`] without
//! starting the real actor.
//!
//! Use [`create_mock_client`] to get a client and the receiver its requests
//! land on, then the `expect_*` helpers to assert each request and answer it.

use tokio::sync::mpsc;

use crate::clients::DashboardClient;
use crate::domain::{Order, OrderForm};
use crate::error::OrderError;
use crate::messages::{DashboardRequest, ServiceResponse, StatusChangeReceipt};

/// Creates a client whose requests arrive on the returned receiver.
pub fn create_mock_client(buffer_size: usize) -> (DashboardClient, mpsc::Receiver<DashboardRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (DashboardClient::new(sender), receiver)
}

/// Helper to verify that the next message is a CreateOrder request
pub async fn expect_create_order(
    receiver: &mut mpsc::Receiver<DashboardRequest>,
) -> Option<(OrderForm, ServiceResponse<Order, OrderError>)> {
    match receiver.recv().await {
        Some(DashboardRequest::CreateOrder { form, respond_to }) => Some((form, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a GetOrder request
pub async fn expect_get_order(
    receiver: &mut mpsc::Receiver<DashboardRequest>,
) -> Option<(String, ServiceResponse<Option<Order>, OrderError>)> {
    match receiver.recv().await {
        Some(DashboardRequest::GetOrder { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an AdvanceOrder request
pub async fn expect_advance_order(
    receiver: &mut mpsc::Receiver<DashboardRequest>,
) -> Option<(String, ServiceResponse<StatusChangeReceipt, OrderError>)> {
    match receiver.recv().await {
        Some(DashboardRequest::AdvanceOrder { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let create_task = tokio::spawn(async move {
            client
                .create_order(OrderForm::new("Test", "test@example.com"))
                .await
        });

        let (form, responder) = expect_create_order(&mut receiver)
            .await
            .expect("Expected CreateOrder request");
        assert_eq!(form.customer_name, "Test");
        let order = Order::seed(Utc::now());
        responder.send(Ok(order.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(order));
    }

    #[tokio::test]
    async fn dropped_responder_is_a_communication_error() {
        let (client, mut receiver) = create_mock_client(10);

        let task = tokio::spawn(async move { client.get_order("ORD-001".to_string()).await });

        let (id, responder) = expect_get_order(&mut receiver).await.expect("Expected GetOrder request");
        assert_eq!(id, "ORD-001");
        drop(responder);

        let result = task.await.unwrap();
        assert_eq!(
            result,
            Err(OrderError::ActorCommunicationError("Actor dropped".to_string()))
        );
    }

    #[tokio::test]
    async fn closed_actor_is_a_communication_error() {
        let (client, receiver) = create_mock_client(10);
        drop(receiver);

        let result = client.list_orders().await;
        assert_eq!(
            result,
            Err(OrderError::ActorCommunicationError("Actor closed".to_string()))
        );
    }
}
