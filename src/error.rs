use std::path::PathBuf;

use thiserror::Error;

use crate::domain::OrderStatus;

/// Reasons an "Add Order" form is refused. No order is created.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Customer name is required")]
    MissingCustomerName,
    #[error("Customer email is required")]
    MissingCustomerEmail,
    #[error("Order total cannot be negative: {0}")]
    NegativeTotal(f64),
}

/// Errors that can occur during order lifecycle operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order {order_id} cannot move from {from} to {to}")]
    IllegalTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },
    #[error("Order already delivered: {0}")]
    AlreadyDelivered(String),
    #[error("Order validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write export to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown webhook endpoint: {0}")]
pub struct UnknownEndpoint(pub String);
