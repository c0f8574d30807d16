use tokio::sync::oneshot;

use crate::domain::{Notification, Order, OrderForm, OrderStatus};
use crate::error::OrderError;
use crate::export::ExportSnapshot;
use crate::summary::DashboardSummary;
use crate::webhook::{WebhookCall, WebhookEndpoint};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// What a status change request hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChangeReceipt {
    pub order: Order,
    pub notifications: Vec<Notification>,
}

/// Typed messages for the dashboard actor. Each variant carries its
/// parameters and a oneshot channel for the response.
#[derive(Debug)]
pub enum DashboardRequest {
    CreateOrder {
        form: OrderForm,
        respond_to: ServiceResponse<Order, OrderError>,
    },
    GetOrder {
        id: String,
        respond_to: ServiceResponse<Option<Order>, OrderError>,
    },
    ListOrders {
        respond_to: ServiceResponse<Vec<Order>, OrderError>,
    },
    TransitionOrder {
        id: String,
        status: OrderStatus,
        respond_to: ServiceResponse<StatusChangeReceipt, OrderError>,
    },
    AdvanceOrder {
        id: String,
        respond_to: ServiceResponse<StatusChangeReceipt, OrderError>,
    },
    ListNotifications {
        respond_to: ServiceResponse<Vec<Notification>, OrderError>,
    },
    RecentNotifications {
        limit: usize,
        respond_to: ServiceResponse<Vec<Notification>, OrderError>,
    },
    OrderNotifications {
        order_id: String,
        respond_to: ServiceResponse<Vec<Notification>, OrderError>,
    },
    Summary {
        respond_to: ServiceResponse<DashboardSummary, OrderError>,
    },
    Export {
        respond_to: ServiceResponse<ExportSnapshot, OrderError>,
    },
    TestWebhook {
        endpoint: WebhookEndpoint,
        respond_to: ServiceResponse<WebhookCall, OrderError>,
    },
    WebhookHistory {
        respond_to: ServiceResponse<Vec<WebhookCall>, OrderError>,
    },
    /// Sent by the background webhook task once its call completes.
    RecordWebhookCall {
        call: WebhookCall,
    },
    Shutdown,
}
