use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::timestamp;
use crate::domain::{Notification, NotificationChannel};
use crate::error::UnknownEndpoint;
use crate::simulation::DeliveryOutcome;

pub const WEBHOOK_BASE_URL: &str = "https://your-app.com";

/// Calls kept in [`WebhookHistory`].
pub const HISTORY_LIMIT: usize = 10;

/// Notification deliveries kept ahead of the test calls.
pub const DELIVERY_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WebhookEndpoint {
    #[serde(rename = "/api/webhooks/order-status")]
    OrderStatus,
    #[serde(rename = "/api/webhooks/sms-status")]
    SmsStatus,
    #[serde(rename = "/api/webhooks/email-status")]
    EmailStatus,
}

impl WebhookEndpoint {
    pub const ALL: [WebhookEndpoint; 3] = [
        WebhookEndpoint::OrderStatus,
        WebhookEndpoint::SmsStatus,
        WebhookEndpoint::EmailStatus,
    ];

    pub fn path(self) -> &'static str {
        match self {
            WebhookEndpoint::OrderStatus => "/api/webhooks/order-status",
            WebhookEndpoint::SmsStatus => "/api/webhooks/sms-status",
            WebhookEndpoint::EmailStatus => "/api/webhooks/email-status",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WebhookEndpoint::OrderStatus => "Order Status Updates",
            WebhookEndpoint::SmsStatus => "SMS Delivery Status",
            WebhookEndpoint::EmailStatus => "Email Delivery Status",
        }
    }

    pub fn is_active(self) -> bool {
        !matches!(self, WebhookEndpoint::EmailStatus)
    }

    pub fn url(self) -> String {
        format!("{}{}", WEBHOOK_BASE_URL, self.path())
    }

    /// Test calls against the SMS endpoint report as SMS; everything else as email.
    pub fn channel(self) -> NotificationChannel {
        match self {
            WebhookEndpoint::SmsStatus => NotificationChannel::Sms,
            WebhookEndpoint::OrderStatus | WebhookEndpoint::EmailStatus => NotificationChannel::Email,
        }
    }
}

impl fmt::Display for WebhookEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for WebhookEndpoint {
    type Err = UnknownEndpoint;

    /// Accepts the bare path or the full URL.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim().trim_start_matches(WEBHOOK_BASE_URL);
        WebhookEndpoint::ALL
            .into_iter()
            .find(|endpoint| endpoint.path() == path)
            .ok_or_else(|| UnknownEndpoint(s.to_string()))
    }
}

/// One simulated call, as listed under "Recent Webhook Calls".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookCall {
    pub id: String,
    pub endpoint: WebhookEndpoint,
    #[serde(rename = "type")]
    pub channel: NotificationChannel,
    pub success: bool,
    pub response_time_ms: u64,
    pub is_test: bool,
    #[serde(serialize_with = "timestamp::serialize")]
    pub timestamp: DateTime<Utc>,
}

impl WebhookCall {
    pub fn test(endpoint: WebhookEndpoint, outcome: DeliveryOutcome, at: DateTime<Utc>) -> Self {
        Self {
            id: format!("TEST-{}", at.timestamp_millis()),
            endpoint,
            channel: endpoint.channel(),
            success: outcome.success,
            response_time_ms: outcome.response_time_ms,
            is_test: true,
            timestamp: at,
        }
    }

    /// The `order-status` call that carried `notification` out.
    pub fn delivery(notification: &Notification, outcome: DeliveryOutcome) -> Self {
        Self {
            id: notification.id.clone(),
            endpoint: WebhookEndpoint::OrderStatus,
            channel: notification.channel,
            success: outcome.success,
            response_time_ms: outcome.response_time_ms,
            is_test: false,
            timestamp: notification.timestamp,
        }
    }

    /// `200 OK` or `500 Internal Server Error`.
    pub fn status_line(&self) -> &'static str {
        if self.success {
            "200 OK"
        } else {
            "500 Internal Server Error"
        }
    }
}

/// Recent calls, capped at [`HISTORY_LIMIT`].
///
/// A test call goes to the front. New deliveries put the latest
/// [`DELIVERY_WINDOW`] deliveries (newest first) ahead of the test calls,
/// and older deliveries drop out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebhookHistory {
    calls: Vec<WebhookCall>,
}

impl WebhookHistory {
    pub fn record_deliveries(&self, deliveries: Vec<WebhookCall>) -> WebhookHistory {
        let mut latest: Vec<WebhookCall> = deliveries
            .into_iter()
            .chain(self.calls.iter().filter(|call| !call.is_test).cloned())
            .collect();
        // Stable, so a pair sharing a timestamp keeps its order.
        latest.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        latest.truncate(DELIVERY_WINDOW);

        let tests = self.calls.iter().filter(|call| call.is_test).cloned();
        let calls = latest.into_iter().chain(tests).take(HISTORY_LIMIT).collect();
        WebhookHistory { calls }
    }

    pub fn record(&self, call: WebhookCall) -> WebhookHistory {
        let mut calls = Vec::with_capacity(HISTORY_LIMIT);
        calls.push(call);
        calls.extend(self.calls.iter().take(HISTORY_LIMIT - 1).cloned());
        WebhookHistory { calls }
    }

    pub fn calls(&self) -> &[WebhookCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}
