//! Stand-ins for effects a real deployment would perform over the network.
//!
//! Everything random or slow lives behind [`SimulationProvider`] so the
//! order lifecycle never depends on it. Swap in an HTTP-backed provider and
//! nothing else changes.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use crate::app_config::SimulationConfig;
use crate::domain::Notification;
use crate::webhook::WebhookEndpoint;

/// What came back from a (simulated) webhook call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub success: bool,
    pub response_time_ms: u64,
}

#[async_trait]
pub trait SimulationProvider: Send + Sync {
    /// Fires a test call at `endpoint` and reports how it went.
    async fn deliver_webhook(&self, endpoint: WebhookEndpoint) -> DeliveryOutcome;

    /// Outcome of pushing `notification` to the order-status webhook.
    /// Decided on the spot; nothing waits for it.
    fn deliver_notification(&self, notification: &Notification) -> DeliveryOutcome;
}

/// Sleeps for the configured round-trip and rolls the dice.
#[derive(Debug, Clone)]
pub struct RandomSimulation {
    delay: Duration,
    success_rate: f64,
    delivery_rate: f64,
    min_response_ms: u64,
    max_response_ms: u64,
}

impl RandomSimulation {
    pub fn new(config: &SimulationConfig) -> Self {
        let (min_response_ms, max_response_ms) = if config.min_response_ms <= config.max_response_ms {
            (config.min_response_ms, config.max_response_ms)
        } else {
            (config.max_response_ms, config.min_response_ms)
        };
        Self {
            delay: Duration::from_millis(config.webhook_delay_ms),
            success_rate: config.test_success_rate.clamp(0.0, 1.0),
            delivery_rate: config.delivery_success_rate.clamp(0.0, 1.0),
            min_response_ms,
            max_response_ms,
        }
    }

    fn roll(&self, rate: f64) -> DeliveryOutcome {
        let mut rng = rand::thread_rng();
        DeliveryOutcome {
            success: rng.gen_bool(rate),
            response_time_ms: rng.gen_range(self.min_response_ms..=self.max_response_ms),
        }
    }
}

#[async_trait]
impl SimulationProvider for RandomSimulation {
    async fn deliver_webhook(&self, endpoint: WebhookEndpoint) -> DeliveryOutcome {
        debug!(endpoint = %endpoint, delay_ms = self.delay.as_millis() as u64, "Simulating webhook round-trip");
        tokio::time::sleep(self.delay).await;

        self.roll(self.success_rate)
    }

    fn deliver_notification(&self, notification: &Notification) -> DeliveryOutcome {
        let outcome = self.roll(self.delivery_rate);
        debug!(notification_id = %notification.id, success = outcome.success, "Simulated notification delivery");
        outcome
    }
}

/// Replays fixed lists of outcomes, then keeps succeeding. No delay.
///
/// Webhook tests and notification deliveries draw from separate lists.
#[derive(Debug, Default)]
pub struct ScriptedSimulation {
    outcomes: Mutex<VecDeque<bool>>,
    deliveries: Mutex<VecDeque<bool>>,
    response_time_ms: u64,
}

impl ScriptedSimulation {
    pub fn new(outcomes: impl IntoIterator<Item = bool>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            deliveries: Mutex::default(),
            response_time_ms: 100,
        }
    }

    pub fn with_deliveries(self, deliveries: impl IntoIterator<Item = bool>) -> Self {
        Self {
            deliveries: Mutex::new(deliveries.into_iter().collect()),
            ..self
        }
    }

    fn outcome(&self, script: &Mutex<VecDeque<bool>>) -> DeliveryOutcome {
        let success = match script.lock() {
            Ok(mut script) => script.pop_front().unwrap_or(true),
            Err(poisoned) => poisoned.into_inner().pop_front().unwrap_or(true),
        };
        DeliveryOutcome {
            success,
            response_time_ms: self.response_time_ms,
        }
    }
}

#[async_trait]
impl SimulationProvider for ScriptedSimulation {
    async fn deliver_webhook(&self, _endpoint: WebhookEndpoint) -> DeliveryOutcome {
        self.outcome(&self.outcomes)
    }

    fn deliver_notification(&self, _notification: &Notification) -> DeliveryOutcome {
        self.outcome(&self.deliveries)
    }
}
