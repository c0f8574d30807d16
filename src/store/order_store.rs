use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::domain::{Notification, Order, OrderForm, OrderStatus};
use crate::error::{OrderError, ValidationError};
use crate::templates;

pub const DEFAULT_PHONE: &str = "+1 (555) 000-0000";
pub const DEFAULT_TOTAL: f64 = 99.99;

/// Insertion-ordered collection of orders.
///
/// Every operation that changes an order returns a new store and leaves
/// `self` untouched, so the owner swaps state in one assignment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderStore {
    orders: Vec<Order>,
}

/// Result of a successful status change.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub store: OrderStore,
    pub order: Order,
    pub notifications: [Notification; 2],
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding only the seed order.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self {
            orders: vec![Order::seed(now)],
        }
    }

    pub fn get(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// `ORD-` followed by the next sequence number, padded to three digits.
    pub fn next_order_id(&self) -> String {
        format!("ORD-{:03}", self.orders.len() + 1)
    }

    /// Builds a `placed` order from `form` and appends it.
    pub fn create_order(
        &self,
        form: OrderForm,
        now: DateTime<Utc>,
    ) -> Result<(OrderStore, Order), ValidationError> {
        // Stored as typed; only blank input is refused.
        if form.customer_name.trim().is_empty() {
            return Err(ValidationError::MissingCustomerName);
        }
        if form.customer_email.trim().is_empty() {
            return Err(ValidationError::MissingCustomerEmail);
        }

        let total = parse_total(form.total.as_deref())?;
        let customer_phone = form
            .customer_phone
            .filter(|phone| !phone.is_empty())
            .unwrap_or_else(|| DEFAULT_PHONE.to_string());

        let order = Order {
            id: self.next_order_id(),
            customer_name: form.customer_name,
            customer_phone,
            customer_email: form.customer_email,
            status: OrderStatus::Placed,
            items: split_items(&form.items),
            total,
            created_at: now,
            updated_at: now,
        };

        let mut orders = self.orders.clone();
        orders.push(order.clone());
        Ok((OrderStore { orders }, order))
    }

    /// Moves order `id` to `target`, which must be its current status's
    /// successor, and renders the SMS + email pair for the new status.
    pub fn transition(
        &self,
        id: &str,
        target: OrderStatus,
        now: DateTime<Utc>,
    ) -> Result<Transition, OrderError> {
        let index = self
            .orders
            .iter()
            .position(|order| order.id == id)
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;
        let current = &self.orders[index];

        match current.status.next() {
            None => return Err(OrderError::AlreadyDelivered(id.to_string())),
            Some(next) if next != target => {
                return Err(OrderError::IllegalTransition {
                    order_id: id.to_string(),
                    from: current.status,
                    to: target,
                })
            }
            Some(_) => {}
        }

        // updated_at must move forward even when the clock has not.
        let floor = current.updated_at + Duration::milliseconds(1);
        let mut order = current.clone();
        order.status = target;
        order.updated_at = now.max(floor);

        let messages = templates::render(target, &order);
        let notifications = Notification::pair_for(&order, messages.sms, messages.email);

        let mut orders = self.orders.clone();
        orders[index] = order.clone();

        debug!(order_id = %id, status = %target, "Transition computed");
        Ok(Transition {
            store: OrderStore { orders },
            order,
            notifications,
        })
    }

    /// Transition to whatever status follows the current one.
    pub fn advance(&self, id: &str, now: DateTime<Utc>) -> Result<Transition, OrderError> {
        let order = self
            .get(id)
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;
        let next = order
            .status
            .next()
            .ok_or_else(|| OrderError::AlreadyDelivered(id.to_string()))?;
        self.transition(id, next, now)
    }
}

fn split_items(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

// Blank, unparsable and zero totals fall back to the default. Trailing
// text after a leading number is ignored, so "12abc" reads as 12.
fn parse_total(raw: Option<&str>) -> Result<f64, ValidationError> {
    let parsed = raw
        .and_then(leading_number)
        .filter(|total| total.is_finite() && *total != 0.0);

    match parsed {
        Some(total) if total < 0.0 => Err(ValidationError::NegativeTotal(total)),
        Some(total) => Ok(total),
        None => Ok(DEFAULT_TOTAL),
    }
}

/// Longest decimal literal at the start of `text` (after leading
/// whitespace): optional sign, digits, fraction, exponent.
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::NotificationChannel;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_760_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn items_are_split_trimmed_and_blank_entries_dropped() {
        let store = OrderStore::new();
        let form = OrderForm::new("Ann", "ann@example.com").with_items("A, B ,C,, ");
        let (_, order) = store.create_order(form, at(0)).unwrap();
        assert_eq!(order.items, vec!["A", "B", "C"]);
    }

    #[test]
    fn omitted_phone_and_total_use_defaults() {
        let store = OrderStore::new();
        let (_, order) = store
            .create_order(OrderForm::new("Ann", "ann@example.com"), at(0))
            .unwrap();
        assert_eq!(order.customer_phone, "+1 (555) 000-0000");
        assert_eq!(order.total, 99.99);
        assert_eq!(order.status, OrderStatus::Placed);
        assert_eq!(order.created_at, order.updated_at);
    }

    #[test]
    fn unparsable_or_zero_total_falls_back_to_default() {
        let store = OrderStore::new();
        for raw in ["", "abc", "0", "  "] {
            let form = OrderForm::new("Ann", "ann@example.com").with_total(raw);
            let (_, order) = store.create_order(form, at(0)).unwrap();
            assert_eq!(order.total, 99.99, "raw total {raw:?}");
        }
        let form = OrderForm::new("Ann", "ann@example.com").with_total("42.50");
        let (_, order) = store.create_order(form, at(0)).unwrap();
        assert_eq!(order.total, 42.5);
    }

    #[test]
    fn total_reads_the_leading_number_and_ignores_the_rest() {
        let store = OrderStore::new();
        for (raw, expected) in [
            ("12abc", 12.0),
            (" 19.5 USD", 19.5),
            (".5", 0.5),
            ("3.", 3.0),
            ("1e2x", 100.0),
            ("7e", 7.0),
            ("0abc", 99.99),
            ("abc12", 99.99),
            ("-.", 99.99),
        ] {
            let form = OrderForm::new("Ann", "ann@example.com").with_total(raw);
            let (_, order) = store.create_order(form, at(0)).unwrap();
            assert_eq!(order.total, expected, "raw total {raw:?}");
        }

        let form = OrderForm::new("Ann", "ann@example.com").with_total("-3kg");
        let err = store.create_order(form, at(0)).unwrap_err();
        assert_eq!(err, ValidationError::NegativeTotal(-3.0));
    }

    #[test]
    fn customer_fields_are_stored_as_typed() {
        let store = OrderStore::new();
        let form = OrderForm::new(" Ann Lee ", "ann@example.com ").with_phone(" 555-0100");
        let (_, order) = store.create_order(form, at(0)).unwrap();
        assert_eq!(order.customer_name, " Ann Lee ");
        assert_eq!(order.customer_email, "ann@example.com ");
        assert_eq!(order.customer_phone, " 555-0100");

        let form = OrderForm::new("Ann", "ann@example.com").with_phone("");
        let (_, order) = store.create_order(form, at(0)).unwrap();
        assert_eq!(order.customer_phone, DEFAULT_PHONE);
    }

    #[test]
    fn negative_total_is_rejected() {
        let store = OrderStore::new();
        let form = OrderForm::new("Ann", "ann@example.com").with_total("-5");
        let err = store.create_order(form, at(0)).unwrap_err();
        assert_eq!(err, ValidationError::NegativeTotal(-5.0));
    }

    #[test]
    fn missing_name_or_email_is_a_validation_failure() {
        let store = OrderStore::seeded(at(0));

        let err = store
            .create_order(OrderForm::new("", "ann@example.com"), at(1))
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingCustomerName);

        let err = store
            .create_order(OrderForm::new("Ann", "   "), at(1))
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingCustomerEmail);

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn ids_are_sequential_and_zero_padded() {
        let store = OrderStore::seeded(at(0));
        let (store, second) = store
            .create_order(OrderForm::new("Ann", "ann@example.com"), at(1))
            .unwrap();
        let (store, third) = store
            .create_order(OrderForm::new("Bob", "bob@example.com"), at(2))
            .unwrap();
        assert_eq!(second.id, "ORD-002");
        assert_eq!(third.id, "ORD-003");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn transition_produces_new_store_and_notification_pair() {
        let store = OrderStore::seeded(at(0));
        let transition = store.transition("ORD-001", OrderStatus::Confirmed, at(5)).unwrap();

        assert_eq!(store.get("ORD-001").unwrap().status, OrderStatus::Placed);
        let updated = transition.store.get("ORD-001").unwrap();
        assert_eq!(updated.status, OrderStatus::Confirmed);
        assert!(updated.updated_at > updated.created_at);

        let channels: Vec<_> = transition.notifications.iter().map(|n| n.channel).collect();
        assert_eq!(channels, vec![NotificationChannel::Sms, NotificationChannel::Email]);
        for notification in &transition.notifications {
            assert_eq!(notification.order_id, "ORD-001");
            assert_eq!(notification.status, OrderStatus::Confirmed);
            assert_eq!(notification.timestamp, updated.updated_at);
        }
    }

    #[test]
    fn updated_at_moves_forward_when_clock_stands_still() {
        let store = OrderStore::seeded(at(0));
        let transition = store.advance("ORD-001", at(0)).unwrap();
        assert!(transition.order.updated_at > transition.order.created_at);
    }

    #[test]
    fn skipping_a_status_is_rejected() {
        let store = OrderStore::seeded(at(0));
        let err = store.transition("ORD-001", OrderStatus::Shipped, at(1)).unwrap_err();
        assert_eq!(
            err,
            OrderError::IllegalTransition {
                order_id: "ORD-001".into(),
                from: OrderStatus::Placed,
                to: OrderStatus::Shipped,
            }
        );
    }

    #[test]
    fn advance_walks_to_delivered_then_stops() {
        let mut store = OrderStore::seeded(at(0));
        let mut seen = Vec::new();
        for step in 1..=3 {
            let transition = store.advance("ORD-001", at(step)).unwrap();
            seen.push(transition.order.status);
            store = transition.store;
        }
        assert_eq!(
            seen,
            vec![OrderStatus::Confirmed, OrderStatus::Shipped, OrderStatus::Delivered]
        );

        let err = store.advance("ORD-001", at(10)).unwrap_err();
        assert_eq!(err, OrderError::AlreadyDelivered("ORD-001".into()));
        let err = store.transition("ORD-001", OrderStatus::Placed, at(10)).unwrap_err();
        assert_eq!(err, OrderError::AlreadyDelivered("ORD-001".into()));
    }

    #[test]
    fn unknown_order_is_reported() {
        let store = OrderStore::seeded(at(0));
        let err = store.advance("ORD-999", at(1)).unwrap_err();
        assert_eq!(err, OrderError::NotFound("ORD-999".into()));
    }

    #[test]
    fn other_orders_are_left_alone() {
        let store = OrderStore::seeded(at(0));
        let (store, second) = store
            .create_order(OrderForm::new("Ann", "ann@example.com"), at(1))
            .unwrap();
        let transition = store.advance("ORD-001", at(2)).unwrap();
        assert_eq!(transition.store.get(&second.id), Some(&second));
    }
}
