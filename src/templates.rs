//! Fixed SMS/email wording for each order status.

use crate::domain::{Order, OrderStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessages {
    pub sms: String,
    pub email: String,
}

/// Renders the message pair for `order` reaching `status`.
///
/// Totals print like the dashboard shows them: `129.99`, `100`.
pub fn render(status: OrderStatus, order: &Order) -> RenderedMessages {
    let name = &order.customer_name;
    let id = &order.id;
    let total = order.total;

    let (sms, email) = match status {
        OrderStatus::Placed => (
            format!(
                "Hi {name}! 🎉 Your order #{id} has been placed successfully. Total: ${total}. We'll keep you updated!"
            ),
            format!(
                "Order Confirmation - Your order #{id} totaling ${total} has been received and is being processed."
            ),
        ),
        OrderStatus::Confirmed => (
            format!("Great news {name}! 📦 Your order #{id} has been confirmed and will be shipped soon."),
            format!("Order Confirmed - Your order #{id} has been confirmed and is being prepared for shipment."),
        ),
        OrderStatus::Shipped => (
            format!(
                "📮 Your order #{id} is on its way! Track your package and expect delivery within 2-3 business days."
            ),
            format!("Order Shipped - Your order #{id} has been shipped and is on its way to you."),
        ),
        OrderStatus::Delivered => (
            format!("✅ Delivered! Your order #{id} has arrived. Thanks for choosing us, {name}!"),
            format!(
                "Order Delivered - Your order #{id} has been successfully delivered. Thank you for your business!"
            ),
        ),
    };

    RenderedMessages { sms, email }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn placed_messages_include_name_id_and_total() {
        let order = Order::seed(Utc::now());
        let rendered = render(OrderStatus::Placed, &order);
        assert_eq!(
            rendered.sms,
            "Hi Sarah Johnson! 🎉 Your order #ORD-001 has been placed successfully. Total: $129.99. We'll keep you updated!"
        );
        assert_eq!(
            rendered.email,
            "Order Confirmation - Your order #ORD-001 totaling $129.99 has been received and is being processed."
        );
    }

    #[test]
    fn whole_totals_print_without_fraction() {
        let mut order = Order::seed(Utc::now());
        order.total = 100.0;
        let rendered = render(OrderStatus::Placed, &order);
        assert!(rendered.sms.contains("Total: $100."));
        assert!(rendered.email.contains("totaling $100 has"));
    }

    #[test]
    fn delivered_thanks_the_customer_by_name() {
        let order = Order::seed(Utc::now());
        let rendered = render(OrderStatus::Delivered, &order);
        assert!(rendered.sms.ends_with("Thanks for choosing us, Sarah Johnson!"));
        assert!(rendered.email.starts_with("Order Delivered - Your order #ORD-001"));
    }

    #[test]
    fn every_status_renders_distinct_text() {
        let order = Order::seed(Utc::now());
        let sms: Vec<String> = OrderStatus::ALL
            .iter()
            .map(|status| render(*status, &order).sms)
            .collect();
        for (i, a) in sms.iter().enumerate() {
            for b in &sms[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
