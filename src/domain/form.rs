/// Payload for creating a new order, as typed into the "Add Order" form.
///
/// `items` is a comma separated list; `total` is kept as raw text and
/// parsed when the order is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderForm {
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: String,
    pub items: String,
    pub total: Option<String>,
}

impl OrderForm {
    pub fn new(customer_name: impl Into<String>, customer_email: impl Into<String>) -> Self {
        Self {
            customer_name: customer_name.into(),
            customer_email: customer_email.into(),
            ..Self::default()
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.customer_phone = Some(phone.into());
        self
    }

    pub fn with_items(mut self, items: impl Into<String>) -> Self {
        self.items = items.into();
        self
    }

    pub fn with_total(mut self, total: impl Into<String>) -> Self {
        self.total = Some(total.into());
        self
    }
}
