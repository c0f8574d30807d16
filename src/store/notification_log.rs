use crate::domain::{Notification, NotificationChannel};

/// Append-only record of every notification sent this session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationLog {
    entries: Vec<Notification>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new log with `pair` appended in order.
    pub fn append(&self, pair: [Notification; 2]) -> NotificationLog {
        let mut entries = Vec::with_capacity(self.entries.len() + pair.len());
        entries.extend_from_slice(&self.entries);
        entries.extend(pair);
        NotificationLog { entries }
    }

    /// Entries in the order they were appended.
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted by timestamp, newest first; later appends win ties.
    pub fn newest_first(&self) -> Vec<Notification> {
        sort_newest_first(self.entries.iter())
    }

    /// The last `limit` appended entries, newest first.
    pub fn recent(&self, limit: usize) -> Vec<Notification> {
        let start = self.entries.len().saturating_sub(limit);
        sort_newest_first(self.entries[start..].iter())
    }

    pub fn by_channel(&self, channel: NotificationChannel) -> Vec<Notification> {
        sort_newest_first(self.entries.iter().filter(|n| n.channel == channel))
    }

    pub fn for_order(&self, order_id: &str) -> Vec<Notification> {
        sort_newest_first(self.entries.iter().filter(|n| n.order_id == order_id))
    }
}

fn sort_newest_first<'a>(entries: impl Iterator<Item = &'a Notification>) -> Vec<Notification> {
    let mut sorted: Vec<Notification> = entries.cloned().collect();
    // Reverse first so the stable sort keeps later appends ahead on ties.
    sorted.reverse();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted
}
