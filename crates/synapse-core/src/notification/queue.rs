use uuid::Uuid;

use super::model::{Notification, NotificationKind};

/// Append-only, user-dismissible log of system messages.
///
/// Most-recent-first ordering. The queue itself is unbounded; presentation
/// truncates what it displays.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    notifications: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a notification with a fresh id and timestamp and prepends it.
    /// Returns a clone of the stored entry.
    pub fn add(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Notification {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            kind,
            title: title.into(),
            message: message.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            read: false,
        };
        self.notifications.insert(0, notification.clone());
        notification
    }

    /// Marks a notification as read. Returns false if the id is unknown.
    pub fn mark_read(&mut self, notification_id: &str) -> bool {
        match self
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id)
        {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    /// Dismisses a single notification. Idempotent.
    pub fn remove(&mut self, notification_id: &str) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != notification_id);
        self.notifications.len() != before
    }

    /// Dismisses everything.
    pub fn clear_all(&mut self) {
        self.notifications.clear();
    }

    /// Returns notifications most-recent-first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Returns an owned snapshot, most-recent-first.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.notifications.clone()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}
