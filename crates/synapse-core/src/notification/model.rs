use serde::{Deserialize, Serialize};

/// Severity class of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Warning,
    Error,
    Success,
}

/// A user-visible system message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification identifier (UUID format)
    pub id: String,
    /// Severity class
    pub kind: NotificationKind,
    /// Short headline
    pub title: String,
    /// Longer message body
    pub message: String,
    /// Timestamp when the notification was raised (ISO 8601 format)
    pub timestamp: String,
    /// Whether the user has seen this notification
    pub read: bool,
}
