// src/notify.rs - Side channel for user-facing outcomes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::error::Error;

const CHANNEL_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationType {
    Info,
    Success,
    Warning,
    Error,
}

/// One message a front end shows to the operator (alert, toast, banner)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    /// Screen or store that produced it
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub timestamp: DateTime<Utc>,
    /// Underlying failure, kept for diagnostics
    pub error: Option<Error>,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        notification_type: NotificationType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            message: message.into(),
            notification_type,
            timestamp: Utc::now(),
            error: None,
        }
    }

    pub fn failure(title: impl Into<String>, message: impl Into<String>, error: &Error) -> Self {
        let mut notification = Self::new(title, message, NotificationType::Error);
        notification.error = Some(error.clone());
        notification
    }

    pub fn is_error(&self) -> bool {
        self.notification_type == NotificationType::Error
    }
}

/// Cloneable broadcast handle; sending with no subscriber is not an error
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn notify(&self, notification: Notification) {
        let _ = self.sender.send(notification);
    }

    pub fn success(&self, title: &str, message: impl Into<String>) {
        self.notify(Notification::new(title, message, NotificationType::Success));
    }

    pub fn info(&self, title: &str, message: impl Into<String>) {
        self.notify(Notification::new(title, message, NotificationType::Info));
    }

    pub fn failure(&self, title: &str, message: impl Into<String>, error: &Error) {
        self.notify(Notification::failure(title, message, error));
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_notifications() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();

        notifier.success("settings", "Settings saved successfully");
        let error = Error::http(500, "/config/profit-margin", "HTTP 500");
        notifier.failure("settings", "Failed to save settings", &error);

        let first = rx.recv().await.unwrap();
        assert_eq!(first.notification_type, NotificationType::Success);

        let second = rx.recv().await.unwrap();
        assert!(second.is_error());
        assert_eq!(second.error.unwrap().status_code(), Some(500));
    }

    #[test]
    fn test_notify_without_subscribers() {
        Notifier::new().info("dashboard", "nobody listening");
    }
}
