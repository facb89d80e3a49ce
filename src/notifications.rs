//! Notifications
//!
//! Short-lived confirmation messages shown to the shopper after an action.

use std::fmt;

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Headline
    pub title: String,

    /// Supporting text
    pub description: String,
}

impl Notification {
    /// Create a notification and record it in the log.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        let notification = Self {
            title: title.into(),
            description: description.into(),
        };

        tracing::info!(
            title = %notification.title,
            description = %notification.description,
            "notification"
        );

        notification
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
