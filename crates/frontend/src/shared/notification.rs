//! Structured feedback returned by user actions.
//!
//! Operations never pop alerts themselves; the view decides how to show a
//! [`Notification`].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    /// The page must be reloaded after the message is acknowledged
    pub reload: bool,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            reload: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            reload: false,
        }
    }

    pub fn with_reload(mut self) -> Self {
        self.reload = true;
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }

    /// Show the notification as a blocking browser alert, then reload if asked
    pub fn present(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let _ = window.alert_with_message(&self.message);
        if self.reload {
            if let Err(e) = window.location().reload() {
                log::error!("Failed to reload page: {:?}", e);
            }
        }
    }
}
