//! Notification request and permission models.

use serde::{Deserialize, Serialize};

/// Tag applied to every chat notification so the browser collapses them into one slot.
pub const DEFAULT_NOTIFICATION_TAG: &str = "vector";

/// Delay after which a displayed notification is closed regardless of user interaction.
pub const DEFAULT_NOTIFICATION_AUTO_CLOSE_MS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Room a notification refers to.
pub struct RoomRef {
    /// Opaque room identifier forwarded to the host on click.
    pub room_id: String,
}

impl RoomRef {
    /// Creates a room reference.
    pub fn new(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One notification the host asks the platform to show.
pub struct RoomNotification {
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub body: String,
    /// Optional avatar/icon URL; omitted from the notification when absent.
    pub icon_url: Option<String>,
    /// Room opened when the notification is clicked.
    pub room: RoomRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Notification permission state as reported by the environment.
pub enum NotificationPermission {
    /// The user allowed notifications.
    Granted,
    /// The user blocked notifications.
    Denied,
    /// The user has not decided yet.
    #[default]
    Default,
    /// Any other implementation-defined permission string.
    Other(String),
}

impl NotificationPermission {
    /// Parses a browser permission string.
    pub fn from_browser_str(raw: &str) -> Self {
        match raw {
            "granted" => Self::Granted,
            "denied" => Self::Denied,
            "default" => Self::Default,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the browser permission string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Default => "default",
            Self::Other(raw) => raw,
        }
    }

    /// Returns whether notifications may be sent.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl std::fmt::Display for NotificationPermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
