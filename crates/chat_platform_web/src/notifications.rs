//! Browser notification helpers.

use std::rc::Rc;

use chat_platform::{ActionDispatcher, HostAction, NotificationPermission, RoomNotification};
use leptos::logging;

use crate::bridge::{self, NotificationSpec};

/// Returns whether `window.Notification` exists.
pub fn supports_notifications() -> bool {
    bridge::notifications_supported()
}

/// Current permission state, or `None` when notifications are unsupported.
pub fn notification_permission() -> Option<NotificationPermission> {
    bridge::notification_permission().map(|raw| NotificationPermission::from_browser_str(&raw))
}

/// Prompts the user and waits for the answer.
///
/// A prompt that cannot be raised is logged and reported as [`NotificationPermission::Denied`].
pub async fn request_notification_permission() -> NotificationPermission {
    match bridge::request_notification_permission().await {
        Ok(raw) => NotificationPermission::from_browser_str(&raw),
        Err(err) => {
            logging::warn!("notification permission request failed: {err}");
            NotificationPermission::Denied
        }
    }
}

/// Builds the click handler that sends the host to the notification's room.
pub fn view_room_on_click(
    dispatcher: Rc<dyn ActionDispatcher>,
    room_id: String,
) -> Box<dyn FnOnce()> {
    Box::new(move || dispatcher.dispatch(HostAction::ViewRoom { room_id }))
}

/// Shows a silent, tagged notification that opens its room on click and closes itself after
/// `auto_close_ms`.
///
/// # Errors
///
/// Returns an error when the browser refuses to create the notification.
pub fn display_room_notification(
    notification: &RoomNotification,
    tag: &str,
    auto_close_ms: u32,
    dispatcher: Rc<dyn ActionDispatcher>,
) -> Result<(), String> {
    let spec = NotificationSpec {
        title: &notification.title,
        body: &notification.body,
        icon_url: notification.icon_url.as_deref().filter(|url| !url.is_empty()),
        tag,
        auto_close_ms,
    };
    bridge::show_notification(
        spec,
        view_room_on_click(dispatcher, notification.room.room_id.clone()),
    )
}
