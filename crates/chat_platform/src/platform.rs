//! Platform capability contract shared by browser and desktop compositions.

use std::{future::Future, pin::Pin};

use crate::{
    badge::{BadgeState, NoopBadgeRenderer},
    config::BadgeColors,
    environment::screen_capture_error_string,
    notifications::{NotificationPermission, RoomNotification},
    version::{NoopVersionFetcher, VersionError, VersionTracker},
};

/// Object-safe boxed future used by [`Platform`] async methods.
pub type PlatformFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Stable platform strategy selected for the current build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed adapter.
    Browser,
    /// Desktop composition with no-op platform capabilities.
    DesktopStub,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::DesktopStub => "desktop-stub",
        }
    }
}

/// Capability set a chat client needs from its deployment target.
///
/// Notification operations other than [`Platform::supports_notifications`] assume the caller has
/// checked support first.
pub trait Platform {
    /// Human-readable platform name for diagnostics.
    fn human_readable_name(&self) -> &'static str;

    /// Returns whether the environment can create notifications.
    fn supports_notifications(&self) -> bool;

    /// Returns whether notification permission is granted.
    fn may_send_notifications(&self) -> bool;

    /// Prompts for notification permission. Resolves exactly once.
    fn request_notification_permission<'a>(&'a self) -> PlatformFuture<'a, NotificationPermission>;

    /// Shows a notification whose click opens `notification.room` in the host.
    fn display_notification(&self, notification: &RoomNotification) -> Result<(), String>;

    /// Last unread count passed by the host.
    fn notification_count(&self) -> u32;

    /// Records the unread count and refreshes the badge when it changed.
    fn set_notification_count(&self, count: u32);

    /// Last error flag passed by the host.
    fn error_did_occur(&self) -> bool;

    /// Records the error flag and refreshes the badge when it changed.
    fn set_error_status(&self, error_did_occur: bool);

    /// First build identifier observed by [`Platform::poll_for_update`].
    fn running_version(&self) -> Option<String>;

    /// Returns the running build identifier, fetching it when no poll has succeeded yet.
    fn app_version<'a>(&'a self) -> PlatformFuture<'a, Result<String, VersionError>>;

    /// Checks the deployed build and notifies the host when it differs from the running one.
    ///
    /// Never fails; fetch errors are logged.
    fn poll_for_update<'a>(&'a self) -> PlatformFuture<'a, ()>;

    /// Returns whether [`Platform::install_update`] can pick up a new build.
    fn can_self_update(&self) -> bool;

    /// Switches to the deployed build.
    fn install_update(&self);

    /// Default label for this device in the user's session list.
    fn default_device_display_name(&self) -> String;

    /// Reason screen capture cannot work here, or `None` when it can.
    fn screen_capture_error_string(&self) -> Option<&'static str>;
}

/// Platform for targets with no browser capabilities.
///
/// Badge state and version tracking still record values so host logic behaves the same; nothing
/// is displayed or fetched.
#[derive(Debug)]
pub struct NoopPlatform {
    badge: BadgeState<NoopBadgeRenderer>,
    versions: VersionTracker,
}

impl Default for NoopPlatform {
    fn default() -> Self {
        Self {
            badge: BadgeState::new(NoopBadgeRenderer, BadgeColors::default()),
            versions: VersionTracker::new(),
        }
    }
}

impl Platform for NoopPlatform {
    fn human_readable_name(&self) -> &'static str {
        "Noop Platform"
    }

    fn supports_notifications(&self) -> bool {
        false
    }

    fn may_send_notifications(&self) -> bool {
        false
    }

    fn request_notification_permission<'a>(&'a self) -> PlatformFuture<'a, NotificationPermission> {
        Box::pin(async { NotificationPermission::Denied })
    }

    fn display_notification(&self, _notification: &RoomNotification) -> Result<(), String> {
        Ok(())
    }

    fn notification_count(&self) -> u32 {
        self.badge.notification_count()
    }

    fn set_notification_count(&self, count: u32) {
        self.badge.set_notification_count(count);
    }

    fn error_did_occur(&self) -> bool {
        self.badge.error_did_occur()
    }

    fn set_error_status(&self, error_did_occur: bool) {
        self.badge.set_error_status(error_did_occur);
    }

    fn running_version(&self) -> Option<String> {
        self.versions.running_version()
    }

    fn app_version<'a>(&'a self) -> PlatformFuture<'a, Result<String, VersionError>> {
        Box::pin(async move { self.versions.app_version(&NoopVersionFetcher).await })
    }

    fn poll_for_update<'a>(&'a self) -> PlatformFuture<'a, ()> {
        Box::pin(async move {
            let _ = self
                .versions
                .poll_for_update(&NoopVersionFetcher, &crate::NoopActionDispatcher)
                .await;
        })
    }

    fn can_self_update(&self) -> bool {
        false
    }

    fn install_update(&self) {}

    fn default_device_display_name(&self) -> String {
        crate::environment::device_display_name(None, None)
    }

    fn screen_capture_error_string(&self) -> Option<&'static str> {
        screen_capture_error_string(None)
    }
}
