use std::rc::Rc;

use chat_platform::{
    ActionDispatcher, ConfigError, HostStrategy, NoopPlatform, NotificationPermission, Platform,
    PlatformConfig, PlatformFuture, RoomNotification, VersionError,
};

use crate::WebPlatform;

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "desktop-host-stub")]
    {
        HostStrategy::DesktopStub
    }

    #[cfg(not(feature = "desktop-host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Adapter enum that erases the concrete platform behind [`Platform`].
#[derive(Debug)]
pub enum PlatformAdapter {
    /// Browser-backed platform.
    Browser(WebPlatform),
    /// Placeholder used by desktop builds that provide their own native shell.
    DesktopStub(NoopPlatform),
}

impl Platform for PlatformAdapter {
    fn human_readable_name(&self) -> &'static str {
        match self {
            Self::Browser(platform) => platform.human_readable_name(),
            Self::DesktopStub(platform) => platform.human_readable_name(),
        }
    }

    fn supports_notifications(&self) -> bool {
        match self {
            Self::Browser(platform) => platform.supports_notifications(),
            Self::DesktopStub(platform) => platform.supports_notifications(),
        }
    }

    fn may_send_notifications(&self) -> bool {
        match self {
            Self::Browser(platform) => platform.may_send_notifications(),
            Self::DesktopStub(platform) => platform.may_send_notifications(),
        }
    }

    fn request_notification_permission<'a>(&'a self) -> PlatformFuture<'a, NotificationPermission> {
        match self {
            Self::Browser(platform) => platform.request_notification_permission(),
            Self::DesktopStub(platform) => platform.request_notification_permission(),
        }
    }

    fn display_notification(&self, notification: &RoomNotification) -> Result<(), String> {
        match self {
            Self::Browser(platform) => platform.display_notification(notification),
            Self::DesktopStub(platform) => platform.display_notification(notification),
        }
    }

    fn notification_count(&self) -> u32 {
        match self {
            Self::Browser(platform) => platform.notification_count(),
            Self::DesktopStub(platform) => platform.notification_count(),
        }
    }

    fn set_notification_count(&self, count: u32) {
        match self {
            Self::Browser(platform) => platform.set_notification_count(count),
            Self::DesktopStub(platform) => platform.set_notification_count(count),
        }
    }

    fn error_did_occur(&self) -> bool {
        match self {
            Self::Browser(platform) => platform.error_did_occur(),
            Self::DesktopStub(platform) => platform.error_did_occur(),
        }
    }

    fn set_error_status(&self, error_did_occur: bool) {
        match self {
            Self::Browser(platform) => platform.set_error_status(error_did_occur),
            Self::DesktopStub(platform) => platform.set_error_status(error_did_occur),
        }
    }

    fn running_version(&self) -> Option<String> {
        match self {
            Self::Browser(platform) => platform.running_version(),
            Self::DesktopStub(platform) => platform.running_version(),
        }
    }

    fn app_version<'a>(&'a self) -> PlatformFuture<'a, Result<String, VersionError>> {
        match self {
            Self::Browser(platform) => platform.app_version(),
            Self::DesktopStub(platform) => platform.app_version(),
        }
    }

    fn poll_for_update<'a>(&'a self) -> PlatformFuture<'a, ()> {
        match self {
            Self::Browser(platform) => platform.poll_for_update(),
            Self::DesktopStub(platform) => platform.poll_for_update(),
        }
    }

    fn can_self_update(&self) -> bool {
        match self {
            Self::Browser(platform) => platform.can_self_update(),
            Self::DesktopStub(platform) => platform.can_self_update(),
        }
    }

    fn install_update(&self) {
        match self {
            Self::Browser(platform) => platform.install_update(),
            Self::DesktopStub(platform) => platform.install_update(),
        }
    }

    fn default_device_display_name(&self) -> String {
        match self {
            Self::Browser(platform) => platform.default_device_display_name(),
            Self::DesktopStub(platform) => platform.default_device_display_name(),
        }
    }

    fn screen_capture_error_string(&self) -> Option<&'static str> {
        match self {
            Self::Browser(platform) => platform.screen_capture_error_string(),
            Self::DesktopStub(platform) => platform.screen_capture_error_string(),
        }
    }
}

/// Builds the platform adapter for the compile-time selected host strategy.
///
/// # Errors
///
/// Returns [`ConfigError`] when `config` fails validation, for either strategy.
pub fn build_platform(
    config: PlatformConfig,
    dispatcher: Rc<dyn ActionDispatcher>,
) -> Result<PlatformAdapter, ConfigError> {
    match selected_host_strategy() {
        HostStrategy::Browser => WebPlatform::new(config, dispatcher).map(PlatformAdapter::Browser),
        HostStrategy::DesktopStub => {
            config.validate()?;
            Ok(PlatformAdapter::DesktopStub(NoopPlatform::default()))
        }
    }
}
