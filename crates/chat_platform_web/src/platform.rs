//! Browser implementation of [`chat_platform::Platform`].

use std::rc::Rc;

use chat_platform::{
    device_display_name, screen_capture_error_string, ActionDispatcher, BadgeState, ConfigError,
    NotificationPermission, Platform, PlatformConfig, PlatformFuture, RoomNotification,
    VersionError, VersionTracker,
};
use leptos::logging;

use crate::{bridge, favicon::FaviconBadgeRenderer, notifications, version::WebVersionFetcher};

/// Platform adapter for a chat client running in a browser tab.
///
/// Owns the badge state and the running-version tracker for the page lifetime. Actions produced
/// by notification clicks and update polls go to the host's dispatcher.
pub struct WebPlatform {
    config: PlatformConfig,
    badge: BadgeState<FaviconBadgeRenderer>,
    versions: VersionTracker,
    fetcher: WebVersionFetcher,
    dispatcher: Rc<dyn ActionDispatcher>,
}

impl std::fmt::Debug for WebPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebPlatform")
            .field("config", &self.config)
            .field("badge", &self.badge)
            .field("versions", &self.versions)
            .finish_non_exhaustive()
    }
}

impl WebPlatform {
    /// Creates the adapter with a zero badge and no known running version.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn new(
        config: PlatformConfig,
        dispatcher: Rc<dyn ActionDispatcher>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            badge: BadgeState::new(FaviconBadgeRenderer, config.badge_colors.clone()),
            versions: VersionTracker::new(),
            fetcher: WebVersionFetcher::new(config.version_path.clone()),
            dispatcher,
            config,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

impl Platform for WebPlatform {
    fn human_readable_name(&self) -> &'static str {
        "Web Platform"
    }

    fn supports_notifications(&self) -> bool {
        notifications::supports_notifications()
    }

    fn may_send_notifications(&self) -> bool {
        notifications::notification_permission().is_some_and(|permission| permission.is_granted())
    }

    fn request_notification_permission<'a>(&'a self) -> PlatformFuture<'a, NotificationPermission> {
        Box::pin(notifications::request_notification_permission())
    }

    fn display_notification(&self, notification: &RoomNotification) -> Result<(), String> {
        notifications::display_room_notification(
            notification,
            &self.config.notification_tag,
            self.config.notification_auto_close_ms,
            self.dispatcher.clone(),
        )
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
        Box::pin(self.versions.app_version(&self.fetcher))
    }

    fn poll_for_update<'a>(&'a self) -> PlatformFuture<'a, ()> {
        Box::pin(async move {
            let _ = self
                .versions
                .poll_for_update(&self.fetcher, self.dispatcher.as_ref())
                .await;
        })
    }

    fn can_self_update(&self) -> bool {
        true
    }

    fn install_update(&self) {
        if let Err(err) = bridge::reload_page() {
            logging::error!("page reload for update failed: {err}");
        }
    }

    fn default_device_display_name(&self) -> String {
        device_display_name(
            bridge::page_href().as_deref(),
            bridge::user_agent().as_deref(),
        )
    }

    fn screen_capture_error_string(&self) -> Option<&'static str> {
        screen_capture_error_string(bridge::page_protocol().as_deref())
    }
}

#[cfg(test)]
mod tests {
    use chat_platform::MemoryActionDispatcher;
    use pretty_assertions::assert_eq;

    use super::*;

    fn platform() -> (WebPlatform, MemoryActionDispatcher) {
        let dispatcher = MemoryActionDispatcher::default();
        let platform = WebPlatform::new(PlatformConfig::default(), Rc::new(dispatcher.clone()))
            .expect("default config is valid");
        (platform, dispatcher)
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = PlatformConfig {
            notification_tag: String::new(),
            ..PlatformConfig::default()
        };

        let err = WebPlatform::new(config, Rc::new(MemoryActionDispatcher::default()))
            .expect_err("empty tag is rejected");
        assert_eq!(
            err,
            ConfigError::Invalid {
                field: "notificationTag",
                reason: "must not be empty",
            }
        );
    }

    #[test]
    fn web_platform_identifies_itself_and_can_self_update() {
        let (platform, _) = platform();
        assert_eq!(platform.human_readable_name(), "Web Platform");
        assert!(platform.can_self_update());
        assert_eq!(platform.config().notification_tag, "vector");
    }

    #[test]
    fn badge_state_is_recorded_even_when_rendering_fails() {
        let (platform, _) = platform();
        let platform_obj: &dyn Platform = &platform;

        platform_obj.set_notification_count(3);
        platform_obj.set_notification_count(3);
        platform_obj.set_error_status(true);

        assert_eq!(platform_obj.notification_count(), 3);
        assert!(platform_obj.error_did_occur());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_web_platform_degrades_without_panicking() {
        use chat_platform::{RoomRef, SCREEN_CAPTURE_REQUIRES_HTTPS};
        use futures::executor::block_on;

        let (platform, dispatcher) = platform();
        let platform_obj: &dyn Platform = &platform;

        assert!(!platform_obj.supports_notifications());
        assert!(!platform_obj.may_send_notifications());
        assert_eq!(
            block_on(platform_obj.request_notification_permission()),
            NotificationPermission::Denied
        );
        assert!(platform_obj
            .display_notification(&RoomNotification {
                title: "t".to_string(),
                body: "b".to_string(),
                icon_url: None,
                room: RoomRef::new("!r:hs"),
            })
            .is_err());

        block_on(platform_obj.poll_for_update());
        assert_eq!(platform_obj.running_version(), None);
        assert_eq!(
            block_on(platform_obj.app_version()),
            Err(VersionError::Unavailable)
        );
        assert!(dispatcher.actions().is_empty());

        platform_obj.install_update();
        assert_eq!(
            platform_obj.default_device_display_name(),
            "unknown app via unknown browser on unknown os"
        );
        assert_eq!(
            platform_obj.screen_capture_error_string(),
            Some(SCREEN_CAPTURE_REQUIRES_HTTPS)
        );
    }
}
