//! Typed platform contracts and shared models for a browser-hosted chat client.
//!
//! This crate is the target-independent boundary for platform capabilities: notifications, the
//! unread/error badge, deployed-version polling and environment queries. Concrete browser
//! adapters live in `chat_platform_web`; everything here builds and tests on any target.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod actions;
pub mod badge;
pub mod config;
pub mod environment;
pub mod notifications;
pub mod platform;
pub mod time;
pub mod version;

pub use actions::{ActionDispatcher, HostAction, MemoryActionDispatcher, NoopActionDispatcher};
pub use badge::{
    badge_appearance, BadgeAppearance, BadgeLabel, BadgeRenderer, BadgeState, NoopBadgeRenderer,
    ERROR_GLYPH,
};
pub use config::{BadgeColors, ConfigError, PlatformConfig};
pub use environment::{
    detect_browser, detect_os, device_display_name, screen_capture_error_string,
    strip_query_and_fragment, SCREEN_CAPTURE_REQUIRES_HTTPS,
};
pub use notifications::{NotificationPermission, RoomNotification, RoomRef};
pub use platform::{HostStrategy, NoopPlatform, Platform, PlatformFuture};
pub use time::unix_time_ms_now;
pub use version::{
    version_from_response, version_request_url, NoopVersionFetcher, VersionError, VersionFetcher,
    VersionTracker,
};
