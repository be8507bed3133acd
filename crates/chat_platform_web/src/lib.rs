//! Browser (`wasm32`) implementation of the [`chat_platform::Platform`] contract.
//!
//! This crate wires notifications, the favicon badge, deployed-version polling and environment
//! queries to browser APIs. All browser access goes through the private `bridge` module, which
//! falls back to "unavailable" behavior off wasm so the adapters still build and test natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and the platform adapter factory.
pub mod adapters;
mod bridge;
pub mod favicon;
pub mod notifications;
pub mod platform;
pub mod version;

pub use adapters::{build_platform, host_strategy_name, selected_host_strategy, PlatformAdapter};
pub use favicon::FaviconBadgeRenderer;
pub use platform::WebPlatform;
pub use version::{
    start_update_polling, start_update_polling_on, BrowserPollTimer, PollTimer, UpdatePollHandle,
    WebVersionFetcher,
};
