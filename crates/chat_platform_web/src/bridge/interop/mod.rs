//! Target routing for browser API calls.
//!
//! The wasm implementation talks to `web-sys` and a small inline JS module; the non-wasm
//! implementation reports every capability as unavailable so the crate builds and tests natively.

use std::future::Future;

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

pub use imp::IntervalHandle;

/// Everything needed to create one browser notification.
#[derive(Debug, Clone, Copy)]
pub struct NotificationSpec<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub icon_url: Option<&'a str>,
    pub tag: &'a str,
    pub auto_close_ms: u32,
}

pub fn notifications_supported() -> bool {
    imp::notifications_supported()
}

pub fn notification_permission() -> Option<String> {
    imp::notification_permission()
}

pub async fn request_notification_permission() -> Result<String, String> {
    imp::request_notification_permission().await
}

pub fn show_notification(
    spec: NotificationSpec<'_>,
    on_click: Box<dyn FnOnce()>,
) -> Result<(), String> {
    imp::show_notification(spec, on_click)
}

pub fn render_favicon_badge(label: Option<&str>, background: &str) -> Result<(), String> {
    imp::render_favicon_badge(label, background)
}

pub async fn fetch_text(url: &str) -> Result<(u16, String), String> {
    imp::fetch_text(url).await
}

pub fn page_href() -> Option<String> {
    imp::page_href()
}

pub fn page_protocol() -> Option<String> {
    imp::page_protocol()
}

pub fn user_agent() -> Option<String> {
    imp::user_agent()
}

pub fn reload_page() -> Result<(), String> {
    imp::reload_page()
}

pub fn set_interval(interval_ms: u32, callback: Box<dyn FnMut()>) -> Result<IntervalHandle, String> {
    imp::set_interval(interval_ms, callback)
}

pub fn clear_interval(handle: &IntervalHandle) {
    imp::clear_interval(handle)
}

pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    imp::spawn_local(future)
}
