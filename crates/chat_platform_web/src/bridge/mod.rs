//! Browser capability bridge for `chat_platform_web` adapters.
//!
//! Adapters only talk to the browser through this module. Calls are routed to the wasm or
//! non-wasm implementation in `interop`.

mod interop;

pub(crate) use interop::{IntervalHandle, NotificationSpec};

pub(crate) fn notifications_supported() -> bool {
    interop::notifications_supported()
}

pub(crate) fn notification_permission() -> Option<String> {
    interop::notification_permission()
}

pub(crate) async fn request_notification_permission() -> Result<String, String> {
    interop::request_notification_permission().await
}

pub(crate) fn show_notification(
    spec: NotificationSpec<'_>,
    on_click: Box<dyn FnOnce()>,
) -> Result<(), String> {
    interop::show_notification(spec, on_click)
}

pub(crate) fn render_favicon_badge(label: Option<&str>, background: &str) -> Result<(), String> {
    interop::render_favicon_badge(label, background)
}

pub(crate) async fn fetch_text(url: &str) -> Result<(u16, String), String> {
    interop::fetch_text(url).await
}

pub(crate) fn page_href() -> Option<String> {
    interop::page_href()
}

pub(crate) fn page_protocol() -> Option<String> {
    interop::page_protocol()
}

pub(crate) fn user_agent() -> Option<String> {
    interop::user_agent()
}

pub(crate) fn reload_page() -> Result<(), String> {
    interop::reload_page()
}

pub(crate) fn set_interval(
    interval_ms: u32,
    callback: Box<dyn FnMut()>,
) -> Result<IntervalHandle, String> {
    interop::set_interval(interval_ms, callback)
}

pub(crate) fn clear_interval(handle: &IntervalHandle) {
    interop::clear_interval(handle)
}

pub(crate) fn spawn_local<F>(future: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    interop::spawn_local(future)
}
