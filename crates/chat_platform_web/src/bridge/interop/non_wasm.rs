use super::*;

fn unsupported() -> String {
    "Browser platform APIs are only available when compiled for wasm32".to_string()
}

/// Never constructed off-wasm; [`set_interval`] always fails first.
#[derive(Debug)]
pub enum IntervalHandle {}

pub fn notifications_supported() -> bool {
    false
}

pub fn notification_permission() -> Option<String> {
    None
}

pub async fn request_notification_permission() -> Result<String, String> {
    Err(unsupported())
}

pub fn show_notification(
    _spec: NotificationSpec<'_>,
    _on_click: Box<dyn FnOnce()>,
) -> Result<(), String> {
    Err(unsupported())
}

pub fn render_favicon_badge(_label: Option<&str>, _background: &str) -> Result<(), String> {
    Err(unsupported())
}

pub async fn fetch_text(_url: &str) -> Result<(u16, String), String> {
    Err(unsupported())
}

pub fn page_href() -> Option<String> {
    None
}

pub fn page_protocol() -> Option<String> {
    None
}

pub fn user_agent() -> Option<String> {
    None
}

pub fn reload_page() -> Result<(), String> {
    Err(unsupported())
}

pub fn set_interval(
    _interval_ms: u32,
    _callback: Box<dyn FnMut()>,
) -> Result<IntervalHandle, String> {
    Err(unsupported())
}

pub fn clear_interval(handle: &IntervalHandle) {
    match *handle {}
}

pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    futures::executor::block_on(future)
}
