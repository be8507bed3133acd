use futures::channel::oneshot;
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::{closure::Closure, prelude::*, JsCast};
use wasm_bindgen_futures::JsFuture;

use super::*;

#[wasm_bindgen(inline_js = r#"
const BADGE_CANVAS_SIZE = 32;
const faviconState = {
  original: null,
  image: null,
  loading: false,
  failed: false,
  pending: null,
};

function iconLink() {
  let link = document.querySelector("link[rel~='icon']");
  if (!link) {
    link = document.createElement('link');
    link.rel = 'icon';
    document.head.appendChild(link);
  }
  return link;
}

function drawBadge(label, background) {
  const size = BADGE_CANVAS_SIZE;
  const canvas = document.createElement('canvas');
  canvas.width = size;
  canvas.height = size;
  const ctx = canvas.getContext('2d');
  if (!ctx) {
    throw new Error('2d canvas context unavailable');
  }
  if (faviconState.image) {
    ctx.drawImage(faviconState.image, 0, 0, size, size);
  }

  ctx.font = `bold ${label.length > 2 ? 12 : 16}px sans-serif`;
  const height = Math.round(size * 0.6);
  const width = Math.min(size, Math.max(height, ctx.measureText(label).width + 8));
  const x = size - width;
  const y = size - height;
  const r = height / 2;

  ctx.fillStyle = background;
  ctx.beginPath();
  ctx.moveTo(x + r, y);
  ctx.arcTo(x + width, y, x + width, y + height, r);
  ctx.arcTo(x + width, y + height, x, y + height, r);
  ctx.arcTo(x, y + height, x, y, r);
  ctx.arcTo(x, y, x + width, y, r);
  ctx.closePath();
  ctx.fill();

  ctx.fillStyle = '#fff';
  ctx.textAlign = 'center';
  ctx.textBaseline = 'middle';
  ctx.fillText(label, x + width / 2, y + height / 2 + 1);

  iconLink().href = canvas.toDataURL('image/png');
}

function flushPending() {
  const pending = faviconState.pending;
  faviconState.pending = null;
  if (pending) {
    drawBadge(pending.label, pending.background);
  }
}

function loadOriginal() {
  faviconState.loading = true;
  const image = new Image();
  image.crossOrigin = 'anonymous';
  const settle = (loaded) => {
    faviconState.loading = false;
    if (loaded) {
      faviconState.image = image;
    } else {
      faviconState.failed = true;
    }
    try {
      flushPending();
    } catch (err) {
      console.warn(`Failed to set badge count: ${err && err.message ? err.message : err}`);
    }
  };
  image.onload = () => settle(true);
  image.onerror = () => settle(false);
  image.src = faviconState.original;
}

export function jsRenderFaviconBadge(label, background) {
  const link = iconLink();
  if (faviconState.original === null) {
    faviconState.original = link.href || new URL('favicon.ico', document.baseURI).href;
  }

  if (label === undefined || label === null) {
    faviconState.pending = null;
    link.href = faviconState.original;
    return;
  }

  faviconState.pending = { label, background };
  if (faviconState.image || faviconState.failed) {
    flushPending();
  } else if (!faviconState.loading) {
    loadOriginal();
  }
}
"#)]
extern "C" {
    #[wasm_bindgen(js_name = jsRenderFaviconBadge, catch)]
    fn js_render_favicon_badge(label: Option<String>, background: &str) -> Result<(), JsValue>;
}

fn js_error_to_string(err: JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Ok(message) = Reflect::get(&err, &JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return text;
        }
    }
    format!("{err:?}")
}

fn window() -> Result<web_sys::Window, String> {
    web_sys::window().ok_or_else(|| "window unavailable".to_string())
}

fn notification_constructor() -> Option<JsValue> {
    let window = web_sys::window()?;
    let constructor = Reflect::get(&window, &JsValue::from_str("Notification")).ok()?;
    (!constructor.is_undefined() && !constructor.is_null()).then_some(constructor)
}

fn set_property(target: &Object, key: &str, value: &JsValue) -> Result<(), String> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(js_error_to_string)
}

/// Live `setInterval` registration; the callback stays alive as long as the handle.
pub struct IntervalHandle {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl std::fmt::Debug for IntervalHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntervalHandle").field("id", &self.id).finish()
    }
}

pub fn notifications_supported() -> bool {
    notification_constructor().is_some()
}

pub fn notification_permission() -> Option<String> {
    let constructor = notification_constructor()?;
    Reflect::get(&constructor, &JsValue::from_str("permission"))
        .ok()?
        .as_string()
}

pub async fn request_notification_permission() -> Result<String, String> {
    if !notifications_supported() {
        return Err("Notification API unavailable".to_string());
    }

    let (tx, rx) = oneshot::channel::<String>();
    let on_result = Closure::once_into_js(move |value: JsValue| {
        let permission = value.as_string().unwrap_or_else(|| "default".to_string());
        let _ = tx.send(permission);
    });
    // The returned promise resolves with the same value the callback receives.
    let _ = web_sys::Notification::request_permission_with_permission_callback(
        on_result.unchecked_ref::<Function>(),
    )
    .map_err(js_error_to_string)?;

    rx.await
        .map_err(|_| "notification permission prompt was dropped".to_string())
}

pub fn show_notification(
    spec: NotificationSpec<'_>,
    on_click: Box<dyn FnOnce()>,
) -> Result<(), String> {
    let window = window()?;

    let options = Object::new();
    set_property(&options, "body", &JsValue::from_str(spec.body))?;
    set_property(&options, "tag", &JsValue::from_str(spec.tag))?;
    set_property(&options, "silent", &JsValue::TRUE)?;
    if let Some(icon_url) = spec.icon_url {
        set_property(&options, "icon", &JsValue::from_str(icon_url))?;
    }

    let notification = web_sys::Notification::new_with_options(
        spec.title,
        options.unchecked_ref::<web_sys::NotificationOptions>(),
    )
    .map_err(|err| format!("notification dispatch failed: {}", js_error_to_string(err)))?;

    let clicked = notification.clone();
    let focus_target = window.clone();
    let on_click: Closure<dyn FnMut()> = Closure::once(move || {
        on_click();
        let _ = focus_target.focus();
        clicked.close();
    });
    notification.set_onclick(Some(on_click.as_ref().unchecked_ref()));

    // Released on expiry whether or not it was clicked.
    let expiring = notification.clone();
    let on_expire = Closure::once_into_js(move || {
        expiring.set_onclick(None);
        expiring.close();
        drop(on_click);
    });
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            on_expire.unchecked_ref(),
            i32::try_from(spec.auto_close_ms).unwrap_or(i32::MAX),
        )
        .map_err(js_error_to_string)?;
    Ok(())
}

pub fn render_favicon_badge(label: Option<&str>, background: &str) -> Result<(), String> {
    js_render_favicon_badge(label.map(str::to_string), background).map_err(js_error_to_string)
}

pub async fn fetch_text(url: &str) -> Result<(u16, String), String> {
    let window = window()?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_error_to_string)?
        .dyn_into::<web_sys::Response>()
        .map_err(|_| "fetch resolved to a non-Response value".to_string())?;
    let status = response.status();
    let text = response.text().map_err(js_error_to_string)?;
    let body = JsFuture::from(text)
        .await
        .map_err(js_error_to_string)?
        .as_string()
        .unwrap_or_default();
    Ok((status, body))
}

pub fn page_href() -> Option<String> {
    web_sys::window()?.location().href().ok()
}

pub fn page_protocol() -> Option<String> {
    web_sys::window()?.location().protocol().ok()
}

pub fn user_agent() -> Option<String> {
    web_sys::window()?.navigator().user_agent().ok()
}

pub fn reload_page() -> Result<(), String> {
    window()?.location().reload().map_err(js_error_to_string)
}

pub fn set_interval(interval_ms: u32, callback: Box<dyn FnMut()>) -> Result<IntervalHandle, String> {
    let window = window()?;
    let callback = Closure::wrap(callback);
    let id = window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            i32::try_from(interval_ms).unwrap_or(i32::MAX),
        )
        .map_err(js_error_to_string)?;
    Ok(IntervalHandle {
        id,
        _callback: callback,
    })
}

pub fn clear_interval(handle: &IntervalHandle) {
    if let Some(window) = web_sys::window() {
        window.clear_interval_with_handle(handle.id);
    }
}

pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future)
}
