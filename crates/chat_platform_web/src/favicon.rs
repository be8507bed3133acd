//! Favicon badge renderer.

use chat_platform::{BadgeAppearance, BadgeRenderer};

use crate::bridge;

#[derive(Debug, Clone, Copy, Default)]
/// Draws the badge over the page's `<link rel="icon">` image.
///
/// The original favicon is captured on first render and restored when the badge is hidden.
pub struct FaviconBadgeRenderer;

impl BadgeRenderer for FaviconBadgeRenderer {
    fn render(&self, appearance: &BadgeAppearance) -> Result<(), String> {
        let label = appearance.label.text();
        bridge::render_favicon_badge(label.as_deref(), &appearance.background)
    }
}
