//! Unread/error badge state and render rule.

use std::cell::Cell;

use leptos::logging;

use crate::config::BadgeColors;

/// Glyph shown while the error flag is raised and there is no unread count.
pub const ERROR_GLYPH: &str = "\u{d7}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What the badge displays.
pub enum BadgeLabel {
    /// No badge.
    Hidden,
    /// Numeric unread count.
    Count(u32),
    /// Error glyph ([`ERROR_GLYPH`]).
    ErrorGlyph,
}

impl BadgeLabel {
    /// Returns the text drawn inside the badge, or `None` when hidden.
    pub fn text(self) -> Option<String> {
        match self {
            Self::Hidden => None,
            Self::Count(count) => Some(count.to_string()),
            Self::ErrorGlyph => Some(ERROR_GLYPH.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Fully resolved badge ready for a renderer.
pub struct BadgeAppearance {
    /// Badge content.
    pub label: BadgeLabel,
    /// CSS background color.
    pub background: String,
}

/// Resolves the badge for a count and error flag.
///
/// The error flag wins over the plain count: it switches to the error color and shows the error
/// glyph when there is nothing to count.
pub fn badge_appearance(count: u32, error_did_occur: bool, colors: &BadgeColors) -> BadgeAppearance {
    if error_did_occur {
        let label = if count == 0 {
            BadgeLabel::ErrorGlyph
        } else {
            BadgeLabel::Count(count)
        };
        return BadgeAppearance {
            label,
            background: colors.error.clone(),
        };
    }

    let label = if count == 0 {
        BadgeLabel::Hidden
    } else {
        BadgeLabel::Count(count)
    };
    BadgeAppearance {
        label,
        background: colors.count.clone(),
    }
}

/// Draws a resolved badge somewhere visible to the user.
pub trait BadgeRenderer {
    /// Renders `appearance`, replacing whatever was drawn before.
    fn render(&self, appearance: &BadgeAppearance) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Renderer that draws nothing.
pub struct NoopBadgeRenderer;

impl BadgeRenderer for NoopBadgeRenderer {
    fn render(&self, _appearance: &BadgeAppearance) -> Result<(), String> {
        Ok(())
    }
}

/// Badge state owned by a platform adapter.
///
/// Holds the last count and error flag and re-renders only when one of them actually changes.
/// Renderer failures are logged and swallowed; the new state is kept either way.
#[derive(Debug)]
pub struct BadgeState<R> {
    notification_count: Cell<u32>,
    error_did_occur: Cell<bool>,
    colors: BadgeColors,
    renderer: R,
}

impl<R: BadgeRenderer> BadgeState<R> {
    /// Creates a badge with a zero count and no error.
    pub fn new(renderer: R, colors: BadgeColors) -> Self {
        Self {
            notification_count: Cell::new(0),
            error_did_occur: Cell::new(false),
            colors,
            renderer,
        }
    }

    /// Last recorded unread count.
    pub fn notification_count(&self) -> u32 {
        self.notification_count.get()
    }

    /// Last recorded error flag.
    pub fn error_did_occur(&self) -> bool {
        self.error_did_occur.get()
    }

    /// Records `count`; re-renders only when it differs from the stored value.
    pub fn set_notification_count(&self, count: u32) {
        if self.notification_count.replace(count) == count {
            return;
        }
        self.update_badge();
    }

    /// Records the error flag; re-renders only when it differs from the stored value.
    pub fn set_error_status(&self, error_did_occur: bool) {
        if self.error_did_occur.replace(error_did_occur) == error_did_occur {
            return;
        }
        self.update_badge();
    }

    /// The badge as it should currently look.
    pub fn appearance(&self) -> BadgeAppearance {
        badge_appearance(
            self.notification_count.get(),
            self.error_did_occur.get(),
            &self.colors,
        )
    }

    /// Borrow of the underlying renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn update_badge(&self) {
        if let Err(err) = self.renderer.render(&self.appearance()) {
            logging::warn!("Failed to set badge count: {err}");
        }
    }
}
