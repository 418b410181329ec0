// render/theme.rs

//! # Resolved Theme
//!
//! [`Palette`] is a [`Theme`] with every gap filled by a hard default and every
//! value sanitized for inline CSS. Section renderers only ever read a palette.

use crate::render::html::css_or;
use crate::template::structure::Theme;

pub const DEFAULT_FONT_FAMILY: &str = "-apple-system, BlinkMacSystemFont, &#39;Segoe UI&#39;, Roboto, Helvetica, Arial, sans-serif";
pub const DEFAULT_TEXT_COLOR: &str = "#374151";
pub const DEFAULT_HEADING_COLOR: &str = "#111827";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#f3f4f6";
pub const DEFAULT_CONTENT_BACKGROUND: &str = "#ffffff";
pub const DEFAULT_MUTED_COLOR: &str = "#6b7280";
pub const DEFAULT_LINK_COLOR: &str = "#2563eb";
pub const DEFAULT_TITLE_SIZE: &str = "28px";
pub const DEFAULT_TITLE_WEIGHT: &str = "700";
pub const DEFAULT_TITLE_ALIGN: &str = "center";
pub const DEFAULT_PRIMARY_BUTTON: &str = "#2563eb";
pub const DEFAULT_PRIMARY_BUTTON_TEXT: &str = "#ffffff";
pub const DEFAULT_SECONDARY_BUTTON: &str = "#e5e7eb";
pub const DEFAULT_SECONDARY_BUTTON_TEXT: &str = "#111827";
pub const DEFAULT_DARK_BACKGROUND: &str = "#111827";
pub const DEFAULT_DARK_TEXT: &str = "#f9fafb";

/// Fully resolved, CSS-safe style values.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub font_family: String,
    pub text_color: String,
    pub heading_color: String,
    pub background_color: String,
    pub content_background: String,
    pub muted_color: String,
    pub link_color: String,
    pub title_size: String,
    pub title_weight: String,
    pub title_align: String,
    pub primary_button: String,
    pub primary_button_text: String,
    pub secondary_button: String,
    pub secondary_button_text: String,
    pub dark_mode: bool,
    pub dark_background: String,
    pub dark_text: String,
}

impl Palette {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            font_family: css_or(theme.font_family.as_ref(), DEFAULT_FONT_FAMILY),
            text_color: css_or(theme.text_color.as_ref(), DEFAULT_TEXT_COLOR),
            heading_color: css_or(theme.heading_color.as_ref(), DEFAULT_HEADING_COLOR),
            background_color: css_or(theme.background_color.as_ref(), DEFAULT_BACKGROUND_COLOR),
            content_background: css_or(theme.content_background_color.as_ref(), DEFAULT_CONTENT_BACKGROUND),
            muted_color: css_or(theme.muted_color.as_ref(), DEFAULT_MUTED_COLOR),
            link_color: css_or(theme.link_color.as_ref(), DEFAULT_LINK_COLOR),
            title_size: css_or(theme.title_size.as_ref(), DEFAULT_TITLE_SIZE),
            title_weight: css_or(theme.title_weight.as_ref(), DEFAULT_TITLE_WEIGHT),
            title_align: css_or(theme.title_align.as_ref(), DEFAULT_TITLE_ALIGN),
            primary_button: css_or(theme.primary_button_color.as_ref(), DEFAULT_PRIMARY_BUTTON),
            primary_button_text: css_or(theme.primary_button_text_color.as_ref(), DEFAULT_PRIMARY_BUTTON_TEXT),
            secondary_button: css_or(theme.secondary_button_color.as_ref(), DEFAULT_SECONDARY_BUTTON),
            secondary_button_text: css_or(
                theme.secondary_button_text_color.as_ref(),
                DEFAULT_SECONDARY_BUTTON_TEXT,
            ),
            dark_mode: theme.dark_mode.unwrap_or(false),
            dark_background: css_or(theme.dark_background_color.as_ref(), DEFAULT_DARK_BACKGROUND),
            dark_text: css_or(theme.dark_text_color.as_ref(), DEFAULT_DARK_TEXT),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}
