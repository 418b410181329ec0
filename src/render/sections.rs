// render/sections.rs

//! # Section Renderers
//!
//! One pure function per section kind. Each returns a single `<tr>` row for the
//! content table, or an empty string when the section has nothing to show.
//! Style values fall back from the section, to the [`Palette`], to hard
//! defaults; all user text is escaped on the way in.
//!
//! The visual section (progress bars and countdowns) lives in
//! [`crate::render::visual`].

use crate::render::html::{css_length_or, css_or, escape_html, inline_markup, non_blank, parse_px, safe_url};
use crate::render::theme::Palette;
use crate::render::CONTENT_WIDTH;
use crate::template::structure::{
    Action, ActionsSection, BodySection, FooterSection, HeaderSection, Hero, Link, SnapshotSection,
    SnapshotStyle, SocialLink, SupportSection, TitleSection,
};

pub const DEFAULT_LOGO_WIDTH: u32 = 150;
pub const DEFAULT_ICON_SIZE: &str = "48px";
pub const DEFAULT_IMAGE_WIDTH: u32 = 400;
pub const DEFAULT_BODY_FONT_SIZE: &str = "16px";
pub const DEFAULT_BODY_LINE_HEIGHT: &str = "1.6";

const BORDER_COLOR: &str = "#e5e7eb";
const SUBTLE_BACKGROUND: &str = "#f9fafb";
const SUPPORT_DELIMITER: &str = "&nbsp;&nbsp;|&nbsp;&nbsp;";
const LEGAL_DELIMITER: &str = "&nbsp;&middot;&nbsp;";

/// Percentage widths email clients cannot be trusted with, and the fixed
/// pixel width used instead.
const PERCENT_WIDTHS: [(u32, u32); 4] = [(25, 150), (50, 300), (75, 450), (100, 600)];

/// Wraps section content in a content-table row.
fn row(section: &str, style: &str, inner: &str) -> String {
    format!(
        "<tr><td class=\"section-{}\" style=\"{}\">{}</td></tr>\n",
        section, style, inner
    )
}

// ============================
// Header
// ============================

/// Logo (only with a `logoUrl`) and tagline (only when non-empty).
pub fn header(section: &HeaderSection, palette: &Palette) -> String {
    let mut inner = String::new();

    if let Some(url) = non_blank(section.logo_url.as_ref()) {
        let width = section
            .logo_width
            .as_deref()
            .and_then(parse_px)
            .unwrap_or(DEFAULT_LOGO_WIDTH)
            .min(CONTENT_WIDTH);
        let alt = non_blank(section.logo_alt.as_ref()).unwrap_or("Logo");
        inner.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" width=\"{}\" style=\"display: block; margin: 0 auto; width: {}px; max-width: 100%; height: auto; border: 0;\">",
            safe_url(url),
            escape_html(alt),
            width,
            width
        ));
    }

    if let Some(tagline) = non_blank(section.tagline.as_ref()) {
        inner.push_str(&format!(
            "<p style=\"margin: 8px 0 0; font-size: 14px; color: {};\">{}</p>",
            palette.muted_color,
            escape_html(tagline)
        ));
    }

    if inner.is_empty() {
        return String::new();
    }
    row("header", "padding: 32px 40px 16px; text-align: center;", &inner)
}

// ============================
// Hero
// ============================

/// The pixel width chosen for a hero image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageWidth {
    /// No width given
    Default,
    /// A pixel width, capped at the content width
    Pixels(u32),
    /// A percentage from the lookup table
    Mapped { percent: u32, px: u32 },
    /// A percentage outside the table, or something unparseable
    Flagged(String),
}

impl ImageWidth {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return ImageWidth::Default;
        };

        if let Some(percent) = raw.strip_suffix('%') {
            let mapped = percent
                .trim()
                .parse::<u32>()
                .ok()
                .and_then(|p| PERCENT_WIDTHS.iter().find(|(pct, _)| *pct == p));
            return match mapped {
                Some((percent, px)) => ImageWidth::Mapped {
                    percent: *percent,
                    px: *px,
                },
                None => ImageWidth::Flagged(raw.to_string()),
            };
        }

        match parse_px(raw) {
            Some(px) => ImageWidth::Pixels(px.min(CONTENT_WIDTH)),
            None => ImageWidth::Flagged(raw.to_string()),
        }
    }

    pub fn px(&self) -> u32 {
        match self {
            ImageWidth::Default | ImageWidth::Flagged(_) => DEFAULT_IMAGE_WIDTH,
            ImageWidth::Pixels(px) | ImageWidth::Mapped { px, .. } => *px,
        }
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self, ImageWidth::Flagged(_))
    }
}

/// Icon glyph or fixed-width image.
pub fn hero(hero: &Hero, palette: &Palette) -> String {
    match hero {
        Hero::None => String::new(),
        Hero::Icon { icon, icon_size } => {
            let Some(glyph) = non_blank(icon.as_ref()) else {
                return String::new();
            };
            let size = css_length_or(icon_size.as_ref(), DEFAULT_ICON_SIZE);
            row(
                "hero",
                "padding: 24px 40px 8px; text-align: center;",
                &format!(
                    "<div style=\"font-size: {}; line-height: 1.2; color: {};\">{}</div>",
                    size,
                    palette.heading_color,
                    escape_html(glyph)
                ),
            )
        }
        Hero::Image {
            image_url,
            image_alt,
            image_width,
        } => {
            let Some(url) = non_blank(image_url.as_ref()) else {
                return String::new();
            };
            let width = ImageWidth::parse(image_width.as_deref()).px();
            let alt = non_blank(image_alt.as_ref()).unwrap_or("");
            row(
                "hero",
                "padding: 16px 40px; text-align: center;",
                &format!(
                    "<img src=\"{}\" alt=\"{}\" width=\"{}\" style=\"display: block; margin: 0 auto; width: {}px; max-width: 100%; height: auto; border: 0;\">",
                    safe_url(url),
                    escape_html(alt),
                    width,
                    width
                ),
            )
        }
    }
}

// ============================
// Title
// ============================

pub fn title(section: &TitleSection, palette: &Palette) -> String {
    let Some(text) = non_blank(section.text.as_ref()) else {
        return String::new();
    };
    let size = css_length_or(section.size.as_ref(), &palette.title_size);
    let weight = css_or(section.weight.as_ref(), &palette.title_weight);
    let color = css_or(section.color.as_ref(), &palette.heading_color);
    let align = css_or(section.align.as_ref(), &palette.title_align);

    row(
        "title",
        &format!("padding: 8px 40px; text-align: {};", align),
        &format!(
            "<h1 style=\"margin: 0; font-family: {}; font-size: {}; font-weight: {}; line-height: 1.3; color: {};\">{}</h1>",
            palette.font_family,
            size,
            weight,
            color,
            escape_html(text)
        ),
    )
}

// ============================
// Body
// ============================

pub fn body(section: &BodySection, palette: &Palette) -> String {
    let font_size = css_length_or(section.font_size.as_ref(), DEFAULT_BODY_FONT_SIZE);
    let line_height = css_or(section.line_height.as_ref(), DEFAULT_BODY_LINE_HEIGHT);

    let paragraphs: String = section
        .paragraphs
        .iter()
        .filter(|p| !p.trim().is_empty())
        .map(|p| {
            format!(
                "<p style=\"margin: 0 0 16px; font-size: {}; line-height: {}; color: {};\">{}</p>",
                font_size,
                line_height,
                palette.text_color,
                inline_markup(p.trim())
            )
        })
        .collect();

    if paragraphs.is_empty() {
        return String::new();
    }
    row("body", "padding: 16px 40px 8px; text-align: left;", &paragraphs)
}

// ============================
// Snapshot
// ============================

/// Label/value facts table. Facts without a label are skipped.
pub fn snapshot(section: &SnapshotSection, palette: &Palette) -> String {
    let facts: Vec<(&str, &str)> = section
        .facts
        .iter()
        .filter_map(|fact| {
            let label = non_blank(fact.label.as_ref())?;
            Some((label, fact.value.as_deref().map(str::trim).unwrap_or("")))
        })
        .collect();
    if facts.is_empty() {
        return String::new();
    }

    let (table_background, border) = match section.style {
        SnapshotStyle::Card => (SUBTLE_BACKGROUND, "none".to_string()),
        SnapshotStyle::Table | SnapshotStyle::Striped => {
            (palette.content_background.as_str(), format!("1px solid {}", BORDER_COLOR))
        }
    };

    let mut rows = String::new();
    if let Some(title) = non_blank(section.title.as_ref()) {
        rows.push_str(&format!(
            "<tr><td colspan=\"2\" style=\"padding: 12px 16px; font-size: 15px; font-weight: 700; color: {}; border-bottom: 1px solid {};\">{}</td></tr>",
            palette.heading_color,
            BORDER_COLOR,
            escape_html(title)
        ));
    }

    for (index, (label, value)) in facts.iter().enumerate() {
        let background = match section.style {
            SnapshotStyle::Striped if index % 2 == 1 => SUBTLE_BACKGROUND,
            _ => "transparent",
        };
        rows.push_str(&format!(
            "<tr style=\"background-color: {};\"><td style=\"padding: 10px 16px; font-size: 14px; color: {};\">{}</td><td align=\"right\" style=\"padding: 10px 16px; font-size: 14px; font-weight: 600; color: {}; text-align: right;\">{}</td></tr>",
            background,
            palette.muted_color,
            escape_html(label),
            palette.heading_color,
            escape_html(value)
        ));
    }

    row(
        "snapshot",
        "padding: 16px 40px;",
        &format!(
            "<table role=\"presentation\" class=\"facts-table\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" style=\"border-collapse: separate; border: {}; border-radius: 8px; background-color: {};\">{}</table>",
            border, table_background, rows
        ),
    )
}

// ============================
// Actions
// ============================

/// Primary and secondary buttons, each only when it has both a label and a url.
pub fn actions(section: &ActionsSection, palette: &Palette) -> String {
    let primary = section.primary.as_ref().and_then(|action| {
        button(action, &palette.primary_button, &palette.primary_button_text, palette)
    });
    let secondary = section.secondary.as_ref().and_then(|action| {
        button(action, &palette.secondary_button, &palette.secondary_button_text, palette)
    });

    let cells: String = [primary, secondary]
        .into_iter()
        .flatten()
        .map(|b| format!("<td style=\"padding: 0 6px;\">{}</td>", b))
        .collect();
    if cells.is_empty() {
        return String::new();
    }

    row(
        "actions",
        "padding: 16px 40px 24px; text-align: center;",
        &format!(
            "<table role=\"presentation\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" align=\"center\" style=\"margin: 0 auto;\"><tr>{}</tr></table>",
            cells
        ),
    )
}

fn button(action: &Action, background: &str, text: &str, palette: &Palette) -> Option<String> {
    let label = non_blank(action.label.as_ref())?;
    let url = non_blank(action.url.as_ref())?;
    let background = css_or(action.color.as_ref(), background);
    let text = css_or(action.text_color.as_ref(), text);

    Some(format!(
        "<a href=\"{}\" target=\"_blank\" class=\"button\" style=\"display: inline-block; padding: 12px 28px; border-radius: 6px; background-color: {}; color: {}; font-family: {}; font-size: 16px; font-weight: 600; line-height: 1.2; text-decoration: none;\">{}</a>",
        safe_url(url),
        background,
        text,
        palette.font_family,
        escape_html(label)
    ))
}

// ============================
// Support
// ============================

pub fn support(section: &SupportSection, palette: &Palette) -> String {
    let links: Vec<String> = section
        .links
        .iter()
        .filter_map(|l| link(l, &palette.link_color))
        .collect();
    if links.is_empty() {
        return String::new();
    }

    let mut inner = String::new();
    if let Some(title) = non_blank(section.title.as_ref()) {
        inner.push_str(&format!(
            "<p style=\"margin: 0 0 8px; font-size: 14px; font-weight: 600; color: {};\">{}</p>",
            palette.heading_color,
            escape_html(title)
        ));
    }
    inner.push_str(&format!(
        "<p style=\"margin: 0; font-size: 14px; color: {};\">{}</p>",
        palette.muted_color,
        links.join(SUPPORT_DELIMITER)
    ));

    row("support", "padding: 16px 40px; text-align: center;", &inner)
}

fn link(link: &Link, color: &str) -> Option<String> {
    let label = non_blank(link.label.as_ref())?;
    let url = non_blank(link.url.as_ref())?;
    Some(format!(
        "<a href=\"{}\" target=\"_blank\" style=\"color: {}; text-decoration: underline;\">{}</a>",
        safe_url(url),
        color,
        escape_html(label)
    ))
}

// ============================
// Footer
// ============================

/// Glyph and display name for a social platform.
pub fn social_icon(platform: &str) -> (&'static str, &'static str) {
    match platform.trim().to_lowercase().as_str() {
        "facebook" => ("\u{1F4D8}", "Facebook"),
        "twitter" => ("\u{1F426}", "Twitter"),
        "x" => ("\u{2716}\u{FE0F}", "X"),
        "instagram" => ("\u{1F4F8}", "Instagram"),
        "linkedin" => ("\u{1F4BC}", "LinkedIn"),
        "youtube" => ("\u{25B6}\u{FE0F}", "YouTube"),
        "tiktok" => ("\u{1F3B5}", "TikTok"),
        "github" => ("\u{1F419}", "GitHub"),
        "discord" => ("\u{1F4AC}", "Discord"),
        "website" | "web" => ("\u{1F310}", "Website"),
        "email" | "mail" => ("\u{2709}\u{FE0F}", "Email"),
        _ => ("\u{1F517}", "Link"),
    }
}

/// Tagline, social links, legal links and copyright. The copyright line is
/// generated for `year` when the section does not supply one.
pub fn footer(section: &FooterSection, palette: &Palette, year: i32) -> String {
    let paragraph = |content: &str| {
        format!(
            "<p style=\"margin: 0 0 10px; font-size: 12px; line-height: 1.5; color: {};\">{}</p>",
            palette.muted_color, content
        )
    };
    let mut inner = String::new();

    if let Some(tagline) = non_blank(section.tagline.as_ref()) {
        inner.push_str(&paragraph(&escape_html(tagline)));
    }

    let social: String = section.social_links.iter().filter_map(social_link).collect();
    if !social.is_empty() {
        inner.push_str(&paragraph(&social));
    }

    let legal: Vec<String> = section
        .legal_links
        .iter()
        .filter_map(|l| link(l, &palette.muted_color))
        .collect();
    if !legal.is_empty() {
        inner.push_str(&paragraph(&legal.join(LEGAL_DELIMITER)));
    }

    let copyright = match non_blank(section.copyright.as_ref()) {
        Some(text) => escape_html(text),
        None => match non_blank(section.company_name.as_ref()) {
            Some(company) => format!("&copy; {} {}. All rights reserved.", year, escape_html(company)),
            None => format!("&copy; {} All rights reserved.", year),
        },
    };
    inner.push_str(&paragraph(&copyright));

    row(
        "footer",
        &format!(
            "padding: 24px 40px 32px; text-align: center; border-top: 1px solid {};",
            BORDER_COLOR
        ),
        &inner,
    )
}

fn social_link(social: &SocialLink) -> Option<String> {
    let url = non_blank(social.url.as_ref())?;
    let (glyph, name) = social_icon(social.platform.as_deref().unwrap_or(""));
    Some(format!(
        "<a href=\"{}\" target=\"_blank\" title=\"{}\" style=\"display: inline-block; margin: 0 6px; font-size: 20px; text-decoration: none;\">{}</a>",
        safe_url(url),
        name,
        glyph
    ))
}
