// render/composer.rs

//! # Document Composer
//!
//! Joins section rows into the table-based chrome email clients expect: an
//! outer full-width table carrying the page background and a centered content
//! table capped at [`CONTENT_WIDTH`] pixels. In `Document` mode the result is
//! a complete HTML page; in `Fragment` mode it is just the outer table, for
//! embedding in an existing page.

use crate::render::html::escape_html;
use crate::render::theme::Palette;
use crate::render::CONTENT_WIDTH;

/// Whether to produce a standalone page or an embeddable fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentMode {
    #[default]
    Document,
    Fragment,
}

/// Extra document-level content.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentOptions<'a> {
    pub mode: DocumentMode,
    /// Text for the `<title>` element (document mode only)
    pub title: Option<&'a str>,
    /// Hidden inbox preview text
    pub preheader: Option<&'a str>,
}

const BASE_STYLES: &str = "body { margin: 0; padding: 0; width: 100% !important; -webkit-text-size-adjust: 100%; }
table { border-collapse: collapse; }
img { -ms-interpolation-mode: bicubic; }
@media only screen and (max-width: 620px) {
  .email-content { width: 100% !important; border-radius: 0 !important; }
}
";

/// Composes ordered section rows into a document or fragment.
pub fn compose(fragments: &[String], palette: &Palette, options: &DocumentOptions<'_>) -> String {
    let mut body = String::new();

    if let Some(preheader) = options.preheader {
        body.push_str(&format!(
            "<div class=\"preheader\" style=\"display: none; max-height: 0; overflow: hidden; mso-hide: all;\">{}</div>\n",
            escape_html(preheader)
        ));
    }

    body.push_str(&format!(
        "<table role=\"presentation\" class=\"email-body\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" style=\"background-color: {};\">\n\
<tr><td align=\"center\" style=\"padding: 24px 12px;\">\n\
<table role=\"presentation\" class=\"email-content\" width=\"{}\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" align=\"center\" style=\"width: 100%; max-width: {}px; margin: 0 auto; background-color: {}; border-radius: 8px; font-family: {}; color: {};\">\n",
        palette.background_color,
        CONTENT_WIDTH,
        CONTENT_WIDTH,
        palette.content_background,
        palette.font_family,
        palette.text_color
    ));
    for fragment in fragments {
        body.push_str(fragment);
    }
    body.push_str("</table>\n</td></tr>\n</table>\n");

    match options.mode {
        DocumentMode::Fragment => body,
        DocumentMode::Document => document(&body, palette, options.title),
    }
}

fn document(body: &str, palette: &Palette, title: Option<&str>) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\" xmlns=\"http://www.w3.org/1999/xhtml\">\n<head>\n\
<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<meta name=\"x-apple-disable-message-reformatting\">\n",
    );
    if palette.dark_mode {
        html.push_str("<meta name=\"color-scheme\" content=\"light dark\">\n<meta name=\"supported-color-schemes\" content=\"light dark\">\n");
    }
    html.push_str(&format!("<title>{}</title>\n", escape_html(title.unwrap_or(""))));

    html.push_str("<style>\n");
    html.push_str(BASE_STYLES);
    if palette.dark_mode {
        html.push_str(&dark_styles(palette));
    }
    html.push_str("</style>\n</head>\n");

    html.push_str(&format!(
        "<body style=\"margin: 0; padding: 0; background-color: {};\">\n",
        palette.background_color
    ));
    html.push_str(body);
    html.push_str("</body>\n</html>\n");
    html
}

fn dark_styles(palette: &Palette) -> String {
    format!(
        "@media (prefers-color-scheme: dark) {{\n  \
.email-body {{ background-color: {bg} !important; }}\n  \
.email-content {{ background-color: {bg} !important; color: {text} !important; }}\n  \
.email-content h1, .email-content p, .email-content td {{ color: {text} !important; }}\n\
}}\n",
        bg = palette.dark_background,
        text = palette.dark_text
    )
}
