// render/html.rs

//! # HTML Helpers
//!
//! Escaping and sanitizing for everything interpolated into email markup.
//! Text and attribute values go through [`escape_html`], link targets through
//! [`safe_url`], and inline style values through [`css_value`].

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"));

/// Escapes text for use in element content or a quoted attribute.
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Returns an escaped `href`/`src` value, replacing script-capable schemes with `#`.
pub fn safe_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let scheme: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take(16)
        .collect::<String>()
        .to_lowercase();

    let blocked = scheme.starts_with("javascript:")
        || scheme.starts_with("vbscript:")
        || (scheme.starts_with("data:") && !scheme.starts_with("data:image/"));

    if blocked || trimmed.is_empty() {
        "#".to_string()
    } else {
        escape_html(trimmed)
    }
}

/// Cleans a value for an inline `style` declaration. Returns `None` when
/// nothing usable is left.
pub fn css_value(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>' | '"' | '\\'))
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(escape_html(cleaned))
    }
}

/// Picks the first usable CSS value: the section's own, else `fallback`.
pub fn css_or(own: Option<&String>, fallback: &str) -> String {
    own.and_then(|v| css_value(v))
        .unwrap_or_else(|| fallback.to_string())
}

/// Like [`css_or`], but a bare number such as `"32"` gets a `px` unit.
pub fn css_length_or(own: Option<&String>, fallback: &str) -> String {
    let value = css_or(own, fallback);
    if value.parse::<f64>().is_ok() {
        format!("{}px", value)
    } else {
        value
    }
}

/// Parses `"120px"` or `"120"` into a positive pixel count.
pub fn parse_px(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let number = trimmed
        .strip_suffix("px")
        .or_else(|| trimmed.strip_suffix("PX"))
        .unwrap_or(trimmed)
        .trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 1.0)
        .map(|n| n.round().min(u32::MAX as f64) as u32)
}

/// The trimmed contents of an optional string, or `None` when it is blank.
pub fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Converts paragraph text to inline HTML: escapes it, turns `**bold**` into
/// `<strong>`, `- `/`* ` line starts into bullets and newlines into `<br>`.
pub fn inline_markup(text: &str) -> String {
    text.replace("\r\n", "\n")
        .split('\n')
        .map(|line| {
            let trimmed = line.trim_start();
            let bullet = trimmed
                .strip_prefix("- ")
                .or_else(|| trimmed.strip_prefix("* "));
            let line = match bullet {
                Some(rest) => format!("\u{2022} {}", rest),
                None => line.to_string(),
            };
            BOLD_PATTERN
                .replace_all(&escape_html(&line), "<strong>$1</strong>")
                .into_owned()
        })
        .collect::<Vec<_>>()
        .join("<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script> & 'y'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;y&#39;"
        );
    }

    #[test]
    fn test_safe_url_blocks_script_schemes() {
        assert_eq!(safe_url("javascript:alert(1)"), "#");
        assert_eq!(safe_url("  JaVa\tScript:alert(1)"), "#");
        assert_eq!(safe_url("vbscript:msgbox"), "#");
        assert_eq!(safe_url("data:text/html;base64,AAAA"), "#");
        assert_eq!(safe_url(""), "#");
    }

    #[test]
    fn test_safe_url_keeps_regular_links() {
        assert_eq!(safe_url("https://example.com/?a=1&b=2"), "https://example.com/?a=1&amp;b=2");
        assert_eq!(safe_url("mailto:help@example.com"), "mailto:help@example.com");
        assert_eq!(safe_url("data:image/png;base64,AAAA"), "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_css_value_strips_breakouts() {
        assert_eq!(css_value("#ff0000").as_deref(), Some("#ff0000"));
        assert_eq!(css_value("red; background:url(x)").as_deref(), Some("red background:url(x)"));
        assert_eq!(css_value("'Segoe UI', Arial").as_deref(), Some("&#39;Segoe UI&#39;, Arial"));
        assert_eq!(css_value(" ;; "), None);
    }

    #[test]
    fn test_css_or() {
        assert_eq!(css_or(Some(&"32px".to_string()), "28px"), "32px");
        assert_eq!(css_or(Some(&"{}".to_string()), "28px"), "28px");
        assert_eq!(css_or(None, "28px"), "28px");
    }

    #[test]
    fn test_css_length_or() {
        assert_eq!(css_length_or(Some(&"32".to_string()), "28px"), "32px");
        assert_eq!(css_length_or(Some(&"2em".to_string()), "28px"), "2em");
        assert_eq!(css_length_or(None, "28px"), "28px");
    }

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("120px"), Some(120));
        assert_eq!(parse_px(" 80 "), Some(80));
        assert_eq!(parse_px("99.6"), Some(100));
        assert_eq!(parse_px("0"), None);
        assert_eq!(parse_px("50%"), None);
        assert_eq!(parse_px("wide"), None);
    }

    #[test]
    fn test_inline_markup() {
        assert_eq!(
            inline_markup("- **Order**: #12\n- Ships <today>"),
            "\u{2022} <strong>Order</strong>: #12<br>\u{2022} Ships &lt;today&gt;"
        );
        assert_eq!(inline_markup("plain"), "plain");
    }
}
