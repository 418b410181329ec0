// render/visual.rs

//! # Visual Section Renderer
//!
//! Progress bars and countdown timers. Bar widths come from
//! [`calc::percentage`](crate::render::calc::percentage) and countdown units
//! from [`calc::remaining`](crate::render::calc::remaining), evaluated once
//! against the render's fixed instant.

use chrono::{DateTime, Utc};

use crate::render::calc::{clamp_percent, percentage, remaining};
use crate::render::html::{css_or, escape_html, non_blank};
use crate::render::theme::Palette;
use crate::template::structure::{Countdown, ProgressBar, Visual};

pub const DEFAULT_EXPIRED_MESSAGE: &str = "This offer has expired.";

const TRACK_COLOR: &str = "#e5e7eb";

/// Renders the visual section for `now`.
pub fn visual(visual: &Visual, palette: &Palette, now: DateTime<Utc>) -> String {
    let inner = match visual {
        Visual::None => String::new(),
        Visual::Progress { progress_bars } => progress(progress_bars, palette),
        Visual::Countdown { countdown } => countdown
            .as_ref()
            .map(|c| countdown_block(c, palette, now))
            .unwrap_or_default(),
    };
    if inner.is_empty() {
        return String::new();
    }
    format!(
        "<tr><td class=\"section-visual\" style=\"padding: 16px 40px;\">{}</td></tr>\n",
        inner
    )
}

/// Fill percentage of a bar: the explicit value when given, else derived.
pub fn bar_percent(bar: &ProgressBar) -> u8 {
    match bar.percentage {
        Some(explicit) => clamp_percent(explicit),
        None => percentage(bar.current.unwrap_or(0.0), bar.max.unwrap_or(0.0)),
    }
}

/// Formats a number without a trailing `.0` for whole values.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn progress(bars: &[ProgressBar], palette: &Palette) -> String {
    bars.iter().map(|bar| progress_bar(bar, palette)).collect()
}

fn progress_bar(bar: &ProgressBar, palette: &Palette) -> String {
    let pct = bar_percent(bar);
    let color = css_or(bar.color.as_ref(), &palette.primary_button);
    let label = non_blank(bar.label.as_ref()).map(escape_html).unwrap_or_default();

    let amount = match (bar.current, bar.max) {
        (Some(current), Some(max)) => {
            let unit = non_blank(bar.unit.as_ref())
                .map(|u| format!(" {}", escape_html(u)))
                .unwrap_or_default();
            format!("{} / {}{}", format_number(current), format_number(max), unit)
        }
        _ => format!("{}%", pct),
    };

    let mut fill = String::new();
    if pct > 0 {
        fill.push_str(&format!(
            "<td class=\"progress-fill\" width=\"{}%\" style=\"width: {}%; height: 10px; background-color: {}; border-radius: 999px; font-size: 0; line-height: 0;\">&nbsp;</td>",
            pct, pct, color
        ));
    }
    if pct < 100 {
        fill.push_str("<td style=\"height: 10px; font-size: 0; line-height: 0;\">&nbsp;</td>");
    }

    let description = non_blank(bar.description.as_ref())
        .map(|d| {
            format!(
                "<tr><td colspan=\"2\" style=\"padding-top: 6px; font-size: 12px; color: {};\">{}</td></tr>",
                palette.muted_color,
                escape_html(d)
            )
        })
        .unwrap_or_default();

    format!(
        "<table role=\"presentation\" class=\"progress-bar\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" style=\"margin: 0 0 16px;\">\
<tr><td style=\"padding-bottom: 6px; font-size: 14px; font-weight: 600; color: {};\">{}</td>\
<td align=\"right\" style=\"padding-bottom: 6px; font-size: 14px; color: {}; text-align: right;\">{}</td></tr>\
<tr><td colspan=\"2\"><table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" style=\"background-color: {}; border-radius: 999px;\"><tr>{}</tr></table></td></tr>\
{}</table>",
        palette.heading_color,
        label,
        palette.muted_color,
        amount,
        TRACK_COLOR,
        fill,
        description
    )
}

fn countdown_block(countdown: &Countdown, palette: &Palette, now: DateTime<Utc>) -> String {
    let left = remaining(countdown.target_date.as_deref().unwrap_or(""), now);
    let mut inner = String::new();

    if let Some(message) = non_blank(countdown.message.as_ref()) {
        inner.push_str(&format!(
            "<p style=\"margin: 0 0 12px; font-size: 16px; font-weight: 600; text-align: center; color: {};\">{}</p>",
            palette.heading_color,
            escape_html(message)
        ));
    }

    if left.expired {
        let message = non_blank(countdown.expired_message.as_ref()).unwrap_or(DEFAULT_EXPIRED_MESSAGE);
        inner.push_str(&format!(
            "<p class=\"countdown-expired\" style=\"margin: 0; font-size: 15px; text-align: center; color: {};\">{}</p>",
            palette.muted_color,
            escape_html(message)
        ));
        return inner;
    }

    // A hidden unit rolls into the next shown one, so hiding days turns
    // 1 day 6 hours into 30 hours. Hidden units after the last shown one
    // are truncated.
    let steps = [
        (countdown.show_days.unwrap_or(true), left.days, 24, "Days"),
        (countdown.show_hours.unwrap_or(true), left.hours, 60, "Hours"),
        (countdown.show_minutes.unwrap_or(true), left.minutes, 60, "Minutes"),
        (countdown.show_seconds.unwrap_or(true), left.seconds, 1, "Seconds"),
    ];
    let mut units: Vec<(String, &str)> = Vec::new();
    let mut carry = 0i64;
    for (shown, amount, per_next, unit) in steps {
        let value = carry + amount;
        if shown {
            let text = if unit == "Days" {
                value.to_string()
            } else {
                format!("{:02}", value)
            };
            units.push((text, unit));
            carry = 0;
        } else {
            carry = value * per_next;
        }
    }
    let cards: String = units
        .iter()
        .map(|(value, unit)| {
            format!(
                "<td class=\"countdown-unit\" style=\"padding: 0 6px;\">\
<table role=\"presentation\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" style=\"min-width: 64px; background-color: {}; border-radius: 8px;\">\
<tr><td align=\"center\" style=\"padding: 12px 10px 2px; font-size: 28px; font-weight: 700; color: {};\">{}</td></tr>\
<tr><td align=\"center\" style=\"padding: 0 10px 10px; font-size: 11px; letter-spacing: 1px; text-transform: uppercase; color: {};\">{}</td></tr>\
</table></td>",
                palette.primary_button, palette.primary_button_text, value, palette.primary_button_text, unit
            )
        })
        .collect();

    if !cards.is_empty() {
        inner.push_str(&format!(
            "<table role=\"presentation\" class=\"countdown\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" align=\"center\" style=\"margin: 0 auto;\"><tr>{}</tr></table>",
            cards
        ));
    }
    inner
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn bar(current: f64, max: f64) -> ProgressBar {
        ProgressBar {
            label: Some("Storage".to_string()),
            current: Some(current),
            max: Some(max),
            unit: Some("GB".to_string()),
            ..ProgressBar::default()
        }
    }

    fn countdown_to(target: DateTime<Utc>) -> Countdown {
        Countdown {
            message: Some("Sale ends in".to_string()),
            target_date: Some(target.to_rfc3339()),
            ..Countdown::default()
        }
    }

    #[test]
    fn test_progress_bar_width() {
        let html = visual(
            &Visual::Progress { progress_bars: vec![bar(80.0, 100.0)] },
            &Palette::default(),
            now(),
        );
        assert!(html.contains("width=\"80%\""));
        assert!(html.contains("width: 80%"));
        assert!(html.contains("80 / 100 GB"));
    }

    #[test]
    fn test_progress_explicit_percentage_is_clamped() {
        let over = ProgressBar { percentage: Some(140.0), ..bar(1.0, 10.0) };
        assert_eq!(bar_percent(&over), 100);

        let html = progress(&[over], &Palette::default());
        assert!(html.contains("width: 100%"));
        assert!(!html.contains("140"));
    }

    #[test]
    fn test_progress_zero_max() {
        let empty = bar(5.0, 0.0);
        assert_eq!(bar_percent(&empty), 0);
        let html = progress(&[empty], &Palette::default());
        assert!(!html.contains("progress-fill"));
    }

    #[test]
    fn test_progress_description() {
        let described = ProgressBar { description: Some("Upgrade for more".to_string()), ..bar(3.5, 10.0) };
        let html = progress(&[described], &Palette::default());
        assert!(html.contains("Upgrade for more"));
        assert!(html.contains("3.5 / 10 GB"));
    }

    #[test]
    fn test_countdown_future() {
        let target = now() + Duration::days(3) + Duration::hours(4) + Duration::minutes(5) + Duration::seconds(6);
        let html = visual(
            &Visual::Countdown { countdown: Some(countdown_to(target)) },
            &Palette::default(),
            now(),
        );
        assert_eq!(html.matches("countdown-unit").count(), 4);
        assert!(html.contains(">3</td>"));
        assert!(html.contains(">04</td>"));
        assert!(html.contains(">05</td>"));
        assert!(html.contains(">06</td>"));
        assert!(!html.contains("countdown-expired"));
    }

    #[test]
    fn test_countdown_respects_show_flags() {
        let target = now() + Duration::hours(30);
        let countdown = Countdown {
            show_seconds: Some(false),
            show_minutes: Some(false),
            ..countdown_to(target)
        };
        let html = visual(&Visual::Countdown { countdown: Some(countdown) }, &Palette::default(), now());
        assert_eq!(html.matches("countdown-unit").count(), 2);
        assert!(!html.contains("Seconds"));
    }

    #[test]
    fn test_countdown_hidden_units_fold_into_next() {
        let target = now() + Duration::hours(30) + Duration::minutes(7) + Duration::seconds(9);
        let countdown = Countdown {
            show_days: Some(false),
            show_seconds: Some(false),
            ..countdown_to(target)
        };
        let html = visual(&Visual::Countdown { countdown: Some(countdown) }, &Palette::default(), now());
        assert_eq!(html.matches("countdown-unit").count(), 2);
        assert!(html.contains(">30</td>"));
        assert!(html.contains(">07</td>"));
        assert!(!html.contains("Days"));
        assert!(!html.contains(">09</td>"));

        let countdown = Countdown {
            show_days: Some(false),
            show_hours: Some(false),
            show_seconds: Some(false),
            ..countdown_to(now() + Duration::days(2) + Duration::minutes(5))
        };
        let html = visual(&Visual::Countdown { countdown: Some(countdown) }, &Palette::default(), now());
        assert_eq!(html.matches("countdown-unit").count(), 1);
        assert!(html.contains(">2885</td>"));
    }

    #[test]
    fn test_countdown_expired() {
        let target = now() - Duration::hours(1);
        let html = visual(
            &Visual::Countdown { countdown: Some(countdown_to(target)) },
            &Palette::default(),
            now(),
        );
        assert!(html.contains("countdown-expired"));
        assert!(html.contains(DEFAULT_EXPIRED_MESSAGE));
        assert!(!html.contains("countdown-unit"));
        assert!(!html.contains(">-"));
    }

    #[test]
    fn test_countdown_invalid_date_is_expired() {
        let countdown = Countdown {
            target_date: Some("soon".to_string()),
            expired_message: Some("Too late!".to_string()),
            ..Countdown::default()
        };
        let html = visual(&Visual::Countdown { countdown: Some(countdown) }, &Palette::default(), now());
        assert!(html.contains("Too late!"));
    }

    #[test]
    fn test_visual_none_and_empty() {
        assert_eq!(visual(&Visual::None, &Palette::default(), now()), "");
        assert_eq!(visual(&Visual::Progress { progress_bars: vec![] }, &Palette::default(), now()), "");
        assert_eq!(visual(&Visual::Countdown { countdown: None }, &Palette::default(), now()), "");
    }
}
