// utils/display.rs

//! # Display Utility Module
//!
//! Status output for the CLI: a Unicode-styled message box and color-coded
//! messages for errors, successes and information. Everything here writes to
//! stderr so that stdout carries only the rendered document.
//!
//! ## Example Usage
//! ```rust
//! use mailframe::utils::display::print_unicode_box;
//! use mailframe::{print_error, print_info, print_success};
//!
//! print_unicode_box("📨 Rendering welcome.json");
//! print_error!("Template root must be an object.");
//! print_success!("Wrote out.html");
//! print_info!("3 variables detected");
//! ```

use unicode_width::UnicodeWidthStr;

/// Builds the box lines for `message`, padding by display width so emojis and
/// other wide characters line up.
pub fn unicode_box_lines(message: &str) -> Vec<String> {
    let lines: Vec<&str> = message.split('\n').collect();
    let max_length = lines
        .iter()
        .map(|line| UnicodeWidthStr::width(*line))
        .max()
        .unwrap_or(0);

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(format!("┌{}┐", "─".repeat(max_length + 2)));
    for line in lines {
        let padding = max_length - UnicodeWidthStr::width(line);
        out.push(format!("│ {}{} │", line, " ".repeat(padding)));
    }
    out.push(format!("└{}┘", "─".repeat(max_length + 2)));
    out
}

/// Prints a yellow Unicode-styled message box to stderr.
pub fn print_unicode_box(message: &str) {
    use colored::Colorize;
    for line in unicode_box_lines(message) {
        eprintln!("{}", line.bright_yellow());
    }
}

#[macro_export]
macro_rules! print_info {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        eprintln!("{}", format!($($arg)*).blue())
    }};
}

#[macro_export]
macro_rules! print_warning {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        eprintln!("{}", format!($($arg)*).yellow())
    }};
}

#[macro_export]
macro_rules! print_error {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        eprintln!("{}", format!($($arg)*).red())
    }};
}

#[macro_export]
macro_rules! print_success {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        eprintln!("{}", format!($($arg)*).green())
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_pads_to_widest_line() {
        let lines = unicode_box_lines("abc\na");
        assert_eq!(lines[0], "┌─────┐");
        assert_eq!(lines[1], "│ abc │");
        assert_eq!(lines[2], "│ a   │");
        assert_eq!(lines[3], "└─────┘");
    }

    #[test]
    fn test_box_counts_wide_characters() {
        let lines = unicode_box_lines("📨 hi\nabcde");
        // the envelope is two columns wide
        assert_eq!(UnicodeWidthStr::width(lines[1].as_str()), UnicodeWidthStr::width(lines[2].as_str()));
    }
}
