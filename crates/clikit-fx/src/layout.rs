// SPDX-License-Identifier: MIT
//
// Horizontal centering, ASCII art, and vertical spacing.

use std::io::{self, Write};

use clikit_term::console::{terminal_width, Console};
use unicode_width::UnicodeWidthStr;

/// `text` left-padded so it sits in the middle of `width` columns.
///
/// Text as wide as the terminal or wider is returned unchanged.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    let len = text.width();
    if len >= width {
        return text.to_owned();
    }
    format!("{}{text}", " ".repeat((width - len) / 2))
}

/// Write `text` centered in the console, followed by a newline.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn print_centered<C, W>(console: &C, out: &mut W, text: &str) -> io::Result<()>
where
    C: Console + ?Sized,
    W: Write + ?Sized,
{
    let width = usize::from(terminal_width(console));
    writeln!(out, "{}", center(text, width))
}

/// Multi-line art, each line optionally centered independently.
///
/// Every line, including the last, ends with `\n`. Blank lines stay empty.
#[must_use]
pub fn ascii_art(art: &str, centered: bool, width: usize) -> String {
    let mut out = String::with_capacity(art.len() + 16);
    for line in art.lines() {
        if centered && !line.is_empty() {
            out.push_str(&center(line, width));
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

/// `lines` blank lines.
#[must_use]
pub fn spacing(lines: usize) -> String {
    "\n".repeat(lines)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clikit_term::ScriptedConsole;
    use pretty_assertions::assert_eq;

    // ── center ──────────────────────────────────────────────────────────

    #[test]
    fn center_pads_left_half() {
        assert_eq!(center("abcd", 10), "   abcd");
    }

    #[test]
    fn center_rounds_down() {
        assert_eq!(center("abc", 10), "   abc");
    }

    #[test]
    fn center_too_wide_is_unchanged() {
        assert_eq!(center("abcdef", 6), "abcdef");
        assert_eq!(center("abcdefg", 6), "abcdefg");
    }

    #[test]
    fn center_counts_display_width() {
        assert_eq!(center("日本", 8), "  日本");
    }

    #[test]
    fn print_centered_uses_console_width() {
        let console = ScriptedConsole::new(b"").with_width(12);
        let mut out = Vec::new();
        print_centered(&console, &mut out, "mid").unwrap();
        assert_eq!(out, b"    mid\n");
    }

    // ── ascii_art ───────────────────────────────────────────────────────

    #[test]
    fn art_left_aligned() {
        assert_eq!(ascii_art("ab\ncd", false, 80), "ab\ncd\n");
    }

    #[test]
    fn art_centers_each_line() {
        assert_eq!(ascii_art("ab\nabcd\n", true, 8), "   ab\n  abcd\n");
    }

    #[test]
    fn art_keeps_leading_blank_line() {
        assert_eq!(ascii_art("\nx", true, 3), "\n x\n");
    }

    #[test]
    fn art_wider_than_terminal() {
        assert_eq!(ascii_art("abcdef", true, 4), "abcdef\n");
    }

    // ── spacing ─────────────────────────────────────────────────────────

    #[test]
    fn spacing_counts() {
        assert_eq!(spacing(0), "");
        assert_eq!(spacing(3), "\n\n\n");
    }
}
