// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about when to emit. This module just knows the byte-level
// encoding of every terminal command the toolkit needs.
//
// All functions return `io::Result` propagated from the underlying writer.
// In practice they never fail when writing to a `Vec<u8>` or `String`
// buffer.
use std::io::{self, Write};

use crate::color::Color;

/// SGR 0 as a string, for callers assembling text with `format!`.
pub const RESET: &str = "\x1b[0m";

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to the top-left corner (CUP with no parameters).
#[inline]
pub fn cursor_home<W: Write + ?Sized>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[H")
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide<W: Write + ?Sized>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show<W: Write + ?Sized>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

/// Return to column 0 of the current line, for in-place redraws.
#[inline]
pub fn carriage_return<W: Write + ?Sized>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\r")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen<W: Write + ?Sized>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

// ─── Window ──────────────────────────────────────────────────────────────────

/// Set the window / tab title (OSC 0, BEL-terminated).
///
/// Control characters in `title` are dropped so a stray ESC or BEL can't
/// end the sequence early.
pub fn set_title<W: Write + ?Sized>(w: &mut W, title: &str) -> io::Result<()> {
    w.write_all(b"\x1b]0;")?;
    for ch in title.chars().filter(|c| !c.is_control()) {
        let mut enc = [0u8; 4];
        w.write_all(ch.encode_utf8(&mut enc).as_bytes())?;
    }
    w.write_all(b"\x07")
}

// ─── Foreground Color ────────────────────────────────────────────────────────

/// Set the foreground (text) color.
///
/// Uses compact SGR codes for the 16 standard colors (30-37, 90-97), the
/// 256-color extended format for palette indices 16-255, and 24-bit
/// `TrueColor` for RGB.
pub fn fg<W: Write + ?Sized>(w: &mut W, color: Color) -> io::Result<()> {
    match color.to_ansi256() {
        Some(idx) if idx < 8 => write!(w, "\x1b[{}m", 30 + u16::from(idx)),
        Some(idx) if idx < 16 => write!(w, "\x1b[{}m", 82 + u16::from(idx)),
        Some(idx) => write!(w, "\x1b[38;5;{idx}m"),
        None => {
            let (r, g, b) = color.to_rgb().unwrap_or_default();
            write!(w, "\x1b[38;2;{r};{g};{b}m")
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: run an ANSI function and return its output as a string.
    fn emit<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // ── Cursor ──────────────────────────────────────────────────────────

    #[test]
    fn cursor_home_sequence() {
        assert_eq!(emit(|w| cursor_home(w)), "\x1b[H");
    }

    #[test]
    fn cursor_hide_sequence() {
        assert_eq!(emit(|w| cursor_hide(w)), "\x1b[?25l");
    }

    #[test]
    fn cursor_show_sequence() {
        assert_eq!(emit(|w| cursor_show(w)), "\x1b[?25h");
    }

    #[test]
    fn carriage_return_sequence() {
        assert_eq!(emit(|w| carriage_return(w)), "\r");
    }

    // ── Screen ──────────────────────────────────────────────────────────

    #[test]
    fn clear_screen_sequence() {
        assert_eq!(emit(|w| clear_screen(w)), "\x1b[2J");
    }

    // ── Window ──────────────────────────────────────────────────────────

    #[test]
    fn title_sequence() {
        assert_eq!(emit(|w| set_title(w, "CLIKit Demo")), "\x1b]0;CLIKit Demo\x07");
    }

    #[test]
    fn title_strips_control_chars() {
        assert_eq!(emit(|w| set_title(w, "a\x07b\x1bc")), "\x1b]0;abc\x07");
    }

    #[test]
    fn title_keeps_unicode() {
        assert_eq!(emit(|w| set_title(w, "café ✓")), "\x1b]0;café ✓\x07");
    }

    // ── Foreground Color ────────────────────────────────────────────────

    #[test]
    fn fg_standard() {
        assert_eq!(emit(|w| fg(w, Color::Black)), "\x1b[30m");
        assert_eq!(emit(|w| fg(w, Color::Red)), "\x1b[31m");
        assert_eq!(emit(|w| fg(w, Color::White)), "\x1b[37m");
    }

    #[test]
    fn fg_bright() {
        assert_eq!(emit(|w| fg(w, Color::Gray)), "\x1b[90m");
        assert_eq!(emit(|w| fg(w, Color::LightRed)), "\x1b[91m");
        assert_eq!(emit(|w| fg(w, Color::LightCyan)), "\x1b[96m");
    }

    #[test]
    fn fg_extended() {
        assert_eq!(emit(|w| fg(w, Color::Orange)), "\x1b[38;5;208m");
        assert_eq!(emit(|w| fg(w, Color::Ansi256(255))), "\x1b[38;5;255m");
    }

    #[test]
    fn fg_rgb() {
        assert_eq!(
            emit(|w| fg(w, Color::Rgb(255, 128, 0))),
            "\x1b[38;2;255;128;0m"
        );
    }

    #[test]
    fn multiple_sequences_compose() {
        let s = emit(|w| {
            clear_screen(w)?;
            cursor_home(w)?;
            fg(w, Color::Cyan)?;
            w.write_all(b"hi")?;
            w.write_all(RESET.as_bytes())
        });
        assert_eq!(s, "\x1b[2J\x1b[H\x1b[36mhi\x1b[0m");
    }
}
