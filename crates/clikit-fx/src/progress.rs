// SPDX-License-Identifier: MIT
//
// Single-line progress bars.
//
//   Progress:[=========================-------------------------] 50% Processing
//   ^prefix  ^brackets and glyphs                               ^pct ^suffix
//
// Rendering is a pure function of the bar options and `(current, max)`.
// `draw` adds the carriage return and flush needed to redraw in place.

use std::io::{self, Write};

use clikit_term::ansi::{self, RESET};
use clikit_term::Color;

/// Fraction of `max` reached by `current`, in `[0.0, 1.0]`.
///
/// `current` is clamped to `[0, max]`. A non-positive `max` yields `0.0`.
#[allow(clippy::cast_precision_loss)] // Progress counters are far below 2^52.
#[must_use]
pub fn fraction(current: i64, max: i64) -> f64 {
    if max <= 0 {
        return 0.0;
    }
    current.clamp(0, max) as f64 / max as f64
}

/// Progress bar appearance.
#[derive(Debug, Clone)]
pub struct ProgressBar {
    width: usize,
    prefix: String,
    suffix: String,
    fill: String,
    unfilled: String,
    fill_color: Option<Color>,
    unfilled_color: Option<Color>,
    text_color: Option<Color>,
    prefix_color: Option<Color>,
    suffix_color: Option<Color>,
    bracket_color: Option<Color>,
    show_percentage: bool,
    show_brackets: bool,
    reset_at_end: bool,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self {
            width: 50,
            prefix: String::new(),
            suffix: String::new(),
            fill: "=".into(),
            unfilled: "-".into(),
            fill_color: None,
            unfilled_color: None,
            text_color: None,
            prefix_color: None,
            suffix_color: None,
            bracket_color: None,
            show_percentage: true,
            show_brackets: true,
            reset_at_end: true,
        }
    }
}

impl ProgressBar {
    /// A 50-cell `[===---] NN%` bar with no colors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of glyph cells between the brackets.
    #[must_use]
    pub const fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Text before the bar, optionally colored.
    #[must_use]
    pub fn prefix(mut self, text: impl Into<String>, color: Option<Color>) -> Self {
        self.prefix = text.into();
        self.prefix_color = color;
        self
    }

    /// Text after the percentage, optionally colored.
    #[must_use]
    pub fn suffix(mut self, text: impl Into<String>, color: Option<Color>) -> Self {
        self.suffix = text.into();
        self.suffix_color = color;
        self
    }

    /// Glyphs for the filled and unfilled cells. Either may be multi-char.
    #[must_use]
    pub fn glyphs(mut self, fill: impl Into<String>, unfilled: impl Into<String>) -> Self {
        self.fill = fill.into();
        self.unfilled = unfilled.into();
        self
    }

    /// Colors for the filled and unfilled cells.
    #[must_use]
    pub const fn bar_colors(mut self, fill: Option<Color>, unfilled: Option<Color>) -> Self {
        self.fill_color = fill;
        self.unfilled_color = unfilled;
        self
    }

    /// Color of the percentage text.
    #[must_use]
    pub const fn text_color(mut self, color: Option<Color>) -> Self {
        self.text_color = color;
        self
    }

    /// Color of the `[` `]` brackets.
    #[must_use]
    pub const fn bracket_color(mut self, color: Option<Color>) -> Self {
        self.bracket_color = color;
        self
    }

    #[must_use]
    pub const fn show_percentage(mut self, show: bool) -> Self {
        self.show_percentage = show;
        self
    }

    #[must_use]
    pub const fn show_brackets(mut self, show: bool) -> Self {
        self.show_brackets = show;
        self
    }

    /// Append SGR 0 so the colors don't bleed into following output.
    #[must_use]
    pub const fn reset_at_end(mut self, reset: bool) -> Self {
        self.reset_at_end = reset;
        self
    }

    /// Render the bar for `current` out of `max`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    #[must_use]
    pub fn render(&self, current: i64, max: i64) -> String {
        let progress = fraction(current, max);
        let filled = ((progress * self.width as f64) as usize).min(self.width);
        let remaining = self.width - filled;

        let mut out = String::with_capacity(self.width * self.fill.len().max(1) + 64);

        if !self.prefix.is_empty() {
            push_color(&mut out, self.prefix_color);
            out.push_str(&self.prefix);
        }

        if self.show_brackets {
            push_color(&mut out, self.bracket_color);
            out.push('[');
        }

        push_color(&mut out, self.fill_color);
        out.push_str(&self.fill.repeat(filled));

        push_color(&mut out, self.unfilled_color);
        out.push_str(&self.unfilled.repeat(remaining));

        if self.show_brackets {
            push_color(&mut out, self.bracket_color);
            out.push(']');
        }

        if self.show_percentage {
            push_color(&mut out, self.text_color);
            out.push(' ');
            out.push_str(&((progress * 100.0) as u32).to_string());
            out.push('%');
        }

        if !self.suffix.is_empty() {
            out.push(' ');
            push_color(&mut out, self.suffix_color);
            out.push_str(&self.suffix);
        }

        if self.reset_at_end {
            out.push_str(RESET);
        }

        out
    }

    /// Redraw the bar in place on the current line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn draw<W: Write + ?Sized>(&self, w: &mut W, current: i64, max: i64) -> io::Result<()> {
        ansi::carriage_return(w)?;
        w.write_all(self.render(current, max).as_bytes())?;
        w.flush()
    }
}

fn push_color(out: &mut String, color: Option<Color>) {
    if let Some(color) = color {
        out.push_str(&color.to_string());
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
