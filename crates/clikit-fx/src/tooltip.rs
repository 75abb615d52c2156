// SPDX-License-Identifier: MIT
//
// Boxed tooltips.
//
//   +--------------------------------------+
//   |This is a tooltip message to provide  |
//   |additional information.               |
//   +--------------------------------------+
//
// The message is word-wrapped greedily to the inner width: each word goes
// on the current line unless it would overflow, in which case the line is
// flushed first. A single word wider than the box gets a line of its own
// and pushes the right border out rather than being split. Widths are
// display columns, so CJK and emoji pad correctly.

use std::io::{self, Write};

use clikit_term::ansi::RESET;
use clikit_term::console::{terminal_width, Console};
use clikit_term::Color;
use unicode_width::UnicodeWidthStr;

/// Narrowest box that still has room for one column of text.
const MIN_WIDTH: usize = 3;

/// Tooltip box appearance.
#[derive(Debug, Clone, Copy)]
pub struct Tooltip {
    width: usize,
    centered: bool,
    color: Option<Color>,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self {
            width: 40,
            centered: false,
            color: Some(Color::LightYellow),
        }
    }
}

impl Tooltip {
    /// A 40-column, left-aligned, light-yellow box.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Outer width including both borders (at least 3).
    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = width.max(MIN_WIDTH);
        self
    }

    /// Center the box horizontally when the terminal is wide enough.
    #[must_use]
    pub const fn centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    /// Border color, or `None` for plain borders.
    #[must_use]
    pub const fn color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }

    /// Render the box for a terminal `term_width` columns wide.
    #[must_use]
    pub fn render(&self, message: &str, term_width: usize) -> String {
        let content_width = self.width - 2;
        let pad = if self.centered && term_width >= self.width {
            " ".repeat((term_width - self.width) / 2)
        } else {
            String::new()
        };

        let (open, close) = self
            .color
            .map_or((String::new(), ""), |c| (c.to_string(), RESET));
        let border = format!("{pad}{open}+{}+{close}\n", "-".repeat(content_width));

        let mut out = border.clone();
        for line in wrap(message, content_width) {
            let fill = content_width.saturating_sub(line.width());
            out.push_str(&format!(
                "{pad}{open}|{close}{line}{}{open}|{close}\n",
                " ".repeat(fill)
            ));
        }
        out.push_str(&border);
        out
    }

    /// Render the box and write it, sized to the console's width.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn show<C, W>(&self, console: &C, out: &mut W, message: &str) -> io::Result<()>
    where
        C: Console + ?Sized,
        W: Write + ?Sized,
    {
        let term_width = usize::from(terminal_width(console));
        out.write_all(self.render(message, term_width).as_bytes())?;
        out.flush()
    }
}

/// Greedy word wrap to `width` display columns.
///
/// Whitespace runs (including newlines) collapse to single spaces. Words
/// wider than `width` are never split.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.width() + 1 + word.width() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ─── Tests ───────────────────────────────────────────────────────────────────
