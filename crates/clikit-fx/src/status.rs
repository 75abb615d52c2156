// SPDX-License-Identifier: MIT
//
// Tagged one-line status messages: `[WARNING]`, `[ERROR]`, `[SUCCESS]`,
// `[INFO]`, each in its conventional color.

use std::fmt;
use std::io::{self, Write};

use clikit_term::ansi::RESET;
use clikit_term::Color;

/// Kind of status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Warning,
    Error,
    Success,
    Info,
}

impl Status {
    /// Bracketed tag printed before the message.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Warning => "[WARNING]",
            Self::Error => "[ERROR]",
            Self::Success => "[SUCCESS]",
            Self::Info => "[INFO]",
        }
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Warning => Color::LightYellow,
            Self::Error => Color::LightRed,
            Self::Success => Color::LightGreen,
            Self::Info => Color::LightCyan,
        }
    }

    /// The colored line, without a trailing newline.
    #[must_use]
    pub fn line(self, message: &str) -> String {
        format!("{}{} {message}{RESET}", self.color(), self.label())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Write a status line followed by a newline.
///
/// # Errors
///
/// Returns an error if writing to `w` fails.
pub fn print_status<W: Write + ?Sized>(w: &mut W, status: Status, message: &str) -> io::Result<()> {
    writeln!(w, "{}", status.line(message))?;
    w.flush()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
