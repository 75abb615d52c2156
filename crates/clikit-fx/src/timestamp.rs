// SPDX-License-Identifier: MIT
//
// Wall-clock timestamps.
//
// Renders `YYYY-MM-DD HH:MM:SS [AM|PM]` with any subset of the six parts
// switched on, each optionally in its own color. The field order and
// separators are fixed. The date dashes and the space before the hour are
// only written when a part precedes them; the colons before the minute and
// the second always are, so `MINUTE | SECOND` renders as `:MM:SS`.
//
// `format` takes any chrono date-time, so it's deterministic under test;
// `now` reads the local clock.

use std::fmt::{self, Write};

use bitflags::bitflags;
use chrono::{Datelike, Local, Timelike};
use clikit_term::ansi::RESET;
use clikit_term::Color;

bitflags! {
    /// Which parts of the timestamp to render.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TimestampParts: u8 {
        const YEAR   = 0b0000_0001;
        const MONTH  = 0b0000_0010;
        const DAY    = 0b0000_0100;
        const HOUR   = 0b0000_1000;
        const MINUTE = 0b0001_0000;
        const SECOND = 0b0010_0000;

        const DATE = Self::YEAR.bits() | Self::MONTH.bits() | Self::DAY.bits();
        const TIME = Self::HOUR.bits() | Self::MINUTE.bits() | Self::SECOND.bits();
    }
}

impl Default for TimestampParts {
    fn default() -> Self {
        Self::all()
    }
}

/// Timestamp rendering options.
#[derive(Debug, Clone, Default)]
pub struct Timestamp {
    parts: TimestampParts,
    twelve_hour: bool,
    year: Option<Color>,
    month: Option<Color>,
    day: Option<Color>,
    hour: Option<Color>,
    minute: Option<Color>,
    second: Option<Color>,
    meridiem: Option<Color>,
}

impl Timestamp {
    /// All parts, 24-hour clock, no colors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render only `parts`.
    #[must_use]
    pub const fn parts(mut self, parts: TimestampParts) -> Self {
        self.parts = parts;
        self
    }

    /// Use a 12-hour clock with an ` AM` / ` PM` suffix.
    #[must_use]
    pub const fn twelve_hour(mut self, twelve_hour: bool) -> Self {
        self.twelve_hour = twelve_hour;
        self
    }

    /// Color every part in `parts`.
    #[must_use]
    pub fn color(mut self, parts: TimestampParts, color: Color) -> Self {
        for part in parts.iter() {
            if let Some(slot) = self.slot_mut(part) {
                *slot = Some(color);
            }
        }
        self
    }

    /// Color the AM/PM suffix.
    #[must_use]
    pub const fn meridiem_color(mut self, color: Color) -> Self {
        self.meridiem = Some(color);
        self
    }

    fn slot_mut(&mut self, part: TimestampParts) -> Option<&mut Option<Color>> {
        let slot = if part == TimestampParts::YEAR {
            &mut self.year
        } else if part == TimestampParts::MONTH {
            &mut self.month
        } else if part == TimestampParts::DAY {
            &mut self.day
        } else if part == TimestampParts::HOUR {
            &mut self.hour
        } else if part == TimestampParts::MINUTE {
            &mut self.minute
        } else if part == TimestampParts::SECOND {
            &mut self.second
        } else {
            return None;
        };
        Some(slot)
    }

    /// Render the current local time.
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Local::now())
    }

    /// Render `time`.
    #[must_use]
    pub fn format<T: Datelike + Timelike>(&self, time: &T) -> String {
        let mut out = String::new();
        // Writing to a String can't fail.
        let _ = self.write_to(&mut out, time);
        out
    }

    fn write_to<T: Datelike + Timelike>(&self, out: &mut String, time: &T) -> fmt::Result {
        let (is_pm, hour) = if self.twelve_hour {
            time.hour12()
        } else {
            (false, time.hour())
        };

        // (part, separator, separator written even when nothing precedes)
        let fields = [
            (TimestampParts::YEAR, "", false, self.year, time.year().to_string()),
            (TimestampParts::MONTH, "-", false, self.month, format!("{:02}", time.month())),
            (TimestampParts::DAY, "-", false, self.day, format!("{:02}", time.day())),
            (TimestampParts::HOUR, " ", false, self.hour, format!("{hour:02}")),
            (TimestampParts::MINUTE, ":", true, self.minute, format!("{:02}", time.minute())),
            (TimestampParts::SECOND, ":", true, self.second, format!("{:02}", time.second())),
        ];

        for (part, sep, always, color, text) in fields {
            if !self.parts.contains(part) {
                continue;
            }
            if always || !out.is_empty() {
                out.push_str(sep);
            }
            write_colored(out, color, &text)?;
        }

        if self.twelve_hour && self.parts.intersects(TimestampParts::TIME) {
            write_colored(out, self.meridiem, if is_pm { " PM" } else { " AM" })?;
        }
        Ok(())
    }
}

fn write_colored(out: &mut String, color: Option<Color>, text: &str) -> fmt::Result {
    match color {
        Some(color) => write!(out, "{color}{text}{RESET}"),
        None => out.write_str(text),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
