// SPDX-License-Identifier: MIT
//
// Text colors.
//
// A small named palette (the seven rainbow hues, three neutrals, and light
// variants of the hues) plus escape hatches for any 256-color index or
// 24-bit RGB value. Colors render as SGR foreground sequences through
// `Display`, so they drop straight into `format!`:
//
//   format!("{}error{}", Color::LightRed, ansi::RESET)

use std::fmt;
use std::str::FromStr;

use crate::ansi;

// ─── Color ───────────────────────────────────────────────────────────────────

/// A foreground text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    // ── Rainbow ─────────────────────────────────────────────────
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Cyan,
    // ── Neutral ─────────────────────────────────────────────────
    White,
    Gray,
    Black,
    // ── Light ───────────────────────────────────────────────────
    LightRed,
    LightOrange,
    LightYellow,
    LightGreen,
    LightBlue,
    LightPurple,
    LightCyan,
    // ── Arbitrary ───────────────────────────────────────────────
    /// ANSI 256-color palette index.
    Ansi256(u8),
    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Every named palette entry, in palette order.
    pub const NAMED: [Self; 17] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Blue,
        Self::Purple,
        Self::Cyan,
        Self::White,
        Self::Gray,
        Self::Black,
        Self::LightRed,
        Self::LightOrange,
        Self::LightYellow,
        Self::LightGreen,
        Self::LightBlue,
        Self::LightPurple,
        Self::LightCyan,
    ];

    /// Palette index for this color, or `None` for [`Rgb`](Self::Rgb).
    ///
    /// Named colors use the 16 standard slots, except orange and light
    /// orange which have no standard slot and use 208 / 214 from the
    /// 256-color cube.
    #[must_use]
    pub const fn to_ansi256(self) -> Option<u8> {
        let idx = match self {
            Self::Black => 0,
            Self::Red => 1,
            Self::Green => 2,
            Self::Yellow => 3,
            Self::Blue => 4,
            Self::Purple => 5,
            Self::Cyan => 6,
            Self::White => 7,
            Self::Gray => 8,
            Self::LightRed => 9,
            Self::LightGreen => 10,
            Self::LightYellow => 11,
            Self::LightBlue => 12,
            Self::LightPurple => 13,
            Self::LightCyan => 14,
            Self::Orange => 208,
            Self::LightOrange => 214,
            Self::Ansi256(idx) => idx,
            Self::Rgb(..) => return None,
        };
        Some(idx)
    }

    /// RGB components, only for [`Rgb`](Self::Rgb).
    #[must_use]
    pub const fn to_rgb(self) -> Option<(u8, u8, u8)> {
        match self {
            Self::Rgb(r, g, b) => Some((r, g, b)),
            _ => None,
        }
    }

    /// Lowercase name of a named palette entry.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Gray => "gray",
            Self::Black => "black",
            Self::LightRed => "light_red",
            Self::LightOrange => "light_orange",
            Self::LightYellow => "light_yellow",
            Self::LightGreen => "light_green",
            Self::LightBlue => "light_blue",
            Self::LightPurple => "light_purple",
            Self::LightCyan => "light_cyan",
            Self::Ansi256(_) | Self::Rgb(..) => return None,
        })
    }

    /// `text` wrapped in this color and a trailing reset.
    #[must_use]
    pub fn paint(self, text: &str) -> String {
        format!("{self}{text}{}", ansi::RESET)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Vec::with_capacity(20);
        ansi::fg(&mut buf, *self).map_err(|_| fmt::Error)?;
        // SGR sequences are pure ASCII.
        f.write_str(std::str::from_utf8(&buf).map_err(|_| fmt::Error)?)
    }
}

/// Error returned when a color name isn't recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color `{0}`")]
pub struct UnknownColor(pub String);

impl FromStr for Color {
    type Err = UnknownColor;

    /// Parse a palette name (`"light_cyan"`, `"light-cyan"`, `"grey"`), a
    /// 256-color index (`"208"`), or a hex triplet (`"#ff8800"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('-', "_");

        if let Some(hex) = name.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| UnknownColor(s.to_owned()));
        }
        if let Ok(idx) = name.parse::<u8>() {
            return Ok(Self::Ansi256(idx));
        }
        if name == "grey" {
            return Ok(Self::Gray);
        }

        Self::NAMED
            .into_iter()
            .find(|c| c.name() == Some(name.as_str()))
            .ok_or_else(|| UnknownColor(s.to_owned()))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
