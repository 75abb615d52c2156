// SPDX-License-Identifier: MIT
//
// Key polling.
//
// Turns one keypress worth of raw console bytes into a `KeyEvent`. Each
// poll is self-contained: enter raw mode, read between one and three
// bytes, decode, restore. Nothing is buffered between polls.
//
// Two byte protocols are understood, selected by the console's
// `KeyDialect`:
//
//   Ansi             ESC [ A|B|C|D for arrows, ESC + anything else is a
//                    bare Escape (the second byte is consumed and dropped)
//   ConsoleExtended  0 or 224 followed by a scan code (72/80/75/77)
//
// Decoding never fails on unexpected input. A sequence we don't know
// becomes `KeyEvent::Unknown`; the only errors are I/O errors, a console
// that can't enter raw mode, and end of input before the first byte.

use std::fmt;

use tracing::trace;

use crate::console::{Console, KeyDialect};
use crate::error::{Result, TermError};
use crate::terminal::RawModeGuard;

// ─── Byte constants ─────────────────────────────────────────────────────────

const ESC: u8 = 0x1B;
const DEL: u8 = 0x7F;
const BS: u8 = 0x08;

/// `_getch` prefix for function keys.
const EXT_PREFIX_FN: u8 = 0;
/// `_getch` prefix for the dedicated arrow / editing keys.
const EXT_PREFIX_ARROWS: u8 = 224;

// ─── KeyEvent ───────────────────────────────────────────────────────────────

/// A decoded keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// Any single byte that isn't one of the named keys below.
    Char(u8),
    Space,
    Enter,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    /// A multi-byte sequence we don't recognize.
    Unknown,
}

impl KeyEvent {
    /// Symbolic name accepted by [`matches_named_key`], if the key has one.
    ///
    /// `Char` and `Unknown` have no symbolic name.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        match self {
            Self::Space => Some("space"),
            Self::Enter => Some("enter"),
            Self::Backspace => Some("backspace"),
            Self::Escape => Some("escape"),
            Self::ArrowUp => Some("up_arrow"),
            Self::ArrowDown => Some("down_arrow"),
            Self::ArrowLeft => Some("left_arrow"),
            Self::ArrowRight => Some("right_arrow"),
            Self::Char(_) | Self::Unknown => None,
        }
    }

    /// The byte of a [`Char`](Self::Char) event.
    #[must_use]
    pub const fn as_byte(self) -> Option<u8> {
        match self {
            Self::Char(b) => Some(b),
            _ => None,
        }
    }

    /// Whether this is a printable ASCII character (including space).
    #[must_use]
    pub const fn is_printable(self) -> bool {
        matches!(self, Self::Space | Self::Char(0x20..=0x7E))
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(b) if b.is_ascii_graphic() => write!(f, "'{}'", char::from(*b)),
            Self::Char(b) => write!(f, "0x{b:02x}"),
            Self::Unknown => f.write_str("unknown"),
            other => f.write_str(other.name().unwrap_or("unknown")),
        }
    }
}

// ─── Polling ────────────────────────────────────────────────────────────────

/// Wait for one keypress and decode it.
///
/// Enters raw mode for the duration of the call. The console's previous
/// mode is restored before returning on every path, including errors.
///
/// # Errors
///
/// - [`TermError::NotATerminal`] / [`TermError::Mode`] if raw mode can't
///   be entered.
/// - [`TermError::EndOfInput`] if input ends before the first byte.
/// - [`TermError::Io`] if a read fails.
pub fn poll_key<C: Console + ?Sized>(console: &mut C) -> Result<KeyEvent> {
    let mut raw = RawModeGuard::acquire(console)?;
    read_key(&mut *raw)
}

/// Decode one keypress from a console that is already in raw mode.
///
/// Use this inside a loop that holds its own [`RawModeGuard`], such as
/// masked input, to avoid toggling the terminal mode per key.
///
/// # Errors
///
/// [`TermError::EndOfInput`] if input ends before the first byte, or
/// [`TermError::Io`] if a read fails.
pub fn read_key<C: Console + ?Sized>(console: &mut C) -> Result<KeyEvent> {
    let dialect = console.dialect();
    let first = console.read_byte()?.ok_or(TermError::EndOfInput)?;

    let key = match dialect {
        KeyDialect::Ansi => decode_ansi(first, console)?,
        KeyDialect::ConsoleExtended => decode_extended(first, console)?,
    };

    trace!(%key, first, "key decoded");
    Ok(key)
}

fn decode_ansi<C: Console + ?Sized>(first: u8, console: &mut C) -> Result<KeyEvent> {
    let key = match first {
        b'\n' | b'\r' => KeyEvent::Enter,
        DEL | BS => KeyEvent::Backspace,
        b' ' => KeyEvent::Space,
        ESC => {
            // No timeout: a lone Escape waits for the next byte, and that
            // byte is swallowed if it doesn't open a CSI sequence.
            if console.read_byte()? != Some(b'[') {
                return Ok(KeyEvent::Escape);
            }
            match console.read_byte()? {
                Some(b'A') => KeyEvent::ArrowUp,
                Some(b'B') => KeyEvent::ArrowDown,
                Some(b'C') => KeyEvent::ArrowRight,
                Some(b'D') => KeyEvent::ArrowLeft,
                _ => KeyEvent::Unknown,
            }
        }
        b => KeyEvent::Char(b),
    };
    Ok(key)
}

fn decode_extended<C: Console + ?Sized>(first: u8, console: &mut C) -> Result<KeyEvent> {
    let key = match first {
        EXT_PREFIX_FN | EXT_PREFIX_ARROWS => match console.read_byte()? {
            Some(72) => KeyEvent::ArrowUp,
            Some(80) => KeyEvent::ArrowDown,
            Some(75) => KeyEvent::ArrowLeft,
            Some(77) => KeyEvent::ArrowRight,
            _ => KeyEvent::Unknown,
        },
        b'\r' => KeyEvent::Enter,
        ESC => KeyEvent::Escape,
        BS => KeyEvent::Backspace,
        b' ' => KeyEvent::Space,
        b => KeyEvent::Char(b),
    };
    Ok(key)
}

// ─── Named keys ─────────────────────────────────────────────────────────────

/// Whether `event` is the key called `name`.
///
/// Accepts `"space"`, `"enter"`, `"backspace"`, `"escape"`, `"up_arrow"`,
/// `"down_arrow"`, `"left_arrow"`, `"right_arrow"`, or a single character,
/// which matches only a [`KeyEvent::Char`] carrying exactly that byte
/// (case-sensitive). Any other name never matches.
#[must_use]
pub fn matches_named_key(event: KeyEvent, name: &str) -> bool {
    if let [byte] = name.as_bytes() {
        return event == KeyEvent::Char(*byte);
    }
    event.name() == Some(name)
}

/// Poll one key and report whether it is the key called `name`.
///
/// # Errors
///
/// Same as [`poll_key`].
pub fn keyboard_event<C: Console + ?Sized>(console: &mut C, name: &str) -> Result<bool> {
    Ok(matches_named_key(poll_key(console)?, name))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
