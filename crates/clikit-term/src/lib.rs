// SPDX-License-Identifier: MIT
//
// clikit-term — console control for clikit.
//
// The interactive half of the toolkit: switching the terminal in and out
// of raw mode, reading single keypresses and decoding them into
// `KeyEvent`s, masked password entry, plus the ANSI escape writers and
// color palette everything else prints with.
//
// Like the rest of clikit it talks to the terminal directly: termios and
// `ioctl` on Unix, crossterm's console-mode calls and `_getch` on Windows.
// All of it sits behind the small `Console` trait, so the decoder and the
// input routines are written once and tested against `ScriptedConsole`.

pub mod ansi;
pub mod color;
pub mod console;
pub mod error;
pub mod input;
pub mod prompt;
pub mod terminal;

pub use color::Color;
pub use console::{Console, KeyDialect, ScriptedConsole};
pub use error::{Result, TermError};
pub use input::{matches_named_key, poll_key, KeyEvent};
pub use terminal::RawModeGuard;
