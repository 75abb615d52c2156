// SPDX-License-Identifier: MIT
//
// Console capability interface.
//
// Everything interactive in clikit goes through four primitives: switch
// the input into raw mode, put it back, read one byte, ask how wide the
// terminal is. Each platform implements them once (see `terminal.rs`),
// and the key decoder, masked input, and tooltip centering are written
// against this trait only.
//
// `ScriptedConsole` is the in-memory implementation. It replays a fixed
// byte script and records every mode transition, which is how the
// decoder's restore-on-every-path guarantee gets tested without a TTY.

use std::collections::VecDeque;

use crate::error::{Result, TermError};

/// Column count used when the terminal width can't be queried.
pub const FALLBACK_WIDTH: u16 = 80;

// ─── KeyDialect ─────────────────────────────────────────────────────────────

/// The byte protocol a console uses to report special keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyDialect {
    /// POSIX terminals: special keys arrive as `ESC [ <final>` CSI sequences.
    #[default]
    Ansi,
    /// Windows console (`_getch`): special keys arrive as a `0` or `224`
    /// prefix byte followed by a scan code.
    ConsoleExtended,
}

// ─── Console ────────────────────────────────────────────────────────────────

/// The minimal set of console operations the toolkit needs.
///
/// Implementations own whatever OS state is required to undo
/// [`enable_raw_mode`](Console::enable_raw_mode). Callers normally don't
/// call the mode methods directly; they take a
/// [`RawModeGuard`](crate::terminal::RawModeGuard), which restores the mode
/// when dropped.
pub trait Console {
    /// Save the current input mode and switch to unbuffered, unechoed input.
    ///
    /// # Errors
    ///
    /// [`TermError::NotATerminal`] if the input isn't a TTY, or
    /// [`TermError::Mode`] if the OS rejects the change.
    fn enable_raw_mode(&mut self) -> Result<()>;

    /// Restore the mode saved by the last [`enable_raw_mode`](Console::enable_raw_mode).
    ///
    /// A no-op when nothing is saved.
    ///
    /// # Errors
    ///
    /// [`TermError::Mode`] if the OS rejects the change.
    fn restore_mode(&mut self) -> Result<()>;

    /// Block until one byte of input is available and return it.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// [`TermError::Io`] if the read fails.
    fn read_byte(&mut self) -> Result<Option<u8>>;

    /// Current terminal width in columns, if it can be determined.
    fn query_width(&self) -> Option<u16>;

    /// How this console encodes special keys.
    fn dialect(&self) -> KeyDialect {
        KeyDialect::Ansi
    }
}

/// Terminal width in columns, falling back to [`FALLBACK_WIDTH`].
#[must_use]
pub fn terminal_width<C: Console + ?Sized>(console: &C) -> u16 {
    console
        .query_width()
        .filter(|&w| w > 0)
        .unwrap_or(FALLBACK_WIDTH)
}

// ─── ScriptedConsole ────────────────────────────────────────────────────────

/// The input mode tracked by [`ScriptedConsole`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedMode {
    /// Line-buffered with echo.
    Cooked,
    /// Raw: no line buffering, no echo.
    Raw,
}

/// An in-memory console that replays a fixed byte script.
///
/// Reads return the scripted bytes in order, then end of input. Mode
/// changes are tracked and counted so callers can assert that every
/// raw-mode entry was paired with a restore.
///
/// # Example
///
/// ```
/// use clikit_term::console::{ScriptedConsole, ScriptedMode};
/// use clikit_term::input::{poll_key, KeyEvent};
///
/// let mut console = ScriptedConsole::new(b"\x1b[A");
/// assert_eq!(poll_key(&mut console)?, KeyEvent::ArrowUp);
/// assert_eq!(console.mode(), ScriptedMode::Cooked);
/// # Ok::<(), clikit_term::error::TermError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedConsole {
    input: VecDeque<u8>,
    dialect: KeyDialect,
    width: Option<u16>,
    tty: bool,
    mode: ScriptedMode,
    saved: Option<ScriptedMode>,
    raw_entries: usize,
    restores: usize,
}

impl ScriptedConsole {
    /// A TTY-like console speaking the ANSI dialect, with no known width.
    #[must_use]
    pub fn new(input: &[u8]) -> Self {
        Self {
            input: input.iter().copied().collect(),
            dialect: KeyDialect::Ansi,
            width: None,
            tty: true,
            mode: ScriptedMode::Cooked,
            saved: None,
            raw_entries: 0,
            restores: 0,
        }
    }

    /// Use a different key dialect.
    #[must_use]
    pub const fn with_dialect(mut self, dialect: KeyDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Report a fixed terminal width.
    #[must_use]
    pub const fn with_width(mut self, cols: u16) -> Self {
        self.width = Some(cols);
        self
    }

    /// Behave like piped input: raw mode is refused.
    #[must_use]
    pub const fn not_a_tty(mut self) -> Self {
        self.tty = false;
        self
    }

    /// Append more bytes to the script.
    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> ScriptedMode {
        self.mode
    }

    /// Bytes not yet read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.input.len()
    }

    /// How many times raw mode was entered.
    #[must_use]
    pub const fn raw_entries(&self) -> usize {
        self.raw_entries
    }

    /// How many times a saved mode was restored.
    #[must_use]
    pub const fn restores(&self) -> usize {
        self.restores
    }
}

impl Console for ScriptedConsole {
    fn enable_raw_mode(&mut self) -> Result<()> {
        if !self.tty {
            return Err(TermError::NotATerminal);
        }
        self.saved = Some(self.mode);
        self.mode = ScriptedMode::Raw;
        self.raw_entries += 1;
        Ok(())
    }

    fn restore_mode(&mut self) -> Result<()> {
        if let Some(original) = self.saved.take() {
            self.mode = original;
            self.restores += 1;
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        Ok(self.input.pop_front())
    }

    fn query_width(&self) -> Option<u16> {
        self.width
    }

    fn dialect(&self) -> KeyDialect {
        self.dialect
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
