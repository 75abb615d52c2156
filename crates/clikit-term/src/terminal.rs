// SPDX-License-Identifier: MIT
//
// Platform consoles and the raw-mode guard.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr), ioctl (TIOCGWINSZ), isatty, read, and the CRT `_getch` on
// Windows. These are the standard interfaces for console control. Each
// unsafe block is minimal.
#![allow(unsafe_code)]
//
// Raw mode here is the light variant the toolkit needs: canonical input
// and echo off, everything else (signals, output processing) left alone,
// so Ctrl-C still interrupts and `\n` still returns the carriage. The
// original termios is saved per console and also in a global backup that
// a panic hook restores, so a panic mid-poll never leaves the user's shell
// without echo.
//
// Windows goes through crossterm for the console mode and size, and reads
// bytes with `_getch`, which reports special keys with the 0/224 prefix
// that `KeyDialect::ConsoleExtended` decodes.

use std::io;
#[cfg(not(unix))]
use std::io::Write;
use std::ops::{Deref, DerefMut};
#[cfg(unix)]
use std::sync::Mutex;
use std::sync::Once;

use tracing::{debug, warn};

#[cfg(windows)]
use crate::console::KeyDialect;
use crate::console::Console;
#[cfg(unix)]
use crate::error::TermError;
use crate::error::Result;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Query the current terminal size via `ioctl(TIOCGWINSZ)` on stdout.
///
/// Returns `None` if stdout is not a terminal or the query fails.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    } else {
        None
    }
}

/// Query the visible console window size.
#[cfg(windows)]
#[must_use]
pub fn get_size() -> Option<Size> {
    crossterm::terminal::size()
        .ok()
        .filter(|&(cols, rows)| cols > 0 && rows > 0)
        .map(|(cols, rows)| Size { cols, rows })
}

#[cfg(not(any(unix, windows)))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// Check whether stdin is connected to a terminal (TTY).
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    use std::io::IsTerminal;
    io::stdin().is_terminal()
}

// ─── Panic-Safe Restore ─────────────────────────────────────────────────────

/// Global backup of the original termios for panic recovery.
///
/// Each [`UnixConsole`] owns its own copy, but the panic hook can't reach
/// it. The hook restores from here instead.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Restore termios from the global backup. Best-effort, ignores errors.
#[cfg(unix)]
fn restore_termios_from_backup() {
    if let Ok(guard) = TERMIOS_BACKUP.lock() {
        if let Some(ref original) = *guard {
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, original);
            }
        }
    }
}

/// Output reset for emergency use: clear SGR attributes, show the cursor.
///
/// A panic in the middle of a colored progress bar or a spinner would
/// otherwise leave the shell prompt colored or the cursor hidden.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[0m\x1b[?25h";

/// Panic hook guard — ensures the hook is installed at most once per process.
static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the terminal before printing the error.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();

            #[cfg(unix)]
            restore_termios_from_backup();

            #[cfg(windows)]
            let _ = crossterm::terminal::disable_raw_mode();

            original(info);
        }));
    });
}

/// Write the reset sequence directly to stdout's file descriptor.
///
/// Bypasses Rust's `io::stdout()` lock to avoid deadlocking if the panic
/// occurred while the lock was held.
fn emergency_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        let _ = io::stdout().write_all(EMERGENCY_RESTORE);
        let _ = io::stdout().flush();
    }
}

// ─── UnixConsole ────────────────────────────────────────────────────────────

/// The process's stdin/stdout driven through termios.
#[cfg(unix)]
pub struct UnixConsole {
    /// File descriptor whose mode we switch and read from.
    fd: libc::c_int,
    /// Original termios saved before entering raw mode.
    original: Option<libc::termios>,
}

#[cfg(unix)]
impl UnixConsole {
    /// Console over the process's standard input.
    #[must_use]
    pub const fn stdin() -> Self {
        Self {
            fd: libc::STDIN_FILENO,
            original: None,
        }
    }

    /// Whether raw mode is currently active on this console.
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        self.original.is_some()
    }
}

#[cfg(unix)]
impl Console for UnixConsole {
    fn enable_raw_mode(&mut self) -> Result<()> {
        if unsafe { libc::isatty(self.fd) } == 0 {
            return Err(TermError::NotATerminal);
        }

        install_panic_hook();

        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(self.fd, &raw mut termios) != 0 {
                return Err(TermError::Mode {
                    op: "read",
                    source: io::Error::last_os_error(),
                });
            }

            self.original = Some(termios);
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = Some(termios);
            }

            termios.c_lflag &= !(libc::ICANON | libc::ECHO);

            // VMIN=1, VTIME=0: read() blocks until at least 1 byte available.
            termios.c_cc[libc::VMIN] = 1;
            termios.c_cc[libc::VTIME] = 0;

            if libc::tcsetattr(self.fd, libc::TCSANOW, &raw const termios) != 0 {
                self.original = None;
                return Err(TermError::Mode {
                    op: "set",
                    source: io::Error::last_os_error(),
                });
            }
        }

        debug!(fd = self.fd, "raw mode enabled");
        Ok(())
    }

    fn restore_mode(&mut self) -> Result<()> {
        let Some(original) = self.original.take() else {
            return Ok(());
        };

        if unsafe { libc::tcsetattr(self.fd, libc::TCSANOW, &raw const original) } != 0 {
            return Err(TermError::Mode {
                op: "restore",
                source: io::Error::last_os_error(),
            });
        }

        if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
            *guard = None;
        }

        debug!(fd = self.fd, "terminal mode restored");
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = 0u8;
        loop {
            let n = unsafe { libc::read(self.fd, (&raw mut byte).cast::<libc::c_void>(), 1) };
            match n {
                1 => return Ok(Some(byte)),
                0 => return Ok(None),
                _ => {
                    let err = io::Error::last_os_error();
                    if err.kind() != io::ErrorKind::Interrupted {
                        return Err(err.into());
                    }
                }
            }
        }
    }

    fn query_width(&self) -> Option<u16> {
        get_size().map(|s| s.cols)
    }
}

#[cfg(unix)]
impl Drop for UnixConsole {
    fn drop(&mut self) {
        if self.is_raw() {
            let _ = self.restore_mode();
        }
    }
}

// ─── WindowsConsole ─────────────────────────────────────────────────────────

#[cfg(windows)]
unsafe extern "C" {
    fn _getch() -> std::ffi::c_int;
}

/// The process console driven through crossterm and the CRT.
#[cfg(windows)]
pub struct WindowsConsole {
    raw: bool,
}

#[cfg(windows)]
impl WindowsConsole {
    /// Console over the process's standard input.
    #[must_use]
    pub const fn stdin() -> Self {
        Self { raw: false }
    }

    /// Whether raw mode is currently active on this console.
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        self.raw
    }
}

#[cfg(windows)]
impl Console for WindowsConsole {
    fn enable_raw_mode(&mut self) -> Result<()> {
        if !is_tty() {
            return Err(crate::error::TermError::NotATerminal);
        }
        install_panic_hook();
        crossterm::terminal::enable_raw_mode()
            .map_err(|source| crate::error::TermError::Mode { op: "set", source })?;
        self.raw = true;
        debug!("raw mode enabled");
        Ok(())
    }

    fn restore_mode(&mut self) -> Result<()> {
        if !self.raw {
            return Ok(());
        }
        crossterm::terminal::disable_raw_mode()
            .map_err(|source| crate::error::TermError::Mode { op: "restore", source })?;
        self.raw = false;
        debug!("terminal mode restored");
        Ok(())
    }

    /// Raw mode reads unechoed keys with `_getch`. Cooked mode reads
    /// stdin so line editing and echo still work.
    fn read_byte(&mut self) -> Result<Option<u8>> {
        if !self.raw {
            let mut byte = [0u8];
            let n = io::Read::read(&mut io::stdin().lock(), &mut byte)?;
            return Ok((n == 1).then_some(byte[0]));
        }
        let ch = unsafe { _getch() };
        Ok(u8::try_from(ch).ok())
    }

    fn query_width(&self) -> Option<u16> {
        get_size().map(|s| s.cols)
    }

    fn dialect(&self) -> KeyDialect {
        KeyDialect::ConsoleExtended
    }
}

#[cfg(windows)]
impl Drop for WindowsConsole {
    fn drop(&mut self) {
        if self.raw {
            let _ = self.restore_mode();
        }
    }
}

// ─── Platform selection ─────────────────────────────────────────────────────

/// The console implementation for the current platform.
#[cfg(unix)]
pub type StdConsole = UnixConsole;

/// The console implementation for the current platform.
#[cfg(windows)]
pub type StdConsole = WindowsConsole;

/// Console over the process's standard input for the current platform.
#[cfg(any(unix, windows))]
#[must_use]
pub const fn default_console() -> StdConsole {
    StdConsole::stdin()
}

// ─── RawModeGuard ───────────────────────────────────────────────────────────

/// Scoped raw mode.
///
/// Holds the console exclusively while raw mode is active and restores the
/// saved mode when dropped, whichever way the scope is left. Derefs to the
/// console so reads go through the guard.
///
/// # Example
///
/// ```
/// use clikit_term::console::{Console, ScriptedConsole, ScriptedMode};
/// use clikit_term::terminal::RawModeGuard;
///
/// let mut console = ScriptedConsole::new(b"x");
/// {
///     let mut raw = RawModeGuard::acquire(&mut console)?;
///     assert_eq!(raw.read_byte()?, Some(b'x'));
/// }
/// assert_eq!(console.mode(), ScriptedMode::Cooked);
/// # Ok::<(), clikit_term::error::TermError>(())
/// ```
pub struct RawModeGuard<'a, C: Console + ?Sized> {
    console: &'a mut C,
}

impl<'a, C: Console + ?Sized> RawModeGuard<'a, C> {
    /// Switch `console` into raw mode for the lifetime of the guard.
    ///
    /// # Errors
    ///
    /// Whatever [`Console::enable_raw_mode`] reports. Nothing needs
    /// restoring in that case.
    pub fn acquire(console: &'a mut C) -> Result<Self> {
        console.enable_raw_mode()?;
        Ok(Self { console })
    }
}

impl<C: Console + ?Sized> Deref for RawModeGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.console
    }
}

impl<C: Console + ?Sized> DerefMut for RawModeGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.console
    }
}

impl<C: Console + ?Sized> Drop for RawModeGuard<'_, C> {
    fn drop(&mut self) {
        if let Err(err) = self.console.restore_mode() {
            warn!(%err, "failed to restore terminal mode");
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{ScriptedConsole, ScriptedMode};
    use crate::error::TermError;

    // ── Size / queries ───────────────────────────────────────────────

    #[test]
    fn size_equality() {
        assert_eq!(Size { cols: 80, rows: 24 }, Size { cols: 80, rows: 24 });
        assert_ne!(Size { cols: 80, rows: 24 }, Size { cols: 120, rows: 40 });
    }

    #[test]
    fn get_size_does_not_panic() {
        let _ = get_size();
    }

    #[test]
    fn is_tty_does_not_panic() {
        let _ = is_tty();
    }

    // ── Emergency restore sequence ──────────────────────────────────

    #[test]
    fn emergency_restore_resets_and_shows_cursor() {
        let s = std::str::from_utf8(EMERGENCY_RESTORE).unwrap();
        assert!(s.contains("\x1b[0m"), "must reset SGR attributes");
        assert!(s.ends_with("\x1b[?25h"), "must show cursor");
    }

    // ── RawModeGuard ────────────────────────────────────────────────

    #[test]
    fn guard_enters_raw_and_restores_on_drop() {
        let mut console = ScriptedConsole::new(b"");
        {
            let raw = RawModeGuard::acquire(&mut console).unwrap();
            assert_eq!(raw.mode(), ScriptedMode::Raw);
        }
        assert_eq!(console.mode(), ScriptedMode::Cooked);
        assert_eq!(console.raw_entries(), 1);
        assert_eq!(console.restores(), 1);
    }

    #[test]
    fn guard_reads_through_deref() {
        let mut console = ScriptedConsole::new(b"q");
        let mut raw = RawModeGuard::acquire(&mut console).unwrap();
        assert_eq!(raw.read_byte().unwrap(), Some(b'q'));
    }

    #[test]
    fn guard_restores_on_early_return() {
        fn first_byte(console: &mut ScriptedConsole) -> Result<u8> {
            let mut raw = RawModeGuard::acquire(console)?;
            raw.read_byte()?.ok_or(TermError::EndOfInput)
        }

        let mut console = ScriptedConsole::new(b"");
        assert!(matches!(first_byte(&mut console), Err(TermError::EndOfInput)));
        assert_eq!(console.mode(), ScriptedMode::Cooked);
    }

    #[test]
    fn guard_restores_on_panic() {
        let mut console = ScriptedConsole::new(b"");
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _raw = RawModeGuard::acquire(&mut console).unwrap();
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(console.mode(), ScriptedMode::Cooked);
    }

    #[test]
    fn guard_not_acquired_on_non_tty() {
        let mut console = ScriptedConsole::new(b"").not_a_tty();
        assert!(matches!(
            RawModeGuard::acquire(&mut console),
            Err(TermError::NotATerminal)
        ));
        assert_eq!(console.restores(), 0);
    }

    #[test]
    fn guard_over_trait_object() {
        let mut console = ScriptedConsole::new(b"z");
        let dyn_console: &mut dyn Console = &mut console;
        let mut raw = RawModeGuard::acquire(dyn_console).unwrap();
        assert_eq!(raw.read_byte().unwrap(), Some(b'z'));
    }

    // ── Platform console ────────────────────────────────────────────

    #[cfg(unix)]
    #[test]
    fn unix_console_enable_restore_cycle() {
        // Under a test harness stdin is usually not a TTY; either outcome
        // must leave the console inactive.
        let mut console = UnixConsole::stdin();
        match console.enable_raw_mode() {
            Ok(()) => {
                assert!(console.is_raw());
                console.restore_mode().unwrap();
            }
            Err(err) => assert!(matches!(err, TermError::NotATerminal | TermError::Mode { .. })),
        }
        assert!(!console.is_raw());
    }

    #[cfg(unix)]
    #[test]
    fn unix_console_restore_without_enable() {
        let mut console = UnixConsole::stdin();
        console.restore_mode().unwrap();
        assert!(!console.is_raw());
    }
}
