// SPDX-License-Identifier: MIT
//
// Line input, typed values, and masked (password) input.
//
// Line-oriented reads go through any `BufRead` so they work the same on
// stdin, a pipe, or a test cursor. A failed parse never poisons the
// stream: the whole line is consumed before parsing, so the next read
// starts on a fresh line.
//
// `ConsoleReader` adapts a `Console` to `BufRead` with a single byte of
// lookahead, so line reads and key polls can share one input without a
// buffer hiding typed-ahead bytes from either.
//
// Masked input holds one raw-mode guard for the whole entry and decodes
// keys with the same decoder `poll_key` uses, so arrows and escape
// sequences are recognized and ignored instead of leaking mask glyphs.

use std::io::{self, BufRead, Read, Write};
use std::str::FromStr;

use tracing::debug;

use crate::console::Console;
use crate::error::{Result, TermError};
use crate::input::{read_key, KeyEvent};
use crate::terminal::RawModeGuard;

/// Erase the character left of the cursor: back, blank, back.
const ERASE: &[u8] = b"\x08 \x08";

// ─── Line input ─────────────────────────────────────────────────────────────

/// Line-oriented view of a console's input in its current mode.
///
/// Pulls bytes one at a time through [`Console::read_byte`] and never
/// holds more than the byte last peeked by `fill_buf`. After a
/// [`read_line`] returns, nothing is buffered.
pub struct ConsoleReader<'a, C: ?Sized> {
    console: &'a mut C,
    byte: [u8; 1],
    filled: bool,
}

impl<'a, C: Console + ?Sized> ConsoleReader<'a, C> {
    pub fn new(console: &'a mut C) -> Self {
        Self {
            console,
            byte: [0],
            filled: false,
        }
    }
}

impl<C: Console + ?Sized> Read for ConsoleReader<'_, C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let n = match self.fill_buf()? {
            [b, ..] => {
                buf[0] = *b;
                1
            }
            [] => 0,
        };
        self.consume(n);
        Ok(n)
    }
}

impl<C: Console + ?Sized> BufRead for ConsoleReader<'_, C> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if !self.filled {
            match self.console.read_byte()? {
                Some(b) => {
                    self.byte[0] = b;
                    self.filled = true;
                }
                None => return Ok(&[]),
            }
        }
        Ok(&self.byte)
    }

    fn consume(&mut self, amt: usize) {
        if amt > 0 {
            self.filled = false;
        }
    }
}

/// Read one line, without its trailing `\n` / `\r\n`.
///
/// Returns `None` at end of input or on a read error.
pub fn read_line<R: BufRead + ?Sized>(reader: &mut R) -> Option<String> {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => {
            if line.ends_with('\n') {
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
            }
            Some(line)
        }
    }
}

/// Read one line and parse its first whitespace-separated token as `T`.
///
/// The rest of the line is discarded whether or not parsing succeeds.
/// Returns `None` at end of input, on a blank line, or when the token
/// doesn't parse.
///
/// ```
/// use std::io::Cursor;
/// use clikit_term::prompt::read_value;
///
/// let mut input = Cursor::new("abc\n42 years\n");
/// assert_eq!(read_value::<i32, _>(&mut input), None);
/// assert_eq!(read_value::<i32, _>(&mut input), Some(42));
/// ```
pub fn read_value<T: FromStr, R: BufRead + ?Sized>(reader: &mut R) -> Option<T> {
    let line = read_line(reader)?;
    parse_first_token(&line)
}

fn parse_first_token<T: FromStr>(text: &str) -> Option<T> {
    text.split_whitespace().next()?.parse().ok()
}

// ─── Raw-mode input ─────────────────────────────────────────────────────────

/// Print `message`, then wait for any single keypress.
///
/// The byte is read in raw mode and discarded; no decoding is done, so a
/// multi-byte key leaves its tail in the input.
///
/// # Errors
///
/// Write errors, raw-mode errors, or [`TermError::EndOfInput`].
pub fn wait_for_key<C, W>(console: &mut C, out: &mut W, message: &str) -> Result<()>
where
    C: Console + ?Sized,
    W: Write + ?Sized,
{
    out.write_all(message.as_bytes())?;
    out.flush()?;

    let mut raw = RawModeGuard::acquire(console)?;
    raw.read_byte()?.ok_or(TermError::EndOfInput)?;
    Ok(())
}

/// Read a line of text, echoing `mask` once per typed character.
///
/// - Printable ASCII (including space) is appended and echoed as `mask`.
/// - Backspace removes the last character and erases one mask glyph.
/// - Enter ends the entry and echoes a newline.
/// - End of input ends the entry as if Enter had been pressed.
/// - Everything else (arrows, Escape, control bytes) is ignored.
///
/// # Errors
///
/// Write errors or raw-mode errors. The terminal mode is restored in
/// every case.
pub fn read_masked<C, W>(console: &mut C, out: &mut W, mask: &str) -> Result<String>
where
    C: Console + ?Sized,
    W: Write + ?Sized,
{
    let mut raw = RawModeGuard::acquire(console)?;
    let mut text = String::new();

    loop {
        let key = match read_key(&mut *raw) {
            Ok(key) => key,
            Err(TermError::EndOfInput) => {
                debug!("masked input ended without Enter");
                break;
            }
            Err(err) => return Err(err),
        };

        match key {
            KeyEvent::Enter => break,
            KeyEvent::Backspace => {
                if text.pop().is_some() {
                    out.write_all(ERASE)?;
                }
            }
            KeyEvent::Space => {
                text.push(' ');
                out.write_all(mask.as_bytes())?;
            }
            KeyEvent::Char(b @ 0x20..=0x7E) => {
                text.push(char::from(b));
                out.write_all(mask.as_bytes())?;
            }
            _ => continue,
        }
        out.flush()?;
    }

    drop(raw);
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(text)
}

/// Masked entry parsed as `T` from its first whitespace-separated token.
///
/// `Ok(None)` when the entered text doesn't parse.
///
/// # Errors
///
/// Same as [`read_masked`].
pub fn read_masked_value<T, C, W>(console: &mut C, out: &mut W, mask: &str) -> Result<Option<T>>
where
    T: FromStr,
    C: Console + ?Sized,
    W: Write + ?Sized,
{
    let text = read_masked(console, out, mask)?;
    Ok(parse_first_token(&text))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
