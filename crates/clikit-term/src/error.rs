// SPDX-License-Identifier: MIT
//
// Error type for console operations.
//
// Key decoding itself never fails: unrecognized bytes become
// `KeyEvent::Unknown`. What can fail is everything around it: the input
// isn't a terminal, the input stream ended, or termios refused a change.

use std::io;

use thiserror::Error;

/// Errors raised by console control and interactive input.
#[derive(Debug, Error)]
pub enum TermError {
    /// The input stream is not an interactive terminal, so its mode can't
    /// be switched.
    #[error("input is not a terminal")]
    NotATerminal,

    /// The input stream ended before a key could be read.
    #[error("end of input")]
    EndOfInput,

    /// Querying or changing the terminal mode failed.
    #[error("failed to {op} terminal mode: {source}")]
    Mode {
        /// What we were doing (`"read"`, `"set"`, `"restore"`).
        op: &'static str,
        /// Underlying OS error.
        source: io::Error,
    },

    /// Reading input or writing output failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TermError>;

impl From<TermError> for io::Error {
    fn from(err: TermError) -> Self {
        match err {
            TermError::Io(inner) => inner,
            TermError::EndOfInput => Self::new(io::ErrorKind::UnexpectedEof, err),
            other => Self::other(other),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_a_terminal_message() {
        assert_eq!(TermError::NotATerminal.to_string(), "input is not a terminal");
    }

    #[test]
    fn into_io_error_keeps_kind() {
        let inner = io::Error::new(io::ErrorKind::Interrupted, "x");
        assert_eq!(io::Error::from(TermError::Io(inner)).kind(), io::ErrorKind::Interrupted);
        assert_eq!(
            io::Error::from(TermError::EndOfInput).kind(),
            io::ErrorKind::UnexpectedEof
        );
        assert_eq!(io::Error::from(TermError::NotATerminal).kind(), io::ErrorKind::Other);
    }

    #[test]
    fn mode_message_names_the_operation() {
        let err = TermError::Mode {
            op: "restore",
            source: io::Error::from_raw_os_error(25),
        };
        assert!(err.to_string().starts_with("failed to restore terminal mode"));
    }

    #[test]
    fn io_errors_convert() {
        let err: TermError = io::Error::new(io::ErrorKind::BrokenPipe, "gone").into();
        assert!(matches!(err, TermError::Io(_)));
        assert_eq!(err.to_string(), "gone");
    }
}
