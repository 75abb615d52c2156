// SPDX-License-Identifier: MIT
//
// Timed output effects: spinner, typewriter, word-by-word reveal.
//
// All three block the calling thread for their whole run and flush after
// every unit so the terminal shows each step as it happens. None of them
// can be cancelled.
//
// The typewriter's per-character jitter comes from a `DelaySource` passed
// in by the caller. `UniformJitter` over the thread RNG is the normal
// choice; a seeded RNG or `FixedDelay` makes runs reproducible.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use clikit_term::ansi;
use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

// ─── Delay sources ──────────────────────────────────────────────────────────

/// Produces the pause to take after each emitted unit.
pub trait DelaySource {
    fn next_delay(&mut self) -> Duration;
}

/// The same delay every time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay(pub Duration);

impl DelaySource for FixedDelay {
    fn next_delay(&mut self) -> Duration {
        self.0
    }
}

/// Whole-millisecond delays drawn uniformly from `[min, max]`.
#[derive(Debug, Clone)]
pub struct UniformJitter<R = ThreadRng> {
    min_ms: u64,
    max_ms: u64,
    rng: R,
}

impl UniformJitter<ThreadRng> {
    /// Jitter between `min` and `max` using the thread-local RNG.
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        Self::with_rng(min, max, rand::rng())
    }
}

impl<R: Rng> UniformJitter<R> {
    /// Jitter between `min` and `max` using `rng`.
    ///
    /// The bounds are swapped if given in the wrong order.
    pub fn with_rng(min: Duration, max: Duration, rng: R) -> Self {
        let (a, b) = (millis(min), millis(max));
        Self {
            min_ms: a.min(b),
            max_ms: a.max(b),
            rng,
        }
    }
}

impl<R: Rng> DelaySource for UniformJitter<R> {
    fn next_delay(&mut self) -> Duration {
        Duration::from_millis(self.rng.random_range(self.min_ms..=self.max_ms))
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

// ─── Typewriter ─────────────────────────────────────────────────────────────

/// Write `text` one grapheme cluster at a time, pausing after each.
///
/// # Errors
///
/// Returns an error if writing to `w` fails.
pub fn typewriter<W, D>(w: &mut W, text: &str, delays: &mut D) -> io::Result<()>
where
    W: Write + ?Sized,
    D: DelaySource + ?Sized,
{
    for grapheme in text.graphemes(true) {
        w.write_all(grapheme.as_bytes())?;
        w.flush()?;
        thread::sleep(delays.next_delay());
    }
    Ok(())
}

// ─── Word by word ───────────────────────────────────────────────────────────

/// Write each whitespace-separated word of `text` followed by a space,
/// pausing `delay` after each.
///
/// # Errors
///
/// Returns an error if writing to `w` fails.
pub fn word_by_word<W: Write + ?Sized>(w: &mut W, text: &str, delay: Duration) -> io::Result<()> {
    for word in text.split_whitespace() {
        w.write_all(word.as_bytes())?;
        w.write_all(b" ")?;
        w.flush()?;
        thread::sleep(delay);
    }
    Ok(())
}

// ─── Spinner ────────────────────────────────────────────────────────────────

/// The four spinner frames, in order.
pub const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// A one-glyph spinner redrawn in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spinner {
    duration: Duration,
    interval: Duration,
}

impl Spinner {
    /// Spin for `duration`, advancing one frame every `interval`.
    #[must_use]
    pub const fn new(duration: Duration, interval: Duration) -> Self {
        Self { duration, interval }
    }

    /// Run to completion, then blank the glyph and end the line.
    ///
    /// The cursor is hidden while spinning and shown again afterwards. At
    /// least one frame is always drawn. Returns the number of frames drawn.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn run<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<usize> {
        let start = Instant::now();
        let mut frames = 0usize;

        ansi::cursor_hide(w)?;
        loop {
            let glyph = SPINNER_FRAMES[frames % SPINNER_FRAMES.len()];
            ansi::carriage_return(w)?;
            write!(w, "{glyph}")?;
            w.flush()?;
            frames += 1;

            thread::sleep(self.interval);
            if start.elapsed() >= self.duration {
                break;
            }
        }

        ansi::carriage_return(w)?;
        w.write_all(b" \n")?;
        ansi::cursor_show(w)?;
        w.flush()?;

        debug!(frames, "spinner finished");
        Ok(frames)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const fn no_delay() -> FixedDelay {
        FixedDelay(Duration::ZERO)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    // ── Delay sources ───────────────────────────────────────────────────

    #[test]
    fn fixed_delay_is_constant() {
        let mut d = FixedDelay(ms(7));
        assert_eq!(d.next_delay(), ms(7));
        assert_eq!(d.next_delay(), ms(7));
    }

    #[test]
    fn jitter_stays_in_range() {
        let mut d = UniformJitter::with_rng(ms(50), ms(150), StdRng::seed_from_u64(1));
        for _ in 0..1000 {
            let delay = d.next_delay();
            assert!(delay >= ms(50) && delay <= ms(150), "{delay:?}");
        }
    }

    #[test]
    fn jitter_varies() {
        let mut d = UniformJitter::with_rng(ms(0), ms(1000), StdRng::seed_from_u64(2));
        let first = d.next_delay();
        assert!((0..50).any(|_| d.next_delay() != first));
    }

    #[test]
    fn jitter_is_reproducible_with_seed() {
        let mut a = UniformJitter::with_rng(ms(10), ms(90), StdRng::seed_from_u64(42));
        let mut b = UniformJitter::with_rng(ms(10), ms(90), StdRng::seed_from_u64(42));
        for _ in 0..20 {
            assert_eq!(a.next_delay(), b.next_delay());
        }
    }

    #[test]
    fn jitter_swaps_reversed_bounds() {
        let mut d = UniformJitter::with_rng(ms(30), ms(10), StdRng::seed_from_u64(3));
        for _ in 0..100 {
            let delay = d.next_delay();
            assert!(delay >= ms(10) && delay <= ms(30));
        }
    }

    #[test]
    fn jitter_degenerate_range() {
        let mut d = UniformJitter::new(ms(5), ms(5));
        assert_eq!(d.next_delay(), ms(5));
    }

    // ── Typewriter ──────────────────────────────────────────────────────

    /// Writer that records each write call separately.
    #[derive(Default)]
    struct Chunks(Vec<String>);

    impl Write for Chunks {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.push(String::from_utf8_lossy(buf).into_owned());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn typewriter_writes_everything() {
        let mut out = Vec::new();
        typewriter(&mut out, "Hello, world", &mut no_delay()).unwrap();
        assert_eq!(out, b"Hello, world");
    }

    #[test]
    fn typewriter_one_write_per_grapheme() {
        let mut out = Chunks::default();
        typewriter(&mut out, "ae\u{301}🇫🇷", &mut no_delay()).unwrap();
        assert_eq!(out.0, vec!["a", "e\u{301}", "🇫🇷"]);
    }

    #[test]
    fn typewriter_asks_for_one_delay_per_unit() {
        struct Counting(usize);
        impl DelaySource for Counting {
            fn next_delay(&mut self) -> Duration {
                self.0 += 1;
                Duration::ZERO
            }
        }

        let mut counter = Counting(0);
        typewriter(&mut Vec::new(), "abc", &mut counter).unwrap();
        assert_eq!(counter.0, 3);
    }

    #[test]
    fn typewriter_empty_text() {
        let mut out = Vec::new();
        typewriter(&mut out, "", &mut no_delay()).unwrap();
        assert!(out.is_empty());
    }

    // ── Word by word ────────────────────────────────────────────────────

    #[test]
    fn words_get_trailing_space() {
        let mut out = Vec::new();
        word_by_word(&mut out, "  one two\nthree ", Duration::ZERO).unwrap();
        assert_eq!(out, b"one two three ");
    }

    #[test]
    fn words_empty_text() {
        let mut out = Vec::new();
        word_by_word(&mut out, "   ", Duration::ZERO).unwrap();
        assert!(out.is_empty());
    }

    // ── Spinner ─────────────────────────────────────────────────────────

    #[test]
    fn spinner_draws_at_least_one_frame() {
        let mut out = Vec::new();
        let frames = Spinner::new(Duration::ZERO, Duration::ZERO).run(&mut out).unwrap();
        assert_eq!(frames, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\x1b[?25l\r|\r \n\x1b[?25h"
        );
    }

    #[test]
    fn spinner_cycles_frames() {
        let mut out = Vec::new();
        let frames = Spinner::new(ms(60), ms(10)).run(&mut out).unwrap();
        assert!(frames >= 2, "{frames}");

        let s = String::from_utf8(out).unwrap();
        assert!(s.starts_with("\x1b[?25l\r"));
        assert!(s.ends_with("\r \n\x1b[?25h"));

        let body = &s["\x1b[?25l".len()..s.len() - "\x1b[?25h".len()];
        let drawn: Vec<char> = body
            .split('\r')
            .filter_map(|f| f.chars().next())
            .filter(|c| *c != ' ')
            .collect();
        for (i, glyph) in drawn.iter().enumerate() {
            assert_eq!(*glyph, SPINNER_FRAMES[i % 4]);
        }
    }
}
