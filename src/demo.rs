// SPDX-License-Identifier: MIT
//
// The guided tour: every primitive in the toolkit, one after another.
//
// Generic over the console and the output sink so the whole run can be
// replayed in tests against a `ScriptedConsole` and a `Vec<u8>`.

use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clikit_fx::{
    ascii_art, print_centered, print_status, typewriter, word_by_word, ProgressBar, Spinner,
    Status, Timestamp, TimestampParts, Tooltip, UniformJitter,
};
use clikit_term::console::{terminal_width, Console};
use clikit_term::prompt::{read_line, read_masked, read_value, wait_for_key, ConsoleReader};
use clikit_term::{ansi, poll_key, Color, KeyEvent};
use tracing::{debug, info};

const BANNER: &str = r"
  ____ _     ___ _  _____ _____
 / ___| |   |_ _| |/ /_ _|_   _|
| |   | |    | || ' / | |  | |
| |___| |___ | || . \ | |  | |
 \____|_____|___|_|\_\___| |_|";

const RAINBOW: [(Color, &str); 7] = [
    (Color::Red, "red"),
    (Color::Orange, "orange"),
    (Color::Yellow, "yellow"),
    (Color::Green, "green"),
    (Color::Blue, "blue"),
    (Color::Purple, "purple"),
    (Color::Cyan, "cyan"),
];

const PROGRESS_STEPS: i64 = 100;

/// Demo settings.
#[derive(Debug, Clone)]
pub struct Options {
    pub title: String,
    /// Color of the banner.
    pub accent: Color,
    /// Multiplier applied to every pause. `0.0` runs without sleeping.
    pub speed: f64,
    /// Skip every step that reads the keyboard.
    pub interactive: bool,
}

/// Runs the tour against one console.
///
/// Every read goes through the console: typed lines via [`ConsoleReader`],
/// keys via `poll_key`. Nothing sits in a separate stdin buffer, so bytes
/// typed ahead of a prompt reach whichever step reads next.
pub struct Demo<'a, C: ?Sized, W: ?Sized> {
    console: &'a mut C,
    out: &'a mut W,
    opts: Options,
}

impl<'a, C, W> Demo<'a, C, W>
where
    C: Console + ?Sized,
    W: Write + ?Sized,
{
    pub fn new(console: &'a mut C, out: &'a mut W, opts: Options) -> Self {
        Self { console, out, opts }
    }

    /// Run every section in order.
    pub fn run(&mut self) -> Result<()> {
        info!(interactive = self.opts.interactive, speed = self.opts.speed, "demo started");

        self.intro()?;
        self.timestamp()?;
        self.colors()?;
        self.effects()?;
        self.spinner()?;
        self.progress()?;
        if self.opts.interactive {
            self.line_input()?;
            self.masked_input()?;
            self.key_poll()?;
        }
        self.tooltip()?;
        self.statuses()?;

        self.status(Status::Info, "CLIKit demo completed successfully!")?;
        self.wait("Press any key to exit...")?;

        info!("demo finished");
        Ok(())
    }

    // ─── Sections ───────────────────────────────────────────────────────

    fn intro(&mut self) -> Result<()> {
        ansi::set_title(self.out, &self.opts.title)?;
        ansi::clear_screen(self.out)?;
        ansi::cursor_home(self.out)?;

        let width = usize::from(terminal_width(self.console));
        writeln!(
            self.out,
            "{}{}{}",
            self.opts.accent,
            ascii_art(BANNER, true, width),
            ansi::RESET
        )?;

        self.status(Status::Info, "Welcome to the CLIKit demo!")?;
        self.wait("Please press any key to start the demo..")
    }

    fn timestamp(&mut self) -> Result<()> {
        let stamp = Timestamp::new()
            .parts(TimestampParts::all())
            .twelve_hour(true)
            .color(TimestampParts::YEAR, Color::LightGreen)
            .color(TimestampParts::MONTH, Color::LightBlue)
            .color(TimestampParts::DAY, Color::LightYellow)
            .color(TimestampParts::HOUR, Color::LightPurple)
            .color(TimestampParts::MINUTE, Color::LightCyan)
            .color(TimestampParts::SECOND, Color::LightRed)
            .now();
        write!(self.out, "\n\nCurrent Timestamp: {stamp}\n\n")?;
        self.pause(1000);
        Ok(())
    }

    fn colors(&mut self) -> Result<()> {
        writeln!(self.out, "Demonstrating Colors:")?;
        for (color, name) in RAINBOW {
            writeln!(self.out, "{}", color.paint(&format!("This is {name} text.")))?;
        }
        writeln!(self.out)?;
        self.pause(1000);
        Ok(())
    }

    fn effects(&mut self) -> Result<()> {
        self.status(Status::Info, "Typewriter Effect:")?;
        let mut jitter = UniformJitter::new(self.scaled(50), self.scaled(150));
        typewriter(
            self.out,
            "This text appears one character at a time...",
            &mut jitter,
        )?;
        write!(self.out, "\n\n")?;
        self.pause(1000);

        self.status(Status::Info, "Word by Word Effect:")?;
        let delay = self.scaled(500);
        word_by_word(self.out, "This text appears one word at a time...", delay)?;
        write!(self.out, "\n\n")?;
        self.pause(1000);
        Ok(())
    }

    fn spinner(&mut self) -> Result<()> {
        self.status(Status::Info, "Loading with Spinner:")?;
        Spinner::new(self.scaled(2000), self.scaled(100)).run(self.out)?;
        self.status(Status::Success, "Loading complete!")?;
        self.pause(1000);
        Ok(())
    }

    fn progress(&mut self) -> Result<()> {
        self.status(Status::Info, "Progress Bar Demonstration:")?;
        let bar = ProgressBar::new()
            .width(50)
            .prefix("Progress:", Some(Color::LightGreen))
            .suffix("Processing", Some(Color::White))
            .bar_colors(Some(Color::Green), Some(Color::Gray))
            .text_color(Some(Color::White))
            .bracket_color(Some(Color::LightBlue));

        for i in 0..=PROGRESS_STEPS {
            bar.draw(self.out, i, PROGRESS_STEPS)?;
            self.pause(50);
        }
        write!(self.out, "\n\n")?;
        self.pause(1000);
        Ok(())
    }

    fn line_input(&mut self) -> Result<()> {
        self.status(Status::Info, "Input Demonstration:")?;

        self.prompt("Please enter your name: ")?;
        match read_line(&mut ConsoleReader::new(self.console)) {
            Some(name) => self.status(Status::Success, &format!("Hello, {name}!"))?,
            None => self.status(Status::Error, "Failed to read your name.")?,
        }

        self.prompt("Please enter your age: ")?;
        match read_value::<i32, _>(&mut ConsoleReader::new(self.console)) {
            Some(age) => self.status(Status::Success, &format!("You are {age} years old."))?,
            None => self.status(Status::Error, "Failed to read your age.")?,
        }
        Ok(())
    }

    fn masked_input(&mut self) -> Result<()> {
        self.prompt("Please enter your password: ")?;
        let password = read_masked(self.console, self.out, "*").context("reading password")?;
        debug!(len = password.len(), "password entered");
        if password.is_empty() {
            self.status(Status::Error, "Failed to read your password.")?;
        } else {
            self.status(Status::Success, "Password received (hidden).")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn key_poll(&mut self) -> Result<()> {
        self.status(Status::Info, "Keyboard Event Demonstration:")?;
        writeln!(
            self.out,
            "Press the 's' key to see a success message, or 'e' for an error message."
        )?;
        self.out.flush()?;

        loop {
            match poll_key(self.console).context("polling keyboard")? {
                KeyEvent::Char(b's' | b'S') => {
                    self.status(Status::Success, "You pressed 's'!")?;
                    break;
                }
                KeyEvent::Char(b'e' | b'E') => {
                    self.status(Status::Error, "You pressed 'e'!")?;
                    break;
                }
                KeyEvent::Char(_) => {
                    self.status(Status::Warning, "Invalid key pressed. Press 's' or 'e'.")?;
                }
                _ => {}
            }
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn tooltip(&mut self) -> Result<()> {
        self.status(Status::Info, "Tooltip Demonstration:")?;
        Tooltip::new()
            .width(50)
            .centered(true)
            .color(Some(Color::LightCyan))
            .show(
                self.console,
                self.out,
                "This is a tooltip message to provide additional information.",
            )?;
        writeln!(self.out)?;

        self.status(Status::Info, "Centered Text Demonstration:")?;
        print_centered(self.console, self.out, "This text is centered in the terminal.")?;
        writeln!(self.out)?;
        Ok(())
    }

    fn statuses(&mut self) -> Result<()> {
        self.status(Status::Warning, "This is a warning message.")?;
        self.status(Status::Error, "This is an error message.")?;
        self.status(Status::Success, "This is a success message.")?;
        self.status(Status::Info, "This is an informational message.")?;
        writeln!(self.out)?;
        Ok(())
    }

    // ─── Helpers ────────────────────────────────────────────────────────

    fn status(&mut self, status: Status, message: &str) -> Result<()> {
        print_status(self.out, status, message)?;
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> Result<()> {
        write!(self.out, "{message}")?;
        self.out.flush()?;
        Ok(())
    }

    fn wait(&mut self, message: &str) -> Result<()> {
        if !self.opts.interactive {
            return Ok(());
        }
        wait_for_key(self.console, self.out, message).context("waiting for a key")?;
        writeln!(self.out)?;
        Ok(())
    }

    fn scaled(&self, ms: u64) -> Duration {
        Duration::from_millis(ms).mul_f64(self.opts.speed)
    }

    fn pause(&self, ms: u64) {
        let d = self.scaled(ms);
        if !d.is_zero() {
            thread::sleep(d);
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
