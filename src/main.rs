// SPDX-License-Identifier: MIT
//
// clikit — demo for the terminal presentation toolkit.
//
// Wires the two library crates together and walks through every
// primitive:
//
//   clikit-term → raw mode, key polling, masked input, colors
//   clikit-fx   → timestamps, progress bars, tooltips, timed effects
//
// Logging is off unless a log directory is given, and then goes to a file
// so it never interleaves with what's drawn on the terminal.

mod demo;
mod logging;

use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Parser;
use clikit_term::terminal::default_console;
use clikit_term::Color;

use crate::demo::{Demo, Options};

/// Guided tour of clikit's terminal primitives.
#[derive(Parser, Debug)]
#[command(name = "clikit", version, about, long_about = None)]
struct Cli {
    /// Write logs into this directory (daily-rolling `clikit.log`).
    #[arg(long, env = "CLIKIT_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Skip every step that reads the keyboard.
    #[arg(long)]
    non_interactive: bool,

    /// Scale every pause by this factor (0 disables pauses).
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Window title.
    #[arg(long, default_value = "CLIKit Demo")]
    title: String,

    /// Banner color: a name (`light-cyan`), a 256-color index, or `#rrggbb`.
    #[arg(long, default_value = "cyan")]
    color: Color,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    ensure!(
        cli.speed.is_finite() && cli.speed >= 0.0,
        "--speed must be a non-negative number, got {}",
        cli.speed
    );

    let _log_guard = cli.log_dir.as_deref().map(logging::init).transpose()?;

    let mut console = default_console();
    let mut out = BufWriter::new(io::stdout().lock());

    let opts = Options {
        title: cli.title,
        accent: cli.color,
        speed: cli.speed,
        interactive: !cli.non_interactive,
    };
    Demo::new(&mut console, &mut out, opts).run()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
