// SPDX-License-Identifier: MIT
//
// clikit-fx — formatters and timed effects for clikit.
//
// The presentation half of the toolkit. Most of it is pure string
// rendering that can be asserted on directly:
//
//   timestamp → `YYYY-MM-DD HH:MM:SS [AM|PM]`, per-part colors
//   progress  → `prefix[====----] NN% suffix`
//   tooltip   → word-wrapped `+---+` box
//   layout    → centering, ASCII art, blank-line spacing
//   status    → `[WARNING]` / `[ERROR]` / `[SUCCESS]` / `[INFO]` lines
//
// The rest writes to a terminal over time and blocks while doing it:
//
//   effects   → spinner, typewriter, word-by-word reveal

pub mod effects;
pub mod layout;
pub mod progress;
pub mod status;
pub mod timestamp;
pub mod tooltip;

pub use effects::{typewriter, word_by_word, DelaySource, FixedDelay, Spinner, UniformJitter};
pub use layout::{ascii_art, center, print_centered, spacing};
pub use progress::ProgressBar;
pub use status::{print_status, Status};
pub use timestamp::{Timestamp, TimestampParts};
pub use tooltip::Tooltip;
