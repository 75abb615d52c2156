// SPDX-License-Identifier: MIT
//
// End-to-end rendering: drive the formatters and the input helpers the way
// a demo program does, against a scripted console and an in-memory sink.

use std::time::Duration;

use chrono::NaiveDate;
use clikit_fx::{
    ascii_art, print_centered, print_status, spacing, typewriter, word_by_word, FixedDelay,
    ProgressBar, Spinner, Status, Timestamp, TimestampParts, Tooltip,
};
use clikit_term::input::keyboard_event;
use clikit_term::prompt::{read_masked, read_masked_value};
use clikit_term::{ansi, Color, ScriptedConsole};
use pretty_assertions::assert_eq;

fn text(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}

// ─── Screen setup ────────────────────────────────────────────────────────────

#[test]
fn title_clear_and_banner() {
    let mut out = Vec::new();
    ansi::set_title(&mut out, "CLIKit Demo").unwrap();
    ansi::clear_screen(&mut out).unwrap();
    ansi::cursor_home(&mut out).unwrap();
    out.extend_from_slice(ascii_art("/\\\n\\/", true, 6).as_bytes());
    out.extend_from_slice(spacing(1).as_bytes());

    assert_eq!(text(out), "\x1b]0;CLIKit Demo\x07\x1b[2J\x1b[H  /\\\n  \\/\n\n");
}

// ─── Formatters ──────────────────────────────────────────────────────────────

#[test]
fn timestamp_then_status() {
    let time = NaiveDate::from_ymd_opt(2026, 10, 18)
        .unwrap()
        .and_hms_opt(0, 30, 0)
        .unwrap();
    let stamp = Timestamp::new()
        .parts(TimestampParts::TIME)
        .twelve_hour(true)
        .format(&time);

    let mut out = Vec::new();
    print_status(&mut out, Status::Info, &stamp).unwrap();
    assert_eq!(text(out), "\x1b[96m[INFO] 12:30:00 AM\x1b[0m\n");
}

#[test]
fn progress_loop_redraws_one_line() {
    let bar = ProgressBar::new()
        .width(4)
        .prefix("P:", None)
        .reset_at_end(false);

    let mut out = Vec::new();
    for i in 0..=4 {
        bar.draw(&mut out, i, 4).unwrap();
    }
    out.push(b'\n');

    let s = text(out);
    assert_eq!(s.matches('\r').count(), 5);
    assert_eq!(s.lines().count(), 1);
    assert!(s.ends_with("\rP:[====] 100%\n"));
}

#[test]
fn tooltip_and_centered_text_share_console_width() {
    let console = ScriptedConsole::new(b"").with_width(20);
    let mut out = Vec::new();

    Tooltip::new()
        .width(10)
        .centered(true)
        .color(None)
        .show(&console, &mut out, "wrap these words")
        .unwrap();
    print_centered(&console, &mut out, "end").unwrap();

    assert_eq!(
        text(out),
        "     +--------+\n\
         \x20    |wrap    |\n\
         \x20    |these   |\n\
         \x20    |words   |\n\
         \x20    +--------+\n\
         \x20       end\n"
    );
}

#[test]
fn colored_text_resets() {
    assert_eq!(Color::Purple.paint("hi"), "\x1b[35mhi\x1b[0m");
}

// ─── Effects ─────────────────────────────────────────────────────────────────

#[test]
fn effects_write_full_text() {
    let mut out = Vec::new();
    typewriter(&mut out, "type ", &mut FixedDelay(Duration::ZERO)).unwrap();
    word_by_word(&mut out, "word by word", Duration::ZERO).unwrap();
    let frames = Spinner::new(Duration::ZERO, Duration::ZERO)
        .run(&mut out)
        .unwrap();

    assert_eq!(frames, 1);
    assert_eq!(
        text(out),
        "type word by word \x1b[?25l\r|\r \n\x1b[?25h"
    );
}

// ─── Input ───────────────────────────────────────────────────────────────────

#[test]
fn masked_password_then_key_poll() {
    let mut console = ScriptedConsole::new(b"s3\x7fcret\nxe");
    let mut out = Vec::new();

    let password = read_masked(&mut console, &mut out, "*").unwrap();
    assert_eq!(password, "scret");

    assert!(!keyboard_event(&mut console, "e").unwrap());
    assert!(keyboard_event(&mut console, "e").unwrap());

    assert_eq!(console.remaining(), 0);
    assert_eq!(console.raw_entries(), console.restores());
}

#[test]
fn masked_number() {
    let mut console = ScriptedConsole::new(b"1234\r");
    let mut out = Vec::new();
    let pin: Option<u32> = read_masked_value(&mut console, &mut out, "#").unwrap();
    assert_eq!(pin, Some(1234));
    assert_eq!(text(out), "####\n");
}
