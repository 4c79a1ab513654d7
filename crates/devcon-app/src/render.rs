//! Stdout presentation of the console buffer.

use std::io::{self, Write};

use devcon_terminal::TextRing;
use devcon_types::Tint;

/// Group the last `count` characters of `ring` into runs of equal tint.
///
/// `count` is clamped to the buffer length, so text evicted or cleared since
/// it was appended is simply not returned.
pub fn tail_runs(ring: &TextRing, count: usize) -> Vec<(String, Tint)> {
    let start = ring.len() - count.min(ring.len());
    let chars = &ring.chars()[start..];
    let tints = &ring.tints()[start..];

    let mut runs: Vec<(String, Tint)> = Vec::new();
    for (&ch, &tint) in chars.iter().zip(tints) {
        match runs.last_mut() {
            Some((text, last)) if *last == tint => text.push(ch),
            _ => runs.push((ch.to_string(), tint)),
        }
    }
    runs
}

/// Write `runs` to `out` using 24-bit ANSI foreground colours.
pub fn write_ansi(out: &mut impl Write, runs: &[(String, Tint)]) -> io::Result<()> {
    for (text, tint) in runs {
        write!(out, "\x1b[38;2;{};{};{}m{text}", tint.r, tint.g, tint.b)?;
    }
    if !runs.is_empty() {
        write!(out, "\x1b[0m")?;
    }
    out.flush()
}
