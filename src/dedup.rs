//! Houses the `process` function, which reads standard input and decides
//! what happens to each line.
//!
use anyhow::Result;
use std::io;

use crate::args::Settings;
use crate::io::LineSink;
use crate::normalize::normalize;
use crate::set::LineSet;
use crate::stats::Stats;

/// The `process` function's only requirement for its input is that it
/// implements `for_byte_line`. The `LineSource` trait codifies that.
pub trait LineSource {
    /// The call `s.for_byte_line(|line| ...)` calls the given closure for each
    /// line (without its terminator) in `s`. An error means the source itself
    /// failed, not any one line.
    fn for_byte_line(self, for_each_line: impl FnMut(&[u8])) -> Result<()>;
}

/// Where accepted lines go. `console` is skipped in quiet mode; `file` is
/// `None` for a dry run or when there's no target file.
#[derive(Default)]
pub struct Sinks<'a> {
    /// Usually standard output
    pub console: Option<&'a mut dyn LineSink>,
    /// Usually the target file, opened for appending
    pub file: Option<&'a mut dyn LineSink>,
}

/// What `process` does with a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Blank (after normalization) and `ignore_blank` is set
    Blank,
    /// Its key is already in the `LineSet`
    Duplicate,
    /// Its key is new: the line is written to the sinks
    New,
}

/// Decides what to do with `line`, adding its key to `seen` if it's new. This
/// is where "first wins" happens: once a key is in `seen`, every later line
/// with that key is a duplicate, whether the earlier one came from the
/// reference file or from earlier in the same stream.
pub fn classify(line: &[u8], seen: &mut LineSet, settings: &Settings) -> Disposition {
    let key = normalize(line, &settings.normalizer);
    if settings.ignore_blank && key.is_empty() {
        Disposition::Blank
    } else if seen.insert(key) {
        Disposition::New
    } else {
        Disposition::Duplicate
    }
}

/// Reads `input` to the end, counting every line in `stats` and writing each
/// line with a new key, unchanged, to `sinks`.
///
/// A failed write to the file sink is logged and the line isn't counted as
/// written, but processing goes on. A failed write to the console stops
/// further echoing (silently if the reader has gone away). An error from
/// `input` itself is returned.
pub fn process(
    input: impl LineSource,
    seen: &mut LineSet,
    settings: &Settings,
    sinks: Sinks,
    stats: &mut Stats,
) -> Result<()> {
    let Sinks { mut console, mut file } = sinks;
    if settings.quiet {
        console = None;
    }

    input.for_byte_line(|line| {
        stats.lines_read += 1;
        match classify(line, seen, settings) {
            Disposition::Blank => stats.blank_lines_skipped += 1,
            Disposition::Duplicate => stats.duplicates_found += 1,
            Disposition::New => {
                stats.new_lines_output += 1;
                if let Some(out) = console.as_deref_mut() {
                    if let Err(e) = out.write_line(line) {
                        if e.kind() == io::ErrorKind::BrokenPipe {
                            log::debug!("{} closed, no longer echoing new lines", out.name());
                        } else {
                            log::warn!("Error writing to {}, no longer echoing: {e}", out.name());
                        }
                        console = None;
                    }
                }
                if let Some(out) = file.as_deref_mut() {
                    match out.write_line(line) {
                        Ok(()) => stats.lines_written += 1,
                        Err(e) => log::error!("Error writing to output file {}: {e}", out.name()),
                    }
                }
            }
        }
    })
}
