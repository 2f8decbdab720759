//! `addnew` appends to a file the lines of standard input that the file
//! doesn't already contain. The `run` function is the kernel of the
//! application: the `args` module parses the command line, `reference` loads
//! the lines already known, `dedup` decides what happens to each line of
//! input, and the `io` module hides I/O details.
//!
//! Lines are compared by key (see `normalize`), but it is always the original
//! line that gets echoed and appended. The first line with a given key wins,
//! whether it came from the file or from standard input.

#![cfg_attr(debug_assertions, allow(dead_code, unused_imports))]
#![deny(unused_must_use)]
#![deny(clippy::all)]
#![allow(clippy::needless_return)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![warn(missing_docs)]

use anyhow::Result;
use is_terminal::IsTerminal;
use std::io::{BufWriter, Write};

pub mod args;
pub mod backup;
pub mod dedup;
pub mod io;
pub mod logging;
pub mod normalize;
pub mod reference;
pub mod set;
pub mod stats;
pub mod styles;

use crate::args::Settings;
use crate::dedup::{process, Sinks};
use crate::io::{same_file, AppendTarget, Echo, InputStream, LineSink};
use crate::stats::Stats;
use crate::styles::StyleSheet;

/// Runs `addnew` with `settings`, reading standard input and writing new lines
/// to standard output and the target file. Returns the run's statistics,
/// which have already been printed to standard error if `show_counts` is set.
///
/// Everything that can stop the run before it starts (a failed backup, an
/// output file that can't be opened) happens before standard input is read.
pub fn run(settings: &Settings, style: &StyleSheet) -> Result<Stats> {
    let stdout = std::io::stdout();
    let console: Box<dyn Write> = if stdout.is_terminal() {
        Box::new(stdout.lock())
    } else {
        Box::new(BufWriter::new(stdout.lock()))
    };
    let stdin = InputStream::new("standard input", std::io::stdin().lock());
    let stats = append_new_lines(settings, stdin, console)?;

    if settings.show_counts {
        stats.render(settings, style, std::io::stderr().lock())?;
    }
    Ok(stats)
}

/// The body of `run`, with the input stream and console passed in.
pub fn append_new_lines(
    settings: &Settings,
    input: impl dedup::LineSource,
    console: impl Write,
) -> Result<Stats> {
    let target = settings.target();
    let appends_to_reference = match (settings.input.as_deref(), target) {
        (Some(input), Some(target)) => same_file(input, target),
        _ => false,
    };

    if let Some(suffix) = settings.backup.suffix() {
        match settings.input.as_deref() {
            Some(input) if appends_to_reference => {
                backup::backup(input, suffix)?;
            }
            _ => log::debug!("Not backing up: new lines don't go to the input file"),
        }
    }

    let mut seen = reference::load(settings.input.as_deref(), settings);

    let mut file = match target {
        Some(path) if !settings.dry_run => Some(AppendTarget::open(path)?),
        _ => None,
    };
    let mut echo = Echo::new("standard output", console);
    let mut stats = Stats::default();

    let sinks = Sinks {
        console: Some(&mut echo),
        file: file.as_mut().map(|f| f as &mut dyn LineSink),
    };
    process(input, &mut seen, settings, sinks, &mut stats)?;

    echo.finish()?;
    if let Some(file) = file {
        file.finish()?;
    }
    log::debug!("{stats:?}");
    Ok(stats)
}
