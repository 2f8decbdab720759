//! The counters kept while processing standard input, and the summary
//! printed from them.
use std::io::{self, Write};

use crate::args::Settings;
use crate::styles::StyleSheet;

/// Counters for one run. They start at zero, `dedup::process` increments
/// them, and `render` reads them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Lines read from standard input
    pub lines_read: u64,
    /// Lines whose key had already been seen
    pub duplicates_found: u64,
    /// Blank lines dropped because of `ignore_blank`
    pub blank_lines_skipped: u64,
    /// New lines, whether or not they were echoed or written
    pub new_lines_output: u64,
    /// New lines successfully written to the target file
    pub lines_written: u64,
}

impl Stats {
    /// Writes the statistics block. Blank lines are only mentioned when they
    /// were being skipped, and appended lines only when there is a target file
    /// and this isn't a dry run.
    pub fn render(
        &self,
        settings: &Settings,
        style: &StyleSheet,
        mut out: impl Write,
    ) -> io::Result<()> {
        writeln!(out, "{}", style.title("--- Statistics ---"))?;
        let mut row = |label: &str, value: u64| writeln!(out, "{}: {value}", style.label(label));
        row("Lines read from stdin", self.lines_read)?;
        if settings.ignore_blank {
            row("Blank lines skipped", self.blank_lines_skipped)?;
        }
        row("Duplicate lines found", self.duplicates_found)?;
        if settings.dry_run {
            row("New unique lines (dry run)", self.new_lines_output)?;
        } else {
            row("New unique lines output", self.new_lines_output)?;
            if settings.target().is_some() {
                row("Lines appended to file", self.lines_written)?;
            }
        }
        out.flush()
    }
}
