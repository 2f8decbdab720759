//! Code to parse the command line using `clap`, and definitions of the parsed
//! result

use crate::normalize::Normalizer;
use crate::styles::ColorChoice;
use clap::{builder::NonEmptyStringValueParser, ArgAction, Parser};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// The suffix used by a bare `--backup`
pub const DEFAULT_BACKUP_SUFFIX: &str = ".bak";

/// Returns the parsed command line. Exits with a usage message if the command
/// line is malformed.
#[must_use]
pub fn parsed() -> Args {
    CliArgs::parse().into()
}

/// Like `parsed`, but takes the arguments from `args` and returns `clap`'s
/// error rather than exiting.
pub fn parse_from<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    CliArgs::try_parse_from(args).map(Args::from)
}

/// The parsed command line
#[derive(Debug)]
pub struct Args {
    /// Everything that affects which lines are added, and where
    pub settings: Settings,
    /// Whether to color the statistics block
    pub color: ColorChoice,
    /// Diagnostic verbosity: 0 is normal, 1 debug, 2 or more trace
    pub verbose: u8,
}

/// `Settings` is fixed once the command line is parsed; the rest of the run
/// only borrows it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Don't echo new lines to standard output
    pub quiet: bool,
    /// Don't write to the target file
    pub dry_run: bool,
    /// How lines are turned into comparison keys
    pub normalizer: Normalizer,
    /// Drop lines of standard input whose key is empty
    pub ignore_blank: bool,
    /// Print statistics to standard error at the end
    pub show_counts: bool,
    /// The reference file: its lines count as already seen
    pub input: Option<PathBuf>,
    /// Where new lines are appended, if not to `input`
    pub output: Option<PathBuf>,
    /// Whether to snapshot the target before appending to it
    pub backup: Backup,
}

impl Settings {
    /// The file new lines are appended to: `output` if given, otherwise
    /// `input`.
    #[must_use]
    pub fn target(&self) -> Option<&Path> {
        self.output.as_deref().or(self.input.as_deref())
    }
}

/// The three states of the `--backup` option
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum Backup {
    /// `--backup` wasn't given
    #[default]
    Absent,
    /// `--backup` was given without a suffix
    Default,
    /// `--backup=SUFFIX`
    Suffix(String),
}

impl Backup {
    /// The suffix to append to the backed-up file's name, or `None` if no
    /// backup was requested
    #[must_use]
    pub fn suffix(&self) -> Option<&str> {
        match self {
            Backup::Absent => None,
            Backup::Default => Some(DEFAULT_BACKUP_SUFFIX),
            Backup::Suffix(s) => Some(s.as_str()),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "addnew", version)]
/// Appends the lines of standard input that aren't already in FILE (or in the
/// --output file) to that file, echoing each new line to standard output.
struct CliArgs {
    /// Don't echo new lines to standard output
    #[arg(short, long)]
    quiet: bool,
    /// Don't write to the output file
    #[arg(short, long)]
    dry_run: bool,
    /// Ignore leading and trailing whitespace when comparing lines
    #[arg(short, long)]
    trim: bool,
    /// Ignore case when comparing lines
    #[arg(short, long)]
    ignore_case: bool,
    /// Drop blank lines from standard input
    #[arg(short = 'B', long)]
    ignore_blank: bool,
    /// Print counts of lines processed to standard error at the end
    #[arg(short = 'c', long = "counts")]
    counts: bool,
    /// Append new lines to this file instead of FILE
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Back up FILE before appending to it, as FILE followed by SUFFIX
    /// [default suffix: .bak]
    #[arg(
        long,
        value_name = "SUFFIX",
        num_args = 0..=1,
        require_equals = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    backup: Option<Option<String>>,
    /// When to color the statistics
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
    /// Log more details to standard error (repeat for even more)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// The file whose lines are already known, and which new lines are
    /// appended to
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

impl From<CliArgs> for Args {
    fn from(cli: CliArgs) -> Self {
        let backup = match cli.backup {
            None => Backup::Absent,
            Some(None) => Backup::Default,
            Some(Some(suffix)) => Backup::Suffix(suffix),
        };
        let settings = Settings {
            quiet: cli.quiet,
            dry_run: cli.dry_run,
            normalizer: Normalizer { trim: cli.trim, ignore_case: cli.ignore_case },
            ignore_blank: cli.ignore_blank,
            show_counts: cli.counts,
            input: cli.file,
            output: cli.output,
            backup,
        };
        Args { settings, color: cli.color, verbose: cli.verbose }
    }
}
