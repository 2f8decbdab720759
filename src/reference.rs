//! Provides `load`, which builds the initial `LineSet` from the reference
//! file.
use anyhow::Result;
use std::{fs::File, io, path::Path};

use crate::args::Settings;
use crate::dedup::LineSource;
use crate::io::InputStream;
use crate::normalize::normalize;
use crate::set::LineSet;

/// Returns the set of keys of the lines in `path`.
///
/// Nothing here is fatal. With no `path`, or a `path` that doesn't exist yet,
/// the set is empty. If `path` exists but can't be opened, or reading it fails
/// partway through, we log a warning and return what we have.
#[must_use]
pub fn load(path: Option<&Path>, settings: &Settings) -> LineSet {
    let mut seen = LineSet::new();
    let Some(path) = path else { return seen };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("{} doesn't exist yet, starting with no known lines", path.display());
            return seen;
        }
        Err(e) => {
            log::warn!("Could not open input file {} for reading: {e}", path.display());
            return seen;
        }
    };

    if let Err(e) = fill(&mut seen, InputStream::new(path.display().to_string(), file), settings)
    {
        log::warn!("{e:#}");
    }
    log::debug!("{} distinct lines known from {}", seen.len(), path.display());
    seen
}

/// Adds the key of each line of `source` to `seen`. When `ignore_blank` is
/// set, empty keys are left out, so that a blank line in the reference can't
/// make a blank line of standard input a duplicate; those are dropped on
/// their own terms. Keys added before an error stay in `seen`.
pub fn fill(seen: &mut LineSet, source: impl LineSource, settings: &Settings) -> Result<()> {
    source.for_byte_line(|line| {
        let key = normalize(line, &settings.normalizer);
        if !(settings.ignore_blank && key.is_empty()) {
            seen.insert(key);
        }
    })
}
