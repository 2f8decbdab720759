//! Provides `backup`, which snapshots the target file before anything is
//! appended to it.
use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

/// The backup of `path` is named `path` followed by `suffix`
#[must_use]
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Copies `path` to `backup_path(path, suffix)`, replacing any earlier backup,
/// and returns the backup's path. Returns `Ok(None)` if `path` doesn't exist,
/// since there's nothing to protect.
///
/// The original is copied, never moved, so it's still there to be read
/// whether or not the backup succeeds. Any error here should end the run
/// before a single line is appended.
pub fn backup(path: &Path, suffix: &str) -> Result<Option<PathBuf>> {
    match fs::metadata(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Can't check file for backup: {}", path.display()))
        }
        Ok(_) => {}
    }

    let destination = backup_path(path, suffix);
    let mut source = File::open(path)
        .with_context(|| format!("Can't open file for backup: {}", path.display()))?;
    let mut copy = File::create(&destination)
        .with_context(|| format!("Can't create backup file: {}", destination.display()))?;
    io::copy(&mut source, &mut copy)
        .and_then(|_| copy.sync_all())
        .with_context(|| format!("Can't copy to backup file: {}", destination.display()))?;

    log::info!("Backed up \"{}\" to \"{}\"", path.display(), destination.display());
    Ok(Some(destination))
}
