//! Provides `normalize`, which maps a raw line to the key used to compare it
//! against other lines.
use bstr::ByteSlice;
use std::borrow::Cow;

/// The comparison options that affect a line's key. The same `Normalizer`
/// must be used for the reference file and for standard input, or lines that
/// should match won't.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    /// Strip leading and trailing whitespace before comparing
    pub trim: bool,
    /// Compare lowercased lines
    pub ignore_case: bool,
}

/// Returns the comparison key for `line`: trimmed of surrounding whitespace if
/// `how.trim` is set, then lowercased if `how.ignore_case` is set. Nothing else
/// is changed, and the line itself is borrowed whenever possible.
#[must_use]
pub fn normalize<'a>(line: &'a [u8], how: &Normalizer) -> Cow<'a, [u8]> {
    let line = if how.trim { line.trim() } else { line };
    if how.ignore_case && has_upper(line) {
        Cow::Owned(line.to_lowercase())
    } else {
        Cow::Borrowed(line)
    }
}

// An ASCII line with no uppercase letters is already its own lowercase.
fn has_upper(line: &[u8]) -> bool {
    !line.is_ascii() || line.iter().any(u8::is_ascii_uppercase)
}
