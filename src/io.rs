//! Input/Output structs and functions: decoding line streams, and the sinks
//! that new lines are written to.
use anyhow::{Context, Result};
use bstr::io::BufReadExt;
use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};
use memchr::memchr;
use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write},
    path::Path,
};

use crate::dedup::LineSource;

/// An `InputStream` is a buffered reader that can decode UTF-16 text. We keep
/// `name` around to improve error messages.
pub struct InputStream<R: Read> {
    name: String,
    reader: BufReader<DecodeReaderBytes<R, Vec<u8>>>,
}

impl<R: Read> InputStream<R> {
    /// Wraps `inner`, which `name` describes in error messages
    pub fn new(name: impl Into<String>, inner: R) -> Self {
        let reader = BufReader::with_capacity(
            32 * 1024,
            DecodeReaderBytesBuilder::new()
                .bom_sniffing(true) // Look at the BOM to detect UTF-16 and convert to UTF-8
                .strip_bom(true) // The BOM isn't part of the first line
                .utf8_passthru(true) // Don't enforce UTF-8 (BOM or no BOM)
                .build(inner),
        );
        InputStream { name: name.into(), reader }
    }
}

impl<R: Read> LineSource for InputStream<R> {
    /// A convenience wrapper around `bstr::for_byte_line`, which strips both
    /// `\n` and `\r\n` terminators
    fn for_byte_line(self, mut for_each_line: impl FnMut(&[u8])) -> Result<()> {
        let InputStream { name, mut reader } = self;
        reader
            .for_byte_line(|line| {
                for_each_line(line);
                Ok(true)
            })
            .with_context(|| format!("Error reading {name}"))?;
        Ok(())
    }
}

/// Somewhere new lines can be written, one at a time
pub trait LineSink {
    /// Writes `line` followed by a line terminator
    fn write_line(&mut self, line: &[u8]) -> io::Result<()>;
    /// Describes the sink in messages
    fn name(&self) -> &str;
}

/// `Echo` writes lines to a console stream (or anything else that implements
/// `Write`) terminated by `\n`.
pub struct Echo<W: Write> {
    name: String,
    out: W,
}

impl<W: Write> Echo<W> {
    /// An `Echo` writing to `out`, described as `name` in messages
    pub fn new(name: impl Into<String>, out: W) -> Self {
        Echo { name: name.into(), out }
    }

    /// Flushes the underlying stream. A reader that has gone away is not an
    /// error.
    pub fn finish(mut self) -> Result<W> {
        match self.out.flush() {
            Err(e) if e.kind() != io::ErrorKind::BrokenPipe => {
                Err(e).with_context(|| format!("Error writing to {}", self.name))
            }
            _ => Ok(self.out),
        }
    }
}

impl<W: Write> LineSink for Echo<W> {
    fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        self.out.write_all(line)?;
        self.out.write_all(b"\n")
    }
    fn name(&self) -> &str {
        &self.name
    }
}

/// An `AppendTarget` is a file opened for appending. New lines use the same
/// terminator as the file's first line, and if the file doesn't end with a
/// terminator, one is written before the first new line.
pub struct AppendTarget {
    name: String,
    writer: BufWriter<File>,
    line_terminator: &'static [u8],
    unterminated: bool,
}

impl AppendTarget {
    /// Opens `path` for appending, creating it if it doesn't exist. Only
    /// opening for writing can fail: the layout of the existing contents is
    /// read if the file is a readable regular file, and otherwise new lines
    /// end in `\n`.
    pub fn open(path: &Path) -> Result<AppendTarget> {
        let name = path.display().to_string();
        let (line_terminator, unterminated) = layout_at(path);
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .with_context(|| format!("Can't open output file for writing: {name}"))?;
        Ok(AppendTarget { name, writer: BufWriter::new(file), line_terminator, unterminated })
    }

    /// Flushes everything written so far to the file
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush().with_context(|| format!("Error writing to output file: {}", self.name))
    }
}

impl LineSink for AppendTarget {
    fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        if self.unterminated {
            self.writer.write_all(self.line_terminator)?;
            self.unterminated = false;
        }
        self.writer.write_all(line)?;
        self.writer.write_all(self.line_terminator)
    }
    fn name(&self) -> &str {
        &self.name
    }
}

const SNIFF_LEN: u64 = 64 * 1024;

/// `layout_of` the file at `path`, if it is a regular file we can read. Pipes,
/// devices, missing and write-only files get `("\n", false)`.
fn layout_at(path: &Path) -> (&'static [u8], bool) {
    // Opening a FIFO for reading would block until it has a writer
    let sniffed = fs::metadata(path).and_then(|meta| {
        if meta.is_file() {
            layout_of(&mut File::open(path)?).map(Some)
        } else {
            Ok(None)
        }
    });
    match sniffed {
        Ok(Some(layout)) => layout,
        Ok(None) => (b"\n", false),
        Err(err) => {
            log::debug!("Not reading the layout of {}: {err}", path.display());
            (b"\n", false)
        }
    }
}

/// Returns `(line_terminator, unterminated)` for an existing file: the
/// terminator is `\r\n` if the first line ends with `\r\n`, and `\n` otherwise
/// (including when no newline turns up in the first `SNIFF_LEN` bytes).
/// `unterminated` is true if the file is non-empty and its last byte isn't
/// `\n`.
fn layout_of(file: &mut (impl Read + Seek)) -> io::Result<(&'static [u8], bool)> {
    let len = file.seek(SeekFrom::End(0))?;
    if len == 0 {
        return Ok((b"\n", false));
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;

    let mut head = Vec::new();
    file.seek(SeekFrom::Start(0))?;
    file.take(SNIFF_LEN).read_to_end(&mut head)?;
    Ok((line_terminator_of(&head), last[0] != b'\n'))
}

/// `\r\n` if the first line of `slice` ends with `\r\n`, otherwise `\n`
fn line_terminator_of(slice: &[u8]) -> &'static [u8] {
    match memchr(b'\n', slice) {
        Some(n) if n > 0 && slice[n - 1] == b'\r' => b"\r\n",
        _ => b"\n",
    }
}

/// Do `a` and `b` name the same file? They do if the paths are equal, or if
/// both exist and resolve to the same canonical path.
#[must_use]
pub fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
impl LineSource for &[u8] {
    fn for_byte_line(self, for_each_line: impl FnMut(&[u8])) -> Result<()> {
        use bstr::ByteSlice;
        self.lines().for_each(for_each_line);
        Ok(())
    }
}
