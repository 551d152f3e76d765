//! File access for tasks
//!
//! Extractors and rewriters never touch the file system directly: they get a
//! [`FileService`] and read line by line through [`RawLines`], which keeps each
//! line's terminator so a rewritten file differs from the original only in the
//! lines that were actually changed.

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// I/O service injected into extractors, rewriters and the manifest builder
pub trait FileService {
  /// Check whether a regular file exists at `path`
  fn file_exists(&self, path: &Path) -> bool;

  /// Check whether `path` is a directory
  fn is_directory(&self, path: &Path) -> bool;

  /// Open `path` for sequential reading
  fn read_file_as_stream(&self, path: &Path) -> io::Result<Box<dyn BufRead>>;

  /// Replace the contents of `path`
  fn write_file(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// [`FileService`] backed by the local file system
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileService for LocalFs {
  fn file_exists(&self, path: &Path) -> bool {
    path.is_file()
  }

  fn is_directory(&self, path: &Path) -> bool {
    path.is_dir()
  }

  fn read_file_as_stream(&self, path: &Path) -> io::Result<Box<dyn BufRead>> {
    let file = fs::File::open(path)?;
    Ok(Box::new(BufReader::new(file)))
  }

  fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
  }
}

/// One physical line with its original terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
  pub text: String,
  pub ending: &'static str,
}

impl RawLine {
  pub fn new(text: impl Into<String>, ending: &'static str) -> Self {
    Self {
      text: text.into(),
      ending,
    }
  }
}

/// Iterator over the physical lines of a stream, terminators preserved
///
/// Lines must be UTF-8. A line in another encoding (e.g. Windows-1252) is an
/// `InvalidData` error naming the line, unless the reader was built with
/// [`RawLines::lossy`].
pub struct RawLines<R> {
  reader: R,
  buf: Vec<u8>,
  line_no: usize,
  lossy: bool,
}

impl<R: BufRead> RawLines<R> {
  pub fn new(reader: R) -> Self {
    Self {
      reader,
      buf: Vec::new(),
      line_no: 0,
      lossy: false,
    }
  }

  /// Replace invalid UTF-8 with U+FFFD instead of failing; for read-only scans
  pub fn lossy(reader: R) -> Self {
    Self {
      lossy: true,
      ..Self::new(reader)
    }
  }

  fn decode(&self, bytes: &[u8]) -> io::Result<String> {
    match std::str::from_utf8(bytes) {
      Ok(text) => Ok(text.to_string()),
      Err(_) if self.lossy => Ok(String::from_utf8_lossy(bytes).into_owned()),
      Err(e) => Err(io::Error::new(
        io::ErrorKind::InvalidData,
        format!(
          "line {} is not valid UTF-8 ({}); convert the file from its ANSI code page to UTF-8",
          self.line_no, e
        ),
      )),
    }
  }
}

impl<R: BufRead> Iterator for RawLines<R> {
  type Item = io::Result<RawLine>;

  fn next(&mut self) -> Option<Self::Item> {
    self.buf.clear();
    match self.reader.read_until(b'\n', &mut self.buf) {
      Ok(0) => None,
      Ok(_) => {
        self.line_no += 1;
        let (text, ending) = if let Some(stripped) = self.buf.strip_suffix(b"\r\n") {
          (stripped, "\r\n")
        } else if let Some(stripped) = self.buf.strip_suffix(b"\n") {
          (stripped, "\n")
        } else {
          (self.buf.as_slice(), "")
        };
        Some(self.decode(text).map(|text| RawLine::new(text, ending)))
      }
      Err(e) => Some(Err(e)),
    }
  }
}
