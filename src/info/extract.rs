//! Text info-file extraction
//!
//! One engine for every text-based language. The scan is strictly sequential
//! because a later version line may or may not override an earlier one; that
//! decision is carried through the loop in [`ScanState`].

use crate::core::error::{ExtractionError, StampResult};
use crate::core::io::{FileService, RawLines};
use crate::info::filter;
use crate::info::language::LanguageProfile;
use crate::info::markers::Attribute;
use crate::info::MetadataRecord;
use std::io::{self, BufRead};
use std::path::Path;
use tracing::{debug, warn};

/// Which version-bearing attribute was seen first in the file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionState {
  first: Option<Attribute>,
}

impl VersionState {
  /// Record a version-bearing attribute and decide whether its value applies.
  ///
  /// A file that declares its semantic version first keeps that value even if
  /// plain version lines follow; otherwise the latest version line wins.
  fn accept(&mut self, kind: Attribute, current: &str) -> bool {
    let first = *self.first.get_or_insert(kind);
    !(first == Attribute::SemanticVersion && !current.trim().is_empty())
  }

  pub fn first(&self) -> Option<Attribute> {
    self.first
  }
}

/// Accumulator threaded through the line scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
  pub record: MetadataRecord,
  pub versions: VersionState,
}

impl ScanState {
  /// Fold one logical line into the state
  pub fn apply(mut self, profile: &LanguageProfile, line: &str) -> Self {
    let Some(attribute) = profile.markers.classify(line) else {
      return self;
    };
    let value = filter::quoted_value(line);

    match attribute {
      Attribute::Title => self.record.title = value.to_string(),
      Attribute::Description => self.record.description = value.to_string(),
      Attribute::Company => self.record.company = value.to_string(),
      Attribute::Version | Attribute::SemanticVersion => {
        if self.versions.accept(attribute, &self.record.version) {
          self.record.version = value.to_string();
        } else {
          debug!(
            attribute = attribute.name(),
            kept = %self.record.version,
            "semantic version declared first; ignoring later version line"
          );
        }
      }
    }
    self
  }
}

/// Scan an info stream into a metadata record
pub fn scan<R: BufRead>(reader: R, profile: &LanguageProfile) -> io::Result<MetadataRecord> {
  let mut lines = RawLines::lossy(reader);
  let mut state = ScanState::default();

  while let Some(line) = lines.next() {
    let mut data = line?.text;
    if !profile.is_attribute_line(&data) {
      continue;
    }
    if profile.joins_next_line
      && let Some(next) = lines.next()
    {
      data.push_str(&next?.text);
    }
    state = state.apply(profile, &data);
  }

  debug!(first_version = ?state.versions.first(), "scan finished");
  Ok(state.record)
}

/// Read the info file at `path` through the I/O service
///
/// The returned record may be incomplete; use
/// [`MetadataRecord::missing_fields`] to decide success.
pub fn extract_text(io: &dyn FileService, path: &Path, profile: &LanguageProfile) -> StampResult<MetadataRecord> {
  if !io.file_exists(path) {
    warn!(path = %path.display(), "info file does not exist");
    return Err(ExtractionError::FileNotFound { path: path.to_path_buf() }.into());
  }

  let reader = io.read_file_as_stream(path).map_err(|e| {
    warn!(path = %path.display(), error = %e, "unable to open info file");
    ExtractionError::FileNotFound { path: path.to_path_buf() }
  })?;

  let record = scan(reader, profile)?;
  debug!(path = %path.display(), language = %profile.language, ?record, "scanned {} info file", profile.task_type);
  Ok(record)
}
