//! Version rewriting
//!
//! Reads a version-info file once, rewrites every version-bearing line and
//! returns the new content together with the resolved version. Lines that
//! carry no version come back byte-for-byte, terminators included.
//!
//! For join-encoded languages (COBOL) a version-bearing line and the one after
//! it form a single logical line. It is rewritten as a whole and split back
//! into two physical lines afterwards.

use crate::core::error::{ConfigError, ExtractionError, StampResult};
use crate::core::io::{FileService, RawLine, RawLines};
use crate::info::filter;
use crate::info::language::{Language, LanguageProfile};
use crate::versioning::format;
use crate::versioning::next::{NextVersions, next_versions};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::io::BufRead;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// How version lines should be rewritten
#[derive(Debug, Clone)]
pub struct RewriteOptions {
  /// Substituted for the `*` placeholder
  pub version_part: Option<String>,
  pub is_release: bool,
  /// Replaces semantic development values on release
  pub release_version: Option<String>,
  /// Switches to new-development mode when set
  pub new_development_version: Option<String>,
  /// Local time used for development stamps
  pub now: NaiveDateTime,
}

impl RewriteOptions {
  pub fn new(now: NaiveDateTime) -> Self {
    Self {
      version_part: None,
      is_release: false,
      release_version: None,
      new_development_version: None,
      now,
    }
  }
}

/// Which file to rewrite
#[derive(Debug, Clone, Copy)]
pub struct RewriteTarget<'a> {
  pub project_dir: &'a Path,
  pub language: Language,
  /// Explicit version-info file, relative to the project directory or absolute
  pub version_info_path: Option<&'a Path>,
}

impl RewriteTarget<'_> {
  pub fn resolved_path(&self) -> PathBuf {
    match self.version_info_path {
      Some(path) => self.project_dir.join(path),
      None => self.language.profile().info_path(self.project_dir),
    }
  }
}

/// Result of a rewrite pass
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RewriteOutcome {
  #[serde(skip)]
  pub content: String,
  pub version: String,
  pub is_semantic_version: bool,
  pub next_release_version: String,
  pub next_new_development_version: String,
  pub version_info_path: PathBuf,
}

/// Classification of one logical line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineKind {
  /// Secondary file version, never reported as the project version
  excluded: bool,
  /// Carries the semantic version marker itself
  semantic_marker: bool,
}

/// Declaration naming a version, semantic version or file version attribute
fn is_version_line(profile: &LanguageProfile, line: &str) -> bool {
  profile.is_declaration(line) && filter::matches(line, &profile.markers.version_markers())
}

fn classify(profile: &LanguageProfile, line: &str) -> LineKind {
  let markers = profile.markers;
  LineKind {
    excluded: markers.file_version.is_some_and(|m| line.contains(m)),
    semantic_marker: line.contains(markers.semantic_version),
  }
}

/// Rewrite one logical line
///
/// `is_semantic` is the file-scoped flag, already updated for this line.
fn rewrite_line(
  line: &str,
  kind: LineKind,
  is_semantic: bool,
  options: &RewriteOptions,
  path: &Path,
) -> StampResult<String> {
  if let Some(new_version) = options.new_development_version.as_deref() {
    return Ok(if kind.semantic_marker {
      format::new_development_semantic(line, new_version)
    } else {
      format::new_development_numeric(line, new_version)
    });
  }

  if kind.excluded || !is_semantic {
    return format::format_numeric(line, options.version_part.as_deref())
      .ok_or_else(|| ConfigError::MissingVersionPart { path: path.to_path_buf() }.into());
  }

  if options.is_release {
    Ok(format::format_semantic_release(line, options.release_version.as_deref()))
  } else {
    Ok(format::format_semantic_development(line, options.now))
  }
}

/// Byte offset at which a rewritten joined line goes back into two lines
///
/// `boundary` is the length of the first physical line. When the quoted value
/// sits entirely on the first line the boundary moves with the length change
/// of the value; otherwise it stays where it was. The result is clamped to the
/// rewritten length and a char boundary.
fn split_point(original: &str, rewritten: &str, boundary: usize) -> usize {
  let value_on_first_line = filter::quoted_span(original).is_some_and(|Range { end, .. }| end < boundary);
  let target = if value_on_first_line {
    (boundary + rewritten.len()).saturating_sub(original.len())
  } else {
    boundary
  };

  let mut at = target.min(rewritten.len());
  while !rewritten.is_char_boundary(at) {
    at -= 1;
  }
  at
}

fn push_line(out: &mut String, text: &str, ending: &str) {
  out.push_str(text);
  out.push_str(ending);
}

/// Rewrite every version-bearing line of `reader`
///
/// `path` is only used for error reporting.
pub fn rewrite_lines<R: BufRead>(
  reader: R,
  profile: &LanguageProfile,
  options: &RewriteOptions,
  path: &Path,
) -> StampResult<RewriteOutcome> {
  let mut lines = RawLines::new(reader);
  let mut content = String::new();
  let mut is_semantic = false;
  let mut version: Option<String> = None;

  while let Some(line) = lines.next() {
    let first = line?;
    if !is_version_line(profile, &first.text) {
      push_line(&mut content, &first.text, first.ending);
      continue;
    }

    let second: Option<RawLine> = if profile.joins_next_line {
      lines.next().transpose()?
    } else {
      None
    };
    let logical = match &second {
      Some(next) => format!("{}{}", first.text, next.text),
      None => first.text.clone(),
    };

    let kind = classify(profile, &logical);
    is_semantic |= kind.semantic_marker;

    let rewritten = rewrite_line(&logical, kind, is_semantic, options, path)?;
    debug!(before = %logical, after = %rewritten, ?kind, is_semantic, "rewrote version line");

    if !kind.excluded {
      version = Some(filter::quoted_value(&rewritten).to_string());
    }

    match second {
      Some(next) => {
        let at = split_point(&logical, &rewritten, first.text.len());
        push_line(&mut content, &rewritten[..at], first.ending);
        push_line(&mut content, &rewritten[at..], next.ending);
      }
      None => push_line(&mut content, &rewritten, first.ending),
    }
  }

  let Some(version) = version else {
    warn!(path = %path.display(), "no version line found");
    return Err(ExtractionError::NoVersion { path: path.to_path_buf() }.into());
  };

  let NextVersions { release, development } = next_versions(&version, options.is_release);

  Ok(RewriteOutcome {
    content,
    version,
    is_semantic_version: is_semantic,
    next_release_version: release,
    next_new_development_version: development,
    version_info_path: path.to_path_buf(),
  })
}

/// Read and rewrite the version-info file of `target`
///
/// Nothing is written; persisting [`RewriteOutcome::content`] is up to the
/// caller (see [`write_outcome`]).
pub fn rewrite(io: &dyn FileService, target: &RewriteTarget<'_>, options: &RewriteOptions) -> StampResult<RewriteOutcome> {
  let path = target.resolved_path();
  let profile = target.language.profile();

  if !io.file_exists(&path) {
    warn!(path = %path.display(), "version info file does not exist");
    return Err(ExtractionError::FileNotFound { path }.into());
  }
  let reader = io.read_file_as_stream(&path).map_err(|e| {
    warn!(path = %path.display(), error = %e, "unable to open version info file");
    ExtractionError::FileNotFound { path: path.clone() }
  })?;

  info!(path = %path.display(), language = %target.language, "rewriting {} version", profile.task_type);
  rewrite_lines(reader, profile, options, &path)
}

/// Persist a rewrite
pub fn write_outcome(io: &dyn FileService, outcome: &RewriteOutcome) -> StampResult<()> {
  io.write_file(&outcome.version_info_path, &outcome.content)?;
  info!(path = %outcome.version_info_path.display(), version = %outcome.version, "version written");
  Ok(())
}
