//! sonar-project.properties versioning

use crate::core::error::{ExtractionError, StampResult};
use crate::core::io::{FileService, RawLines};
use serde::Serialize;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const SONAR_PROPERTIES: &str = "sonar-project.properties";
pub const PROJECT_VERSION_KEY: &str = "sonar.projectVersion";

/// Result of stamping a properties file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SonarOutcome {
  pub properties_path: PathBuf,
  pub version: String,
  /// Number of `sonar.projectVersion` lines replaced
  pub replaced: usize,
}

/// Properties file in the solution directory, else in the project directory
pub fn locate(io: &dyn FileService, solution_dir: &Path, project_dir: &Path) -> StampResult<PathBuf> {
  let candidates = [solution_dir.join(SONAR_PROPERTIES), project_dir.join(SONAR_PROPERTIES)];
  for candidate in &candidates {
    if io.file_exists(candidate) {
      debug!(path = %candidate.display(), "found sonar properties");
      return Ok(candidate.clone());
    }
  }

  warn!(
    solution_dir = %solution_dir.display(),
    project_dir = %project_dir.display(),
    "no {} found",
    SONAR_PROPERTIES
  );
  let [in_solution, _] = candidates;
  Err(ExtractionError::FileNotFound { path: in_solution }.into())
}

/// Replace the value of every `sonar.projectVersion` line
///
/// Everything after the first `=` is replaced; lines without `=` are kept.
pub fn rewrite_properties<R: BufRead>(reader: R, version: &str) -> io::Result<(String, usize)> {
  let mut content = String::new();
  let mut replaced = 0;

  for line in RawLines::new(reader) {
    let line = line?;
    match line.text.split_once('=') {
      Some((key, _)) if line.text.contains(PROJECT_VERSION_KEY) => {
        content.push_str(key);
        content.push('=');
        content.push_str(version);
        replaced += 1;
      }
      _ => content.push_str(&line.text),
    }
    content.push_str(line.ending);
  }

  Ok((content, replaced))
}

/// Locate, rewrite and persist the sonar properties
pub fn stamp_sonar(
  io: &dyn FileService,
  solution_dir: &Path,
  project_dir: &Path,
  version: &str,
) -> StampResult<SonarOutcome> {
  let path = locate(io, solution_dir, project_dir)?;
  let reader = io
    .read_file_as_stream(&path)
    .map_err(|_| ExtractionError::FileNotFound { path: path.clone() })?;
  let (content, replaced) = rewrite_properties(reader, version)?;

  io.write_file(&path, &content)?;
  info!(path = %path.display(), version, replaced, "sonar project version written");

  Ok(SonarOutcome {
    properties_path: path,
    version: version.to_string(),
    replaced,
  })
}
