//! Project metadata extraction
//!
//! [`extract`] is the single entry point: it resolves where the metadata
//! lives for the requested language and hands back an [`Extraction`] whether
//! it came from a text info file or a compiled artifact.

pub mod assembly;
pub mod extract;
pub mod filter;
pub mod language;
pub mod markers;

use crate::core::error::{ConfigError, ExtractionError, StampResult};
use crate::core::io::FileService;
use assembly::ArtifactAttributes;
use language::{ExtractionSource, Language};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The four fields every project must declare
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetadataRecord {
  pub title: String,
  pub description: String,
  pub company: String,
  pub version: String,
}

impl MetadataRecord {
  /// Names of the fields that are blank
  pub fn missing_fields(&self) -> Vec<&'static str> {
    [
      ("Title", &self.title),
      ("Description", &self.description),
      ("Company", &self.company),
      ("Version", &self.version),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect()
  }

  pub fn is_complete(&self) -> bool {
    self.missing_fields().is_empty()
  }
}

/// What to extract and from where
#[derive(Debug, Clone, Copy)]
pub struct InfoRequest<'a> {
  pub project_dir: &'a Path,
  pub language: Language,
  /// Explicit info file, relative to the project directory or absolute
  pub info_path: Option<&'a Path>,
  /// Compiled artifact for CS/VB
  pub artifact: Option<&'a Path>,
}

impl InfoRequest<'_> {
  /// Info file this request reads when it takes the text route
  pub fn resolved_info_path(&self) -> PathBuf {
    match self.info_path {
      Some(path) => self.project_dir.join(path),
      None => self.language.profile().info_path(self.project_dir),
    }
  }
}

/// Result of one extraction
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
  #[serde(rename = "InfoPath")]
  pub path: PathBuf,
  #[serde(flatten)]
  pub record: MetadataRecord,
  #[serde(flatten)]
  pub attributes: Option<ArtifactAttributes>,
}

impl Extraction {
  pub fn is_complete(&self) -> bool {
    self.record.is_complete()
  }

  /// Turn an incomplete record into [`ExtractionError::Incomplete`]
  pub fn require_complete(self) -> StampResult<Self> {
    let missing = self.record.missing_fields();
    if missing.is_empty() {
      Ok(self)
    } else {
      Err(ExtractionError::Incomplete { path: self.path, missing }.into())
    }
  }
}

/// Extract project metadata for `request`
///
/// CS and VB read the artifact manifest when an artifact is given and fall
/// back to their assembly info source file otherwise. An incomplete record is
/// returned as-is; callers decide with [`Extraction::require_complete`].
pub fn extract(io: &dyn FileService, request: &InfoRequest<'_>) -> StampResult<Extraction> {
  let profile = request.language.profile();

  match (profile.source, request.artifact) {
    (ExtractionSource::CompiledArtifact, Some(artifact)) => {
      info!(artifact = %artifact.display(), "reading {} metadata from compiled artifact", profile.task_type);
      let record = assembly::extract_artifact(io, artifact)?;
      Ok(Extraction {
        path: artifact.to_path_buf(),
        record: record.record,
        attributes: Some(record.attributes),
      })
    }
    (source, _) => {
      if source == ExtractionSource::CompiledArtifact {
        debug!(language = %request.language, "no artifact given; reading assembly info source");
      }
      let path = request.resolved_info_path();
      info!(path = %path.display(), "reading {} info file", profile.task_type);
      let record = extract::extract_text(io, &path, profile)?;
      Ok(Extraction {
        path,
        record,
        attributes: None,
      })
    }
  }
}

/// Extract from a compiled artifact, failing when none was given
pub fn extract_required_artifact(io: &dyn FileService, request: &InfoRequest<'_>) -> StampResult<Extraction> {
  if request.language.profile().source == ExtractionSource::CompiledArtifact && request.artifact.is_none() {
    return Err(
      ConfigError::MissingField {
        field: "output_path".to_string(),
      }
      .into(),
    );
  }
  extract(io, request)
}
