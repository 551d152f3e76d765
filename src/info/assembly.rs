//! Compiled-artifact metadata
//!
//! C# and VB projects are described by the attributes baked into their build
//! output. The build writes those attributes to a small JSON manifest next to
//! the artifact (`Orders.dll` -> `Orders.dll.json`):
//!
//! ```json
//! {
//!   "name": "Orders",
//!   "version": "1.2.0.0",
//!   "attributes": { "Description": "...", "Company": "...", "InformationalVersion": "1.2.0-d" }
//! }
//! ```
//!
//! Everything above the manifest goes through [`AssemblyMetadata`], so another
//! attribute source only needs a new implementation of that trait.

use crate::core::error::{ExtractionError, ResultExt, StampResult};
use crate::core::io::FileService;
use crate::info::MetadataRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Read access to the attributes of a compiled artifact
pub trait AssemblyMetadata {
  /// Assembly (simple) name
  fn name(&self) -> Option<&str>;

  /// Four-part assembly version
  fn version(&self) -> Option<&str>;

  /// Custom attribute by short name (`Company`, `InformationalVersion`, ...)
  fn attribute(&self, key: &str) -> Option<&str>;
}

/// Attribute manifest emitted next to a build artifact
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtifactManifest {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub version: Option<String>,
  #[serde(default)]
  pub attributes: BTreeMap<String, String>,
}

impl ArtifactManifest {
  /// Manifest location for an artifact path
  ///
  /// A path that already names a `.json` file is used as-is.
  pub fn path_for(artifact: &Path) -> PathBuf {
    if artifact.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
      return artifact.to_path_buf();
    }
    let mut name = artifact.as_os_str().to_os_string();
    name.push(".json");
    PathBuf::from(name)
  }

  /// Load the manifest that belongs to `artifact`
  pub fn load(io: &dyn FileService, artifact: &Path) -> StampResult<Self> {
    let path = Self::path_for(artifact);
    if !io.file_exists(&path) {
      warn!(path = %path.display(), "artifact manifest does not exist");
      return Err(ExtractionError::FileNotFound { path }.into());
    }

    let reader = io
      .read_file_as_stream(&path)
      .map_err(|_| ExtractionError::FileNotFound { path: path.clone() })?;
    let manifest: ArtifactManifest =
      serde_json::from_reader(reader).with_context(|| format!("Failed to parse {}", path.display()))?;

    debug!(path = %path.display(), name = ?manifest.name, "loaded artifact manifest");
    Ok(manifest)
  }
}

impl AssemblyMetadata for ArtifactManifest {
  fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  fn version(&self) -> Option<&str> {
    self.version.as_deref()
  }

  fn attribute(&self, key: &str) -> Option<&str> {
    self.attributes.get(key).map(String::as_str)
  }
}

/// Attributes only the compiled-artifact source can supply; blank when absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArtifactAttributes {
  pub configuration: String,
  pub product: String,
  pub copyright: String,
  pub trademark: String,
  pub culture: String,
}

/// Metadata read from a compiled artifact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssemblyRecord {
  #[serde(flatten)]
  pub record: MetadataRecord,
  #[serde(flatten)]
  pub attributes: ArtifactAttributes,
}

fn required<'a>(value: Option<&'a str>, attribute: &str, origin: &Path) -> StampResult<&'a str> {
  match value {
    Some(v) if !v.trim().is_empty() => Ok(v),
    _ => Err(
      ExtractionError::RequiredAttribute {
        attribute: attribute.to_string(),
        path: origin.to_path_buf(),
      }
      .into(),
    ),
  }
}

fn optional(metadata: &dyn AssemblyMetadata, key: &str) -> String {
  metadata.attribute(key).unwrap_or_default().to_string()
}

/// Build an [`AssemblyRecord`] from artifact attributes
///
/// Title, description, company and version are required. The version is the
/// informational version when declared, else the assembly version.
pub fn read_assembly(metadata: &dyn AssemblyMetadata, origin: &Path) -> StampResult<AssemblyRecord> {
  let title = required(metadata.name(), "Title", origin)?;
  let description = required(metadata.attribute("Description"), "Description", origin)?;
  let company = required(metadata.attribute("Company"), "Company", origin)?;
  let version = match metadata.attribute("InformationalVersion") {
    Some(v) if !v.trim().is_empty() => v,
    _ => required(metadata.version(), "Version", origin)?,
  };

  Ok(AssemblyRecord {
    record: MetadataRecord {
      title: title.to_string(),
      description: description.to_string(),
      company: company.to_string(),
      version: version.to_string(),
    },
    attributes: ArtifactAttributes {
      configuration: optional(metadata, "Configuration"),
      product: optional(metadata, "Product"),
      copyright: optional(metadata, "Copyright"),
      trademark: optional(metadata, "Trademark"),
      culture: optional(metadata, "Culture"),
    },
  })
}

/// Load the manifest next to `artifact` and read its record
pub fn extract_artifact(io: &dyn FileService, artifact: &Path) -> StampResult<AssemblyRecord> {
  let manifest = ArtifactManifest::load(io, artifact)?;
  read_assembly(&manifest, artifact)
}
