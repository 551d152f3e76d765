//! `.nuspec` package manifest generation

use crate::core::error::StampResult;
use crate::core::io::FileService;
use crate::info::language::Language;
use crate::info::{self, InfoRequest, MetadataRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const NUSPEC_EXTENSION: &str = "nuspec";

/// Files packaged unless defaults are overridden
pub const DEFAULT_FILES: [(&str, &str); 10] = [
  (r"**\*.dll", "lib"),
  (r"**\*.exe", "lib"),
  (r"**\*.sql", "lib"),
  (r"**\*.dtsx", "lib"),
  (r"**\*.config", "content"),
  (r"**\*.xml", "content"),
  (r"**\*.dtsConfig", "content"),
  (r"**\*.zip", "content"),
  (r"**\*.cmd", "content"),
  (r"**\*.bat", "content"),
];

/// `<file src=".." target=".."/>` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageFile {
  pub src: String,
  pub target: String,
}

impl PackageFile {
  pub fn new(src: impl Into<String>, target: impl Into<String>) -> Self {
    Self {
      src: src.into(),
      target: target.into(),
    }
  }
}

/// User supplied file entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CustomFile {
  pub src: String,
  #[serde(default = "default_file_type")]
  pub file_type: String,
}

fn default_file_type() -> String {
  "content".to_string()
}

impl CustomFile {
  /// Parse `SRC[=TYPE]`; the type defaults to `content`
  pub fn parse(spec: &str) -> Result<Self, String> {
    let (src, file_type) = match spec.split_once('=') {
      Some((src, file_type)) => (src.trim(), file_type.trim()),
      None => (spec.trim(), "content"),
    };
    if src.is_empty() || file_type.is_empty() {
      return Err(format!("invalid file entry '{}', expected SRC[=TYPE]", spec));
    }
    Ok(Self {
      src: src.to_string(),
      file_type: file_type.to_string(),
    })
  }
}

/// Package dependency
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Dependency {
  pub id: String,
  pub version: String,
}

impl Dependency {
  /// Parse `ID=VERSION`
  pub fn parse(spec: &str) -> Result<Self, String> {
    match spec.split_once('=') {
      Some((id, version)) if !id.trim().is_empty() && !version.trim().is_empty() => Ok(Self {
        id: id.trim().to_string(),
        version: version.trim().to_string(),
      }),
      _ => Err(format!("invalid dependency '{}', expected ID=VERSION", spec)),
    }
  }
}

/// Package id: title plus `.configuration`, spaces removed
pub fn package_id(title: &str, configuration: Option<&str>) -> String {
  let id = match configuration.map(str::trim).filter(|c| !c.is_empty()) {
    Some(configuration) => format!("{}.{}", title, configuration),
    None => title.to_string(),
  };
  id.replace(' ', "")
}

/// Default files (unless overridden) followed by the custom files
///
/// A custom directory lands under `file_type\src`, a single file under
/// `file_type`. Sources are resolved against `package_dir`, where the nuspec
/// is written.
pub fn resolve_files(
  io: &dyn FileService,
  package_dir: &Path,
  override_default_files: bool,
  custom: &[CustomFile],
) -> Vec<PackageFile> {
  let defaults = DEFAULT_FILES
    .iter()
    .filter(|_| !override_default_files)
    .map(|(src, target)| PackageFile::new(*src, *target));

  let custom = custom.iter().map(|file| {
    let target = if io.is_directory(&package_dir.join(&file.src)) {
      format!(r"{}\{}", file.file_type, file.src)
    } else {
      file.file_type.clone()
    };
    PackageFile::new(file.src.as_str(), target)
  });

  defaults.chain(custom).collect()
}

/// In-memory nuspec document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NuspecSpec {
  pub id: String,
  pub description: String,
  pub authors: String,
  pub version: String,
  pub dependencies: Vec<Dependency>,
  pub files: Vec<PackageFile>,
}

impl NuspecSpec {
  pub fn from_record(record: &MetadataRecord, configuration: Option<&str>) -> Self {
    Self {
      id: package_id(&record.title, configuration),
      description: record.description.clone(),
      authors: record.company.clone(),
      version: record.version.clone(),
      dependencies: Vec::new(),
      files: Vec::new(),
    }
  }

  /// `<id>.nuspec`
  pub fn file_name(&self) -> String {
    format!("{}.{}", self.id, NUSPEC_EXTENSION)
  }
}

/// Escape text for XML content and double-quoted attributes
pub fn escape_xml(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&apos;"),
      _ => out.push(c),
    }
  }
  out
}

impl fmt::Display for NuspecSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
    writeln!(f, "<package>")?;
    writeln!(f, "  <metadata>")?;
    writeln!(f, "    <id>{}</id>", escape_xml(&self.id))?;
    writeln!(f, "    <description>{}</description>", escape_xml(&self.description))?;
    writeln!(f, "    <authors>{}</authors>", escape_xml(&self.authors))?;
    writeln!(f, "    <version>{}</version>", escape_xml(&self.version))?;
    if !self.dependencies.is_empty() {
      writeln!(f, "    <dependencies>")?;
      for dep in &self.dependencies {
        writeln!(
          f,
          r#"      <dependency id="{}" version="{}" />"#,
          escape_xml(&dep.id),
          escape_xml(&dep.version)
        )?;
      }
      writeln!(f, "    </dependencies>")?;
    }
    writeln!(f, "  </metadata>")?;
    if self.files.is_empty() {
      writeln!(f, "  <files />")?;
    } else {
      writeln!(f, "  <files>")?;
      for file in &self.files {
        writeln!(
          f,
          r#"    <file src="{}" target="{}" />"#,
          escape_xml(&file.src),
          escape_xml(&file.target)
        )?;
      }
      writeln!(f, "  </files>")?;
    }
    write!(f, "</package>")
  }
}

/// Inputs of one nuspec generation
#[derive(Debug, Clone)]
pub struct NuspecRequest<'a> {
  pub package_dir: &'a Path,
  pub project_dir: &'a Path,
  /// Compiled artifact (CS/VB metadata source)
  pub output_path: &'a Path,
  pub language: Language,
  pub configuration: Option<&'a str>,
  pub override_default_files: bool,
  pub files: &'a [CustomFile],
  pub dependencies: &'a [Dependency],
}

/// Generated manifest
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NuspecOutcome {
  pub nuspec_file: PathBuf,
  pub id: String,
  pub version: String,
  pub file_count: usize,
  pub dependency_count: usize,
}

/// Build the manifest from project metadata and write it to the package dir
pub fn generate(io: &dyn FileService, request: &NuspecRequest<'_>) -> StampResult<NuspecOutcome> {
  let info_request = InfoRequest {
    project_dir: request.project_dir,
    language: request.language,
    info_path: None,
    artifact: Some(request.output_path),
  };
  let extraction = info::extract_required_artifact(io, &info_request)?.require_complete()?;

  let mut spec = NuspecSpec::from_record(&extraction.record, request.configuration);
  spec.dependencies = request.dependencies.to_vec();
  spec.files = resolve_files(io, request.package_dir, request.override_default_files, request.files);
  debug!(?spec, "assembled nuspec");

  let path = request.package_dir.join(spec.file_name());
  io.write_file(&path, &format!("{}\n", spec))?;
  info!(path = %path.display(), id = %spec.id, "nuspec written");

  Ok(NuspecOutcome {
    nuspec_file: path,
    id: spec.id,
    version: spec.version,
    file_count: spec.files.len(),
    dependency_count: spec.dependencies.len(),
  })
}
