use crate::core::error::{ConfigError, StampError, StampResult, ResultExt};
use crate::info::language::Language;
use crate::manifest::{CustomFile, Dependency};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Optional defaults for infostamp commands
/// Searched in order: stamp.toml, .stamp.toml, .config/stamp.toml
///
/// Command-line flags always win over values from the file. Relative paths
/// are resolved against the directory that holds the config file.
///
/// # Example
///
/// ```toml
/// [project]
/// dir = "src/Orders.Database"
/// language = "TSQL"
/// version_part = "42"
///
/// [nuspec]
/// package_dir = "pkg"
/// configuration = "Release"
/// files = [{ src = "scripts", file_type = "content" }]
/// dependencies = [{ id = "Contoso.Common", version = "1.0.0" }]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StampConfig {
  #[serde(default)]
  pub project: ProjectConfig,
  #[serde(default)]
  pub nuspec: NuspecConfig,
  /// Directory the config was loaded from
  #[serde(skip)]
  pub base_dir: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
  /// Project directory
  #[serde(default)]
  pub dir: Option<PathBuf>,

  /// Language identifier (CS, VB, TSQL, ETL, COBOL)
  #[serde(default)]
  pub language: Option<String>,

  /// Substituted for the `*` version placeholder
  #[serde(default)]
  pub version_part: Option<String>,

  /// Info/version file override, relative to the project directory
  #[serde(default)]
  pub info_path: Option<PathBuf>,

  /// Solution directory searched first for sonar-project.properties
  #[serde(default)]
  pub solution_dir: Option<PathBuf>,
}

impl ProjectConfig {
  /// Parsed language, if configured
  pub fn language(&self) -> StampResult<Option<Language>> {
    self
      .language
      .as_deref()
      .map(|name| name.parse::<Language>().map_err(StampError::from))
      .transpose()
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NuspecConfig {
  #[serde(default)]
  pub package_dir: Option<PathBuf>,

  /// Compiled artifact for CS/VB projects
  #[serde(default)]
  pub output_path: Option<PathBuf>,

  #[serde(default)]
  pub configuration: Option<String>,

  /// Skip the built-in file list and package only `files`
  #[serde(default)]
  pub override_default_files: bool,

  #[serde(default)]
  pub files: Vec<CustomFile>,

  #[serde(default)]
  pub dependencies: Vec<Dependency>,
}

impl StampConfig {
  /// Find config file in search order: stamp.toml, .stamp.toml, .config/stamp.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("stamp.toml"),
      path.join(".stamp.toml"),
      path.join(".config").join("stamp.toml"),
    ];

    candidates.into_iter().find(|p| p.is_file())
  }

  /// Load and validate a specific config file
  pub fn load(config_path: &Path) -> StampResult<Self> {
    if !config_path.is_file() {
      return Err(StampError::Config(ConfigError::NotFound {
        path: config_path.to_path_buf(),
      }));
    }

    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let mut config: StampConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config.base_dir = config_path
      .parent()
      .map(|p| p.to_path_buf())
      .unwrap_or_default();
    config
      .validate()
      .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    Ok(config)
  }

  /// Use `explicit` when given, else search `dir`; no file means defaults
  pub fn discover(dir: &Path, explicit: Option<&Path>) -> StampResult<Self> {
    match explicit {
      Some(path) => Self::load(path),
      None => match Self::find_config_path(dir) {
        Some(path) => Self::load(&path),
        None => Ok(Self::default()),
      },
    }
  }

  /// Check values that can be checked without touching the project
  pub fn validate(&self) -> StampResult<()> {
    self.project.language()?;
    for dep in &self.nuspec.dependencies {
      if dep.id.trim().is_empty() || dep.version.trim().is_empty() {
        return Err(StampError::with_help(
          "Nuspec dependency with empty id or version",
          "Each entry in [nuspec] dependencies needs both `id` and `version`",
        ));
      }
    }
    Ok(())
  }

  /// Resolve a path from the config file against its directory
  pub fn resolve(&self, path: &Path) -> PathBuf {
    self.base_dir.join(path)
  }
}
