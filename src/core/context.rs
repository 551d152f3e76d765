//! Command context - build once in main, pass to every command
//!
//! Holds the loaded stamp.toml and the file service, and merges command-line
//! values with config values. Flags always win; config paths are resolved
//! against the config file's directory.

use crate::core::config::StampConfig;
use crate::core::error::{ConfigError, StampError, StampResult};
use crate::core::io::{FileService, LocalFs};
use crate::info::language::Language;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct StampContext {
  /// stamp.toml, or defaults when there is none
  pub config: StampConfig,

  io: Box<dyn FileService>,
}

fn missing(field: &str) -> StampError {
  StampError::Config(ConfigError::MissingField {
    field: field.to_string(),
  })
}

impl StampContext {
  /// Load config (explicit path or search in `cwd`) over the local file system
  pub fn build(cwd: &Path, config_path: Option<&Path>) -> StampResult<Self> {
    let config = StampConfig::discover(cwd, config_path)?;
    debug!(base_dir = %config.base_dir.display(), "configuration loaded");
    Ok(Self::with_io(config, Box::new(LocalFs)))
  }

  pub fn with_io(config: StampConfig, io: Box<dyn FileService>) -> Self {
    Self { config, io }
  }

  pub fn io(&self) -> &dyn FileService {
    self.io.as_ref()
  }

  fn config_path(&self, value: Option<&PathBuf>) -> Option<PathBuf> {
    value.map(|p| self.config.resolve(p))
  }

  /// `--project-dir` or `[project] dir`
  pub fn project_dir(&self, flag: Option<&Path>) -> StampResult<PathBuf> {
    flag
      .map(Path::to_path_buf)
      .or_else(|| self.config_path(self.config.project.dir.as_ref()))
      .ok_or_else(|| missing("project_dir"))
  }

  /// `--language` or `[project] language`
  pub fn language(&self, flag: Option<&str>) -> StampResult<Language> {
    match flag {
      Some(name) => Ok(name.parse::<Language>()?),
      None => self.config.project.language()?.ok_or_else(|| missing("language")),
    }
  }

  /// `--version-part` or `[project] version_part`
  pub fn version_part(&self, flag: Option<&str>) -> Option<String> {
    flag
      .map(str::to_string)
      .or_else(|| self.config.project.version_part.clone())
  }

  /// Info file override; relative to the project directory either way
  pub fn info_path(&self, flag: Option<&Path>) -> Option<PathBuf> {
    flag
      .map(Path::to_path_buf)
      .or_else(|| self.config.project.info_path.clone())
  }

  /// `--solution-dir` or `[project] solution_dir`
  pub fn solution_dir(&self, flag: Option<&Path>) -> StampResult<PathBuf> {
    flag
      .map(Path::to_path_buf)
      .or_else(|| self.config_path(self.config.project.solution_dir.as_ref()))
      .ok_or_else(|| missing("solution_dir"))
  }

  /// `--package-dir` or `[nuspec] package_dir`
  pub fn package_dir(&self, flag: Option<&Path>) -> StampResult<PathBuf> {
    flag
      .map(Path::to_path_buf)
      .or_else(|| self.config_path(self.config.nuspec.package_dir.as_ref()))
      .ok_or_else(|| missing("package_dir"))
  }

  /// `--output-path` or `[nuspec] output_path`
  pub fn output_path(&self, flag: Option<&Path>) -> StampResult<PathBuf> {
    flag
      .map(Path::to_path_buf)
      .or_else(|| self.config_path(self.config.nuspec.output_path.as_ref()))
      .ok_or_else(|| missing("output_path"))
  }

  /// `--configuration` or `[nuspec] configuration`
  pub fn configuration(&self, flag: Option<&str>) -> Option<String> {
    flag
      .map(str::to_string)
      .or_else(|| self.config.nuspec.configuration.clone())
  }
}
