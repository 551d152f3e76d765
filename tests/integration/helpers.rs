//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A throwaway solution directory with project folders
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Create an empty workspace
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Write a file relative to the workspace, creating parent directories
  pub fn write_file(&self, path: &str, content: &str) -> Result<PathBuf> {
    let file_path = self.path.join(path);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&file_path, content)?;
    Ok(file_path)
  }

  /// Create a directory relative to the workspace
  pub fn create_dir(&self, path: &str) -> Result<PathBuf> {
    let dir = self.path.join(path);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
  }

  /// Add a database project with a `Properties/DbInfo.db` info file
  pub fn add_database_project(&self, name: &str, version_line: &str) -> Result<PathBuf> {
    self.write_file(
      &format!("{}/Properties/DbInfo.db", name),
      &format!(
        "-- Database project information\n\
DbTitle = \"{}\"\n\
DbDescription = \"{} database scripts\"\n\
DbCompany = \"Contoso Ltd.\"\n\
{}\n",
        name, name, version_line
      ),
    )?;
    Ok(self.path.join(name))
  }

  /// Add an ETL project with an `EtlInfo.etl` descriptor
  pub fn add_etl_project(&self, name: &str, version: &str) -> Result<PathBuf> {
    self.write_file(
      &format!("{}/EtlInfo.etl", name),
      &format!(
        "// ETL package descriptor\r\n\
EtlTitle = \"{}\"\r\n\
EtlDescription = \"Nightly load\"\r\n\
EtlCompany = \"Contoso Ltd.\"\r\n\
EtlVersion = \"{}\"\r\n",
        name, version
      ),
    )?;
    Ok(self.path.join(name))
  }

  /// Add a COBOL project whose version value is split over two lines
  pub fn add_cobol_project(&self, name: &str) -> Result<PathBuf> {
    self.write_file(
      &format!("{}/Properties/AssemblyInfo.cob", name),
      &format!(
        r#"       IDENTIFICATION DIVISION.
      *> assembly attributes
           CUSTOM-ATTRIBUTE CA-ASSEMBLYTITLE
               USING "{}".
           CUSTOM-ATTRIBUTE CA-ASSEMBLYDESCRIPTION
               USING "COBOL batch".
           CUSTOM-ATTRIBUTE CA-ASSEMBLYCOMPANY
               USING "Contoso Ltd.".
           CUSTOM-ATTRIBUTE CA-ASSEMBLYVERSION USING "1.0.
*".
"#,
        name
      ),
    )?;
    Ok(self.path.join(name))
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Run infostamp and return its output whatever the exit status
pub fn run_infostamp_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let infostamp_bin = env!("CARGO_BIN_EXE_infostamp");

  Command::new(infostamp_bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("INFOSTAMP_LOG")
    .output()
    .context("Failed to run infostamp")
}

/// Run infostamp and fail unless it exits successfully
pub fn run_infostamp(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_infostamp_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "infostamp command failed: infostamp {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run infostamp with `--json` appended and parse stdout
pub fn run_infostamp_json(cwd: &Path, args: &[&str]) -> Result<serde_json::Value> {
  let mut args = args.to_vec();
  args.push("--json");
  let output = run_infostamp(cwd, &args)?;
  serde_json::from_slice(&output.stdout).context("infostamp did not print valid JSON")
}

/// Stdout as a string
pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

/// Stderr as a string
pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}
