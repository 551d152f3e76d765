//! Tests for the `version` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_version_release_with_override() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_database_project("Orders", "DbInformationalVersion = \"1.0.0-d\"")?;

  let json = run_infostamp_json(
    &workspace.path,
    &[
      "version",
      "--project-dir",
      "Orders",
      "--language",
      "TSQL",
      "--release",
      "--release-version",
      "1.1.0",
    ],
  )?;

  assert_eq!(json["Version"], "1.1.0");
  assert_eq!(json["IsSemanticVersion"], true);
  assert_eq!(json["NextReleaseVersion"], "1.2.0");
  assert_eq!(json["NextNewDevelopmentVersion"], "1.2.0-d");

  let content = workspace.read_file("Orders/Properties/DbInfo.db")?;
  assert!(content.contains("DbInformationalVersion = \"1.1.0\"\n"));
  assert!(content.contains("DbTitle = \"Orders\"\n"));

  Ok(())
}

#[test]
fn test_version_development_stamp() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_database_project("Orders", "DbInformationalVersion = \"1.0.*-d\"")?;

  let json = run_infostamp_json(&workspace.path, &["version", "--project-dir", "Orders", "--language", "TSQL"])?;

  let version = json["Version"].as_str().unwrap_or_default().to_string();
  let stamp = version.strip_prefix("1.0.0-d").unwrap_or_default();
  assert_eq!(stamp.len(), 12, "unexpected version {}", version);
  assert!(stamp.chars().all(|c| c.is_ascii_digit()));
  assert_eq!(json["NextReleaseVersion"], "1.0.0");
  assert_eq!(json["NextNewDevelopmentVersion"], "1.1.0-d");

  let content = workspace.read_file("Orders/Properties/DbInfo.db")?;
  assert!(content.contains(&format!("DbInformationalVersion = \"{}\"", version)));

  Ok(())
}

#[test]
fn test_version_part_preserves_line_endings() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_etl_project("Loader", "1.0.*")?;
  let before = workspace.read_file("Loader/EtlInfo.etl")?;

  let output = run_infostamp(
    &workspace.path,
    &["version", "--project-dir", "Loader", "--language", "ETL", "--version-part", "5"],
  )?;
  assert!(stdout(&output).contains("1.0.5.0"));

  let after = workspace.read_file("Loader/EtlInfo.etl")?;
  assert_eq!(after, before.replace("1.0.*", "1.0.5.0"));
  assert_eq!(after.matches("\r\n").count(), 5);

  Ok(())
}

#[test]
fn test_version_placeholder_without_part_fails() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_etl_project("Loader", "1.0.*")?;
  let before = workspace.read_file("Loader/EtlInfo.etl")?;

  let output = run_infostamp_raw(&workspace.path, &["version", "--project-dir", "Loader", "--language", "ETL"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("--version-part"));
  assert_eq!(workspace.read_file("Loader/EtlInfo.etl")?, before);

  Ok(())
}

#[test]
fn test_version_part_from_config() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_etl_project("Loader", "2.*")?;
  workspace.write_file(
    "stamp.toml",
    "[project]\ndir = \"Loader\"\nlanguage = \"ETL\"\nversion_part = \"9\"\n",
  )?;

  let json = run_infostamp_json(&workspace.path, &["version"])?;
  assert_eq!(json["Version"], "2.9.0.0");

  Ok(())
}

#[test]
fn test_version_dry_run_leaves_file() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_database_project("Orders", "DbVersion = \"1.0.*\"")?;
  let before = workspace.read_file("Orders/Properties/DbInfo.db")?;

  let output = run_infostamp(
    &workspace.path,
    &[
      "version",
      "--project-dir",
      "Orders",
      "--language",
      "TSQL",
      "--version-part",
      "7",
      "--dry-run",
    ],
  )?;
  let out = stdout(&output);

  assert!(out.contains("Dry-run"));
  assert!(out.contains("-DbVersion = \"1.0.*\""));
  assert!(out.contains("+DbVersion = \"1.0.7.0\""));
  assert_eq!(workspace.read_file("Orders/Properties/DbInfo.db")?, before);

  Ok(())
}

#[test]
fn test_version_new_development() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file(
    "Orders/Properties/DbInfo.db",
    "DbVersion = \"1.1.0.0\"\nDbInformationalVersion = \"1.1.0\"\n",
  )?;

  let json = run_infostamp_json(
    &workspace.path,
    &[
      "version",
      "--project-dir",
      "Orders",
      "--language",
      "TSQL",
      "--new-development-version",
      "1.2.0",
    ],
  )?;

  assert_eq!(json["Version"], "1.2.0-d");
  assert_eq!(
    workspace.read_file("Orders/Properties/DbInfo.db")?,
    "DbVersion = \"1.2.0.0\"\nDbInformationalVersion = \"1.2.0-d\"\n"
  );

  Ok(())
}

#[test]
fn test_version_new_development_on_release() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file(
    "Orders/Properties/DbInfo.db",
    "DbVersion = \"1.1.0.0\"\nDbInformationalVersion = \"1.1.0\"\n",
  )?;

  let json = run_infostamp_json(
    &workspace.path,
    &[
      "version",
      "--project-dir",
      "Orders",
      "--language",
      "TSQL",
      "--release",
      "--new-development-version",
      "1.2.0",
    ],
  )?;

  assert_eq!(json["Version"], "1.2.0-d");
  assert_eq!(json["NextReleaseVersion"], "1.3.0");
  assert_eq!(json["NextNewDevelopmentVersion"], "1.3.0-d");
  assert_eq!(
    workspace.read_file("Orders/Properties/DbInfo.db")?,
    "DbVersion = \"1.2.0.0\"\nDbInformationalVersion = \"1.2.0-d\"\n"
  );

  Ok(())
}

#[test]
fn test_version_cobol_split_back_into_two_lines() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_cobol_project("Batch")?;
  let before = workspace.read_file("Batch/Properties/AssemblyInfo.cob")?;

  let json = run_infostamp_json(
    &workspace.path,
    &["version", "--project-dir", "Batch", "--language", "COBOL", "--version-part", "3"],
  )?;
  assert_eq!(json["Version"], "1.0.3.0");

  let after = workspace.read_file("Batch/Properties/AssemblyInfo.cob")?;
  assert_eq!(after.lines().count(), before.lines().count());
  assert!(after.contains("CUSTOM-ATTRIBUTE CA-ASSEMBLYVERSION USING \"1.0.\n3.0\".\n"));

  Ok(())
}

#[test]
fn test_version_explicit_file_path() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file("Orders/db/Version.db", "DbVersion = \"4.0.0.0\"\n")?;

  let json = run_infostamp_json(
    &workspace.path,
    &[
      "version",
      "--project-dir",
      "Orders",
      "--language",
      "TSQL",
      "--version-info-path",
      "db/Version.db",
    ],
  )?;

  assert_eq!(json["Version"], "4.0.0.0");
  assert!(json["VersionInfoPath"].as_str().unwrap_or_default().ends_with("Version.db"));

  Ok(())
}

#[test]
fn test_version_missing_file_fails() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.create_dir("Orders")?;

  let output = run_infostamp_raw(&workspace.path, &["version", "--project-dir", "Orders", "--language", "TSQL"])?;

  assert_eq!(output.status.code(), Some(3));
  assert!(!workspace.file_exists("Orders/Properties/DbInfo.db"));

  Ok(())
}

#[test]
fn test_version_without_version_line_fails() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file("Orders/Properties/DbInfo.db", "DbTitle = \"Orders\"\n")?;

  let output = run_infostamp_raw(&workspace.path, &["version", "--project-dir", "Orders", "--language", "TSQL"])?;

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("No version attribute found"));

  Ok(())
}
