//! Tests for the `info` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_info_database_project() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_database_project("Orders", "DbVersion = \"1.0.0.0\"")?;

  let output = run_infostamp(&workspace.path, &["info", "--project-dir", "Orders", "--language", "TSQL"])?;
  let out = stdout(&output);

  assert!(out.contains("Title:       Orders"));
  assert!(out.contains("Company:     Contoso Ltd."));
  assert!(out.contains("Version:     1.0.0.0"));
  assert!(out.contains("Project information extracted"));

  Ok(())
}

#[test]
fn test_info_json_output() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_etl_project("Loader", "2.1.0.0")?;

  let json = run_infostamp_json(&workspace.path, &["info", "--project-dir", "Loader", "--language", "etl"])?;

  assert_eq!(json["Success"], true);
  assert_eq!(json["Title"], "Loader");
  assert_eq!(json["Description"], "Nightly load");
  assert_eq!(json["Company"], "Contoso Ltd.");
  assert_eq!(json["Version"], "2.1.0.0");
  assert!(json["InfoPath"].as_str().unwrap_or_default().ends_with("EtlInfo.etl"));

  Ok(())
}

#[test]
fn test_info_semantic_version_declared_first_wins() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file(
    "Orders/Properties/DbInfo.db",
    "DbTitle = \"Orders\"\nDbDescription = \"d\"\nDbCompany = \"c\"\nDbInformationalVersion = \"1.2.0-d\"\nDbVersion = \"1.2.0.0\"\n",
  )?;

  let json = run_infostamp_json(&workspace.path, &["info", "--project-dir", "Orders", "--language", "TSQL"])?;
  assert_eq!(json["Version"], "1.2.0-d");

  Ok(())
}

#[test]
fn test_info_cobol_project() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_cobol_project("Batch")?;

  let json = run_infostamp_json(&workspace.path, &["info", "--project-dir", "Batch", "--language", "COBOL"])?;

  assert_eq!(json["Title"], "Batch");
  assert_eq!(json["Description"], "COBOL batch");
  assert_eq!(json["Version"], "1.0.*");

  Ok(())
}

#[test]
fn test_info_and_version_agree_on_cobol_data_items() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file(
    "Batch/Properties/AssemblyInfo.cob",
    "           CUSTOM-ATTRIBUTE CA-ASSEMBLYTITLE *> package title\n               USING \"Batch\".\n           CUSTOM-ATTRIBUTE CA-ASSEMBLYDESCRIPTION\n               USING \"COBOL batch\".\n           CUSTOM-ATTRIBUTE CA-ASSEMBLYCOMPANY\n               USING \"Contoso Ltd.\".\n           CUSTOM-ATTRIBUTE CA-ASSEMBLYVERSION\n               USING \"1.0.0.0\".\n       01 CA-ASSEMBLYVERSION-TEXT PIC X(10) VALUE \"9.9.9.9\".\n       PROCEDURE DIVISION.\n",
  )?;
  let args = ["--project-dir", "Batch", "--language", "COBOL"];

  let info = run_infostamp_json(&workspace.path, &[&["info"][..], &args[..]].concat())?;
  let version = run_infostamp_json(&workspace.path, &[&["version"][..], &args[..]].concat())?;

  assert_eq!(info["Title"], "Batch");
  assert_eq!(info["Version"], "1.0.0.0");
  assert_eq!(version["Version"], "1.0.0.0");
  assert!(
    workspace
      .read_file("Batch/Properties/AssemblyInfo.cob")?
      .contains("       01 CA-ASSEMBLYVERSION-TEXT PIC X(10) VALUE \"9.9.9.9\".\n       PROCEDURE DIVISION.\n")
  );

  Ok(())
}

#[test]
fn test_info_incomplete_metadata_fails() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file("Loader/EtlInfo.etl", "EtlTitle = \"Loader\"\nEtlVersion = \"1.0.0.0\"\n")?;

  let output = run_infostamp_raw(&workspace.path, &["info", "--project-dir", "Loader", "--language", "ETL"])?;

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("missing: Description, Company"));
  // Fields are still reported before failing
  assert!(stdout(&output).contains("Title:       Loader"));

  Ok(())
}

#[test]
fn test_info_missing_file_fails() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.create_dir("Empty")?;

  let output = run_infostamp_raw(&workspace.path, &["info", "--project-dir", "Empty", "--language", "TSQL"])?;

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("Unable to locate info file"));

  Ok(())
}

#[test]
fn test_info_unknown_language_is_config_error() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let output = run_infostamp_raw(&workspace.path, &["info", "--project-dir", ".", "--language", "FORTRAN"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Unknown language 'FORTRAN'"));

  Ok(())
}

#[test]
fn test_info_requires_project_dir() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let output = run_infostamp_raw(&workspace.path, &["info", "--language", "TSQL"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("--project-dir"));

  Ok(())
}

#[test]
fn test_info_reads_defaults_from_config() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_database_project("Orders", "DbVersion = \"3.0.0.0\"")?;
  workspace.write_file("stamp.toml", "[project]\ndir = \"Orders\"\nlanguage = \"TSQL\"\n")?;

  let json = run_infostamp_json(&workspace.path, &["info"])?;
  assert_eq!(json["Version"], "3.0.0.0");

  Ok(())
}

#[test]
fn test_info_assembly_manifest() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.create_dir("Orders.Core")?;
  workspace.write_file(
    "Orders.Core/bin/Release/Orders.Core.dll.json",
    r#"{
  "name": "Orders.Core",
  "version": "1.4.0.0",
  "attributes": {
    "Description": "Core order logic",
    "Company": "Contoso Ltd.",
    "Configuration": "Release"
  }
}"#,
  )?;

  let json = run_infostamp_json(
    &workspace.path,
    &[
      "info",
      "--project-dir",
      "Orders.Core",
      "--language",
      "CS",
      "--assembly",
      "Orders.Core/bin/Release/Orders.Core.dll",
    ],
  )?;

  assert_eq!(json["Title"], "Orders.Core");
  assert_eq!(json["Version"], "1.4.0.0");
  assert_eq!(json["Configuration"], "Release");
  assert_eq!(json["Product"], "");

  Ok(())
}
