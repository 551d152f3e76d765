//! Tests for the `sonar` command

use crate::helpers::*;
use anyhow::Result;

const PROPERTIES: &str = "sonar.projectKey=orders\nsonar.projectName=Orders\nsonar.projectVersion=1.0\nsonar.sources=.\n";

#[test]
fn test_sonar_updates_solution_properties() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file("sonar-project.properties", PROPERTIES)?;
  workspace.create_dir("Orders")?;

  let output = run_infostamp(
    &workspace.path,
    &["sonar", "--solution-dir", ".", "--project-dir", "Orders", "--version", "1.2.0"],
  )?;
  assert!(stdout(&output).contains("sonar.projectVersion"));

  assert_eq!(
    workspace.read_file("sonar-project.properties")?,
    "sonar.projectKey=orders\nsonar.projectName=Orders\nsonar.projectVersion=1.2.0\nsonar.sources=.\n"
  );

  Ok(())
}

#[test]
fn test_sonar_falls_back_to_project_dir() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file("Orders/sonar-project.properties", PROPERTIES)?;

  let json = run_infostamp_json(
    &workspace.path,
    &["sonar", "--solution-dir", ".", "--project-dir", "Orders", "--version", "2.0.0"],
  )?;

  assert_eq!(json["Replaced"], 1);
  assert!(
    workspace
      .read_file("Orders/sonar-project.properties")?
      .contains("sonar.projectVersion=2.0.0\n")
  );

  Ok(())
}

#[test]
fn test_sonar_missing_properties_fails() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.create_dir("Orders")?;

  let output = run_infostamp_raw(
    &workspace.path,
    &["sonar", "--solution-dir", ".", "--project-dir", "Orders", "--version", "1.0.0"],
  )?;

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("sonar-project.properties"));

  Ok(())
}
