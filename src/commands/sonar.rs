//! `infostamp sonar` - set sonar.projectVersion

use crate::core::context::StampContext;
use crate::core::error::StampResult;
use crate::versioning::sonar;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SonarArgs {
  /// Solution directory, searched first for sonar-project.properties
  #[arg(long)]
  pub solution_dir: Option<PathBuf>,
  /// Project directory, searched when the solution has no properties file
  #[arg(long)]
  pub project_dir: Option<PathBuf>,
  /// Version to write
  #[arg(long)]
  pub version: String,
  /// Output results in JSON format
  #[arg(long)]
  pub json: bool,
}

/// Run the sonar command
pub fn run_sonar(ctx: &StampContext, args: SonarArgs) -> StampResult<()> {
  let solution_dir = ctx.solution_dir(args.solution_dir.as_deref())?;
  let project_dir = ctx.project_dir(args.project_dir.as_deref())?;

  let outcome = sonar::stamp_sonar(ctx.io(), &solution_dir, &project_dir, &args.version)?;

  if args.json {
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    return Ok(());
  }

  if outcome.replaced == 0 {
    println!(
      "⚠️  No {} entry in {}",
      sonar::PROJECT_VERSION_KEY,
      outcome.properties_path.display()
    );
  } else {
    println!(
      "✅ Set {} to {} in {}",
      sonar::PROJECT_VERSION_KEY,
      outcome.version,
      outcome.properties_path.display()
    );
  }
  Ok(())
}
