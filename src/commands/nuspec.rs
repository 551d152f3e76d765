//! `infostamp nuspec` - generate a package manifest

use crate::core::context::StampContext;
use crate::core::error::StampResult;
use crate::manifest::{self, CustomFile, Dependency, NuspecRequest};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct NuspecArgs {
  /// Directory the .nuspec is written to
  #[arg(long)]
  pub package_dir: Option<PathBuf>,
  /// Project directory holding the info file
  #[arg(long)]
  pub project_dir: Option<PathBuf>,
  /// Compiled artifact (metadata source for CS/VB)
  #[arg(long)]
  pub output_path: Option<PathBuf>,
  /// Project language: CS, VB, TSQL, ETL or COBOL
  #[arg(long)]
  pub language: Option<String>,
  /// Build configuration appended to the package id
  #[arg(long)]
  pub configuration: Option<String>,
  /// Package only the files given with --file
  #[arg(long)]
  pub override_default_files: bool,
  /// Extra file or directory to package, as SRC[=TYPE] (TYPE defaults to content)
  #[arg(long = "file", value_name = "SRC[=TYPE]", value_parser = CustomFile::parse)]
  pub files: Vec<CustomFile>,
  /// Package dependency, as ID=VERSION
  #[arg(long = "dependency", value_name = "ID=VERSION", value_parser = Dependency::parse)]
  pub dependencies: Vec<Dependency>,
  /// Output results in JSON format
  #[arg(long)]
  pub json: bool,
}

/// Run the nuspec command
pub fn run_nuspec(ctx: &StampContext, args: NuspecArgs) -> StampResult<()> {
  let package_dir = ctx.package_dir(args.package_dir.as_deref())?;
  let project_dir = ctx.project_dir(args.project_dir.as_deref())?;
  let output_path = ctx.output_path(args.output_path.as_deref())?;
  let language = ctx.language(args.language.as_deref())?;
  let configuration = ctx.configuration(args.configuration.as_deref());

  let nuspec_config = &ctx.config.nuspec;
  let override_default_files = args.override_default_files || nuspec_config.override_default_files;
  let files = if args.files.is_empty() {
    nuspec_config.files.clone()
  } else {
    args.files
  };
  let dependencies = if args.dependencies.is_empty() {
    nuspec_config.dependencies.clone()
  } else {
    args.dependencies
  };

  let request = NuspecRequest {
    package_dir: &package_dir,
    project_dir: &project_dir,
    output_path: &output_path,
    language,
    configuration: configuration.as_deref(),
    override_default_files,
    files: &files,
    dependencies: &dependencies,
  };
  let outcome = manifest::generate(ctx.io(), &request)?;

  if args.json {
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    return Ok(());
  }

  println!("📦 Package: {} {}", outcome.id, outcome.version);
  println!("   Files:        {}", outcome.file_count);
  println!("   Dependencies: {}", outcome.dependency_count);
  println!();
  println!("✅ Generated {}", outcome.nuspec_file.display());
  Ok(())
}
