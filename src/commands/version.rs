//! `infostamp version` - rewrite version attributes

use crate::core::context::StampContext;
use crate::core::error::{ResultExt, StampResult};
use crate::core::io::FileService;
use crate::versioning::{self, RewriteOptions, RewriteOutcome, RewriteTarget};
use chrono::Local;
use clap::Args;
use serde::Serialize;
use similar::TextDiff;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct VersionArgs {
  /// Project directory holding the version info file
  #[arg(long)]
  pub project_dir: Option<PathBuf>,
  /// Project language: CS, VB, TSQL, ETL or COBOL
  #[arg(long)]
  pub language: Option<String>,
  /// Version file to rewrite instead of the language default (relative to the project)
  #[arg(long)]
  pub version_info_path: Option<PathBuf>,
  /// Value substituted for the '*' placeholder (e.g. the build number)
  #[arg(long)]
  pub version_part: Option<String>,
  /// Release build: drop the -d pre-release indicator
  #[arg(long)]
  pub release: bool,
  /// Version that replaces semantic development values on release
  #[arg(long, requires = "release")]
  pub release_version: Option<String>,
  /// Start a new development version (e.g. 1.2.0); may be combined with --release
  #[arg(long)]
  pub new_development_version: Option<String>,
  /// Show the changes without writing the file
  #[arg(long)]
  pub dry_run: bool,
  /// Output results in JSON format
  #[arg(long)]
  pub json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct VersionReport<'a> {
  #[serde(flatten)]
  outcome: &'a RewriteOutcome,
  output_file_path: Option<&'a Path>,
  dry_run: bool,
}

fn read_to_string(io: &dyn FileService, path: &Path) -> StampResult<String> {
  let mut content = String::new();
  io.read_file_as_stream(path)?
    .read_to_string(&mut content)
    .with_context(|| format!("Failed to read {}", path.display()))?;
  Ok(content)
}

/// Run the version command
pub fn run_version(ctx: &StampContext, args: VersionArgs) -> StampResult<()> {
  let project_dir = ctx.project_dir(args.project_dir.as_deref())?;
  let language = ctx.language(args.language.as_deref())?;
  let version_info_path = ctx.info_path(args.version_info_path.as_deref());

  let target = RewriteTarget {
    project_dir: &project_dir,
    language,
    version_info_path: version_info_path.as_deref(),
  };
  let options = RewriteOptions {
    version_part: ctx.version_part(args.version_part.as_deref()),
    is_release: args.release,
    release_version: args.release_version,
    new_development_version: args.new_development_version,
    ..RewriteOptions::new(Local::now().naive_local())
  };

  let outcome = versioning::rewrite(ctx.io(), &target, &options)?;

  if args.dry_run {
    if !args.json {
      let original = read_to_string(ctx.io(), &outcome.version_info_path)?;
      print_diff(&outcome.version_info_path, &original, &outcome.content);
    }
  } else {
    versioning::write_outcome(ctx.io(), &outcome)?;
  }

  if args.json {
    let report = VersionReport {
      outcome: &outcome,
      output_file_path: (!args.dry_run).then_some(outcome.version_info_path.as_path()),
      dry_run: args.dry_run,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print_outcome(&outcome, args.dry_run);
  }

  Ok(())
}

fn print_diff(path: &Path, original: &str, rewritten: &str) {
  if original == rewritten {
    println!("🔍 Dry-run: {} is already up to date", path.display());
    println!();
    return;
  }

  let name = path.display().to_string();
  let diff = TextDiff::from_lines(original, rewritten)
    .unified_diff()
    .context_radius(1)
    .header(&name, &name)
    .to_string();
  println!("🔍 Dry-run mode (no changes written)");
  println!();
  print!("{}", diff);
  println!();
}

fn print_outcome(outcome: &RewriteOutcome, dry_run: bool) {
  println!("🏷️  Version:                {}", outcome.version);
  println!("   Semantic:               {}", outcome.is_semantic_version);
  println!("   Next release:           {}", outcome.next_release_version);
  println!("   Next development:       {}", outcome.next_new_development_version);
  println!("   Version info file:      {}", outcome.version_info_path.display());
  println!();

  if dry_run {
    println!("To write these changes, run again without --dry-run");
  } else {
    println!("✅ Updated {}", outcome.version_info_path.display());
  }
}
