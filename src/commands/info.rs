//! `infostamp info` - extract project metadata

use crate::core::context::StampContext;
use crate::core::error::StampResult;
use crate::info::{self, Extraction, InfoRequest};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InfoArgs {
  /// Project directory holding the info file
  #[arg(long)]
  pub project_dir: Option<PathBuf>,
  /// Project language: CS, VB, TSQL, ETL or COBOL
  #[arg(long)]
  pub language: Option<String>,
  /// Info file to read instead of the language default (relative to the project)
  #[arg(long)]
  pub info_path: Option<PathBuf>,
  /// Compiled artifact to read CS/VB attributes from
  #[arg(long)]
  pub assembly: Option<PathBuf>,
  /// Output results in JSON format
  #[arg(long)]
  pub json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InfoReport<'a> {
  success: bool,
  #[serde(flatten)]
  extraction: &'a Extraction,
}

/// Run the info command
pub fn run_info(ctx: &StampContext, args: InfoArgs) -> StampResult<()> {
  let project_dir = ctx.project_dir(args.project_dir.as_deref())?;
  let language = ctx.language(args.language.as_deref())?;
  let info_path = ctx.info_path(args.info_path.as_deref());

  let request = InfoRequest {
    project_dir: &project_dir,
    language,
    info_path: info_path.as_deref(),
    artifact: args.assembly.as_deref(),
  };
  let extraction = info::extract(ctx.io(), &request)?;

  if args.json {
    let report = InfoReport {
      success: extraction.is_complete(),
      extraction: &extraction,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print_extraction(language.profile().task_type, &extraction);
  }

  extraction.require_complete()?;
  Ok(())
}

fn print_extraction(task_type: &str, extraction: &Extraction) {
  let record = &extraction.record;
  println!("📄 {} info: {}", task_type, extraction.path.display());
  println!("   Title:       {}", record.title);
  println!("   Description: {}", record.description);
  println!("   Company:     {}", record.company);
  println!("   Version:     {}", record.version);

  if let Some(attrs) = &extraction.attributes {
    for (name, value) in [
      ("Configuration", &attrs.configuration),
      ("Product", &attrs.product),
      ("Copyright", &attrs.copyright),
      ("Trademark", &attrs.trademark),
      ("Culture", &attrs.culture),
    ] {
      if !value.is_empty() {
        println!("   {:<13}{}", format!("{}:", name), value);
      }
    }
  }
  println!();

  if extraction.is_complete() {
    println!("✅ Project information extracted");
  }
}
