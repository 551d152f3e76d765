mod commands;
mod core;
mod info;
mod manifest;
mod versioning;

use clap::{Parser, Subcommand};
use crate::core::context::StampContext;
use crate::core::error::{StampError, print_error};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Stamp project metadata and versions into build artifacts
#[derive(Parser)]
#[command(name = "infostamp")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Path to stamp.toml (default: search the current directory)
  #[arg(long, global = true, value_name = "PATH")]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Extract project metadata from the info file or compiled artifact
  Info(commands::InfoArgs),

  /// Rewrite version attributes in the project's version info file
  Version(commands::VersionArgs),

  /// Set sonar.projectVersion in sonar-project.properties
  Sonar(commands::SonarArgs),

  /// Generate a .nuspec package manifest
  Nuspec(commands::NuspecArgs),
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Diagnostics go to stderr so stdout stays parseable with --json
fn init_tracing(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_env("INFOSTAMP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let cwd = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  let ctx = match StampContext::build(&cwd, cli.config.as_deref()) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Info(args) => commands::run_info(&ctx, args),
    Commands::Version(args) => commands::run_version(&ctx, args),
    Commands::Sonar(args) => commands::run_sonar(&ctx, args),
    Commands::Nuspec(args) => commands::run_nuspec(&ctx, args),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: StampError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
