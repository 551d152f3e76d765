//! CLI commands for infostamp
//!
//! One command per build task:
//!
//! - **info**: extract title, description, company and version from a project
//! - **version**: rewrite version attributes (development stamp, release, new development version)
//! - **sonar**: propagate a version into sonar-project.properties
//! - **nuspec**: generate a package manifest from project metadata
//!
//! All commands accept `&StampContext` so stamp.toml is loaded once.

pub mod info;
pub mod nuspec;
pub mod sonar;
pub mod version;

pub use info::{InfoArgs, run_info};
pub use nuspec::{NuspecArgs, run_nuspec};
pub use sonar::{SonarArgs, run_sonar};
pub use version::{VersionArgs, run_version};
