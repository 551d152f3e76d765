//! Package manifests built from project metadata

pub mod nuspec;

pub use nuspec::{CustomFile, Dependency, NuspecRequest, generate};
