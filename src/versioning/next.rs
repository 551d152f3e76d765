//! Next release / development version derivation

use crate::versioning::format::DEV_INDICATOR;
use serde::Serialize;

/// Versions a pipeline should move to after the current one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextVersions {
  pub release: String,
  pub development: String,
}

/// Version without any pre-release suffix
pub fn base_version(version: &str) -> &str {
  version.split_once('-').map(|(base, _)| base).unwrap_or(version)
}

/// `x.y.z` -> `x.(y+1).0`; other shapes, and a minor at `u64::MAX`, are not bumped
pub fn bump_minor(base: &str) -> Option<String> {
  let parts: Vec<&str> = base.split('.').collect();
  if parts.len() != 3 {
    return None;
  }

  if let Ok(mut parsed) = semver::Version::parse(base) {
    parsed.minor = parsed.minor.checked_add(1)?;
    parsed.patch = 0;
    return Some(parsed.to_string());
  }

  let minor = parts[1].trim().parse::<u64>().unwrap_or(0).checked_add(1)?;
  Some(format!("{}.{}.0", parts[0], minor))
}

/// Derive the next versions from the resolved one
///
/// In release mode the next release is the bumped version; otherwise it is the
/// current version without its pre-release suffix.
pub fn next_versions(version: &str, is_release: bool) -> NextVersions {
  let base = base_version(version);
  let bumped = bump_minor(base);
  let next = bumped.as_deref().unwrap_or(base);

  NextVersions {
    release: if is_release { next.to_string() } else { base.to_string() },
    development: format!("{}{}", next, DEV_INDICATOR),
  }
}
