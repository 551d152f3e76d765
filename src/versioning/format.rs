//! Version literal formatting
//!
//! Pure functions over one (logical) attribute line. Every rule works on the
//! quoted value when the line has one and on the whole line otherwise, so the
//! text around the value is never touched.

use crate::info::filter;
use chrono::NaiveDateTime;

/// Placeholder substituted by the version part
pub const PLACEHOLDER: char = '*';

/// Pre-release indicator carried by semantic development versions
pub const DEV_INDICATOR: &str = "-d";

/// Development stamp inserted after [`DEV_INDICATOR`] (`yyyyMMddHHmm`)
pub const STAMP_FORMAT: &str = "%Y%m%d%H%M";

/// Apply `f` to the quoted value of `line`, or to the whole line when unquoted
fn map_value(line: &str, f: impl FnOnce(&str) -> String) -> String {
  match filter::quoted_span(line) {
    Some(span) => {
      let mut out = String::with_capacity(line.len() + 16);
      out.push_str(&line[..span.start]);
      out.push_str(&f(&line[span.clone()]));
      out.push_str(&line[span.end..]);
      out
    }
    None => f(line),
  }
}

fn value_of(line: &str) -> &str {
  filter::quoted_span(line).map(|span| &line[span]).unwrap_or(line)
}

/// Expand a version part so the template ends up with four components
///
/// `dots` is the number of dots already in the template.
pub fn expand_part(part: &str, dots: usize) -> String {
  match dots {
    3 => part.to_string(),
    2 => format!("{}.0", part),
    1 => format!("{}.0.0", part),
    _ => format!("{}.0.0.0", part),
  }
}

/// True when the value of the line still holds a placeholder
pub fn has_placeholder(line: &str) -> bool {
  value_of(line).contains(PLACEHOLDER)
}

/// Numeric (non-semantic) rule
///
/// A fixed template is returned unchanged. Returns `None` when the template
/// has a placeholder and no part was supplied.
pub fn format_numeric(line: &str, part: Option<&str>) -> Option<String> {
  if !has_placeholder(line) {
    return Some(line.to_string());
  }
  let part = part.map(str::trim).filter(|p| !p.is_empty())?;
  Some(map_value(line, |value| {
    let dots = value.matches('.').count();
    value.replace(PLACEHOLDER, &expand_part(part, dots))
  }))
}

/// Semantic development rule: zero the placeholder and stamp after `-d`
pub fn format_semantic_development(line: &str, now: NaiveDateTime) -> String {
  map_value(line, |value| {
    let value = value.replace(PLACEHOLDER, "0");
    match value.find(DEV_INDICATOR) {
      Some(pos) => {
        let at = pos + DEV_INDICATOR.len();
        format!("{}{}{}", &value[..at], now.format(STAMP_FORMAT), &value[at..])
      }
      None => value,
    }
  })
}

/// Semantic release rule: zero the placeholder and drop `-d`
///
/// With an override the whole value is replaced by it. Neither happens when the
/// value carries no `-d`.
pub fn format_semantic_release(line: &str, release_version: Option<&str>) -> String {
  map_value(line, |value| {
    let value = value.replace(PLACEHOLDER, "0");
    if !value.contains(DEV_INDICATOR) {
      return value;
    }
    match release_version.map(str::trim).filter(|v| !v.is_empty()) {
      Some(release) => release.replace(DEV_INDICATOR, ""),
      None => value.replace(DEV_INDICATOR, ""),
    }
  })
}

/// New development rule for semantic-marker lines
pub fn new_development_semantic(line: &str, new_version: &str) -> String {
  map_value(line, |_| {
    if new_version.contains(DEV_INDICATOR) {
      new_version.to_string()
    } else {
      format!("{}{}", new_version, DEV_INDICATOR)
    }
  })
}

/// New development rule for every other version-bearing line
pub fn new_development_numeric(line: &str, new_version: &str) -> String {
  map_value(line, |_| format!("{}.0", new_version.replace(DEV_INDICATOR, "")))
}
