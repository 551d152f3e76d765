//! Line predicates shared by every info-file parser

/// True if the line contains at least one of the markers
pub fn matches(line: &str, markers: &[&str]) -> bool {
  markers.iter().any(|m| line.contains(m))
}

/// True if the line contains none of the markers
pub fn excludes(line: &str, markers: &[&str]) -> bool {
  !matches(line, markers)
}

/// Byte range of the text between the first and the last `"` on the line
///
/// Interior quotes are swallowed into the value. `None` when the line has
/// fewer than two quotes.
pub fn quoted_span(line: &str) -> Option<std::ops::Range<usize>> {
  let first = line.find('"')?;
  let last = line.rfind('"')?;
  (last > first).then_some(first + 1..last)
}

/// Text between the first and the last `"`, or `""` when there is none
pub fn quoted_value(line: &str) -> &str {
  quoted_span(line).map(|span| &line[span]).unwrap_or("")
}
