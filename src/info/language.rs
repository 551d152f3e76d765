//! Language dispatch
//!
//! Every supported language is described by one static [`LanguageProfile`]:
//! where its info file lives, which markers it uses, how comment lines look and
//! whether attribute declarations span two physical lines. Extractors and the
//! version rewriter are generic over the profile, so adding a language means
//! adding a table entry, not a new parser.

use crate::core::error::ConfigError;
use crate::info::filter;
use crate::info::markers::{self, AttributeMarkers};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Language identifier accepted on the command line and in stamp.toml
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
  #[serde(rename = "CS")]
  CSharp,
  #[serde(rename = "VB")]
  VisualBasic,
  #[serde(rename = "TSQL")]
  TSql,
  #[serde(rename = "ETL")]
  Etl,
  #[serde(rename = "COBOL")]
  Cobol,
}

/// Where project metadata comes from for a language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
  /// Attribute lines in a text info file
  TextFile,
  /// Attribute manifest of the compiled build output
  CompiledArtifact,
}

/// Static parsing rules for one language
#[derive(Debug)]
pub struct LanguageProfile {
  pub language: Language,
  /// Human readable kind used in log lines ("database", "COBOL assembly", ...)
  pub task_type: &'static str,
  /// Info/version file, relative to the project directory
  pub info_file: &'static [&'static str],
  pub markers: &'static AttributeMarkers,
  /// Lines containing any of these are comments
  pub comment_markers: &'static [&'static str],
  /// Comment markers only count at the start of the code text
  pub comment_at_line_start: bool,
  /// Extraction only considers lines containing one of these (empty = no gate)
  pub required_line_markers: &'static [&'static str],
  /// Attribute values continue on the next physical line
  pub joins_next_line: bool,
  pub source: ExtractionSource,
}

impl LanguageProfile {
  /// Default info file location under `project_dir`
  pub fn info_path(&self, project_dir: &Path) -> PathBuf {
    project_dir.join(self.relative_info_path())
  }

  /// Default info file location relative to the project directory
  pub fn relative_info_path(&self) -> PathBuf {
    self.info_file.iter().collect()
  }

  /// False for comment lines
  pub fn is_code(&self, line: &str) -> bool {
    if self.comment_at_line_start {
      let code = line.trim_start();
      !self.comment_markers.iter().any(|marker| code.starts_with(marker))
    } else {
      filter::excludes(line, self.comment_markers)
    }
  }

  /// Non-comment line carrying a required line marker (always true without any)
  pub fn is_declaration(&self, line: &str) -> bool {
    self.is_code(line)
      && (self.required_line_markers.is_empty() || filter::matches(line, self.required_line_markers))
  }

  /// Whether a physical line can declare a metadata attribute
  ///
  /// With required line markers (COBOL) the line must also name an attribute.
  pub fn is_attribute_line(&self, line: &str) -> bool {
    self.is_declaration(line)
      && (self.required_line_markers.is_empty() || filter::matches(line, &self.markers.all()))
  }
}

static CSHARP: LanguageProfile = LanguageProfile {
  language: Language::CSharp,
  task_type: "assembly",
  info_file: &["Properties", "AssemblyInfo.cs"],
  markers: &markers::ASSEMBLY,
  comment_markers: &["//"],
  comment_at_line_start: false,
  required_line_markers: &[],
  joins_next_line: false,
  source: ExtractionSource::CompiledArtifact,
};

static VISUAL_BASIC: LanguageProfile = LanguageProfile {
  language: Language::VisualBasic,
  task_type: "assembly",
  info_file: &["My Project", "AssemblyInfo.vb"],
  markers: &markers::ASSEMBLY,
  comment_markers: &["'"],
  comment_at_line_start: false,
  required_line_markers: &[],
  joins_next_line: false,
  source: ExtractionSource::CompiledArtifact,
};

static TSQL: LanguageProfile = LanguageProfile {
  language: Language::TSql,
  task_type: "database",
  info_file: &["Properties", "DbInfo.db"],
  markers: &markers::DATABASE,
  comment_markers: &["//", "--"],
  comment_at_line_start: false,
  required_line_markers: &[],
  joins_next_line: false,
  source: ExtractionSource::TextFile,
};

static ETL: LanguageProfile = LanguageProfile {
  language: Language::Etl,
  task_type: "ETL",
  info_file: &["EtlInfo.etl"],
  markers: &markers::ETL,
  comment_markers: &["//", "--"],
  comment_at_line_start: false,
  required_line_markers: &[],
  joins_next_line: false,
  source: ExtractionSource::TextFile,
};

static COBOL: LanguageProfile = LanguageProfile {
  language: Language::Cobol,
  task_type: "COBOL assembly",
  info_file: &["Properties", "AssemblyInfo.cob"],
  markers: &markers::COBOL,
  comment_markers: &["*>"],
  comment_at_line_start: true,
  required_line_markers: &["CUSTOM-ATTRIBUTE"],
  joins_next_line: true,
  source: ExtractionSource::TextFile,
};

impl Language {
  pub const ALL: [Language; 5] = [
    Language::CSharp,
    Language::VisualBasic,
    Language::TSql,
    Language::Etl,
    Language::Cobol,
  ];

  /// Parsing rules for this language
  pub fn profile(self) -> &'static LanguageProfile {
    match self {
      Language::CSharp => &CSHARP,
      Language::VisualBasic => &VISUAL_BASIC,
      Language::TSql => &TSQL,
      Language::Etl => &ETL,
      Language::Cobol => &COBOL,
    }
  }

  /// Canonical identifier
  pub fn id(self) -> &'static str {
    match self {
      Language::CSharp => "CS",
      Language::VisualBasic => "VB",
      Language::TSql => "TSQL",
      Language::Etl => "ETL",
      Language::Cobol => "COBOL",
    }
  }
}

impl fmt::Display for Language {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.id())
  }
}

impl FromStr for Language {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_uppercase().as_str() {
      "CS" | "CSHARP" | "C#" => Ok(Language::CSharp),
      "VB" | "VISUALBASIC" => Ok(Language::VisualBasic),
      "TSQL" | "SQL" => Ok(Language::TSql),
      "ETL" => Ok(Language::Etl),
      "COBOL" | "COB" => Ok(Language::Cobol),
      _ => Err(ConfigError::UnknownLanguage { name: s.to_string() }),
    }
  }
}
