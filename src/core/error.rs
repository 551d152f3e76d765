//! Error types for infostamp with contextual messages and exit codes
//!
//! Every task failure ends up here: configuration problems, unreadable info
//! files, incomplete metadata and missing required artifact attributes. The
//! command layer prints the error with its help text and exits with the
//! matching code; nothing in the core panics on bad input.

use crate::info::language::Language;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for infostamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, unknown language)
  User = 1,
  /// System error (I/O)
  System = 2,
  /// Data error (missing info file, incomplete metadata)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for infostamp
#[derive(Debug)]
pub enum StampError {
  /// Configuration errors
  Config(ConfigError),

  /// Metadata extraction and rewrite errors
  Extraction(ExtractionError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl StampError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    StampError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    StampError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      StampError::Message { message, context, help } => StampError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      StampError::Io(err) => StampError::Message {
        message: format!("I/O error: {}", err),
        context: Some(ctx_str),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      StampError::Config(_) => ExitCode::User,
      StampError::Extraction(_) => ExitCode::Validation,
      StampError::Io(_) => ExitCode::System,
      StampError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      StampError::Config(e) => e.help_message(),
      StampError::Extraction(e) => e.help_message(),
      StampError::Message { help, .. } => help.clone(),
      StampError::Io(_) => None,
    }
  }
}

impl fmt::Display for StampError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StampError::Config(e) => write!(f, "{}", e),
      StampError::Extraction(e) => write!(f, "{}", e),
      StampError::Io(e) => write!(f, "I/O error: {}", e),
      StampError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for StampError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      StampError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for StampError {
  fn from(err: io::Error) -> Self {
    StampError::Io(err)
  }
}

impl From<ConfigError> for StampError {
  fn from(err: ConfigError) -> Self {
    StampError::Config(err)
  }
}

impl From<ExtractionError> for StampError {
  fn from(err: ExtractionError) -> Self {
    StampError::Extraction(err)
  }
}

impl From<String> for StampError {
  fn from(msg: String) -> Self {
    StampError::message(msg)
  }
}

impl From<&str> for StampError {
  fn from(msg: &str) -> Self {
    StampError::message(msg)
  }
}

impl From<toml_edit::de::Error> for StampError {
  fn from(err: toml_edit::de::Error) -> Self {
    StampError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for StampError {
  fn from(err: serde_json::Error) -> Self {
    StampError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Config file given with --config does not exist
  NotFound { path: PathBuf },

  /// Missing required input (flag or stamp.toml value)
  MissingField { field: String },

  /// Language identifier not in the dispatch table
  UnknownLanguage { name: String },

  /// Version template has a placeholder but no version part was supplied
  MissingVersionPart { path: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Create a stamp.toml in the current directory or pass the path with --config.".to_string())
      }
      ConfigError::MissingField { field } => Some(format!(
        "Pass --{} on the command line or set it in stamp.toml.",
        field.replace('_', "-")
      )),
      ConfigError::UnknownLanguage { .. } => {
        let ids: Vec<&str> = Language::ALL.iter().map(|lang| lang.id()).collect();
        Some(format!("Supported languages: {}", ids.join(", ")))
      }
      ConfigError::MissingVersionPart { .. } => {
        Some("Pass --version-part (e.g. the build number) to fill the '*' placeholder.".to_string())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => {
        write!(f, "Configuration file not found: {}", path.display())
      }
      ConfigError::MissingField { field } => {
        write!(f, "Missing required input: {}", field)
      }
      ConfigError::UnknownLanguage { name } => {
        write!(f, "Unknown language '{}'", name)
      }
      ConfigError::MissingVersionPart { path } => {
        write!(
          f,
          "Version template in {} contains a '*' placeholder but no version part was given",
          path.display()
        )
      }
    }
  }
}

/// Metadata extraction and version rewrite errors
#[derive(Debug)]
pub enum ExtractionError {
  /// Info or version file does not exist or cannot be opened
  FileNotFound { path: PathBuf },

  /// File was read but one or more of the four fields stayed blank
  Incomplete { path: PathBuf, missing: Vec<&'static str> },

  /// Version file has no version-bearing line
  NoVersion { path: PathBuf },

  /// A required compiled-artifact attribute is absent
  RequiredAttribute { attribute: String, path: PathBuf },
}

impl ExtractionError {
  fn help_message(&self) -> Option<String> {
    match self {
      ExtractionError::FileNotFound { .. } => {
        Some("Check --project-dir and --language, or point at the file with --info-path.".to_string())
      }
      ExtractionError::Incomplete { missing, .. } => Some(format!(
        "Add the {} attribute(s) to the info file.",
        missing.join(", ")
      )),
      ExtractionError::NoVersion { .. } => {
        Some("The file must declare a version or informational version attribute.".to_string())
      }
      ExtractionError::RequiredAttribute { attribute, .. } => Some(format!(
        "Declare the {} attribute in the project and rebuild the artifact.",
        attribute
      )),
    }
  }
}

impl fmt::Display for ExtractionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ExtractionError::FileNotFound { path } => {
        write!(f, "Unable to locate info file: {}", path.display())
      }
      ExtractionError::Incomplete { path, missing } => {
        write!(
          f,
          "Incomplete project information in {} (missing: {})",
          path.display(),
          missing.join(", ")
        )
      }
      ExtractionError::NoVersion { path } => {
        write!(f, "No version attribute found in {}", path.display())
      }
      ExtractionError::RequiredAttribute { attribute, path } => {
        write!(f, "The {} assembly attribute is required ({})", attribute, path.display())
      }
    }
  }
}

/// Result type alias for infostamp
pub type StampResult<T> = Result<T, StampError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> StampResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<StampError>,
{
  fn with_context<F>(self, f: F) -> StampResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &StampError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
