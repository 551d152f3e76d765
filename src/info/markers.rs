//! Attribute marker tables, one per language

use serde::Serialize;

/// The five canonical attributes an info file can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Attribute {
  Title,
  Description,
  Company,
  Version,
  SemanticVersion,
}

impl Attribute {
  /// Lookup order used when a line carries more than one marker
  pub const ORDERED: [Attribute; 5] = [
    Attribute::Title,
    Attribute::Description,
    Attribute::Company,
    Attribute::Version,
    Attribute::SemanticVersion,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Attribute::Title => "Title",
      Attribute::Description => "Description",
      Attribute::Company => "Company",
      Attribute::Version => "Version",
      Attribute::SemanticVersion => "SemanticVersion",
    }
  }
}

/// Literal marker text used by one language for each canonical attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeMarkers {
  pub title: &'static str,
  pub description: &'static str,
  pub company: &'static str,
  pub version: &'static str,
  pub semantic_version: &'static str,
  /// Secondary numeric version rewritten alongside the main one but never
  /// reported as the project version
  pub file_version: Option<&'static str>,
}

impl AttributeMarkers {
  pub fn marker(&self, attribute: Attribute) -> &'static str {
    match attribute {
      Attribute::Title => self.title,
      Attribute::Description => self.description,
      Attribute::Company => self.company,
      Attribute::Version => self.version,
      Attribute::SemanticVersion => self.semantic_version,
    }
  }

  /// First attribute (in [`Attribute::ORDERED`] order) whose marker is on the line
  pub fn classify(&self, line: &str) -> Option<Attribute> {
    Attribute::ORDERED
      .into_iter()
      .find(|attr| line.contains(self.marker(*attr)))
  }

  /// The five canonical markers
  pub fn all(&self) -> [&'static str; 5] {
    [
      self.title,
      self.description,
      self.company,
      self.version,
      self.semantic_version,
    ]
  }

  /// Markers of every version-bearing line, file version included
  pub fn version_markers(&self) -> Vec<&'static str> {
    let mut markers = vec![self.version, self.semantic_version];
    markers.extend(self.file_version);
    markers
  }
}

/// C# and VB assembly attributes
pub static ASSEMBLY: AttributeMarkers = AttributeMarkers {
  title: "AssemblyTitle",
  description: "AssemblyDescription",
  company: "AssemblyCompany",
  version: "AssemblyVersion",
  semantic_version: "AssemblyInformationalVersion",
  file_version: Some("AssemblyFileVersion"),
};

/// Database project info file (`Properties/DbInfo.db`)
pub static DATABASE: AttributeMarkers = AttributeMarkers {
  title: "DbTitle",
  description: "DbDescription",
  company: "DbCompany",
  version: "DbVersion",
  semantic_version: "DbInformationalVersion",
  file_version: None,
};

/// ETL descriptor (`EtlInfo.etl`)
pub static ETL: AttributeMarkers = AttributeMarkers {
  title: "EtlTitle",
  description: "EtlDescription",
  company: "EtlCompany",
  version: "EtlVersion",
  semantic_version: "EtlInformationalVersion",
  file_version: None,
};

/// COBOL custom attributes (`Properties/AssemblyInfo.cob`)
pub static COBOL: AttributeMarkers = AttributeMarkers {
  title: "CA-ASSEMBLYTITLE",
  description: "CA-ASSEMBLYDESCRIPTION",
  company: "CA-ASSEMBLYCOMPANY",
  version: "CA-ASSEMBLYVERSION",
  semantic_version: "CA-ASSEMBLYINFORMATIONALVERSION",
  file_version: Some("CA-ASSEMBLYFILEVERSION"),
};
