use super::*;

/// Markers that identify the interesting parts of an alert's HTML template.
///
/// The defaults match Google Scholar alert emails. They live in configuration so a template
/// change upstream can be followed without a rebuild.
///
/// ```toml
/// [template]
/// title_class    = "gse_alrt_title"
/// byline_marker  = "#006621"
/// profile_marker = "scholar.google.com/citations"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertTemplate {
  /// CSS class carried by the `<a>` holding the publication title
  pub title_class:    String,
  /// Substring of the `style` attribute of the `<div>` holding authors, venue and year
  pub byline_marker:  String,
  /// Substring of an `href` pointing at the alerting scholar profile
  pub profile_marker: String,
}

impl Default for AlertTemplate {
  fn default() -> Self {
    Self {
      title_class:    "gse_alrt_title".to_string(),
      byline_marker:  "#006621".to_string(),
      profile_marker: "scholar.google.com/citations".to_string(),
    }
  }
}
