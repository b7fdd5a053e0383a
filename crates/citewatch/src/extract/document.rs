use scraper::{ElementRef, Html, Selector};

use super::*;

lazy_static! {
  static ref ANCHOR: Selector = Selector::parse("a").unwrap();
  static ref DIV: Selector = Selector::parse("div").unwrap();
  /// Redirect target carried in a tracking link, up to the next query separator.
  static ref REDIRECT_TARGET: Regex = Regex::new(r"url=([^&]+)").unwrap();
}

/// A parsed alert body.
///
/// Parsing is best effort: malformed markup still produces a tree, it just may not contain
/// the elements a lookup asks for.
pub(crate) struct AlertDocument {
  /// The parsed HTML tree
  html: Html,
}

impl AlertDocument {
  pub(crate) fn parse(source: &str) -> Self {
    let html = Html::parse_document(source);
    if !html.errors.is_empty() {
      trace!(errors = html.errors.len(), "Alert HTML parsed with recoverable errors");
    }
    Self { html }
  }

  /// First `<a>` carrying `class`.
  pub(crate) fn title_anchor(&self, class: &str) -> Option<ElementRef<'_>> {
    self.html.select(&ANCHOR).find(|anchor| anchor.value().classes().any(|c| c == class))
  }

  /// First `<div>` whose `style` attribute contains `marker`.
  pub(crate) fn byline(&self, marker: &str) -> Option<ElementRef<'_>> {
    self
      .html
      .select(&DIV)
      .find(|div| div.value().attr("style").is_some_and(|style| style.contains(marker)))
  }

  /// Percent-decoded `href` of the first `<a>` whose target contains `marker`.
  pub(crate) fn profile_url(&self, marker: &str) -> Option<String> {
    self
      .html
      .select(&ANCHOR)
      .filter_map(|anchor| anchor.value().attr("href"))
      .find(|href| href.contains(marker))
      .map(percent_decode)
  }
}

/// Visible text of an element with every whitespace run collapsed to one space.
///
/// Non-breaking spaces count as whitespace, which keeps `"Lee&nbsp;- Nature"` splittable.
pub(crate) fn visible_text(element: ElementRef<'_>) -> String {
  element.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The decoded `url=` redirect target of a tracking link, if there is one.
pub(crate) fn redirect_target(href: &str) -> Option<String> {
  REDIRECT_TARGET.captures(href).map(|captures| percent_decode(&captures[1]))
}

/// Percent-decodes `value`, replacing invalid UTF-8 rather than failing.
pub(crate) fn percent_decode(value: &str) -> String {
  String::from_utf8_lossy(&urlencoding::decode_binary(value.as_bytes())).into_owned()
}
