use super::*;

lazy_static! {
  /// `<venue>, <YYYY>` at the start of the venue segment.
  static ref VENUE_YEAR: Regex = Regex::new(r"^(.*?),\s*([0-9]{4})").unwrap();
}

/// Separator between the author list and the venue segment.
const SEPARATOR: &str = " - ";

/// Authors, venue and year read from an alert byline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Byline {
  /// Author names in byline order
  pub authors: Vec<String>,
  /// Venue name, if the venue segment matched `<venue>, <YYYY>`
  pub venue:   Option<String>,
  /// Year from the venue segment, otherwise `default_year`
  pub year:    i32,
}

impl Byline {
  /// A byline carrying nothing but the fallback year.
  pub fn empty(default_year: i32) -> Self {
    Self { authors: Vec::new(), venue: None, year: default_year }
  }

  /// Parses byline text of the form `"A. Smith, B. Lee - Journal of Y, 2023"`.
  ///
  /// Text without the `" - "` separator yields [`Byline::empty`]. A venue segment without a
  /// trailing year keeps the authors but leaves the venue unset.
  pub fn parse(text: &str, default_year: i32) -> Self {
    let Some((authors_part, venue_part)) = text.split_once(SEPARATOR) else {
      trace!(text, "Byline has no author/venue separator");
      return Self::empty(default_year);
    };

    let authors = authors_part
      .split(',')
      .map(str::trim)
      .filter(|author| !author.is_empty())
      .map(ToString::to_string)
      .collect();

    let (venue, year) = match VENUE_YEAR.captures(venue_part) {
      Some(captures) => match captures[2].parse::<i32>() {
        Ok(year) => (Some(captures[1].trim().to_string()), year),
        Err(_) => (None, default_year),
      },
      None => {
        trace!(venue_part, "Venue segment has no trailing year");
        (None, default_year)
      },
    };

    Self { authors, venue: venue.filter(|venue| !venue.is_empty()), year }
  }
}
