//! Search results and bulk download tallies.

use super::*;

/// A single entry on a search results page.
///
/// Records are produced fresh for every page and are never modified afterwards; the page that
/// produced them is dropped once a decision has been taken or the next page is fetched.
///
/// # Examples
///
/// ```
/// use patent::record::PatentRecord;
///
/// let record = PatentRecord::new("CN1234567A", "Foldable drone frame");
/// assert_eq!(record.to_string(), "CN1234567A - Foldable drone frame");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatentRecord {
  /// Canonical patent number, also the archive key
  pub number: String,
  /// Title as shown by the search site
  pub title:  String,
}

impl PatentRecord {
  /// Creates a record from a number and title.
  pub fn new(number: impl Into<String>, title: impl Into<String>) -> Self {
    Self { number: number.into(), title: title.into() }
  }
}

impl Display for PatentRecord {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} - {}", self.number, self.title)
  }
}

/// Aggregate result of a bulk download.
///
/// Partial failure is reported through `failed` rather than as an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadOutcome {
  /// Patents that are in the archive after the run, including ones that already were
  pub succeeded: usize,
  /// Patents whose download failed or had no document
  pub failed:    usize,
}

impl DownloadOutcome {
  /// Tallies a single dedup-then-fetch report.
  pub fn record(&mut self, report: &FetchReport) {
    if report.is_success() {
      self.succeeded += 1;
    } else {
      self.failed += 1;
    }
  }

  /// Number of patents attempted.
  pub fn total(&self) -> usize { self.succeeded + self.failed }
}
