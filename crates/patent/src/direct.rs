//! Downloading a single patent by number.

use crate::validate::{Validation, Validator};

use super::*;

/// How a direct download ended.
#[derive(Debug)]
pub enum DirectOutcome {
  /// The number was rejected and nothing was fetched
  Rejected(String),
  /// The number was valid; this is what happened to the document
  Completed(FetchReport),
}

/// Validate, check the archive, then fetch.
pub struct DirectDownload<'a, F: ?Sized> {
  /// Format check run before anything else
  validator: &'a Validator,
  /// Dedup lookups
  archive:   &'a Archive,
  /// Document downloads
  fetcher:   &'a F,
}

impl<'a, F> DirectDownload<'a, F>
where F: PatentDocumentFetcher + ?Sized
{
  /// Creates a direct download path over the given components.
  pub fn new(validator: &'a Validator, archive: &'a Archive, fetcher: &'a F) -> Self {
    Self { validator, archive, fetcher }
  }

  /// Downloads the document for `number` unless it is malformed or already archived.
  ///
  /// This never fails: rejections and download failures are logged and reported in the
  /// returned [`DirectOutcome`].
  pub async fn run(&self, number: &str) -> DirectOutcome {
    info!("Starting direct download for patent number {number}");
    let number = number.trim();

    if let Validation::Invalid(reason) = self.validator.validate(number) {
      error!("Patent number format is incorrect: {reason}");
      return DirectOutcome::Rejected(reason);
    }

    DirectOutcome::Completed(download::fetch_if_absent(self.archive, self.fetcher, number).await)
  }
}
