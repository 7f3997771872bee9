//! Document retrieval, single and bulk.

use super::*;

/// Retrieves patent documents into the archive.
#[async_trait]
pub trait PatentDocumentFetcher: Send + Sync {
  /// Downloads the document for `number`.
  ///
  /// Returns `Ok(true)` once the document is in the archive and `Ok(false)` when the site has
  /// no document for that number. Transport and parse failures are errors.
  async fn fetch_one(&self, number: &str) -> Result<bool>;

  /// Downloads every document matching `keyword`.
  ///
  /// Per-patent failures are counted in the returned [`DownloadOutcome`], not raised.
  /// Implementations normally delegate to [`download_all`].
  async fn fetch_all(&self, keyword: &str) -> Result<DownloadOutcome>;
}

/// Walks every result page for `keyword` and runs the dedup-then-fetch sequence for each
/// record.
///
/// Pagination stops at the first empty page or after `max_pages` pages. Documents already in
/// `archive` are counted as successes without a download.
///
/// # Errors
///
/// A failure to fetch a result page ends the walk and is returned, since the remaining
/// results can't be enumerated. Failures of individual downloads never are.
pub async fn download_all<P, F>(
  provider: &P,
  fetcher: &F,
  archive: &Archive,
  keyword: &str,
  max_pages: u32,
) -> Result<DownloadOutcome>
where
  P: PatentInfoProvider + ?Sized,
  F: PatentDocumentFetcher + ?Sized,
{
  let mut outcome = DownloadOutcome::default();

  for page in 1..=max_pages {
    let records = provider.fetch_page(keyword, page).await?;
    if records.is_empty() {
      debug!("No results on page {page} for \"{keyword}\", bulk download finished");
      return Ok(outcome);
    }
    info!("Bulk download of page {page}: {} patents", records.len());

    for record in &records {
      let report = download::fetch_if_absent(archive, fetcher, &record.number).await;
      outcome.record(&report);
    }
  }

  warn!("Stopped bulk download for \"{keyword}\" after {max_pages} pages");
  Ok(outcome)
}
