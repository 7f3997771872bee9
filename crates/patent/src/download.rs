//! The dedup-then-fetch sequence shared by picked search results, direct downloads and bulk
//! downloads.

use super::*;

/// What happened to a single patent.
///
/// A failed download is a value, not an error, so that one bad patent never ends a search
/// session or a bulk download.
#[derive(Debug)]
pub enum FetchReport {
  /// The document was already archived and nothing was downloaded
  AlreadyArchived(PathBuf),
  /// The document was downloaded to this path
  Downloaded(PathBuf),
  /// The site has no document for this patent
  Unavailable,
  /// The download failed
  Failed(PatentError),
}

impl FetchReport {
  /// Whether the document is in the archive after this attempt.
  pub fn is_success(&self) -> bool {
    matches!(self, FetchReport::AlreadyArchived(_) | FetchReport::Downloaded(_))
  }
}

/// Downloads `number` unless the archive already holds it.
///
/// The archive is always consulted first; a hit means `fetcher` is never called. Every branch
/// is logged with the patent number.
pub async fn fetch_if_absent<F>(archive: &Archive, fetcher: &F, number: &str) -> FetchReport
where F: PatentDocumentFetcher + ?Sized {
  if let Some(path) = archive.find_local_file(number) {
    info!("{number} already archived at {}", path.display());
    return FetchReport::AlreadyArchived(path);
  }

  match fetcher.fetch_one(number).await {
    Ok(true) => {
      let path = archive.path_for(number);
      info!("Finished download of {number} to {}", path.display());
      FetchReport::Downloaded(path)
    },
    Ok(false) => {
      warn!("No document available for {number}");
      FetchReport::Unavailable
    },
    Err(e) => {
      error!("Download of {number} failed: {e}");
      FetchReport::Failed(e)
    },
  }
}
