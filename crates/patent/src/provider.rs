//! Search result pages.

use super::*;

/// Source of paginated keyword search results.
///
/// Pages are numbered from 1. An empty page means there are no (more) results and ends
/// pagination. A failure to fetch or parse a page must be reported as an error and never as an
/// empty page, otherwise a flaky site would silently truncate a search.
///
/// # Examples
///
/// ```
/// use patent::{prelude::*, record::PatentRecord};
///
/// struct Fixed;
///
/// #[async_trait::async_trait]
/// impl PatentInfoProvider for Fixed {
///   async fn fetch_page(&self, _keyword: &str, page: u32) -> Result<Vec<PatentRecord>, PatentError> {
///     Ok(if page == 1 { vec![PatentRecord::new("CN1234567A", "Drone")] } else { vec![] })
///   }
/// }
/// ```
#[async_trait]
pub trait PatentInfoProvider: Send + Sync {
  /// Fetches page `page` of the results for `keyword`.
  async fn fetch_page(&self, keyword: &str, page: u32) -> Result<Vec<PatentRecord>>;
}
