//! In-memory collaborators for unit tests.

use std::{collections::HashSet, sync::Mutex};

use super::*;

/// Serves canned pages and remembers which pages were asked for.
#[derive(Default)]
pub struct MockProvider {
  pages:     Vec<Vec<PatentRecord>>,
  fail_on:   Option<u32>,
  requested: Mutex<Vec<u32>>,
}

impl MockProvider {
  pub fn with_pages(pages: Vec<Vec<PatentRecord>>) -> Self { Self { pages, ..Self::default() } }

  pub fn failing_on(mut self, page: u32) -> Self {
    self.fail_on = Some(page);
    self
  }

  pub fn requested_pages(&self) -> Vec<u32> { self.requested.lock().unwrap().clone() }
}

#[async_trait]
impl PatentInfoProvider for MockProvider {
  async fn fetch_page(&self, _keyword: &str, page: u32) -> Result<Vec<PatentRecord>> {
    self.requested.lock().unwrap().push(page);
    if self.fail_on == Some(page) {
      return Err(PatentError::Provider { page, message: "HTTP 503".into() });
    }
    Ok(self.pages.get(page as usize - 1).cloned().unwrap_or_default())
  }
}

/// Writes a placeholder document for every successful fetch.
pub struct MockFetcher {
  archive:      Archive,
  failing:      HashSet<String>,
  unavailable:  HashSet<String>,
  bulk_outcome: DownloadOutcome,
  fetched:      Mutex<Vec<String>>,
  bulk:         Mutex<Vec<String>>,
}

impl MockFetcher {
  pub fn new(archive: Archive) -> Self {
    Self {
      archive,
      failing: HashSet::new(),
      unavailable: HashSet::new(),
      bulk_outcome: DownloadOutcome::default(),
      fetched: Mutex::new(Vec::new()),
      bulk: Mutex::new(Vec::new()),
    }
  }

  pub fn failing<'a>(mut self, numbers: impl IntoIterator<Item = &'a str>) -> Self {
    self.failing.extend(numbers.into_iter().map(String::from));
    self
  }

  pub fn unavailable<'a>(mut self, numbers: impl IntoIterator<Item = &'a str>) -> Self {
    self.unavailable.extend(numbers.into_iter().map(String::from));
    self
  }

  pub fn with_bulk_outcome(mut self, outcome: DownloadOutcome) -> Self {
    self.bulk_outcome = outcome;
    self
  }

  pub fn fetched(&self) -> usize { self.fetched.lock().unwrap().len() }

  pub fn was_fetched(&self, number: &str) -> bool {
    self.fetched.lock().unwrap().iter().any(|n| n == number)
  }

  pub fn bulk_keywords(&self) -> Vec<String> { self.bulk.lock().unwrap().clone() }
}

#[async_trait]
impl PatentDocumentFetcher for MockFetcher {
  async fn fetch_one(&self, number: &str) -> Result<bool> {
    self.fetched.lock().unwrap().push(number.to_string());
    if self.failing.contains(number) {
      return Err(PatentError::Fetch { number: number.into(), message: "connection reset".into() });
    }
    if self.unavailable.contains(number) {
      return Ok(false);
    }
    self.archive.ensure_dir()?;
    std::fs::write(self.archive.path_for(number), b"%PDF-1.5")?;
    Ok(true)
  }

  async fn fetch_all(&self, keyword: &str) -> Result<DownloadOutcome> {
    self.bulk.lock().unwrap().push(keyword.to_string());
    Ok(self.bulk_outcome)
  }
}
