//! Keyword search sessions and the page-by-page decision loop.
//!
//! A session starts on page 1 and moves through the results according to one [`Decision`] per
//! page until it reaches [`SearchState::Done`]:
//!
//! ```text
//!                  NextPage / PrevPage
//!                 ┌──────────────────┐
//!                 ▼                  │
//!   start ──► AwaitingPage(p) ───────┘
//!                 │
//!                 │ empty page, DownloadAll, Pick, RestartSearch,
//!                 │ ReturnToMainMenu, Quit, invalid choice
//!                 ▼
//!            Done(outcome)
//! ```
//!
//! # Examples
//!
//! ```no_run
//! # use patent::{archive::Archive, decision::ScriptedDecisions, prelude::*, search::*};
//! # async fn example(provider: &impl PatentInfoProvider, fetcher: &impl PatentDocumentFetcher)
//! # -> Result<(), PatentError> {
//! let archive = Archive::new("pdfs");
//! // Skip to the second page, then download its third result
//! let mut decisions = ScriptedDecisions::parse("X,3");
//! let mut controller =
//!   SearchController::new(SearchSession::new("drone"), provider, fetcher, &archive);
//! match controller.run(&mut decisions).await? {
//!   SearchOutcome::Picked(report) => println!("{report:?}"),
//!   other => println!("search ended: {other:?}"),
//! }
//! # Ok(())
//! # }
//! ```

use crate::decision::{Decision, DecisionSource};

use super::*;

/// Default bound on the number of pages a single search loop will fetch.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// A keyword and the page currently being looked at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
  /// Query for the whole session
  keyword:      String,
  /// Current page, never below 1
  current_page: u32,
}

impl SearchSession {
  /// Starts a session for `keyword` on the first page.
  pub fn new(keyword: impl Into<String>) -> Self {
    Self { keyword: keyword.into(), current_page: 1 }
  }

  /// The session's keyword.
  pub fn keyword(&self) -> &str { &self.keyword }

  /// The page being looked at.
  pub fn current_page(&self) -> u32 { self.current_page }

  fn next_page(&mut self) { self.current_page = self.current_page.saturating_add(1); }

  /// Returns `false` when already on the first page.
  fn prev_page(&mut self) -> bool {
    if self.current_page > 1 {
      self.current_page -= 1;
      true
    } else {
      false
    }
  }
}

/// Where the search loop is.
#[derive(Debug)]
pub enum SearchState {
  /// The given page has to be fetched and decided on
  AwaitingPage(u32),
  /// The search is over
  Done(SearchOutcome),
}

/// How a search ended.
#[derive(Debug)]
pub enum SearchOutcome {
  /// The page came back empty: no results at all, or past the last page
  NoResults {
    /// The empty page
    page: u32,
  },
  /// Every matching patent was processed
  BatchDownloaded(DownloadOutcome),
  /// A single patent was picked from the page
  Picked(FetchReport),
  /// The picked position doesn't exist on the page; nothing was downloaded
  OutOfRange {
    /// Requested 1-based position
    index:     usize,
    /// Results on the page
    available: usize,
  },
  /// The caller should start over with a different keyword
  RestartSearch,
  /// The caller should return to its main menu
  ReturnToMainMenu,
  /// The whole program should stop
  Quit,
  /// The choice wasn't understood; nothing was done
  InvalidChoice(String),
  /// The loop fetched its maximum number of pages without finishing
  IterationLimit,
}

/// Drives a [`SearchSession`] through pages of results.
pub struct SearchController<'a, P: ?Sized, F: ?Sized> {
  /// Keyword and page
  session:        SearchSession,
  /// Search result pages
  provider:       &'a P,
  /// Document downloads
  fetcher:        &'a F,
  /// Dedup lookups
  archive:        &'a Archive,
  /// Page fetches allowed in [`SearchController::run`]
  max_iterations: u32,
}

impl<'a, P, F> SearchController<'a, P, F>
where
  P: PatentInfoProvider + ?Sized,
  F: PatentDocumentFetcher + ?Sized,
{
  /// Creates a controller for `session`.
  pub fn new(
    session: SearchSession,
    provider: &'a P,
    fetcher: &'a F,
    archive: &'a Archive,
  ) -> Self {
    Self { session, provider, fetcher, archive, max_iterations: DEFAULT_MAX_ITERATIONS }
  }

  /// Bounds the number of pages [`SearchController::run`] will fetch.
  pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
    self.max_iterations = max_iterations.max(1);
    self
  }

  /// The session being driven.
  pub fn session(&self) -> &SearchSession { &self.session }

  /// The state before any page has been fetched.
  pub fn state(&self) -> SearchState { SearchState::AwaitingPage(self.session.current_page) }

  /// Runs the search loop until it is done.
  ///
  /// Each iteration fetches the current page, logs its records, and asks `decisions` what to
  /// do. An empty page ends the search without consulting `decisions`.
  ///
  /// # Errors
  ///
  /// Failures to fetch a page (here or during a bulk download) and failures of the decision
  /// source are returned. Failed downloads of single patents are not errors, see
  /// [`FetchReport::Failed`].
  pub async fn run<D>(&mut self, decisions: &mut D) -> Result<SearchOutcome>
  where D: DecisionSource + ?Sized {
    info!("Starting keyword search for \"{}\"", self.session.keyword);

    for _ in 0..self.max_iterations {
      let page = self.session.current_page;
      let records = self.provider.fetch_page(&self.session.keyword, page).await?;

      info!("Keyword: \"{}\", page: {page}, results: {}", self.session.keyword, records.len());
      for (index, record) in records.iter().enumerate() {
        info!("  {}. {} - {}", index + 1, record.number, record.title);
      }

      let decision = if records.is_empty() {
        None
      } else {
        let decision = decisions.next_decision(&self.session, &records)?;
        info!("Menu choice on page {page}: {decision}");
        Some(decision)
      };

      if let SearchState::Done(outcome) = self.advance(&records, decision).await? {
        return Ok(outcome);
      }
    }

    warn!(
      "Search for \"{}\" stopped after fetching {} pages",
      self.session.keyword, self.max_iterations
    );
    Ok(SearchOutcome::IterationLimit)
  }

  /// Applies one decision to a page of records and returns the resulting state.
  ///
  /// An empty page always ends the search, whatever the decision.
  pub async fn apply(
    &mut self,
    records: &[PatentRecord],
    decision: Decision,
  ) -> Result<SearchState> {
    self.advance(records, Some(decision)).await
  }

  async fn advance(
    &mut self,
    records: &[PatentRecord],
    decision: Option<Decision>,
  ) -> Result<SearchState> {
    let page = self.session.current_page;
    let decision = match decision {
      Some(decision) if !records.is_empty() => decision,
      _ => {
        info!("No patents found on page {page}");
        return Ok(SearchState::Done(SearchOutcome::NoResults { page }));
      },
    };

    let outcome = match decision {
      Decision::DownloadAll => {
        let outcome = self.fetcher.fetch_all(&self.session.keyword).await?;
        info!(
          "Batch download complete, succeeded: {}, failed: {}",
          outcome.succeeded, outcome.failed
        );
        SearchOutcome::BatchDownloaded(outcome)
      },
      Decision::Pick(index) => match index.checked_sub(1).and_then(|i| records.get(i)) {
        Some(record) => {
          info!("Picked {index}: {record}");
          let report = download::fetch_if_absent(self.archive, self.fetcher, &record.number).await;
          SearchOutcome::Picked(report)
        },
        None => {
          warn!("Choice {index} is not on page {page}, which has {} results", records.len());
          SearchOutcome::OutOfRange { index, available: records.len() }
        },
      },
      Decision::NextPage => {
        self.session.next_page();
        return Ok(SearchState::AwaitingPage(self.session.current_page));
      },
      Decision::PrevPage => {
        if !self.session.prev_page() {
          info!("Already on the first page");
        }
        return Ok(SearchState::AwaitingPage(self.session.current_page));
      },
      Decision::RestartSearch => SearchOutcome::RestartSearch,
      Decision::ReturnToMainMenu => SearchOutcome::ReturnToMainMenu,
      Decision::Quit => {
        info!("Quit requested");
        SearchOutcome::Quit
      },
      Decision::Invalid(raw) => {
        warn!("Invalid menu choice \"{raw}\"");
        SearchOutcome::InvalidChoice(raw)
      },
    };
    Ok(SearchState::Done(outcome))
  }
}
