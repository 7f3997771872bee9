//! The two ways of running the program, selected with `--mode`.

use patent::{download::FetchReport, search::SearchOutcome};

use super::*;

pub mod direct;
pub mod keyword;

pub use direct::direct;
pub use keyword::keyword;

/// Prints what happened to a single patent.
pub fn report_fetch(number: &str, report: &FetchReport) {
  match report {
    FetchReport::AlreadyArchived(path) =>
      info(&format!("{number} is already archived at {}", path.display())),
    FetchReport::Downloaded(path) => success(&format!("Saved {number} to {}", path.display())),
    FetchReport::Unavailable => warning(&format!("The site has no document for {number}")),
    FetchReport::Failed(e) => failure(&format!("Download of {number} failed: {e}")),
  }
}

/// Prints how a keyword search ended.
pub fn report_search(outcome: &SearchOutcome) {
  match outcome {
    SearchOutcome::NoResults { page } => info(&format!("No patents found on page {page}")),
    SearchOutcome::BatchDownloaded(outcome) => success(&format!(
      "Batch download complete: {} succeeded, {} failed",
      outcome.succeeded, outcome.failed
    )),
    SearchOutcome::Picked(report) => match report {
      FetchReport::AlreadyArchived(path) | FetchReport::Downloaded(path) =>
        success(&format!("Patent saved at {}", path.display())),
      FetchReport::Unavailable => warning("The site has no document for that patent"),
      FetchReport::Failed(e) => failure(&e.to_string()),
    },
    SearchOutcome::OutOfRange { index, available } =>
      warning(&format!("Choice {index} is not on this page, which has {available} results")),
    SearchOutcome::InvalidChoice(raw) => warning(&format!(
      "Invalid menu choice \"{raw}\", check --choice or PATENT_KEYWORD_MENU_CHOICE"
    )),
    SearchOutcome::IterationLimit => warning("Stopped after reaching the page limit"),
    SearchOutcome::RestartSearch | SearchOutcome::ReturnToMainMenu | SearchOutcome::Quit => {},
  }
}
