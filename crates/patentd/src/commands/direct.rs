//! Direct download mode.

use patent::{
  direct::{DirectDownload, DirectOutcome},
  download::FetchReport,
  error::PatentError,
};

use super::*;

/// Downloads `number` unless it is malformed or already archived.
///
/// The site description is only loaded once a download is actually needed. A missing or broken
/// one then ends the run with an error.
pub async fn direct(config: &Config, number: &str) -> Result<DirectOutcome> {
  let validator = config.validator()?;
  let archive = config.archive();
  let client = config.lazy_site_client();

  let outcome = DirectDownload::new(&validator, &archive, &client).run(number).await;
  match outcome {
    DirectOutcome::Completed(FetchReport::Failed(e @ PatentError::Config(_))) => Err(e.into()),
    outcome => {
      match &outcome {
        DirectOutcome::Rejected(reason) =>
          failure(&format!("Patent number format is incorrect: {reason}")),
        DirectOutcome::Completed(report) => report_fetch(number.trim(), report),
      }
      Ok(outcome)
    },
  }
}
