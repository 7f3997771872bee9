//! Keyword search mode.

use patent::{
  decision::{DecisionSource, ScriptedDecisions},
  search::{SearchController, SearchOutcome, SearchSession},
};

use super::*;

/// Runs keyword searches until one ends in something other than a restart.
///
/// Scripted runs treat a restart as the end of the session. Interactive runs ask for a new
/// keyword and search again.
pub async fn keyword(cli: &Cli, config: &Config, keywords: &str) -> Result<SearchOutcome> {
  let archive = config.archive();
  let client = config.site_client()?;
  let mut decisions: Box<dyn DecisionSource> = if cli.interactive {
    Box::new(Prompt)
  } else {
    Box::new(ScriptedDecisions::parse(&cli.choice))
  };

  let mut keywords = keywords.to_string();
  loop {
    info(&format!("Searching {} for \"{keywords}\"", client.config().name));
    let mut controller =
      SearchController::new(SearchSession::new(keywords.as_str()), &client, &client, &archive)
        .with_max_iterations(config.max_iterations);
    let outcome = controller.run(decisions.as_mut()).await?;
    report_search(&outcome);

    match outcome {
      SearchOutcome::RestartSearch if cli.interactive => {
        keywords = ask("Keywords", &keywords)?;
        if keywords.is_empty() {
          return Ok(SearchOutcome::ReturnToMainMenu);
        }
        tracing::info!("Restarting keyword search for: {keywords}");
      },
      outcome => return Ok(outcome),
    }
  }
}
