//! Terminal output and prompts.

use console::style;
use dialoguer::Input;
use patent::{
  decision::{Decision, DecisionSource},
  error::PatentError,
  record::PatentRecord,
  search::SearchSession,
};

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for warning messages
pub static WARNING_PREFIX: &str = "! ";
/// Prefix for user prompts
pub static PROMPT_PREFIX: &str = "❯ ";
/// Prefix for a result line
pub static ITEM_PREFIX: &str = "├─";
/// Prefix for the last result line
pub static LAST_ITEM_PREFIX: &str = "└─";

/// Menu legend shown before each interactive choice.
static MENU: &str =
  "0: download all · 1-N: download one · X: next page · S: previous page · R: new keyword · M: \
   main menu · Q: quit";

/// Prints an information line.
pub fn info(message: &str) {
  println!("{} {}", style(INFO_PREFIX).cyan(), message);
}

/// Prints a success line.
pub fn success(message: &str) {
  println!("{} {}", style(SUCCESS_PREFIX).green(), message);
}

/// Prints a warning line.
pub fn warning(message: &str) {
  println!("{} {}", style(WARNING_PREFIX).yellow(), style(message).yellow());
}

/// Prints an error line to stderr.
pub fn failure(message: &str) {
  eprintln!("{} {}", style(ERROR_PREFIX).red(), style(message).red());
}

/// Asks for a line of text, falling back to `default` on an empty answer.
pub fn ask(message: &str, default: &str) -> Result<String> {
  let answer: String = Input::new()
    .with_prompt(format!("{}{message}", style(PROMPT_PREFIX).cyan()))
    .default(default.to_string())
    .interact_text()?;
  Ok(answer.trim().to_string())
}

/// Takes menu decisions from the terminal.
#[derive(Debug, Default)]
pub struct Prompt;

impl DecisionSource for Prompt {
  fn next_decision(
    &mut self,
    session: &SearchSession,
    records: &[PatentRecord],
  ) -> patent::error::Result<Decision> {
    println!(
      "\n{} \"{}\", page {}",
      style(INFO_PREFIX).cyan(),
      style(session.keyword()).bold(),
      style(session.current_page()).yellow()
    );
    for (index, record) in records.iter().enumerate() {
      let prefix = if index + 1 == records.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
      println!(
        "   {} {:>2}. {} {}",
        style(prefix).dim(),
        index + 1,
        style(&record.number).yellow(),
        style(&record.title).white()
      );
    }
    println!("   {}", style(MENU).dim());

    let choice: String = Input::new()
      .with_prompt(format!("{}Choice", style(PROMPT_PREFIX).cyan()))
      .interact_text()
      .map_err(|e| PatentError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    Ok(typed_decision(&choice))
  }
}

/// Reads a typed menu choice, forgiving case and stray whitespace.
fn typed_decision(choice: &str) -> Decision { Decision::parse(&choice.trim().to_ascii_uppercase()) }
