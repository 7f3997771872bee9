//! Menu decisions taken on each page of search results.
//!
//! The menu vocabulary is:
//!
//! | Choice | Decision                       |
//! |--------|--------------------------------|
//! | `0`    | [`Decision::DownloadAll`]      |
//! | `1..N` | [`Decision::Pick`]             |
//! | `X`    | [`Decision::NextPage`]         |
//! | `S`    | [`Decision::PrevPage`]         |
//! | `R`    | [`Decision::RestartSearch`]    |
//! | `M`    | [`Decision::ReturnToMainMenu`] |
//! | `Q`    | [`Decision::Quit`]             |
//!
//! Anything else parses to [`Decision::Invalid`]; parsing itself never fails.
//!
//! Decisions are handed to the search loop by a [`DecisionSource`], once per page. The library
//! ships [`ScriptedDecisions`], which plays back a fixed list.

use super::*;

/// A single menu decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
  /// Download every patent matching the keyword
  DownloadAll,
  /// Download the patent at this 1-based position on the current page
  Pick(usize),
  /// Go to the next page
  NextPage,
  /// Go to the previous page, if there is one
  PrevPage,
  /// Abandon this keyword so the caller can start over with another one
  RestartSearch,
  /// Leave the search and return to the caller
  ReturnToMainMenu,
  /// Stop the whole program
  Quit,
  /// Unrecognized input, kept verbatim for logging
  Invalid(String),
}

impl Decision {
  /// Parses a menu choice.
  ///
  /// Matching is exact: letters must be upper case and surrounding whitespace is not stripped,
  /// so `"x"` or `" 2"` are [`Decision::Invalid`].
  ///
  /// # Examples
  ///
  /// ```
  /// use patent::decision::Decision;
  ///
  /// assert_eq!(Decision::parse("0"), Decision::DownloadAll);
  /// assert_eq!(Decision::parse("2"), Decision::Pick(2));
  /// assert_eq!(Decision::parse("X"), Decision::NextPage);
  /// assert_eq!(Decision::parse("x"), Decision::Invalid("x".into()));
  /// ```
  pub fn parse(choice: &str) -> Self {
    match choice {
      "0" => Decision::DownloadAll,
      "X" => Decision::NextPage,
      "S" => Decision::PrevPage,
      "R" => Decision::RestartSearch,
      "M" => Decision::ReturnToMainMenu,
      "Q" => Decision::Quit,
      digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) =>
        match digits.parse::<usize>() {
          Ok(index) if index > 0 => Decision::Pick(index),
          _ => Decision::Invalid(choice.to_string()),
        },
      _ => Decision::Invalid(choice.to_string()),
    }
  }
}

impl FromStr for Decision {
  type Err = std::convert::Infallible;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> { Ok(Decision::parse(s)) }
}

impl Display for Decision {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Decision::DownloadAll => write!(f, "download all"),
      Decision::Pick(index) => write!(f, "download #{index}"),
      Decision::NextPage => write!(f, "next page"),
      Decision::PrevPage => write!(f, "previous page"),
      Decision::RestartSearch => write!(f, "restart search"),
      Decision::ReturnToMainMenu => write!(f, "return to main menu"),
      Decision::Quit => write!(f, "quit"),
      Decision::Invalid(raw) => write!(f, "invalid choice \"{raw}\""),
    }
  }
}

/// Where the search loop gets its next decision from.
///
/// Called once per non-empty page, after the page has been logged.
pub trait DecisionSource {
  /// Returns the decision for the page currently shown.
  fn next_decision(&mut self, session: &SearchSession, records: &[PatentRecord])
    -> Result<Decision>;
}

/// Plays back a fixed list of decisions.
///
/// Once the list is exhausted the last decision is repeated, so a single choice applies to
/// every page. An empty script answers [`Decision::ReturnToMainMenu`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
  /// Remaining decisions, in order
  script: Vec<Decision>,
  /// Position of the next decision
  cursor: usize,
}

impl ScriptedDecisions {
  /// Creates a script from decisions.
  pub fn new(script: impl IntoIterator<Item = Decision>) -> Self {
    Self { script: script.into_iter().collect(), cursor: 0 }
  }

  /// Parses a comma separated list of menu choices, e.g. `"X,X,2"`.
  pub fn parse(choices: &str) -> Self {
    Self::new(choices.split(',').filter(|c| !c.is_empty()).map(Decision::parse))
  }
}

impl DecisionSource for ScriptedDecisions {
  fn next_decision(&mut self, _: &SearchSession, _: &[PatentRecord]) -> Result<Decision> {
    let decision = match self.script.get(self.cursor).or_else(|| self.script.last()) {
      Some(decision) => decision.clone(),
      None => Decision::ReturnToMainMenu,
    };
    self.cursor += 1;
    Ok(decision)
  }
}
