//! Patent number format validation.
//!
//! The accepted shape is whatever the downstream site understands, so it is configured as a
//! regular expression. The default accepts the common publication number layout: a two-letter
//! office code, a run of digits, an optional check digit and an optional kind code
//! (`CN1234567A`, `US20240012345A1`, `EP3456789B1`, `CN202310123456.7`).
//!
//! # Examples
//!
//! ```
//! use patent::validate::{Validation, Validator};
//!
//! let validator = Validator::default();
//! assert!(validator.validate("CN1234567A").is_valid());
//! assert!(matches!(validator.validate(""), Validation::Invalid(_)));
//! ```

use super::*;

/// Default pattern for patent publication numbers.
pub const DEFAULT_NUMBER_PATTERN: &str = r"^[A-Z]{2}\d{5,13}(\.\d)?([A-Z]\d?)?$";

lazy_static! {
  static ref DEFAULT_PATTERN: Regex =
    Regex::new(DEFAULT_NUMBER_PATTERN).expect("default patent number pattern is valid");
}

/// Result of checking a candidate patent number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
  /// The candidate has an accepted shape
  Valid,
  /// The candidate was rejected, with a human readable reason
  Invalid(String),
}

impl Validation {
  /// Whether the candidate was accepted.
  pub fn is_valid(&self) -> bool { matches!(self, Validation::Valid) }
}

/// Checks candidate identifiers against a configured pattern.
#[derive(Debug, Clone)]
pub struct Validator {
  /// Pattern a number must match in full
  pattern: Regex,
}

impl Default for Validator {
  fn default() -> Self { Self { pattern: DEFAULT_PATTERN.clone() } }
}

impl Validator {
  /// Builds a validator from a regular expression.
  ///
  /// # Errors
  ///
  /// Returns [`PatentError::Regex`] if `pattern` does not compile.
  pub fn new(pattern: &str) -> Result<Self> { Ok(Self { pattern: Regex::new(pattern)? }) }

  /// The pattern numbers are checked against.
  pub fn pattern(&self) -> &str { self.pattern.as_str() }

  /// Validates `candidate`. Leading and trailing whitespace is ignored.
  ///
  /// This never fails; rejections are reported as [`Validation::Invalid`].
  pub fn validate(&self, candidate: &str) -> Validation {
    let candidate = candidate.trim();
    if candidate.is_empty() {
      return Validation::Invalid("patent number is empty".into());
    }
    if self.pattern.is_match(candidate) {
      Validation::Valid
    } else {
      Validation::Invalid(format!(
        "\"{candidate}\" does not match the expected format {}",
        self.pattern.as_str()
      ))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_is_invalid() {
    let validator = Validator::default();
    assert_eq!(validator.validate(""), Validation::Invalid("patent number is empty".into()));
    assert!(!validator.validate("   ").is_valid());
  }

  #[test]
  fn test_default_pattern_accepts_common_numbers() {
    let validator = Validator::default();
    for number in ["CN1234567A", "US20240012345A1", "EP3456789B1", "CN202310123456.7", "JP12345"] {
      assert!(validator.validate(number).is_valid(), "{number} should be valid");
    }
    assert!(validator.validate(" CN1234567A ").is_valid());
  }

  #[test]
  fn test_default_pattern_rejects_malformed_numbers() {
    let validator = Validator::default();
    for number in ["1234567", "CN12A", "cn1234567a", "CN-1234567-A", "drone"] {
      match validator.validate(number) {
        Validation::Invalid(reason) => assert!(reason.contains(number)),
        Validation::Valid => panic!("{number} should be rejected"),
      }
    }
  }

  #[test]
  fn test_custom_pattern() {
    let validator = Validator::new(r"^\d{4}/\d+$").unwrap();
    assert!(validator.validate("2023/123").is_valid());
    assert!(!validator.validate("CN1234567A").is_valid());
  }

  #[test]
  fn test_bad_pattern_is_config_error() {
    assert!(matches!(Validator::new("(unclosed"), Err(PatentError::Regex(_))));
  }
}
