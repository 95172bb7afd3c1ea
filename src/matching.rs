//! Detection of failed-login records
//!
//! A record is suspicious when its message contains a fixed phrase. Matching
//! is a plain, case-sensitive substring test; no regex, no tokenisation.

use crate::error::DispatchError;

/// The phrase that marks a failed login in the incoming log stream.
pub const DEFAULT_MATCH_PATTERN: &str = "Failed login attempt";

/// Case-sensitive substring matcher for failed-login messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFailureMatcher {
    pattern: String,
}

impl LoginFailureMatcher {
    /// Creates a matcher for the given phrase.
    ///
    /// # Returns
    /// * `Err(DispatchError::Config)` if `pattern` is empty, since it would
    ///   match every record
    pub fn new(pattern: impl Into<String>) -> Result<Self, DispatchError> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(DispatchError::Config(
                "alert.match_pattern must not be empty".to_string(),
            ));
        }
        Ok(Self { pattern })
    }

    /// The phrase this matcher looks for.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns `true` if `message` contains the phrase verbatim.
    pub fn is_match(&self, message: &str) -> bool {
        message.contains(self.pattern.as_str())
    }
}

impl Default for LoginFailureMatcher {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_MATCH_PATTERN.to_string(),
        }
    }
}
