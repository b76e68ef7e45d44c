//! Filter field-name configuration and query-safety validation.
//!
//! Field paths come from trusted configuration, not user input. A rejection
//! here is a configuration bug and must fail before any clause is built;
//! it is never retried at runtime.

use thiserror::Error;

/// Characters that must never appear in a field path embedded into the text
/// query dialect. Consecutive occurrences are reported as one token, so the
/// two-character comparators surface as `<=` / `>=`.
const UNSAFE_CHARS: &[char] = &['*', '<', '>', '=', ':', '(', ')', '"'];

/// Where in the target document schema the rule-type id, consumer id and
/// (optionally) space ids live.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FilterFieldNames {
    pub rule_type_id: String,
    pub consumer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_ids: Option<String>,
}

impl FilterFieldNames {
    /// Validate every configured field path once.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidFieldError`] for the first configured path that is
    /// unsafe to embed in a query.
    pub fn ensure_safe(&self) -> Result<(), InvalidFieldError> {
        ensure_field_is_safe_for_query("rule_type_id", &self.rule_type_id)?;
        ensure_field_is_safe_for_query("consumer", &self.consumer)?;
        if let Some(space_ids) = &self.space_ids {
            ensure_field_is_safe_for_query("space_ids", space_ids)?;
        }
        Ok(())
    }
}

/// A configured field path contains characters that are unsafe to embed in
/// the text query dialect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidFieldError {
    #[error("expected {field} not to include whitespace")]
    Whitespace { field: String },

    #[error(
        "expected {field} not to include invalid character{}: {}",
        plural(.tokens),
        .tokens.join(", ")
    )]
    InvalidCharacters { field: String, tokens: Vec<String> },

    #[error(
        "expected {field} not to include whitespace and invalid character{}: {}",
        plural(.tokens),
        .tokens.join(", ")
    )]
    WhitespaceAndInvalidCharacters { field: String, tokens: Vec<String> },
}

fn plural(tokens: &[String]) -> &'static str {
    if tokens.len() == 1 { "" } else { "s" }
}

/// Reject a field path that could alter the meaning of the query it is
/// embedded into.
///
/// `field` is the logical name reported in the error (e.g. `rule_type_id`),
/// `path` the configured document path. Offending tokens are collected left
/// to right and reported together, never just the first.
///
/// # Errors
///
/// Returns [`InvalidFieldError`] naming `field` and every offending token
/// found in `path`.
pub fn ensure_field_is_safe_for_query(field: &str, path: &str) -> Result<(), InvalidFieldError> {
    let mut tokens: Vec<String> = Vec::new();
    let mut has_whitespace = false;
    let mut run = String::new();

    for ch in path.chars() {
        if UNSAFE_CHARS.contains(&ch) {
            run.push(ch);
            continue;
        }
        if !run.is_empty() {
            tokens.push(std::mem::take(&mut run));
        }
        if ch.is_whitespace() {
            has_whitespace = true;
        }
    }
    if !run.is_empty() {
        tokens.push(run);
    }

    let field = field.to_owned();
    match (has_whitespace, tokens.is_empty()) {
        (false, true) => Ok(()),
        (true, true) => Err(InvalidFieldError::Whitespace { field }),
        (false, false) => Err(InvalidFieldError::InvalidCharacters { field, tokens }),
        (true, false) => Err(InvalidFieldError::WhitespaceAndInvalidCharacters { field, tokens }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_paths() {
        assert!(ensure_field_is_safe_for_query("id", "123-0456-678").is_ok());
        assert!(ensure_field_is_safe_for_query("id", "path.to.rule_type_id").is_ok());
        assert!(ensure_field_is_safe_for_query("id", "consumer-field").is_ok());
    }

    #[test]
    fn rejects_wildcard() {
        let err = ensure_field_is_safe_for_query("id", "alert-*").unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected id not to include invalid character: *"
        );
    }

    #[test]
    fn groups_consecutive_unsafe_characters_into_one_token() {
        let err = ensure_field_is_safe_for_query("id", "a>=b").unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected id not to include invalid character: >="
        );
    }

    #[test]
    fn rejects_whitespace_alone() {
        let err = ensure_field_is_safe_for_query("id", "some space").unwrap_err();
        assert_eq!(err.to_string(), "expected id not to include whitespace");
    }

    #[test]
    fn reports_whitespace_and_single_character_together() {
        let err = ensure_field_is_safe_for_query("id", "1 or alertid:123").unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected id not to include whitespace and invalid character: :"
        );
    }

    #[test]
    fn collects_every_offending_token_in_order() {
        let err = ensure_field_is_safe_for_query("id", ") or alertid:123").unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected id not to include whitespace and invalid characters: ), :"
        );
    }

    #[test]
    fn validates_all_configured_paths() {
        // Arrange
        let names = FilterFieldNames {
            rule_type_id: "path.to.rule_type_id".to_owned(),
            consumer: "consumer-field".to_owned(),
            space_ids: Some("bad field".to_owned()),
        };

        // Act
        let err = names.ensure_safe().unwrap_err();

        // Assert
        assert_eq!(
            err,
            InvalidFieldError::Whitespace {
                field: "space_ids".to_owned()
            }
        );
    }
}
