//! The rule-token mini-language.
//!
//! A token is `ruleName[:argument][|modifier...]`:
//!
//! - `required` (bare rule)
//! - `minLength:3` (one argument)
//! - `array:int` (element-type argument)
//! - `string|no-sanitize` (modifier suppressing the sanitize step)
//!
//! Splitting happens on `|` first (primary part plus modifiers), then
//! the primary part splits on `:` into the rule name and at most one
//! argument. Only the `no-sanitize` modifier carries meaning; unknown
//! modifiers are accepted and ignored (see README).

use crate::error::SchemaError;

/// Modifier that suppresses the sanitize step of a rule.
pub const NO_SANITIZE: &str = "no-sanitize";

/// A parsed rule token.
///
/// Tokens are ephemeral: the pipeline parses each one on the fly while
/// walking a field's rule list and discards it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleToken {
    /// Rule name, used verbatim as the dispatch key.
    pub name: String,

    /// Optional single argument (`minLength:3` parses to `Some("3")`).
    pub argument: Option<String>,

    /// True when a `no-sanitize` modifier is present.
    pub suppress_sanitize: bool,
}

impl RuleToken {
    /// Parses a raw rule token.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::TooManyArguments`] when the primary part
    /// contains more than one `:`-delimited argument. The grammar
    /// supports exactly one; truncating the rest would silently drop
    /// schema data.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldsift::RuleToken;
    ///
    /// let token = RuleToken::parse("minLength:3").unwrap();
    /// assert_eq!(token.name, "minLength");
    /// assert_eq!(token.argument.as_deref(), Some("3"));
    /// assert!(!token.suppress_sanitize);
    ///
    /// let token = RuleToken::parse("string|no-sanitize").unwrap();
    /// assert!(token.suppress_sanitize);
    /// ```
    pub fn parse(token: &str) -> Result<Self, SchemaError> {
        let mut parts = token.split('|');
        let primary = parts.next().unwrap_or("");
        let suppress_sanitize = parts.any(|modifier| modifier == NO_SANITIZE);

        let mut segments = primary.split(':');
        let name = segments.next().unwrap_or("").to_owned();
        let argument = segments.next().map(str::to_owned);
        if segments.next().is_some() {
            return Err(SchemaError::TooManyArguments {
                token: token.to_owned(),
            });
        }

        Ok(Self {
            name,
            argument,
            suppress_sanitize,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_rule() {
        let token = RuleToken::parse("required").unwrap();
        assert_eq!(token.name, "required");
        assert_eq!(token.argument, None);
        assert!(!token.suppress_sanitize);
    }

    #[test]
    fn rule_with_argument() {
        let token = RuleToken::parse("maxLength:255").unwrap();
        assert_eq!(token.name, "maxLength");
        assert_eq!(token.argument.as_deref(), Some("255"));
    }

    #[test]
    fn no_sanitize_modifier() {
        let token = RuleToken::parse("string|no-sanitize").unwrap();
        assert_eq!(token.name, "string");
        assert!(token.suppress_sanitize);
    }

    #[test]
    fn no_sanitize_after_argument() {
        let token = RuleToken::parse("minLength:3|no-sanitize").unwrap();
        assert_eq!(token.name, "minLength");
        assert_eq!(token.argument.as_deref(), Some("3"));
        assert!(token.suppress_sanitize);
    }

    #[test]
    fn unknown_modifiers_are_ignored() {
        let token = RuleToken::parse("string|bail|uppercase").unwrap();
        assert_eq!(token.name, "string");
        assert!(!token.suppress_sanitize);
    }

    #[test]
    fn no_sanitize_anywhere_among_modifiers() {
        let token = RuleToken::parse("string|bail|no-sanitize").unwrap();
        assert!(token.suppress_sanitize);
    }

    #[test]
    fn modifiers_do_not_leak_into_argument() {
        let token = RuleToken::parse("array:int|no-sanitize").unwrap();
        assert_eq!(token.argument.as_deref(), Some("int"));
        assert!(token.suppress_sanitize);
    }

    #[test]
    fn two_arguments_rejected() {
        let fault = RuleToken::parse("range:1:9").unwrap_err();
        assert_eq!(
            fault,
            SchemaError::TooManyArguments {
                token: "range:1:9".into()
            }
        );
    }

    #[test]
    fn empty_argument_is_preserved() {
        // `rule:` declares an empty argument rather than none; whether
        // that is meaningful is up to the rule.
        let token = RuleToken::parse("minLength:").unwrap();
        assert_eq!(token.argument.as_deref(), Some(""));
    }
}
