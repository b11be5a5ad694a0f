//! Rule dispatch tables.
//!
//! A [`Registry`] maps rule names to behavior: every name used by a
//! schema must resolve to a validator, and may additionally resolve to
//! a sanitizer. The two tables are independent — a rule without a
//! sanitizer entry simply skips the sanitize step.
//!
//! Registration happens up front; once a registry is handed to a
//! [`Pipeline`](crate::Pipeline) it is only ever read, so a built
//! pipeline can be shared across threads by reference.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::Params;
use crate::error::ValidationError;
use crate::{sanitizers, validators};

/// Boxed validator behavior: inspects `field` within the working set,
/// with the optional rule argument from the token.
pub type ValidatorFn =
    Box<dyn Fn(&Params, &str, Option<&str>) -> Result<(), ValidationError> + Send + Sync>;

/// Boxed sanitizer behavior: returns the replacement value for a field.
pub type SanitizerFn = Box<dyn Fn(&Value) -> Value + Send + Sync>;

/// Lookup tables from rule name to validator and sanitizer behavior.
///
/// # Examples
///
/// Extending the built-in vocabulary with a custom rule:
///
/// ```
/// use fieldsift::{Registry, ValidationError};
/// use serde_json::Value;
///
/// let mut registry = Registry::new();
/// registry.register_validator("uppercase", |params, field, _argument| {
///     match params.get(field) {
///         Some(Value::String(s)) if s.chars().all(char::is_uppercase) => Ok(()),
///         _ => Err(ValidationError::new("uppercase", "value is not uppercase")
///             .with_field(field.to_owned())),
///     }
/// });
/// assert!(registry.validator("uppercase").is_some());
/// assert!(registry.sanitizer("uppercase").is_none());
/// ```
pub struct Registry {
    validators: HashMap<String, ValidatorFn>,
    sanitizers: HashMap<String, SanitizerFn>,
}

impl Registry {
    /// Creates a registry pre-populated with the built-in rules.
    ///
    /// Validators: `required`, `int`, `string`, `array`, `email`,
    /// `date`, `minLength`, `maxLength`. Sanitizers: `int`, `string`,
    /// `email`.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register_validator("required", validators::required);
        registry.register_validator("int", validators::int);
        registry.register_validator("string", validators::string);
        registry.register_validator("array", validators::array);
        registry.register_validator("email", validators::email);
        registry.register_validator("date", validators::date);
        registry.register_validator("minLength", validators::min_length);
        registry.register_validator("maxLength", validators::max_length);

        registry.register_sanitizer("int", sanitizers::int);
        registry.register_sanitizer("string", sanitizers::string);
        registry.register_sanitizer("email", sanitizers::email);

        registry
    }

    /// Creates a registry with no rules at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            validators: HashMap::new(),
            sanitizers: HashMap::new(),
        }
    }

    /// Registers or replaces the validator behind `name`.
    pub fn register_validator<F>(&mut self, name: impl Into<String>, validator: F)
    where
        F: Fn(&Params, &str, Option<&str>) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.validators.insert(name.into(), Box::new(validator));
    }

    /// Registers or replaces the sanitizer behind `name`.
    pub fn register_sanitizer<F>(&mut self, name: impl Into<String>, sanitizer: F)
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.sanitizers.insert(name.into(), Box::new(sanitizer));
    }

    /// The validator registered under `name`, if any.
    #[must_use]
    pub fn validator(&self, name: &str) -> Option<&ValidatorFn> {
        self.validators.get(name)
    }

    /// The sanitizer registered under `name`, if any. Absence is the
    /// normal state for most rules.
    #[must_use]
    pub fn sanitizer(&self, name: &str) -> Option<&SanitizerFn> {
        self.sanitizers.get(name)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut validators: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        let mut sanitizers: Vec<&str> = self.sanitizers.keys().map(String::as_str).collect();
        validators.sort_unstable();
        sanitizers.sort_unstable();
        f.debug_struct("Registry")
            .field("validators", &validators)
            .field("sanitizers", &sanitizers)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered() {
        let registry = Registry::new();
        for rule in [
            "required",
            "int",
            "string",
            "array",
            "email",
            "date",
            "minLength",
            "maxLength",
        ] {
            assert!(registry.validator(rule).is_some(), "validator {rule}");
        }
        for rule in ["int", "string", "email"] {
            assert!(registry.sanitizer(rule).is_some(), "sanitizer {rule}");
        }
    }

    #[test]
    fn most_rules_have_no_sanitizer() {
        let registry = Registry::new();
        for rule in ["required", "array", "date", "minLength", "maxLength"] {
            assert!(registry.sanitizer(rule).is_none(), "sanitizer {rule}");
        }
    }

    #[test]
    fn empty_has_nothing() {
        let registry = Registry::empty();
        assert!(registry.validator("required").is_none());
        assert!(registry.sanitizer("int").is_none());
    }

    #[test]
    fn registration_replaces_existing_entries() {
        let mut registry = Registry::new();
        registry.register_validator("int", |_, _, _| Ok(()));

        let params = Params::new();
        let validator = registry.validator("int").unwrap();
        // the replacement tolerates the absent field the built-in rejects
        assert!(validator(&params, "whatever", None).is_ok());
    }

    #[test]
    fn debug_lists_registered_names() {
        let registry = Registry::new();
        let rendered = format!("{registry:?}");
        assert!(rendered.contains("minLength"));
        assert!(rendered.contains("sanitizers"));
    }
}
