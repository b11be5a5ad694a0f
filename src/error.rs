//! Error types for rule failures and schema faults.
//!
//! Two categories are kept strictly apart:
//!
//! - [`ValidationError`] — the supplied data broke a rule. Returned to
//!   the caller, one per run (the pipeline is fail-fast).
//! - [`SchemaError`] — the rule declarations themselves are wrong
//!   (unknown rule name, malformed token). These are authoring bugs,
//!   so the pipeline surfaces them as panics; the enum exists so the
//!   parser and registry stay testable without panic machinery.
//!
//! All string fields of [`ValidationError`] use `Cow<'static, str>` for
//! zero-allocation in the common case of static codes and messages.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A failed rule check for a single field.
///
/// The `code` is the rule name exactly as it appears in the schema
/// (`"required"`, `"int"`, `"minLength"`, ...), so callers can match on
/// it programmatically; `params` carries the violated bound or the
/// offending element for message templating.
///
/// # Examples
///
/// ```
/// use fieldsift::ValidationError;
///
/// let error = ValidationError::new("minLength", "must be at least 3 characters")
///     .with_field("username")
///     .with_param("min", "3")
///     .with_param("actual", "1");
///
/// assert_eq!(error.code, "minLength");
/// assert_eq!(error.param("min"), Some("3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Rule code, matching the registry key of the rule that failed.
    pub code: Cow<'static, str>,

    /// Human-readable message in English.
    pub message: Cow<'static, str>,

    /// Field the failure applies to.
    pub field: Option<Cow<'static, str>>,

    /// Parameters for the error message template.
    ///
    /// Stored as ordered key-value pairs (typically 0-2 params).
    /// Example: `[("min", "3"), ("actual", "1")]`
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: Vec::new(),
        }
    }

    /// Sets the field this error applies to.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// The field this error applies to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", field, self.code, self.message)?;
        } else {
            write!(f, "{}: {}", self.code, self.message)?;
        }

        if !self.params.is_empty() {
            write!(f, " (")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, ")")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// Creates a "required" error for an absent field.
    pub fn required(field: impl Into<Cow<'static, str>>) -> Self {
        Self::new("required", "field is required").with_field(field)
    }

    /// Creates an "int" error for a value that is not an integer.
    pub fn not_int(field: impl Into<Cow<'static, str>>) -> Self {
        Self::new("int", "value is not an integer").with_field(field)
    }

    /// Creates a "string" error for a non-string value.
    pub fn not_string(field: impl Into<Cow<'static, str>>) -> Self {
        Self::new("string", "value is not a string").with_field(field)
    }

    /// Creates an "array" error for a non-array value.
    pub fn not_array(field: impl Into<Cow<'static, str>>) -> Self {
        Self::new("array", "value is not an array").with_field(field)
    }

    /// Creates an "array" error citing the first element that failed
    /// the declared element type.
    pub fn bad_element(field: impl Into<Cow<'static, str>>, element: &Value) -> Self {
        Self::new("array", format!("element {element} is not an integer"))
            .with_field(field)
            .with_param("element", element.to_string())
    }

    /// Creates an "email" error.
    pub fn invalid_email(field: impl Into<Cow<'static, str>>) -> Self {
        Self::new("email", "value is not a valid email address").with_field(field)
    }

    /// Creates a "date" error.
    pub fn invalid_date(field: impl Into<Cow<'static, str>>) -> Self {
        Self::new("date", "value is not a valid YYYY-MM-DD date").with_field(field)
    }

    /// Creates a "minLength" error.
    pub fn min_length(field: impl Into<Cow<'static, str>>, min: usize, actual: usize) -> Self {
        Self::new("minLength", format!("must be at least {min} characters"))
            .with_field(field)
            .with_param("min", min.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates a "maxLength" error.
    pub fn max_length(field: impl Into<Cow<'static, str>>, max: usize, actual: usize) -> Self {
        Self::new("maxLength", format!("must be at most {max} characters"))
            .with_field(field)
            .with_param("max", max.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates a type-mismatch error under the given rule code.
    pub fn type_mismatch(
        code: impl Into<Cow<'static, str>>,
        field: impl Into<Cow<'static, str>>,
        expected: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(code, "value has the wrong type")
            .with_field(field)
            .with_param("expected", expected)
    }
}

// ============================================================================
// SCHEMA ERROR
// ============================================================================

/// A schema authoring mistake.
///
/// These cannot be caused by the data under validation, only by the
/// rule declarations, so [`Pipeline::run`](crate::Pipeline::run) treats
/// them as defects and panics with the fault's message instead of
/// returning it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A rule token carried more than one `:`-delimited argument.
    #[error("rule token `{token}` carries more than one argument")]
    TooManyArguments {
        /// The offending raw token.
        token: String,
    },

    /// A schema names a rule with no registered validator.
    #[error("no validator registered for rule `{rule}`")]
    UnknownRule {
        /// The rule name that failed to resolve.
        rule: String,
    },

    /// A rule that requires an argument was declared without one.
    #[error("rule `{rule}` requires an argument")]
    MissingArgument {
        /// The rule name.
        rule: String,
    },

    /// A rule argument could not be interpreted.
    #[error("rule `{rule}` cannot use argument `{argument}`")]
    InvalidArgument {
        /// The rule name.
        rule: String,
        /// The raw argument.
        argument: String,
    },
}

// ============================================================================
// TESTS
// ============================================================================
