//! The per-field rule execution loop.
//!
//! [`Pipeline::run`] walks the schema in declaration order and, for
//! each field, either skips it (absent and not required) or executes
//! its rule tokens left to right: parse, validate, sanitize, then —
//! once every rule has passed — copies the field's final value into
//! the result. The first rule failure aborts the whole run.

use tracing::{debug, trace};

use crate::error::{SchemaError, ValidationError};
use crate::registry::Registry;
use crate::token::RuleToken;
use crate::validators::is_present;
use crate::{Params, Schema};

/// Literal token whose presence in a field's rule list makes the field
/// mandatory. The skip decision checks raw tokens, before any parsing.
const REQUIRED_TOKEN: &str = "required";

/// Executes schemas against parameter maps using the rules of a
/// [`Registry`].
///
/// A pipeline is cheap to build and immutable afterwards; build one,
/// then share it by reference for as many runs as needed.
#[derive(Debug)]
pub struct Pipeline {
    registry: Registry,
}

impl Pipeline {
    /// Creates a pipeline over the built-in rules.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Creates a pipeline over a caller-assembled registry.
    #[must_use]
    pub fn with_registry(registry: Registry) -> Self {
        Self { registry }
    }

    /// Read access to the dispatch tables.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Runs `schema` against `params`.
    ///
    /// `params` is the run's working set: after each passing rule, the
    /// matching sanitizer (when registered and not suppressed by
    /// `no-sanitize`) produces a replacement value that is written back
    /// before the next rule reads the field. On success the returned
    /// map holds exactly the processed, passing fields with their
    /// final values; skipped fields are absent entirely. A JSON null
    /// value counts as absent, both here and for `required`.
    ///
    /// # Errors
    ///
    /// Returns the first rule failure, in field-then-rule declaration
    /// order. The run aborts immediately: later rules and fields are
    /// never evaluated and no partial result is produced.
    ///
    /// # Panics
    ///
    /// Panics on schema authoring faults — a rule name with no
    /// registered validator, or a token carrying more than one
    /// argument. These indicate a typo in the rule declarations, not
    /// bad input data (see [`SchemaError`]).
    pub fn run(&self, mut params: Params, schema: &Schema) -> Result<Params, ValidationError> {
        let mut passed = Params::new();

        for (field, tokens) in schema {
            if !tokens.iter().any(|raw| raw == REQUIRED_TOKEN) && !is_present(&params, field) {
                trace!(%field, "absent optional field skipped");
                continue;
            }

            for raw in tokens {
                let token = match RuleToken::parse(raw) {
                    Ok(token) => token,
                    Err(fault) => panic!("{fault}"),
                };

                let validator = self.registry.validator(&token.name).unwrap_or_else(|| {
                    panic!(
                        "{}",
                        SchemaError::UnknownRule {
                            rule: token.name.clone()
                        }
                    )
                });

                trace!(%field, rule = %token.name, "applying rule");
                if let Err(error) = validator(&params, field, token.argument.as_deref()) {
                    debug!(%field, rule = %token.name, %error, "validation failed");
                    return Err(error);
                }

                if token.suppress_sanitize {
                    continue;
                }
                if let Some(sanitizer) = self.registry.sanitizer(&token.name) {
                    if let Some(current) = params.get(field.as_str()) {
                        let replacement = sanitizer(current);
                        params.insert(field.clone(), replacement);
                    }
                }
            }

            // A field can only be absent here when a custom validator
            // tolerated the absence; it stays out of the result.
            if let Some(value) = params.get(field.as_str()) {
                passed.insert(field.clone(), value.clone());
            }
        }

        Ok(passed)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
